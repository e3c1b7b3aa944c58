//! # Redis
//!
//! Durable RSVP storage, used when `REDIS_URL` is configured.
//!
//! ## Layout
//!
//! - `rsvp:next_id`: counter, `INCR` hands out ids so concurrent servers never share one
//! - `rsvp:records`: hash of id to JSON record
//! - `rsvp:emails`: hash of lowercased email to id, O(1) duplicate lookups
//!
//! Both hashes are written in one `MULTI` so a record never exists without its
//! email entry.
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use redis::{
    AsyncCommands, Client, RedisError,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::{
    models::{NewRsvp, Rsvp},
    store::{RsvpStore, StoreError},
};

pub const DEFAULT_PREFIX: &str = "rsvp";

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, RedisError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url)?;

    client.get_connection_manager_with_config(config).await
}

pub struct RedisStore {
    connection: ConnectionManager,
    next_id_key: String,
    records_key: String,
    emails_key: String,
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self::with_prefix(connection, DEFAULT_PREFIX)
    }

    pub fn with_prefix(connection: ConnectionManager, prefix: &str) -> Self {
        Self {
            connection,
            next_id_key: format!("{prefix}:next_id"),
            records_key: format!("{prefix}:records"),
            emails_key: format!("{prefix}:emails"),
        }
    }
}

#[async_trait]
impl RsvpStore for RedisStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn list(&self) -> Result<Vec<Rsvp>, StoreError> {
        let mut connection = self.connection.clone();
        let values: Vec<String> = connection.hvals(&self.records_key).await?;

        let mut rsvps = values
            .iter()
            .map(|value| serde_json::from_str::<Rsvp>(value))
            .collect::<Result<Vec<_>, _>>()?;
        rsvps.sort_by_key(|rsvp| rsvp.id);

        Ok(rsvps)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Rsvp>, StoreError> {
        let mut connection = self.connection.clone();

        let id: Option<u64> = connection
            .hget(&self.emails_key, email.to_lowercase())
            .await?;
        let Some(id) = id else {
            return Ok(None);
        };

        let value: Option<String> = connection.hget(&self.records_key, id).await?;

        Ok(value.map(|v| serde_json::from_str(&v)).transpose()?)
    }

    async fn create(&self, new_rsvp: NewRsvp) -> Result<Rsvp, StoreError> {
        let mut connection = self.connection.clone();

        let id: u64 = connection.incr(&self.next_id_key, 1).await?;
        let rsvp = Rsvp::from_new(new_rsvp, id, Utc::now());
        let value = serde_json::to_string(&rsvp)?;

        redis::pipe()
            .atomic()
            .hset(&self.records_key, id, value)
            .ignore()
            .hset(&self.emails_key, rsvp.email.to_lowercase(), id)
            .ignore()
            .query_async::<()>(&mut connection)
            .await?;

        Ok(rsvp)
    }
}
