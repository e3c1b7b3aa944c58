//! # Store
//!
//! Holds RSVPs and issues their ids.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: records live as long as the process, default backend
//! - [`RedisStore`](crate::database::RedisStore): used when `REDIS_URL` is configured
//!
//! Ids start at 1 and are never reused. Handlers only see the [`RsvpStore`]
//! trait so they do not care which backend is running.
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{NewRsvp, Rsvp};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait RsvpStore: Send + Sync {
    fn backend(&self) -> &'static str;

    /// All records, oldest first.
    async fn list(&self) -> Result<Vec<Rsvp>, StoreError>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<Rsvp>, StoreError>;

    async fn create(&self, new_rsvp: NewRsvp) -> Result<Rsvp, StoreError>;
}

#[derive(Default)]
struct Records {
    rsvps: Vec<Rsvp>,
    last_id: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RsvpStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Rsvp>, StoreError> {
        Ok(self.records.read().await.rsvps.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Rsvp>, StoreError> {
        let records = self.records.read().await;
        let email = email.to_lowercase();

        Ok(records
            .rsvps
            .iter()
            .find(|rsvp| rsvp.email.to_lowercase() == email)
            .cloned())
    }

    async fn create(&self, new_rsvp: NewRsvp) -> Result<Rsvp, StoreError> {
        let mut records = self.records.write().await;

        records.last_id += 1;
        let rsvp = Rsvp::from_new(new_rsvp, records.last_id, Utc::now());
        records.rsvps.push(rsvp.clone());

        Ok(rsvp)
    }
}
