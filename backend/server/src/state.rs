use std::sync::Arc;

use redis::RedisError;
use tokio::sync::Mutex;
use tracing::info;

use super::{
    config::Config,
    database::{RedisStore, init_redis},
    store::{MemoryStore, RsvpStore},
};

pub struct State {
    pub config: Config,
    pub store: Arc<dyn RsvpStore>,
    /// Held across the duplicate check and the insert.
    pub submissions: Mutex<()>,
}

impl State {
    pub async fn new(config: Config) -> Result<Arc<Self>, RedisError> {
        let store: Arc<dyn RsvpStore> = match &config.redis_url {
            Some(redis_url) => {
                info!("Connecting to Redis...");
                Arc::new(RedisStore::new(init_redis(redis_url).await?))
            }
            None => Arc::new(MemoryStore::new()),
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn RsvpStore>) -> Arc<Self> {
        info!("Using {} store", store.backend());

        Arc::new(Self {
            config,
            store,
            submissions: Mutex::new(()),
        })
    }
}
