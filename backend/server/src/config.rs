use std::{
    env,
    fmt::Display,
    fs::read_to_string,
    path::{Path, PathBuf},
    str::FromStr,
};

use thiserror::Error;
use tracing::{info, warn};

pub const SECRETS_DIR: &str = "/run/secrets";

#[derive(Error, Debug)]
#[error("Invalid {key} value: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Redis backs the store when set, otherwise records stay in memory.
    pub redis_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok(), Path::new(SECRETS_DIR))
    }

    pub fn from_vars<F>(var: F, secrets_dir: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&var, "RUST_PORT", "1111")?,
            redis_url: var("REDIS_URL")
                .or_else(|| read_secret(secrets_dir, "REDIS_URL"))
                .filter(|url| !url.trim().is_empty()),
        })
    }
}

fn try_load<T, F>(var: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError {
                key: key.to_string(),
                reason: e.to_string(),
            }
        })
}

fn read_secret(secrets_dir: &Path, secret_name: &str) -> Option<String> {
    let path: PathBuf = secrets_dir.join(secret_name);

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("No {secret_name} secret at {}: {e}", path.display());
        })
        .ok()
}
