use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Longest lifetime accepted for the cookie mirror. Browsers cap cookies at 400 days.
pub const MAX_COOKIE_AGE_DAYS: i64 = 400;

/// Cookie mirror and durable storage settings for the session.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
    #[serde(default)]
    pub storage: StorageBackend,
}

impl SessionConfig {
    /// Rejects a cookie lifetime outside `1..=MAX_COOKIE_AGE_DAYS`.
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_COOKIE_AGE_DAYS).contains(&self.cookie_max_age_days) {
            return Err(format!(
                "session.cookie_max_age_days must be between 1 and {}, got {}",
                MAX_COOKIE_AGE_DAYS, self.cookie_max_age_days
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_max_age_days: default_cookie_max_age_days(),
            storage: StorageBackend::default(),
        }
    }
}

/// The durable session backends. We differentiate them via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum StorageBackend {
    #[serde(rename = "file")]
    File { path: String },
    #[serde(rename = "memory")]
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::File {
            path: "./auth-storage.json".to_string(),
        }
    }
}

fn default_cookie_name() -> String {
    "auth-token".to_string()
}

fn default_cookie_max_age_days() -> i64 {
    7
}
