use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::SessionConfig;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "FITLOG_API_URL";

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "FITLOG_CONFIG";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend location, session persistence, route guard.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        ConfigV1 {
            logging: LoggingConfig::default(),
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            guard: GuardConfig::default(),
            bind_address: default_bind_address(),
        }
    }
}

/// Where the backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl ApiConfig {
    /// Base URL and prefix joined, without a trailing slash.
    pub fn endpoint_root(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.prefix.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

/// Path tables used by the route guard.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct GuardConfig {
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
    #[serde(default = "default_auth_paths")]
    pub auth_paths: Vec<String>,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,
    #[serde(default = "default_onboarding_path")]
    pub onboarding_path: String,
    /// Path prefixes (without the leading slash) the guard never inspects.
    #[serde(default = "default_excluded_prefixes")]
    pub excluded_prefixes: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            public_paths: default_public_paths(),
            auth_paths: default_auth_paths(),
            login_path: default_login_path(),
            dashboard_path: default_dashboard_path(),
            onboarding_path: default_onboarding_path(),
            excluded_prefixes: default_excluded_prefixes(),
        }
    }
}

/// Load config from the YAML file named by `FITLOG_CONFIG` (default "./config.yaml"),
/// with `FITLOG_API_URL` overriding the backend base URL.
pub fn load_config() -> Result<ConfigV1, figment::Error> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.yaml".to_string());
    let figment = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::raw().only(&[API_URL_ENV]).map(|_| "api.base_url".into()));
    extract(figment)
}

/// Load config from an in-memory YAML document. Environment overrides are not applied.
pub fn load_config_from_str(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    let config = match figment.extract::<Config>()? {
        Config::ConfigV1(c) => c,
    };
    config.session.validate().map_err(figment::Error::from)?;
    Ok(config)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

fn default_timeout_in_ms() -> u64 {
    30_000
}

fn default_public_paths() -> Vec<String> {
    vec!["/login".into(), "/register".into(), "/".into()]
}

fn default_auth_paths() -> Vec<String> {
    vec!["/login".into(), "/register".into()]
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

fn default_onboarding_path() -> String {
    "/onboarding".to_string()
}

fn default_excluded_prefixes() -> Vec<String> {
    vec![
        "api".into(),
        "_next/static".into(),
        "_next/image".into(),
        "favicon.ico".into(),
    ]
}
