use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_ENV: &str = "dev";
const DEFAULT_USER_AGENT: &str = "snoo/0.1 (rust)";
const DEFAULT_DOMAIN: &str = "http://www.reddit.com/";
const DEFAULT_SECURE_DOMAIN: &str = "https://ssl.reddit.com/";
const DEFAULT_REQUEST_INTERVAL_MS: u64 = 2000;

#[derive(Debug, Deserialize, Clone)]
pub struct RedditConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Base URL for read endpoints. Must end with a slash.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Base URL for the login endpoint. Must end with a slash.
    #[serde(default = "default_secure_domain")]
    pub secure_domain: String,
    /// Minimum time between two outbound requests, in milliseconds.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,

    #[serde(skip)]
    pub is_prod: bool,
}

impl RedditConfig {
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    /// Points both the read and login endpoints at the same base URL. Used to
    /// talk to local stand-ins of the API.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        self.secure_domain = domain.clone();
        self.domain = domain;
        self
    }
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            domain: default_domain(),
            secure_domain: default_secure_domain(),
            request_interval_ms: default_request_interval_ms(),
            is_prod: false,
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_owned()
}

fn default_secure_domain() -> String {
    DEFAULT_SECURE_DOMAIN.to_owned()
}

fn default_request_interval_ms() -> u64 {
    DEFAULT_REQUEST_INTERVAL_MS
}

/// Loads the client config from the JSON file at `path`.
pub fn load_config(path: &Path) -> Result<RedditConfig> {
    let mut contents =
        fs::read(path).with_context(|| format!("Cannot open JSON config at {:?}", path))?;
    let mut config: RedditConfig = simd_json::serde::from_slice(&mut contents)
        .with_context(|| format!("Cannot parse JSON config at {:?}", path))?;
    config.is_prod = get_environment() != DEFAULT_ENV;
    Ok(config)
}

/// Resolves `/etc/snoo/<env>`, where `<env>` comes from `SNOO_ENV`.
pub fn get_config_path() -> Box<Path> {
    let mut buffer: PathBuf = ["/etc", "snoo"].iter().collect();
    buffer.push(get_environment());
    buffer.into_boxed_path()
}

fn get_environment() -> String {
    env::var("SNOO_ENV")
        .unwrap_or_else(|_| String::from(DEFAULT_ENV))
        .to_lowercase()
}
