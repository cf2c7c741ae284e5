use crate::config::RedditConfig;
use anyhow::{anyhow, Result};
use tracing::debug;

/// Installs the global tracing subscriber. Fails if one is already installed.
pub fn init(config: &RedditConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init()
        .map_err(|err| anyhow!("Failed to install tracing subscriber: {}", err))?;

    debug!("Loaded Config: {:?}", config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::init;
    use crate::config::RedditConfig;

    #[test]
    fn test_init_only_once() {
        let config = RedditConfig::default();
        assert!(init(&config).is_ok());
        assert!(init(&config).is_err());
    }
}
