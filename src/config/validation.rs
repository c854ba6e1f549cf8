use crate::config::types::{CheckpointConfig, Config, CrawlerConfig};
use crate::ConfigError;
use std::path::Path;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_checkpoint_config(&config.checkpoint)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // root_max_scrolls >= 0 is always true for u32; zero means "take the
    // page as initially rendered" and is allowed.

    if config.stall_threshold < 1 {
        return Err(ConfigError::Validation(format!(
            "stall_threshold must be >= 1, got {}",
            config.stall_threshold
        )));
    }

    // A threshold of 1 terminates on the first flat sample, which jittery
    // lazy-loading can trigger well before the feed is exhausted.
    if config.stall_threshold == 1 {
        tracing::warn!(
            "stall_threshold of 1 may end pagination prematurely on slow-loading feeds; \
             2 or more is recommended"
        );
    }

    if config.settle_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "settle_delay_ms must be >= 100ms to give lazy content a chance to render, got {}ms",
            config.settle_delay_ms
        )));
    }

    if config.selector_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "selector_timeout_ms must be >= 1000ms, got {}ms",
            config.selector_timeout_ms
        )));
    }

    Ok(())
}

/// Validates checkpoint configuration
fn validate_checkpoint_config(config: &CheckpointConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "checkpoint path cannot be empty".to_string(),
        ));
    }

    // The parent directory must already exist; the writer renames into it
    // and will not create directories on the fly.
    let path = Path::new(&config.path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(ConfigError::Validation(format!(
                "checkpoint directory does not exist: {}",
                parent.display()
            )));
        }
    }

    Ok(())
}
