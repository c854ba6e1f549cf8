//! Configuration module for feedtrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The config is owned by whatever launcher embeds the crawl; the
//! engine only consumes the resulting [`Config`].
//!
//! # Example
//!
//! ```no_run
//! use feedtrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Root scroll budget: {}", config.crawler.root_max_scrolls);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CheckpointConfig, Config, CrawlerConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
