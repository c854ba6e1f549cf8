//! Feedtrawl: a checkpointing crawler for infinite-scroll collection feeds
//!
//! This crate implements the crawl/checkpoint engine for traversing a
//! paginated content feed through an authenticated browsing session,
//! discovering named collections and their items, and durably snapshotting
//! progress after every completed collection so an interrupted run can be
//! resumed without data loss.
//!
//! The browsing session itself and the logic that reads rendered content are
//! external collaborators, consumed through the [`session::SessionDriver`]
//! and [`extract::PageExtractor`] traits.

pub mod checkpoint;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod session;

use thiserror::Error;

/// Main error type for feedtrawl operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] extract::ExtractionError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] checkpoint::CheckpointError),

    #[error("Invalid collection URL {url}: {source}")]
    InvalidCollectionUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for feedtrawl operations
pub type Result<T> = std::result::Result<T, TrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checkpoint::{read_snapshot, CheckpointSink, JsonCheckpointWriter};
pub use config::Config;
pub use crawler::{CollectionCrawler, CrawlReport, RateLimiter, ScrollPager};
pub use extract::{CollectionDescriptor, ItemDescriptor, PageExtractor};
pub use model::{Collection, Item};
pub use session::{SessionDriver, WaitPolicy};
