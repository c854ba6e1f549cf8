use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for feedtrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub checkpoint: CheckpointConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum scroll steps on the root listing page
    #[serde(rename = "root-max-scrolls")]
    pub root_max_scrolls: u32,

    /// Maximum scroll steps per collection page (smaller budget)
    #[serde(rename = "collection-max-scrolls")]
    pub collection_max_scrolls: u32,

    /// Time to wait after each scroll step for lazy content to render (milliseconds)
    #[serde(rename = "settle-delay-ms")]
    pub settle_delay_ms: u64,

    /// Consecutive zero-growth scroll steps before pagination is considered stalled
    #[serde(rename = "stall-threshold")]
    pub stall_threshold: u32,

    /// Delay between consecutive collection expansions (milliseconds)
    #[serde(rename = "collection-delay-ms")]
    pub collection_delay_ms: u64,

    /// How long to wait for a collection page's content selector (milliseconds)
    #[serde(rename = "selector-timeout-ms")]
    pub selector_timeout_ms: u64,
}

/// Checkpoint output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckpointConfig {
    /// Path to the checkpoint JSON document
    pub path: String,
}

impl CrawlerConfig {
    /// Settle delay as a [`Duration`]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Inter-collection delay as a [`Duration`]
    pub fn collection_delay(&self) -> Duration {
        Duration::from_millis(self.collection_delay_ms)
    }

    /// Selector wait timeout as a [`Duration`]
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            root_max_scrolls: 10,
            collection_max_scrolls: 5,
            settle_delay_ms: 2000,
            stall_threshold: 2,
            collection_delay_ms: 2000,
            selector_timeout_ms: 10_000,
        }
    }
}
