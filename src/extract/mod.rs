//! Page extractor seam
//!
//! The crawl algorithm is decoupled from any specific rendering or
//! automation technology: everything that reads the current rendered state
//! into structured records lives behind [`PageExtractor`]. A production
//! extractor evaluates DOM queries through the session driver; tests supply
//! a scripted fake.

use crate::session::SessionDriver;
use async_trait::async_trait;
use thiserror::Error;

/// Errors produced while reading rendered content
///
/// Extraction failures are recoverable by policy: during expansion they
/// yield an empty item list for that collection, during discovery they abort
/// the run (see the crawler module for the rationale).
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Rendered content did not match the expected shape: {0}")]
    UnexpectedShape(String),

    #[error("Extraction script failed: {0}")]
    ScriptFailed(String),
}

/// Result type for extraction operations
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// A collection discovered on the root listing, before expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDescriptor {
    /// Account that owns the collection
    pub owner: String,

    /// Human-readable collection name
    pub name: String,

    /// Globally unique collection id
    pub id: String,

    /// URL of the collection's listing page
    pub url: String,
}

/// An item read from a collection's listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    /// Item id, unique within the owning collection
    pub id: String,

    /// Item URL
    pub url: String,

    /// Opaque detail record, when the extractor captures one
    pub detail: Option<serde_json::Value>,
}

/// Reads the current rendered state into structured descriptors.
#[async_trait]
pub trait PageExtractor: Send {
    /// Extracts candidate collections from the root listing currently
    /// rendered in the session. Order is preserved; duplicates are the
    /// crawler's problem.
    async fn extract_collections(
        &mut self,
        session: &mut dyn SessionDriver,
    ) -> ExtractionResult<Vec<CollectionDescriptor>>;

    /// Extracts the ordered items from the collection page currently
    /// rendered in the session.
    async fn extract_items(
        &mut self,
        session: &mut dyn SessionDriver,
    ) -> ExtractionResult<Vec<ItemDescriptor>>;

    /// Selector the crawler should wait for after navigating to a collection
    /// page, before asking for items. `None` skips the wait.
    fn items_ready_selector(&self) -> Option<&str> {
        None
    }
}
