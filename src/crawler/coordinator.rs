//! Crawl coordinator - main crawl orchestration logic
//!
//! The crawl runs in two phases against a single browsing session:
//!
//! - **Discovery**: paginate the root listing, extract candidate
//!   collections, and deduplicate them by id. A failure here is fatal and
//!   nothing is checkpointed - persisting an incomplete collection map would
//!   silently drop whole collections on resume.
//! - **Expansion**: visit each collection strictly sequentially, paginate
//!   its page with a smaller budget, extract its items, and checkpoint the
//!   full accumulated list after every collection. A failure isolated to one
//!   collection records it with empty items and the run continues, keeping
//!   the salvage value of a long crawl.
//!
//! The asymmetry is deliberate: losing the whole map of collections is
//! unrecoverable information loss, losing one collection's items is not.

use crate::checkpoint::CheckpointSink;
use crate::config::CrawlerConfig;
use crate::crawler::limiter::RateLimiter;
use crate::crawler::pager::ScrollPager;
use crate::extract::{CollectionDescriptor, PageExtractor};
use crate::model::{Collection, Item};
use crate::session::{SessionDriver, WaitPolicy};
use crate::TrawlError;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use url::Url;

/// Result of expanding a single collection.
///
/// The "continue past a failed collection" policy is an explicit branch on
/// this type in the expansion loop, not an exception-catching side effect.
#[derive(Debug)]
pub enum ExpansionOutcome {
    /// Items were extracted; the list may legitimately be empty.
    Expanded(Vec<Item>),

    /// Expansion failed; the collection is recorded with no items.
    Failed(TrawlError),
}

/// A collection whose expansion failed during the run
#[derive(Debug, Clone)]
pub struct CollectionFailure {
    pub id: String,
    pub name: String,
    pub error: String,
}

/// Summary of a completed crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// All discovered collections, in discovery order, with whatever items
    /// their expansion produced
    pub collections: Vec<Collection>,

    /// Collections whose expansion failed (recorded with empty items)
    pub failures: Vec<CollectionFailure>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Total number of items across all collections
    pub fn total_items(&self) -> usize {
        self.collections.iter().map(|c| c.items.len()).sum()
    }
}

/// Orchestrates discovery and expansion against one browsing session.
///
/// The session is constructed once by the caller and moved in; the crawler
/// drives it for the duration of the run but never manages its lifecycle
/// (no closing, no re-authentication). All operations against it are
/// strictly sequential - the session's navigation state is exclusive, and
/// parallel fan-out would both corrupt crawl state and look automated to
/// the remote system.
pub struct CollectionCrawler<S, E, W> {
    session: S,
    extractor: E,
    sink: W,
    config: CrawlerConfig,
    limiter: RateLimiter,
}

impl<S, E, W> CollectionCrawler<S, E, W>
where
    S: SessionDriver,
    E: PageExtractor,
    W: CheckpointSink,
{
    /// Creates a crawler.
    ///
    /// The session must already be navigated to the root listing page and
    /// authenticated; both are the caller's responsibility.
    pub fn new(session: S, extractor: E, sink: W, config: CrawlerConfig) -> Self {
        let limiter = RateLimiter::new(config.collection_delay());
        Self {
            session,
            extractor,
            sink,
            config,
            limiter,
        }
    }

    /// Hands the collaborators back to the caller.
    pub fn into_parts(self) -> (S, E, W) {
        (self.session, self.extractor, self.sink)
    }

    /// Runs the full two-phase crawl.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails (nothing is checkpointed in that
    /// case) or if a checkpoint write fails. Per-collection expansion
    /// failures do not abort the run; they are reported in the
    /// [`CrawlReport`].
    pub async fn run(&mut self) -> crate::Result<CrawlReport> {
        let started_at = Utc::now();

        // Phase A: discovery. Fatal on failure, by design.
        let discovered = self.discover().await?;
        tracing::info!("Discovered {} collections", discovered.len());

        // Phase B: expansion, strictly sequential.
        let mut collections: Vec<Collection> = Vec::with_capacity(discovered.len());
        let mut failures = Vec::new();
        let total = discovered.len();

        for (index, descriptor) in discovered.into_iter().enumerate() {
            tracing::info!(
                "Expanding collection {}/{}: {} ({})",
                index + 1,
                total,
                descriptor.name,
                descriptor.id
            );

            let mut collection = Collection::new(
                descriptor.owner,
                descriptor.name,
                descriptor.id,
                descriptor.url,
            );

            match self.expand(&collection.url).await {
                ExpansionOutcome::Expanded(items) => {
                    tracing::info!(
                        "Extracted {} items from collection {}",
                        items.len(),
                        collection.id
                    );
                    collection.items = items;
                }
                ExpansionOutcome::Failed(error) => {
                    tracing::error!(
                        "Failed to expand collection {} ({}): {}",
                        collection.id,
                        collection.name,
                        error
                    );
                    failures.push(CollectionFailure {
                        id: collection.id.clone(),
                        name: collection.name.clone(),
                        error: error.to_string(),
                    });
                }
            }

            collections.push(collection);

            // Checkpoint the full accumulated list after every completed
            // collection. A failed durable write voids resumability, so it
            // aborts the run.
            self.sink.write_snapshot(&collections).await?;

            // Pace between collections, skipping the delay after the last.
            if index + 1 < total {
                self.limiter.pace().await;
            }
        }

        let finished_at = Utc::now();
        tracing::info!(
            "Crawl completed: {} collections ({} failed) in {}s",
            collections.len(),
            failures.len(),
            (finished_at - started_at).num_seconds()
        );

        Ok(CrawlReport {
            collections,
            failures,
            started_at,
            finished_at,
        })
    }

    /// Phase A: paginates the root listing and extracts the collection map.
    async fn discover(&mut self) -> crate::Result<Vec<CollectionDescriptor>> {
        let pager = ScrollPager::new(
            self.config.root_max_scrolls,
            self.config.settle_delay(),
            self.config.stall_threshold,
        );

        let report = pager.paginate(&mut self.session).await;
        tracing::debug!(
            "Root pagination: {} steps, stalled: {}",
            report.steps_taken,
            report.stalled
        );

        let raw = self
            .extractor
            .extract_collections(&mut self.session)
            .await?;

        Ok(dedup_by_id(raw))
    }

    /// Expands one collection: navigate, wait for content, paginate, extract.
    ///
    /// Every failure is folded into [`ExpansionOutcome::Failed`]; nothing
    /// here aborts the run.
    async fn expand(&mut self, url: &str) -> ExpansionOutcome {
        if let Err(source) = Url::parse(url) {
            return ExpansionOutcome::Failed(TrawlError::InvalidCollectionUrl {
                url: url.to_string(),
                source,
            });
        }

        if let Err(e) = self
            .session
            .navigate(url, WaitPolicy::DomContentLoaded)
            .await
        {
            return ExpansionOutcome::Failed(e.into());
        }

        if let Some(selector) = self.extractor.items_ready_selector() {
            let selector = selector.to_string();
            if let Err(e) = self
                .session
                .wait_for_selector(&selector, self.config.selector_timeout())
                .await
            {
                return ExpansionOutcome::Failed(e.into());
            }
        }

        let pager = ScrollPager::new(
            self.config.collection_max_scrolls,
            self.config.settle_delay(),
            self.config.stall_threshold,
        );
        let report = pager.paginate(&mut self.session).await;
        tracing::debug!(
            "Collection pagination: {} steps, stalled: {}",
            report.steps_taken,
            report.stalled
        );

        match self.extractor.extract_items(&mut self.session).await {
            Ok(descriptors) => ExpansionOutcome::Expanded(
                descriptors
                    .into_iter()
                    .map(|d| Item {
                        id: d.id,
                        url: d.url,
                        detail: d.detail,
                    })
                    .collect(),
            ),
            Err(e) => ExpansionOutcome::Failed(e.into()),
        }
    }
}

/// Deduplicates discovered collections by id, preserving first-seen order.
fn dedup_by_id(descriptors: Vec<CollectionDescriptor>) -> Vec<CollectionDescriptor> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        if seen.insert(descriptor.id.clone()) {
            unique.push(descriptor);
        } else {
            tracing::debug!("Skipping duplicate collection id {}", descriptor.id);
        }
    }

    unique
}
