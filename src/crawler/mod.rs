//! Crawl engine
//!
//! This module contains the two-phase crawl orchestration
//! ([`CollectionCrawler`]), scroll-driven pagination ([`ScrollPager`]), and
//! the inter-collection pacing policy ([`RateLimiter`]).

mod coordinator;
mod limiter;
mod pager;

pub use coordinator::{CollectionCrawler, CollectionFailure, CrawlReport, ExpansionOutcome};
pub use limiter::RateLimiter;
pub use pager::{GrowthSample, PagerReport, ScrollPager};
