//! Session driver seam
//!
//! The crawl engine never talks to a browser or network directly. Everything
//! it needs from the authenticated browsing session is expressed through the
//! [`SessionDriver`] trait: navigation, script evaluation, and waiting for a
//! selector to appear. Establishing (and authenticating) the session is the
//! driver's responsibility and must happen before the crawl starts.
//!
//! The session's navigation state is exclusive and shared, so all calls
//! against one driver are strictly sequential; the crawler never issues
//! concurrent operations against it.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a session driver
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Navigation to {url} failed: {message}")]
    NavigationFailed { url: String, message: String },

    #[error("Navigation to {url} timed out")]
    Timeout { url: String },

    #[error("Script evaluation failed: {message}")]
    EvaluateFailed { message: String },

    #[error("Selector {selector} did not appear within {timeout:?}")]
    SelectorTimeout {
        selector: String,
        timeout: Duration,
    },

    #[error("Session is not usable: {0}")]
    Unusable(String),
}

/// Result type for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// How long navigation should wait before being considered settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Return as soon as the document is parsed
    DomContentLoaded,

    /// Wait for the full load event
    Load,

    /// Wait until the network has been idle for a short window
    NetworkIdle,
}

/// A navigable, scriptable page/session.
///
/// Implementations wrap whatever automation technology actually drives the
/// remote system. Drivers are expected to enforce their own navigation
/// timeouts; the crawler adds no client-side timeout wrapper of its own.
#[async_trait]
pub trait SessionDriver: Send {
    /// Navigates the session to `url` and waits per `wait`.
    async fn navigate(&mut self, url: &str, wait: WaitPolicy) -> SessionResult<()>;

    /// Evaluates a script in the current page and returns its value.
    async fn evaluate(&mut self, script: &str) -> SessionResult<serde_json::Value>;

    /// Waits until `selector` is present in the rendered page.
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> SessionResult<()>;
}

impl SessionError {
    /// Returns true for transient failures a caller could retry with backoff.
    ///
    /// The engine itself does not retry; this classification is for callers
    /// wrapping the crawl.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NavigationFailed { .. } | Self::Timeout { .. } | Self::SelectorTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let timeout = SessionError::Timeout {
            url: "https://example.com/".to_string(),
        };
        assert!(timeout.is_transient());

        let unusable = SessionError::Unusable("not authenticated".to_string());
        assert!(!unusable.is_transient());

        let eval = SessionError::EvaluateFailed {
            message: "boom".to_string(),
        };
        assert!(!eval.is_transient());
    }
}
