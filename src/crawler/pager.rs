//! Infinite-scroll pagination
//!
//! Feeds render lazily: new content only loads once the viewport reaches the
//! bottom of the page. [`ScrollPager`] drives that loop - scroll to the
//! bottom, wait for content to settle, sample the rendered extent - until a
//! step budget runs out or growth stalls for a configured number of
//! consecutive steps.

use crate::session::SessionDriver;
use std::time::Duration;

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight)";
const SCROLL_TO_TOP: &str = "window.scrollTo(0, 0)";
const MEASURE_EXTENT: &str = "document.body.scrollHeight";

/// One pagination step's growth measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthSample {
    /// 1-based step number
    pub step: u32,

    /// Rendered content extent after this step, when it could be measured
    pub extent: Option<f64>,

    /// Whether this step showed growth over the previous measurement
    pub grew: bool,
}

/// Outcome of a pagination run
#[derive(Debug, Clone)]
pub struct PagerReport {
    /// Number of scroll steps actually issued
    pub steps_taken: u32,

    /// True if pagination ended early because growth stalled
    pub stalled: bool,

    /// Per-step growth samples, in order
    pub samples: Vec<GrowthSample>,
}

/// Drives infinite-scroll pagination on the current page.
///
/// Per-step scroll or measurement errors are logged and counted as zero
/// growth; they never abort pagination. After pagination ends the page is
/// scrolled back to the top as a courtesy reset.
#[derive(Debug, Clone)]
pub struct ScrollPager {
    max_steps: u32,
    settle_delay: Duration,
    stall_threshold: u32,
}

impl ScrollPager {
    /// Creates a pager.
    ///
    /// # Arguments
    ///
    /// * `max_steps` - Hard budget on scroll steps; never exceeded
    /// * `settle_delay` - Suspension after each scroll so lazy content can render
    /// * `stall_threshold` - Consecutive zero-growth steps that end pagination early
    pub fn new(max_steps: u32, settle_delay: Duration, stall_threshold: u32) -> Self {
        Self {
            max_steps,
            settle_delay,
            stall_threshold: stall_threshold.max(1),
        }
    }

    /// Paginates the page currently rendered in `session`.
    pub async fn paginate(&self, session: &mut dyn SessionDriver) -> PagerReport {
        let mut samples = Vec::new();
        let mut stalled = false;
        let mut stall_run = 0u32;
        let mut last_extent = self.measure(session).await;

        let mut steps_taken = 0u32;
        for step in 1..=self.max_steps {
            steps_taken = step;

            let scrolled = match session.evaluate(SCROLL_TO_BOTTOM).await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Scroll step {} failed: {}", step, e);
                    false
                }
            };

            // Let lazily-loaded content render before sampling.
            tokio::time::sleep(self.settle_delay).await;

            let extent = if scrolled {
                self.measure(session).await
            } else {
                None
            };

            let grew = match (extent, last_extent) {
                (Some(current), Some(previous)) => current > previous,
                // No baseline yet: a successful measurement counts as growth.
                (Some(_), None) => true,
                (None, _) => false,
            };

            if let Some(current) = extent {
                last_extent = Some(current);
            }

            tracing::debug!(
                "Scroll {}/{} - extent: {:?}, grew: {}",
                step,
                self.max_steps,
                extent,
                grew
            );

            samples.push(GrowthSample { step, extent, grew });

            if grew {
                stall_run = 0;
            } else {
                stall_run += 1;
                if stall_run >= self.stall_threshold {
                    tracing::debug!(
                        "Pagination stalled after {} consecutive flat steps",
                        stall_run
                    );
                    stalled = true;
                    break;
                }
            }
        }

        // Courtesy reset; not load-bearing for correctness.
        if let Err(e) = session.evaluate(SCROLL_TO_TOP).await {
            tracing::debug!("Scroll-to-top reset failed: {}", e);
        }

        PagerReport {
            steps_taken,
            stalled,
            samples,
        }
    }

    /// Samples the rendered content extent, treating any failure or
    /// unexpected value shape as unmeasurable.
    async fn measure(&self, session: &mut dyn SessionDriver) -> Option<f64> {
        match session.evaluate(MEASURE_EXTENT).await {
            Ok(value) => match value.as_f64() {
                Some(extent) => Some(extent),
                None => {
                    tracing::warn!("Extent measurement returned non-numeric value: {}", value);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Extent measurement failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionError, SessionResult, WaitPolicy};
    use async_trait::async_trait;

    /// Session fake that replays a scripted sequence of page heights and
    /// counts the scroll steps issued against it.
    struct ScriptedSession {
        heights: Vec<f64>,
        next_height: usize,
        scroll_count: u32,
        fail_scrolls: bool,
        saw_scroll_to_top: bool,
    }

    impl ScriptedSession {
        fn with_heights(heights: Vec<f64>) -> Self {
            Self {
                heights,
                next_height: 0,
                scroll_count: 0,
                fail_scrolls: false,
                saw_scroll_to_top: false,
            }
        }
    }

    #[async_trait]
    impl SessionDriver for ScriptedSession {
        async fn navigate(&mut self, _url: &str, _wait: WaitPolicy) -> SessionResult<()> {
            Ok(())
        }

        async fn evaluate(&mut self, script: &str) -> SessionResult<serde_json::Value> {
            if script == SCROLL_TO_TOP {
                self.saw_scroll_to_top = true;
                return Ok(serde_json::Value::Null);
            }
            if script == SCROLL_TO_BOTTOM {
                self.scroll_count += 1;
                if self.fail_scrolls {
                    return Err(SessionError::EvaluateFailed {
                        message: "scroll rejected".to_string(),
                    });
                }
                return Ok(serde_json::Value::Null);
            }

            // Extent measurement: replay heights, repeating the last one
            let index = self.next_height.min(self.heights.len().saturating_sub(1));
            let height = self.heights.get(index).copied().unwrap_or(0.0);
            self.next_height += 1;
            Ok(serde_json::json!(height))
        }

        async fn wait_for_selector(
            &mut self,
            _selector: &str,
            _timeout: Duration,
        ) -> SessionResult<()> {
            Ok(())
        }
    }

    fn pager(max_steps: u32, stall_threshold: u32) -> ScrollPager {
        ScrollPager::new(max_steps, Duration::ZERO, stall_threshold)
    }

    #[tokio::test]
    async fn never_exceeds_step_budget() {
        // Heights grow forever; only the budget can stop pagination
        let mut session =
            ScriptedSession::with_heights((0..100).map(|i| i as f64 * 100.0).collect());

        let report = pager(7, 2).paginate(&mut session).await;

        assert_eq!(report.steps_taken, 7);
        assert_eq!(session.scroll_count, 7);
        assert!(!report.stalled);
    }

    #[tokio::test]
    async fn stalls_after_consecutive_flat_steps() {
        // Baseline 100, one growth step, then flat
        let mut session =
            ScriptedSession::with_heights(vec![100.0, 200.0, 200.0, 200.0, 200.0, 200.0]);

        let report = pager(10, 2).paginate(&mut session).await;

        assert!(report.stalled);
        // 1 growth step + 2 flat steps
        assert_eq!(report.steps_taken, 3);
        assert!(session.scroll_count < 10);
    }

    #[tokio::test]
    async fn stall_threshold_one_stops_on_first_flat_step() {
        let mut session = ScriptedSession::with_heights(vec![100.0, 100.0]);

        let report = pager(10, 1).paginate(&mut session).await;

        assert!(report.stalled);
        assert_eq!(report.steps_taken, 1);
    }

    #[tokio::test]
    async fn scroll_errors_count_as_zero_growth() {
        let mut session = ScriptedSession::with_heights(vec![100.0]);
        session.fail_scrolls = true;

        let report = pager(10, 2).paginate(&mut session).await;

        // Two failed steps reach the stall threshold; pagination never aborts
        assert!(report.stalled);
        assert_eq!(report.steps_taken, 2);
        assert!(report.samples.iter().all(|s| !s.grew));
    }

    #[tokio::test]
    async fn zero_budget_issues_no_scrolls() {
        let mut session = ScriptedSession::with_heights(vec![100.0]);

        let report = pager(0, 2).paginate(&mut session).await;

        assert_eq!(report.steps_taken, 0);
        assert_eq!(session.scroll_count, 0);
        assert!(report.samples.is_empty());
    }

    #[tokio::test]
    async fn scrolls_back_to_top_after_pagination() {
        let mut session = ScriptedSession::with_heights(vec![100.0, 100.0]);

        pager(3, 1).paginate(&mut session).await;

        assert!(session.saw_scroll_to_top);
    }
}
