//! Pacing and limits for review pagination.

use std::time::Duration;

use crate::types::MAX_REVIEWS;

/// Default number of review pages requested per audit.
pub const DEFAULT_MAX_PAGES: u32 = 20;

/// Default pause between two review page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// How the collector walks review pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPolicy {
    /// Reviews to collect at most (clamped to [`MAX_REVIEWS`]).
    pub max_reviews: usize,
    /// Pages to request at most.
    pub max_pages: u32,
    /// Fixed pause between successive page requests.
    pub inter_page_delay: Duration,
    /// Upper bound of a random extra pause added to `inter_page_delay`.
    pub inter_page_jitter: Duration,
    /// Stop requesting pages once this much time has passed.
    pub deadline: Option<Duration>,
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self {
            max_reviews: MAX_REVIEWS,
            max_pages: DEFAULT_MAX_PAGES,
            inter_page_delay: DEFAULT_PAGE_DELAY,
            inter_page_jitter: Duration::ZERO,
            deadline: None,
        }
    }
}

impl ReviewPolicy {
    /// Default limits without any pause between pages.
    pub fn immediate() -> Self {
        Self {
            inter_page_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_max_reviews(mut self, max_reviews: usize) -> Self {
        self.max_reviews = max_reviews;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_delay(mut self, delay: Duration, jitter: Duration) -> Self {
        self.inter_page_delay = delay;
        self.inter_page_jitter = jitter;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Effective review cap.
    pub fn cap(&self) -> usize {
        self.max_reviews.min(MAX_REVIEWS)
    }

    /// Pause to take before the next page request.
    pub fn next_pause(&self) -> Duration {
        let jitter_ms = u64::try_from(self.inter_page_jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return self.inter_page_delay;
        }
        self.inter_page_delay + Duration::from_millis(fastrand::u64(0..=jitter_ms))
    }
}
