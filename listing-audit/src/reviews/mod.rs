//! Paginated review collection.
//!
//! Pages are requested one after another, starting at page 1, until the cap
//! is reached, a page comes back empty, a fetch fails, the page budget runs
//! out or the optional deadline passes. Every one of these is a normal stop:
//! the caller always gets whatever was gathered so far.

pub mod policy;

pub use policy::ReviewPolicy;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::traits::ReviewPageFetcher;
use crate::types::{ItemId, ReviewSet};

/// Collects up to `policy.cap()` reviews for `item`.
pub async fn collect(
    fetcher: &dyn ReviewPageFetcher,
    item: &ItemId,
    policy: &ReviewPolicy,
) -> ReviewSet {
    let cap = policy.cap();
    let started = Instant::now();
    let mut reviews: Vec<String> = Vec::with_capacity(cap);
    let mut page: u32 = 1;

    while reviews.len() < cap {
        if page > policy.max_pages {
            debug!(item = %item, max_pages = policy.max_pages, "page budget exhausted");
            break;
        }
        if let Some(deadline) = policy.deadline {
            if started.elapsed() >= deadline {
                warn!(item = %item, page, ?deadline, "review deadline reached, keeping partial set");
                break;
            }
        }

        let batch = match fetcher.fetch_page(item, page).await {
            Ok(batch) => batch,
            Err(err) => {
                debug!(item = %item, page, error = %err, "review page fetch failed, treating as exhaustion");
                break;
            }
        };
        if batch.is_empty() {
            debug!(item = %item, page, "empty review page");
            break;
        }

        debug!(item = %item, page, count = batch.len(), "review page fetched");
        reviews.extend(batch);
        if reviews.len() >= cap {
            break;
        }

        page += 1;
        sleep(policy.next_pause()).await;
    }

    let set = ReviewSet::truncated(reviews, cap);
    info!(item = %item, reviews = set.len(), pages = page, "review collection finished");
    set
}
