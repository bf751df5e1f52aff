//! Bookings aggregator module
//!
//! Fans out over a bounded set of templates, pulls each one's bookings,
//! normalizes them and rebuilds the unified timeline wholesale. One failing
//! template never takes the pass down with it.

use anyhow::anyhow;
use log::warn;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task::JoinSet;

use crate::api::RecordSource;
use crate::error::{AppError, AppResult};
use crate::models::{Booking, FeedEntry, FeedOutcome, MeetingType, RawBooking};
use crate::utils::logging;

pub mod normalize;

pub struct FeedBuilder {
    source: Arc<dyn RecordSource>,
    fan_out: usize,
    feed: RwLock<Vec<FeedEntry>>,
}

impl FeedBuilder {
    pub fn new(source: Arc<dyn RecordSource>, fan_out: usize) -> Self {
        Self {
            source,
            fan_out,
            feed: RwLock::new(Vec::new()),
        }
    }

    /// Current feed snapshot.
    pub async fn feed(&self) -> Vec<FeedEntry> {
        self.feed.read().await.clone()
    }

    /// Rebuild the timeline from the first `fan_out` of `parents`. Per-parent
    /// fetches run concurrently; failures are logged and dropped, and once
    /// everything settles the collected bookings replace the feed, sorted
    /// descending by instant with ties keeping fetch order.
    pub async fn build_feed(&self, parents: &[MeetingType]) -> FeedOutcome {
        let started = Instant::now();
        let bounded = &parents[..parents.len().min(self.fan_out)];
        if parents.len() > bounded.len() {
            warn!(
                "Aggregating first {} of {} templates",
                bounded.len(),
                parents.len()
            );
        }

        let mut set = JoinSet::new();
        for (index, parent) in bounded.iter().enumerate() {
            let source = self.source.clone();
            let parent_id = parent.id.clone();
            set.spawn(async move { (index, source.fetch_bookings(&parent_id).await) });
        }

        let mut slots: Vec<Option<Vec<RawBooking>>> = vec![None; bounded.len()];
        let mut failed = 0;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, Ok(bookings))) => slots[index] = Some(bookings),
                Ok((index, Err(e))) => {
                    failed += 1;
                    warn!(
                        "Dropping bookings for template '{}': {}",
                        bounded[index].name, e
                    );
                }
                Err(e) => {
                    failed += 1;
                    logging::log_error_with_context(
                        &anyhow!("aggregation task died: {}", e),
                        "Feed",
                    );
                }
            }
        }

        // Concatenate in template order so the post-sort tie-break is the
        // original fetch order, not task completion order.
        let mut entries = Vec::new();
        for (index, parent) in bounded.iter().enumerate() {
            if let Some(bookings) = slots[index].take() {
                for raw in bookings {
                    entries.push(FeedEntry::new(normalize::normalize_booking(raw), parent));
                }
            }
        }
        entries.sort_by(|a, b| b.booking.sort_instant.cmp(&a.booking.sort_instant));

        if failed > 0 {
            let err = AppError::PartialAggregation {
                failed,
                total: bounded.len(),
            };
            warn!("{}", err);
        }

        logging::log_aggregation(
            bounded.len(),
            entries.len(),
            failed,
            started.elapsed().as_millis() as u64,
        );

        let outcome = FeedOutcome {
            entries: entries.len(),
            failed_parents: failed,
        };
        *self.feed.write().await = entries;
        outcome
    }

    /// On-demand drill-down for a single template. Same normalization as the
    /// aggregation pass, but errors propagate and the feed is left alone.
    pub async fn build_feed_for_one(&self, parent_id: &str) -> AppResult<Vec<Booking>> {
        let bookings = self.source.fetch_bookings(parent_id).await?;
        Ok(bookings
            .into_iter()
            .map(normalize::normalize_booking)
            .collect())
    }
}
