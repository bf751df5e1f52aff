//! Fetch coordinator
//!
//! Issues paged queries against the record source and applies the results to
//! the shared list state. Guarantees: at most one scroll-triggered fetch in
//! flight, results applied exactly once per resolved call, prior state left
//! untouched on failure, and results that cross a reset discarded.

use log::{debug, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::api::RecordSource;
use crate::error::AppResult;
use crate::list::state::{ListMode, ListState};
use crate::utils::logging;

pub struct FetchCoordinator {
    source: Arc<dyn RecordSource>,
    state: Arc<RwLock<ListState>>,
    page_size: u32,
    /// The in-flight guard. Scroll-triggered fetches respect it; explicit
    /// user actions run regardless and supersede via the generation counter.
    in_flight: AtomicBool,
    /// Bumped on every reset; a resolving fetch that no longer matches
    /// discards its result instead of corrupting newer state.
    generation: AtomicU64,
}

impl FetchCoordinator {
    pub fn new(
        source: Arc<dyn RecordSource>,
        state: Arc<RwLock<ListState>>,
        page_size: u32,
    ) -> Self {
        Self {
            source,
            state,
            page_size,
            in_flight: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Load one page and apply it to the list state. `append` merges into the
    /// accumulation, otherwise the page replaces it. With `guarded` set the
    /// call is skipped when another fetch is already in flight.
    ///
    /// Returns whether the result was applied; a guarded skip or a superseded
    /// result resolves to `Ok(false)`.
    pub async fn load_page(&self, page: u32, append: bool, guarded: bool) -> AppResult<bool> {
        if guarded {
            if self.in_flight.swap(true, Ordering::SeqCst) {
                debug!("Skipping page {} fetch: another fetch is in flight", page);
                return Ok(false);
            }
        } else {
            self.in_flight.store(true, Ordering::SeqCst);
        }

        let started = Instant::now();
        let generation = self.generation.load(Ordering::SeqCst);
        let filters = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.filters.clone()
        };

        let result = self.source.fetch_page(page, self.page_size, &filters).await;
        self.in_flight.store(false, Ordering::SeqCst);

        let mut state = self.state.write().await;
        state.loading = false;

        let page_result = match result {
            Ok(page_result) => page_result,
            Err(e) => {
                // Prior collection, cursors and has_more stay exactly as they
                // were; the user can retry by scrolling again.
                warn!("Page {} fetch failed: {}", page, e);
                return Err(e);
            }
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding page {} result: state was reset mid-flight", page);
            return Ok(false);
        }

        logging::log_page_fetch(
            page_result.page,
            page_result.items.len(),
            started.elapsed().as_millis() as u64,
        );

        if append {
            state.loaded.extend(page_result.items);
        } else {
            state.loaded = page_result.items;
        }
        state.page = page_result.page;
        state.total_pages = page_result.pages;
        state.total = page_result.total;
        // Pagination is inert while filtered; the flag flips back on the
        // reset that leaves filtered mode.
        state.has_more = match state.mode {
            ListMode::Paginated => page_result.has_more,
            ListMode::Filtered => false,
        };
        state.recompute_visible();

        Ok(true)
    }
}
