//! List controller module
//!
//! Owns the displayed template collection and drives the two population
//! strategies: server-paginated accumulation and client-side filtering.
//! Scroll continuations and search input are funneled through the task
//! scheduler so only one pending trigger of each kind exists at a time.

use log::{debug, info};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use crate::api::RecordSource;
use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};
use crate::events::EngineEvent;
use crate::models::MeetingType;
use crate::schedule::TaskScheduler;

pub mod coordinator;
pub mod filter;
pub mod state;

use coordinator::FetchCoordinator;
use state::{ListMode, ListSnapshot, ListState};

const KEY_SEARCH: &str = "search";
const KEY_LOAD_MORE: &str = "load-more";

pub struct ListEngine {
    state: Arc<RwLock<ListState>>,
    coordinator: FetchCoordinator,
    scheduler: TaskScheduler,
    debounce: std::time::Duration,
    events: Option<mpsc::Sender<EngineEvent>>,
}

impl ListEngine {
    pub fn new(
        source: Arc<dyn RecordSource>,
        config: &EngineConfig,
        events: Option<mpsc::Sender<EngineEvent>>,
    ) -> Self {
        let state = Arc::new(RwLock::new(ListState::new()));
        let coordinator = FetchCoordinator::new(source, state.clone(), config.page_size);

        Self {
            state,
            coordinator,
            scheduler: TaskScheduler::new(),
            debounce: config.debounce,
            events,
        }
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        self.state.read().await.snapshot()
    }

    /// First `cap` templates of the unfiltered accumulation, for the feed
    /// aggregator. Deliberately not the filtered view, so typing in the
    /// search box does not churn the feed.
    pub async fn loaded_parents(&self, cap: usize) -> Vec<MeetingType> {
        let state = self.state.read().await;
        state.loaded.iter().take(cap).cloned().collect()
    }

    /// Reset to page 1 and reload, clearing the collection first so a stale
    /// append can never produce duplicate rows. With an active search term
    /// the filtered computation re-runs over the fresh page.
    pub async fn refresh(self: &Arc<Self>) -> AppResult<()> {
        info!("Refreshing template list");
        self.scheduler.cancel(KEY_SEARCH);
        self.scheduler.cancel(KEY_LOAD_MORE);
        self.coordinator.bump_generation();

        {
            let mut state = self.state.write().await;
            if state.search_term.is_empty() {
                state.mode = ListMode::Paginated;
            }
            state.reset_pagination();
            state.last_error = None;
        }

        match self.coordinator.load_page(1, false, false).await {
            Ok(true) => {
                {
                    let mut state = self.state.write().await;
                    state.last_success = Some("List refreshed".to_string());
                }
                self.emit_list_updated().await;
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => {
                self.record_error(&e).await;
                Err(e)
            }
        }
    }

    /// Scroll-proximity continuation. A no-op unless the list is paginated,
    /// the server has more pages and nothing is in flight; rapid repeated
    /// triggers coalesce into a single scheduled fetch.
    pub fn request_more(self: &Arc<Self>) {
        if self.coordinator.is_in_flight() {
            debug!("Ignoring continuation request: fetch already in flight");
            return;
        }

        let this = self.clone();
        self.scheduler.schedule(KEY_LOAD_MORE, self.debounce, async move {
            this.load_more_now().await;
        });
    }

    async fn load_more_now(self: Arc<Self>) {
        let next_page = {
            let state = self.state.read().await;
            if state.mode != ListMode::Paginated || !state.has_more {
                return;
            }
            state.page + 1
        };

        match self.coordinator.load_page(next_page, true, true).await {
            Ok(true) => self.emit_list_updated().await,
            Ok(false) => {}
            // has_more is untouched on failure, so scrolling again retries.
            Err(e) => self.record_error(&e).await,
        }
    }

    /// Raw search input handler. Empty input drops straight back to
    /// paginated mode with a fresh page-1 fetch; non-empty input filters the
    /// loaded collection synchronously, or defers one remote fetch when
    /// nothing is loaded yet.
    pub async fn on_input_change(self: &Arc<Self>, raw: &str) {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            self.scheduler.cancel(KEY_SEARCH);
            self.coordinator.bump_generation();
            {
                let mut state = self.state.write().await;
                state.search_term.clear();
                state.mode = ListMode::Paginated;
                state.reset_pagination();
            }
            match self.coordinator.load_page(1, false, false).await {
                Ok(true) => self.emit_list_updated().await,
                Ok(false) => {}
                Err(e) => self.record_error(&e).await,
            }
            return;
        }

        let needs_remote = {
            let mut state = self.state.write().await;
            state.search_term = trimmed.to_string();
            state.mode = ListMode::Filtered;
            // Any term change parks the cursor back at the first page;
            // pagination stays inert until the term clears.
            state.page = 1;
            state.has_more = false;
            if state.loaded.is_empty() {
                true
            } else {
                state.recompute_visible();
                false
            }
        };

        if needs_remote {
            let this = self.clone();
            self.scheduler.schedule(KEY_SEARCH, self.debounce, async move {
                match this.coordinator.load_page(1, false, false).await {
                    Ok(true) => this.emit_list_updated().await,
                    Ok(false) => {}
                    Err(e) => this.record_error(&e).await,
                }
            });
        }

        self.emit_list_updated().await;
    }

    /// Apply a status filter and reload from page 1. Explicit user action:
    /// runs even while a scroll fetch is in flight and supersedes it.
    pub async fn set_status_filter(self: &Arc<Self>, status: Option<String>) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            state.filters.status = status;
        }
        self.refresh().await
    }

    pub async fn clear_messages(&self) {
        let mut state = self.state.write().await;
        state.last_error = None;
        state.last_success = None;
    }

    /// Drop every pending scheduled trigger; used on shutdown.
    pub fn cancel_pending(&self) {
        self.scheduler.cancel_all();
    }

    async fn record_error(&self, error: &AppError) {
        {
            let mut state = self.state.write().await;
            state.last_error = Some(error.to_string());
        }
        self.emit(EngineEvent::EngineError(error.to_string())).await;
    }

    async fn emit_list_updated(&self) {
        let snapshot = self.snapshot().await;
        self.emit(EngineEvent::ListUpdated(snapshot)).await;
    }

    async fn emit(&self, event: EngineEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event).await;
        }
    }
}
