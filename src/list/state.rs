//! Session state of the templates list
//!
//! Mutated only by the list engine and its fetch coordinator; view code
//! observes it through cloneable snapshots.

use serde::Serialize;

use crate::api::ListFilters;
use crate::list::filter;
use crate::models::MeetingType;

/// The two mutually exclusive population strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListMode {
    /// Strict append-only accumulation of server pages.
    Paginated,
    /// Client-side subset of the loaded collection; pagination is inert.
    Filtered,
}

#[derive(Debug)]
pub struct ListState {
    /// Accumulation of every page fetched for the current filter set. Also
    /// the backing collection the client-side filter runs over.
    pub loaded: Vec<MeetingType>,
    /// The displayed collection.
    pub visible: Vec<MeetingType>,
    pub mode: ListMode,
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub has_more: bool,
    pub search_term: String,
    pub filters: ListFilters,
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_success: Option<String>,
}

impl ListState {
    pub fn new() -> Self {
        Self {
            loaded: Vec::new(),
            visible: Vec::new(),
            mode: ListMode::Paginated,
            page: 1,
            total_pages: 0,
            total: 0,
            has_more: true,
            search_term: String::new(),
            filters: ListFilters::default(),
            loading: false,
            last_error: None,
            last_success: None,
        }
    }

    /// Rederive the displayed collection from the loaded accumulation
    /// according to the current mode.
    pub fn recompute_visible(&mut self) {
        self.visible = match self.mode {
            ListMode::Paginated => self.loaded.clone(),
            ListMode::Filtered => filter::apply(&self.loaded, &self.search_term),
        };
    }

    /// Reset pagination cursors and clear both collections ahead of a fresh
    /// page-1 fetch.
    pub fn reset_pagination(&mut self) {
        self.page = 1;
        self.total_pages = 0;
        self.has_more = true;
        self.loaded.clear();
        self.visible.clear();
    }

    pub fn stats(&self) -> ListStats {
        ListStats {
            total: self.total,
            loaded: self.loaded.len(),
            active: self.loaded.iter().filter(|m| m.is_active).count(),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            items: self.visible.clone(),
            mode: self.mode,
            page: self.page,
            total_pages: self.total_pages,
            has_more: self.has_more,
            search_term: self.search_term.clone(),
            loading: self.loading,
            last_error: self.last_error.clone(),
            last_success: self.last_success.clone(),
            stats: self.stats(),
        }
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

/// Headline numbers for the screen's stat row.
#[derive(Debug, Clone, Serialize)]
pub struct ListStats {
    pub total: u64,
    pub loaded: usize,
    pub active: usize,
}

/// Point-in-time copy of the list state handed to view code.
#[derive(Debug, Clone, Serialize)]
pub struct ListSnapshot {
    pub items: Vec<MeetingType>,
    pub mode: ListMode,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub search_term: String,
    pub loading: bool,
    pub last_error: Option<String>,
    pub last_success: Option<String>,
    pub stats: ListStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn meeting_type(id: &str, name: &str, active: bool) -> MeetingType {
        MeetingType {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            duration_minutes: 30,
            is_active: active,
            color: None,
            category: None,
            created_at: Utc::now(),
            available_date: None,
            bookings_count: 0,
        }
    }

    #[test]
    fn test_new_state_starts_paginated_with_more() {
        let state = ListState::new();
        assert_eq!(state.mode, ListMode::Paginated);
        assert_eq!(state.page, 1);
        assert!(state.has_more);
        assert!(state.visible.is_empty());
    }

    #[test]
    fn test_recompute_visible_in_filtered_mode() {
        let mut state = ListState::new();
        state.loaded = vec![
            meeting_type("1", "Intro Call", true),
            meeting_type("2", "Design Review", true),
        ];
        state.mode = ListMode::Filtered;
        state.search_term = "design".to_string();

        state.recompute_visible();
        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].id, "2");
    }

    #[test]
    fn test_reset_pagination_clears_collections() {
        let mut state = ListState::new();
        state.loaded = vec![meeting_type("1", "Intro Call", true)];
        state.visible = state.loaded.clone();
        state.page = 4;
        state.has_more = false;

        state.reset_pagination();
        assert_eq!(state.page, 1);
        assert!(state.has_more);
        assert!(state.loaded.is_empty());
        assert!(state.visible.is_empty());
    }

    #[test]
    fn test_stats_count_active_templates() {
        let mut state = ListState::new();
        state.loaded = vec![
            meeting_type("1", "A", true),
            meeting_type("2", "B", false),
            meeting_type("3", "C", true),
        ];
        state.total = 12;

        let stats = state.stats();
        assert_eq!(stats.total, 12);
        assert_eq!(stats.loaded, 3);
        assert_eq!(stats.active, 2);
    }
}
