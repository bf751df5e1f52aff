// Remote record source module
// The engine talks to the scheduling API exclusively through this seam.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppResult;
use crate::models::{MeetingType, RawBooking};

pub mod client;

pub use client::ApiClient;

/// Filter parameters accepted by the paged template query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub status: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub available_date: Option<NaiveDate>,
}

impl ListFilters {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.available_date.is_none()
    }

    /// Query-string pairs in the API's camelCase vocabulary.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = &self.status {
            query.push(("status".to_string(), status.clone()));
        }
        if let Some(from) = self.date_from {
            query.push(("dateFrom".to_string(), from.to_string()));
        }
        if let Some(to) = self.date_to {
            query.push(("dateTo".to_string(), to.to_string()));
        }
        if let Some(date) = self.available_date {
            query.push(("availableDate".to_string(), date.to_string()));
        }
        query
    }
}

/// One resolved page of templates plus its pagination metadata.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub items: Vec<MeetingType>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub has_more: bool,
}

/// The remote record source as the core observes it: a paged template query
/// and a per-template bookings sub-resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        filters: &ListFilters,
    ) -> AppResult<PageResult>;

    async fn fetch_bookings(&self, meeting_type_id: &str) -> AppResult<Vec<RawBooking>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filters_produce_no_query_pairs() {
        let filters = ListFilters::default();
        assert!(filters.is_empty());
        assert!(filters.to_query().is_empty());
    }

    #[test]
    fn test_filters_use_camel_case_keys() {
        let filters = ListFilters {
            status: Some("active".to_string()),
            date_from: NaiveDate::from_ymd_opt(2026, 3, 1),
            date_to: NaiveDate::from_ymd_opt(2026, 3, 31),
            available_date: None,
        };

        let query = filters.to_query();
        assert_eq!(query[0], ("status".to_string(), "active".to_string()));
        assert_eq!(query[1].0, "dateFrom");
        assert_eq!(query[2], ("dateTo".to_string(), "2026-03-31".to_string()));
    }
}
