// Scripted in-memory record source shared by the integration suites.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use meetingflow_core::api::{ListFilters, PageResult, RecordSource};
use meetingflow_core::error::{AppError, AppResult};
use meetingflow_core::models::{MeetingType, RawBooking};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

pub fn meeting_type(id: &str, name: &str) -> MeetingType {
    MeetingType {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        duration_minutes: 30,
        is_active: true,
        color: Some("#8B9D77".to_string()),
        category: None,
        created_at: Utc::now(),
        available_date: None,
        bookings_count: 0,
    }
}

pub fn raw_booking(id: &str, created_day: u32) -> RawBooking {
    RawBooking {
        id: id.to_string(),
        time: Some("14:05".to_string()),
        date: Some(format!("2026-03-{:02}", created_day)),
        status: Some("confirmed".to_string()),
        duration: Some(30),
        guest_info: None,
        meeting_url: None,
        join_url: None,
        created_at: Some(Utc.with_ymd_and_hms(2026, 3, created_day, 10, 0, 0).unwrap()),
    }
}

/// Deterministic record source: `pages` pages of `per_page` templates each.
/// Individual pages or booking sub-resources can be made to fail, responses
/// can be held behind a one-shot gate, and every call is counted.
pub struct ScriptedSource {
    pages: u32,
    per_page: u32,
    pub page_calls: AtomicUsize,
    pub booking_calls: AtomicUsize,
    fail_pages: Mutex<HashSet<u32>>,
    unauthorized: AtomicBool,
    gate_once: AtomicBool,
    gate: Semaphore,
    pub last_filters: Mutex<Option<ListFilters>>,
    bookings: Mutex<HashMap<String, Vec<RawBooking>>>,
    fail_bookings: Mutex<HashSet<String>>,
}

impl ScriptedSource {
    pub fn new(pages: u32, per_page: u32) -> Self {
        Self {
            pages,
            per_page,
            page_calls: AtomicUsize::new(0),
            booking_calls: AtomicUsize::new(0),
            fail_pages: Mutex::new(HashSet::new()),
            unauthorized: AtomicBool::new(false),
            gate_once: AtomicBool::new(false),
            gate: Semaphore::new(0),
            last_filters: Mutex::new(None),
            bookings: Mutex::new(HashMap::new()),
            fail_bookings: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_page(&self, page: u32) {
        self.fail_pages.lock().unwrap().insert(page);
    }

    pub fn unfail_page(&self, page: u32) {
        self.fail_pages.lock().unwrap().remove(&page);
    }

    pub fn set_unauthorized(&self) {
        self.unauthorized.store(true, Ordering::SeqCst);
    }

    /// Hold the next page fetch until `release()` is called.
    pub fn gate_next(&self) {
        self.gate_once.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn set_bookings(&self, parent_id: &str, bookings: Vec<RawBooking>) {
        self.bookings
            .lock()
            .unwrap()
            .insert(parent_id.to_string(), bookings);
    }

    pub fn fail_bookings_for(&self, parent_id: &str) {
        self.fail_bookings
            .lock()
            .unwrap()
            .insert(parent_id.to_string());
    }

    pub fn page_call_count(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn booking_call_count(&self) -> usize {
        self.booking_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        filters: &ListFilters,
    ) -> AppResult<PageResult> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_filters.lock().unwrap() = Some(filters.clone());

        if self.gate_once.swap(false, Ordering::SeqCst) {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|_| AppError::api("gate closed"))?;
            permit.forget();
        }

        if self.unauthorized.load(Ordering::SeqCst) {
            return Err(AppError::Unauthorized);
        }
        if self.fail_pages.lock().unwrap().contains(&page) {
            return Err(AppError::api("HTTP 500"));
        }

        let limit = limit.min(self.per_page);
        let start = (page - 1) * limit;
        let items = (start..start + limit)
            .map(|n| {
                let flavor = if n % 2 == 0 { "even slot" } else { "odd slot" };
                let mut item = meeting_type(&format!("mt-{}", n), &format!("Template {}", n));
                item.description = flavor.to_string();
                item
            })
            .collect();

        Ok(PageResult {
            items,
            page,
            pages: self.pages,
            total: (self.pages * self.per_page) as u64,
            has_more: page < self.pages,
        })
    }

    async fn fetch_bookings(&self, meeting_type_id: &str) -> AppResult<Vec<RawBooking>> {
        self.booking_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_bookings.lock().unwrap().contains(meeting_type_id) {
            return Err(AppError::api("HTTP 502"));
        }

        Ok(self
            .bookings
            .lock()
            .unwrap()
            .get(meeting_type_id)
            .cloned()
            .unwrap_or_default())
    }
}
