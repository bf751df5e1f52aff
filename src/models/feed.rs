use serde::Serialize;

use super::booking::Booking;
use super::meeting_type::MeetingType;

/// One booking decorated with the parent template it belongs to, as shown in
/// the unified timeline.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    pub parent_id: String,
    pub parent_name: String,
    pub parent_color: Option<String>,
    pub booking: Booking,
}

impl FeedEntry {
    pub fn new(booking: Booking, parent: &MeetingType) -> Self {
        Self {
            parent_id: parent.id.clone(),
            parent_name: parent.name.clone(),
            parent_color: parent.color.clone(),
            booking,
        }
    }
}

/// Counts reported after an aggregation pass; `failed_parents` is non-zero
/// when one or more per-template fetches were dropped from the feed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeedOutcome {
    pub entries: usize,
    pub failed_parents: usize,
}
