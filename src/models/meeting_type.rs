use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A bookable meeting template. Owned by the server; the client holds a
/// read-mostly, eventually-consistent copy that is invalidated wholesale
/// when the records-changed signal fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub is_active: bool,
    pub color: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub available_date: Option<NaiveDate>,
    pub bookings_count: u64,
}

impl MeetingType {
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "active"
        } else {
            "inactive"
        }
    }

    pub fn duration_label(&self) -> String {
        format!("{} min", self.duration_minutes)
    }
}
