// Booking records come back from the per-template sub-resource in several
// historical shapes; `RawBooking` is the union of what the server may send
// and `Booking` is the normalized form the rest of the crate works with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Wire shape of one booking as returned by
/// `GET /meeting-types/{id}/bookings`. Everything beyond `id` is optional;
/// normalization fills the gaps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBooking {
    pub id: String,
    /// 24-hour wall-clock time, `HH:MM`.
    pub time: Option<String>,
    /// ISO calendar date (`YYYY-MM-DD`) or a full RFC 3339 instant.
    pub date: Option<String>,
    pub status: Option<String>,
    pub duration: Option<u32>,
    pub guest_info: Option<RawGuestInfo>,
    pub meeting_url: Option<String>,
    pub join_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGuestInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
    Other(String),
}

impl BookingStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "pending" => Self::Pending,
            "cancelled" | "canceled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for BookingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Guest contact block with placeholder defaults so a sparse record never
/// fails normalization.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GuestInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl Default for GuestInfo {
    fn default() -> Self {
        Self {
            name: "Guest".to_string(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
        }
    }
}

/// One normalized reservation against a meeting template.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: String,
    /// Short human date, e.g. `Mar 5, 2026`.
    pub display_date: String,
    /// 12-hour wall-clock time with AM/PM suffix, e.g. `02:05 PM`.
    pub display_time: String,
    pub duration_minutes: u32,
    pub status: BookingStatus,
    pub guest: GuestInfo,
    pub meeting_url: Option<String>,
    pub platform: Option<String>,
    /// Instant the feed sorts on; see the normalizer for the fallback chain.
    pub sort_instant: DateTime<Utc>,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}
