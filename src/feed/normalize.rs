// Booking normalization
// The sub-resource answers with a mix of historical shapes; everything is
// flattened here into the one display-ready form the feed works with.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use log::warn;

use crate::models::{Booking, BookingStatus, GuestInfo, RawBooking, RawGuestInfo};
use crate::utils::conferencing_platform;

/// 12-hour wall-clock form with AM/PM suffix, e.g. `14:05` -> `02:05 PM`.
/// Falls back to the record's creation instant when the field is absent or
/// unparseable.
pub fn format_display_time(time: Option<&str>, fallback: DateTime<Utc>) -> String {
    if let Some(raw) = time {
        if let Ok(parsed) = NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
            return parsed.format("%I:%M %p").to_string();
        }
        warn!("Unparseable booking time '{}', using creation instant", raw);
    }
    fallback.format("%I:%M %p").to_string()
}

/// Short human date, e.g. `2026-03-05` -> `Mar 5, 2026`. Accepts a bare ISO
/// date or a full RFC 3339 instant; anything else falls back to the creation
/// instant's date.
pub fn format_display_date(date: Option<&str>, fallback: DateTime<Utc>) -> String {
    if let Some(raw) = date {
        if let Some(parsed) = parse_date(raw) {
            return parsed.format("%b %-d, %Y").to_string();
        }
        warn!("Unparseable booking date '{}', using creation instant", raw);
    }
    fallback.date_naive().format("%b %-d, %Y").to_string()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// The instant the feed sorts on: creation instant when the server sent one,
/// else the scheduled date and time composed to UTC, else the Unix epoch so
/// the record sinks to the bottom instead of breaking the sort.
pub fn sort_instant(raw: &RawBooking) -> DateTime<Utc> {
    if let Some(created_at) = raw.created_at {
        return created_at;
    }

    if let Some(date) = raw.date.as_deref().and_then(parse_date) {
        let time = raw
            .time
            .as_deref()
            .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
            .unwrap_or_else(|| NaiveTime::MIN);
        return Utc.from_utc_datetime(&date.and_time(time));
    }

    warn!("Booking {} has no usable instant, sorting to the bottom", raw.id);
    DateTime::<Utc>::UNIX_EPOCH
}

fn convert_guest(raw: RawGuestInfo) -> GuestInfo {
    GuestInfo {
        name: raw
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Guest".to_string()),
        email: raw.email.unwrap_or_default(),
        phone: raw.phone.unwrap_or_default(),
        message: raw.message.unwrap_or_default(),
    }
}

pub fn normalize_booking(raw: RawBooking) -> Booking {
    let instant = sort_instant(&raw);
    let meeting_url = raw.meeting_url.or(raw.join_url);
    let platform = meeting_url
        .as_deref()
        .and_then(conferencing_platform)
        .map(String::from);

    Booking {
        id: raw.id,
        display_date: format_display_date(raw.date.as_deref(), instant),
        display_time: format_display_time(raw.time.as_deref(), instant),
        duration_minutes: raw.duration.unwrap_or(30),
        status: raw
            .status
            .as_deref()
            .map(BookingStatus::parse)
            .unwrap_or(BookingStatus::Pending),
        guest: raw.guest_info.map(convert_guest).unwrap_or_default(),
        meeting_url,
        platform,
        sort_instant: instant,
    }
}
