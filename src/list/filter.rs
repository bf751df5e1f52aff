//! Client-side substring filtering over the loaded collection
//!
//! Runs synchronously on every keystroke while the list is in filtered mode;
//! no network traffic is involved.

use crate::models::MeetingType;

/// A template matches when any of its searchable fields contains the needle.
/// The needle must already be trimmed and lower-cased.
pub fn matches_term(meeting_type: &MeetingType, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&meeting_type.name)
        || contains(&meeting_type.description)
        || meeting_type.category.as_deref().is_some_and(contains)
        || contains(meeting_type.status_label())
        || contains(&meeting_type.duration_minutes.to_string())
        || meeting_type
            .available_date
            .is_some_and(|date| contains(&date.to_string()))
}

/// Subset of `loaded` matching the raw search input, preserving load order.
pub fn apply(loaded: &[MeetingType], raw_term: &str) -> Vec<MeetingType> {
    let needle = raw_term.trim().to_lowercase();
    if needle.is_empty() {
        return loaded.to_vec();
    }

    loaded
        .iter()
        .filter(|meeting_type| matches_term(meeting_type, &needle))
        .cloned()
        .collect()
}
