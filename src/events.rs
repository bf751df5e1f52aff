use crate::list::state::ListSnapshot;
use crate::models::FeedEntry;

/// Notifications pushed to the view layer over the engine's event channel.
///
/// View code treats every variant as a replacement snapshot; nothing here is
/// an incremental patch.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The displayed template collection or its metadata changed.
    ListUpdated(ListSnapshot),
    /// An aggregation pass replaced the unified bookings feed.
    FeedRebuilt {
        entries: Vec<FeedEntry>,
        failed_parents: usize,
    },
    /// A background operation failed; the message is display-ready.
    EngineError(String),
}
