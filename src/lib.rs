// MeetingFlow Core Library
// Paginated list synchronization and bookings aggregation for the
// meetings-management screen; view code consumes snapshots and events.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod feed;
pub mod http_config;
pub mod list;
pub mod models;
pub mod schedule;
pub mod utils;

// Re-export commonly used types
pub use api::{ApiClient, ListFilters, PageResult, RecordSource};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{AppError, AppResult, ErrorKind};
pub use events::EngineEvent;
pub use feed::FeedBuilder;
pub use list::state::{ListMode, ListSnapshot, ListStats};
pub use list::ListEngine;
pub use models::*;
