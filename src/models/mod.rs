// Declare modules
pub mod booking;
pub mod feed;
pub mod meeting_type;

// Re-export all public types to keep imports flat for external callers.
pub use booking::{Booking, BookingStatus, GuestInfo, RawBooking, RawGuestInfo};
pub use feed::{FeedEntry, FeedOutcome};
pub use meeting_type::MeetingType;
