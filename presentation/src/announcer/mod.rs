//! Round announcements posted to the chat channel

mod round_announcer;

pub use round_announcer::RoundAnnouncer;
