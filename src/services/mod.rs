// Orchestration around the pure matching core
pub mod orchestrator;
pub mod reminders;

pub use orchestrator::{spawn, spawn_poller, ListingSource, MatchServiceHandle, SweepReport};
pub use reminders::{Reminder, ReminderPolicy, SentMarkers};
