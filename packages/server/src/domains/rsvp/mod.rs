//! RSVP domain - collects and serves AGM attendance responses
//!
//! Flow: form submission → collector validates → store appends + snapshots.
//! The admin read side (sorting, filtering, CSV export) lives in `viewer`.

pub mod collector;
pub mod models;
pub mod store;
pub mod viewer;

// Re-export commonly used types
pub use collector::{FieldErrors, RsvpForm};
pub use models::response::{Attendance, Response, Submission};
pub use models::unit::{Floor, Tower, UnitAddress, Wing};
pub use store::{AttendanceStats, ResponseStore, StoreError};
pub use viewer::{AttendanceFilter, SortKey};
