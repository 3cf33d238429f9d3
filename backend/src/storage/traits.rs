//! # Storage Traits
//!
//! Storage abstractions used by the domain layer.

use anyhow::Result;
use shared::{AttendanceRecord, CalendarEvent};

/// Source of calendar event records.
///
/// Records come back unvalidated, exactly as stored; callers run them
/// through [`crate::domain::EventValidator`] before use.
pub trait EventStorage: Send + Sync {
    /// Full snapshot of stored events in file order
    fn list_events(&self) -> Result<Vec<CalendarEvent>>;

    /// Append a new event
    fn store_event(&self, event: &CalendarEvent) -> Result<()>;

    /// Replace every stored event
    fn replace_events(&self, events: &[CalendarEvent]) -> Result<()>;

    /// Delete an event by id.
    /// Returns true if the event was found and deleted, false otherwise
    fn delete_event(&self, event_id: &str) -> Result<bool>;
}

pub trait AttendanceStorage: Send + Sync {
    /// All attendance records in file order
    fn list_attendance(&self) -> Result<Vec<AttendanceRecord>>;

    fn store_attendance_record(&self, record: &AttendanceRecord) -> Result<()>;

    fn replace_attendance(&self, records: &[AttendanceRecord]) -> Result<()>;
}
