//! Domain model for a calendar event.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::EventType;

/// A validated calendar event keyed by its calendar date.
///
/// Built only through [`crate::domain::EventValidator`], so `date` is always
/// a real day and `title` is never blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    /// Display time as entered, e.g. "2:00 PM" or "All Day"
    pub time: String,
    pub event_type: EventType,
    pub course: Option<String>,
}

impl CalendarEvent {
    /// Check if the event falls on the given day
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Day key in `YYYY-MM-DD` format
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
