//! Validation of incoming event records.
//!
//! Event records arrive untyped from the data source. They are checked and
//! converted here, once, so the calendar code can assume every event has a
//! real calendar date and a known type. Records that fail are reported and
//! dropped rather than silently never matching a grid cell.

use chrono::{DateTime, NaiveDate};
use log::warn;
use shared::{CalendarEvent as EventDto, EventType};
use std::collections::HashSet;

use crate::domain::models::CalendarEvent;

/// Length of a `YYYY-MM-DD` day key
const DATE_KEY_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventValidationError {
    #[error("Event id cannot be empty")]
    EmptyId,
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Invalid event date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Unknown event type '{0}'")]
    UnknownEventType(String),
    #[error("Duplicate event id '{0}'")]
    DuplicateId(String),
}

/// A record that failed validation, with the id it arrived under
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEvent {
    pub id: String,
    pub error: EventValidationError,
}

#[derive(Debug, Clone, Default)]
pub struct EventValidator;

impl EventValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a single record and convert it to a domain event
    pub fn validate(&self, record: &EventDto) -> Result<CalendarEvent, EventValidationError> {
        let id = record.id.trim();
        if id.is_empty() {
            return Err(EventValidationError::EmptyId);
        }

        let title = record.title.trim();
        if title.is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }

        let date = parse_event_date(&record.date)?;
        let event_type = record
            .event_type
            .parse::<EventType>()
            .map_err(|_| EventValidationError::UnknownEventType(record.event_type.clone()))?;

        let course = record
            .course
            .as_deref()
            .map(str::trim)
            .filter(|course| !course.is_empty())
            .map(str::to_string);

        Ok(CalendarEvent {
            id: id.to_string(),
            title: title.to_string(),
            date,
            time: record.time.trim().to_string(),
            event_type,
            course,
        })
    }

    /// Validate a whole snapshot.
    ///
    /// Accepted events keep their input order. A repeated id is rejected,
    /// the first occurrence wins.
    pub fn validate_all(&self, records: Vec<EventDto>) -> (Vec<CalendarEvent>, Vec<RejectedEvent>) {
        let mut accepted = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();
        let mut seen_ids = HashSet::new();

        for record in records {
            let result = self.validate(&record).and_then(|event| {
                if seen_ids.insert(event.id.clone()) {
                    Ok(event)
                } else {
                    Err(EventValidationError::DuplicateId(event.id))
                }
            });

            match result {
                Ok(event) => accepted.push(event),
                Err(error) => {
                    warn!("Rejecting event '{}': {}", record.id, error);
                    rejected.push(RejectedEvent { id: record.id, error });
                }
            }
        }

        (accepted, rejected)
    }
}

/// Parse an event date into a calendar date.
///
/// Accepts a strict `YYYY-MM-DD` day key, or an RFC 3339 timestamp whose
/// date is taken as written in its own offset. The timestamp is never
/// converted to UTC, so `2025-01-16T00:30:00+05:30` stays on the 16th.
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, EventValidationError> {
    let trimmed = raw.trim();

    if trimmed.len() == DATE_KEY_LEN {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if date.format("%Y-%m-%d").to_string() == trimmed {
                return Ok(date);
            }
        }
    } else if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }

    Err(EventValidationError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, date: &str, event_type: &str) -> EventDto {
        EventDto {
            id: id.to_string(),
            title: "Mathematics Class".to_string(),
            date: date.to_string(),
            time: "10:00 AM".to_string(),
            event_type: event_type.to_string(),
            course: Some("Advanced Mathematics".to_string()),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_record() {
        let validator = EventValidator::new();
        let event = validator.validate(&record("1", "2025-01-16", "class")).unwrap();

        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());
        assert_eq!(event.event_type, EventType::Class);
        assert_eq!(event.course.as_deref(), Some("Advanced Mathematics"));
    }

    #[test]
    fn test_parse_event_date_formats() {
        let jan_16 = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();

        assert_eq!(parse_event_date("2025-01-16"), Ok(jan_16));
        assert_eq!(parse_event_date(" 2025-01-16 "), Ok(jan_16));
        assert_eq!(parse_event_date("2025-01-16T00:30:00+05:30"), Ok(jan_16));
        assert_eq!(parse_event_date("2025-01-16T23:30:00-08:00"), Ok(jan_16));
        assert_eq!(parse_event_date("2025-01-16T09:00:00Z"), Ok(jan_16));
    }

    #[test]
    fn test_parse_event_date_rejects_other_formats() {
        for raw in ["16/01/2025", "2025-1-16", "2025-02-30", "", "January 16, 2025", "2025-01-16 10:00"] {
            assert_eq!(
                parse_event_date(raw),
                Err(EventValidationError::InvalidDate(raw.to_string())),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let validator = EventValidator::new();

        assert_eq!(validator.validate(&record(" ", "2025-01-16", "class")), Err(EventValidationError::EmptyId));
        assert_eq!(
            validator.validate(&record("1", "2025-01-16", "workshop")),
            Err(EventValidationError::UnknownEventType("workshop".to_string()))
        );

        let mut untitled = record("1", "2025-01-16", "class");
        untitled.title = "  ".to_string();
        assert_eq!(validator.validate(&untitled), Err(EventValidationError::EmptyTitle));
    }

    #[test]
    fn test_blank_course_becomes_none() {
        let validator = EventValidator::new();
        let mut blank = record("1", "2025-01-16", "holiday");
        blank.course = Some("   ".to_string());

        assert!(validator.validate(&blank).unwrap().course.is_none());
    }

    #[test]
    fn test_validate_all_partitions_batch() {
        let validator = EventValidator::new();
        let (accepted, rejected) = validator.validate_all(vec![
            record("1", "2025-01-16", "class"),
            record("2", "not-a-date", "class"),
            record("3", "2025-01-20", "EXAM"),
            record("1", "2025-01-18", "meeting"),
        ]);

        let ids: Vec<&str> = accepted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].id, "2");
        assert_eq!(rejected[1].error, EventValidationError::DuplicateId("1".to_string()));
    }
}
