//! Event service domain logic for the tuition dashboard.
//!
//! Every event read from or written to storage passes through
//! [`EventValidator`] here, so storage never gains a record the calendar
//! would later have to drop.
//!
//! ## Business Rules
//!
//! - New events get an id generated from the creation time
//! - A new event is validated like a stored one, plus an id uniqueness
//!   check against the current snapshot
//! - Invalid records already on disk are skipped and reported on load

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use shared::{CalendarEvent as EventDto, CreateEventRequest};

use crate::domain::event_validation::{EventValidationError, EventValidator, RejectedEvent};
use crate::domain::mappers::CalendarEventMapper;
use crate::domain::models::CalendarEvent;
use crate::storage::EventStorage;

/// Service for loading and creating calendar events
#[derive(Debug, Clone)]
pub struct EventService<S: EventStorage> {
    event_repository: S,
    validator: EventValidator,
}

impl<S: EventStorage> EventService<S> {
    pub fn new(event_repository: S) -> Self {
        Self {
            event_repository,
            validator: EventValidator::new(),
        }
    }

    /// Load the stored snapshot, split into valid events and rejections
    pub fn load_events(&self) -> Result<(Vec<CalendarEvent>, Vec<RejectedEvent>)> {
        let records = self.event_repository.list_events()?;
        Ok(self.validator.validate_all(records))
    }

    /// Validate and store a new event
    pub fn add_event(&self, request: CreateEventRequest) -> Result<CalendarEvent> {
        info!("Creating event: {:?}", request);

        let stored = self.event_repository.list_events()?;
        let record = EventDto {
            id: next_event_id(&stored),
            title: request.title,
            date: request.date,
            time: request.time,
            event_type: request.event_type,
            course: request.course,
        };

        let event = self.validator.validate(&record).map_err(|error| {
            warn!("Refusing to store event '{}': {}", record.title, error);
            error
        })?;

        if stored.iter().any(|existing| existing.id.trim() == event.id) {
            return Err(EventValidationError::DuplicateId(event.id).into());
        }

        self.event_repository.store_event(&CalendarEventMapper::to_dto(&event))?;
        info!("Successfully created event: {}", event.id);
        Ok(event)
    }
}

/// Epoch millis id, bumped past any id already generated in the same millisecond
fn next_event_id(stored: &[EventDto]) -> String {
    let mut millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    while stored.iter().any(|event| event.id == EventDto::generate_id(millis)) {
        millis += 1;
    }
    EventDto::generate_id(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::csv::CsvEventRepository;
    use chrono::NaiveDate;
    use shared::EventType;

    fn request(title: &str, date: &str, event_type: &str) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            date: date.to_string(),
            time: "11:00 AM".to_string(),
            event_type: event_type.to_string(),
            course: None,
        }
    }

    fn service(env: &TestEnvironment) -> EventService<CsvEventRepository> {
        EventService::new(CsvEventRepository::new(env.connection.clone()))
    }

    #[test]
    fn test_add_event_stores_normalized_record() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = service(&env);

        let event = service.add_event(request(" Mathematics Quiz ", "2025-01-22", "Exam"))?;
        assert!(event.id.starts_with("event::"));
        assert_eq!(event.title, "Mathematics Quiz");
        assert_eq!(event.event_type, EventType::Exam);

        let (events, rejected) = service.load_events()?;
        assert_eq!(events, vec![event]);
        assert!(rejected.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_event_refuses_bad_date_before_writing() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = service(&env);

        let err = service.add_event(request("Science Fair", "22/01/2025", "other")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EventValidationError>(),
            Some(&EventValidationError::InvalidDate("22/01/2025".to_string()))
        );

        let err = service.add_event(request("Science Fair", "2025-01-22", "workshop")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EventValidationError>(),
            Some(EventValidationError::UnknownEventType(_))
        ));

        let (events, rejected) = service.load_events()?;
        assert!(events.is_empty());
        assert!(rejected.is_empty());
        Ok(())
    }

    #[test]
    fn test_added_events_get_distinct_ids() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = service(&env);

        let first = service.add_event(request("Parent Meeting", "2025-01-24", "meeting"))?;
        let second = service.add_event(request("Staff Meeting", "2025-01-24", "meeting"))?;
        assert_ne!(first.id, second.id);

        let (events, _) = service.load_events()?;
        let on_24th: Vec<&str> = events
            .iter()
            .filter(|e| e.occurs_on(NaiveDate::from_ymd_opt(2025, 1, 24).unwrap()))
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(on_24th, vec!["Parent Meeting", "Staff Meeting"]);
        Ok(())
    }

    #[test]
    fn test_load_events_reports_invalid_rows() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repository = CsvEventRepository::new(env.connection.clone());
        repository.replace_events(&[
            EventDto {
                id: "1".to_string(),
                title: "Mathematics Class".to_string(),
                date: "2025-01-16".to_string(),
                time: "10:00 AM".to_string(),
                event_type: "class".to_string(),
                course: None,
            },
            EventDto {
                id: "2".to_string(),
                title: "Broken".to_string(),
                date: "soon".to_string(),
                time: String::new(),
                event_type: "class".to_string(),
                course: None,
            },
        ])?;

        let (events, rejected) = EventService::new(repository).load_events()?;
        assert_eq!(events.len(), 1);
        assert_eq!(rejected[0].id, "2");
        Ok(())
    }
}
