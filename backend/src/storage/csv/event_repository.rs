use anyhow::{bail, Result};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use shared::CalendarEvent;
use std::fs::File;
use std::io::BufReader;

use super::connection::CsvConnection;
use crate::storage::traits::EventStorage;

const EVENT_HEADER: [&str; 6] = ["id", "title", "date", "time", "type", "course"];

/// CSV-based event repository backed by `events.csv`
#[derive(Debug, Clone)]
pub struct CsvEventRepository {
    connection: CsvConnection,
}

impl CsvEventRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_events(&self) -> Result<Vec<CalendarEvent>> {
        let file_path = self.connection.events_file_path();
        self.connection.ensure_csv_file_exists(&file_path, &EVENT_HEADER)?;

        let reader = BufReader::new(File::open(&file_path)?);
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let mut events = Vec::new();
        for result in csv_reader.records() {
            events.push(event_from_record(&result?));
        }

        debug!("Read {} events from {}", events.len(), file_path.display());
        Ok(events)
    }

    fn write_events(&self, events: &[CalendarEvent]) -> Result<()> {
        let rows = events.iter().map(|event| {
            vec![
                event.id.clone(),
                event.title.clone(),
                event.date.clone(),
                event.time.clone(),
                event.event_type.clone(),
                event.course.clone().unwrap_or_default(),
            ]
        });
        self.connection
            .write_csv_atomically(&self.connection.events_file_path(), &EVENT_HEADER, rows)
    }
}

/// Missing trailing columns read as empty; an empty course is `None`
fn event_from_record(record: &StringRecord) -> CalendarEvent {
    let field = |index: usize| record.get(index).unwrap_or("").to_string();
    let course = field(5);

    CalendarEvent {
        id: field(0),
        title: field(1),
        date: field(2),
        time: field(3),
        event_type: field(4),
        course: if course.trim().is_empty() { None } else { Some(course) },
    }
}

impl EventStorage for CsvEventRepository {
    fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        self.read_events()
    }

    fn store_event(&self, event: &CalendarEvent) -> Result<()> {
        let mut events = self.read_events()?;
        if events.iter().any(|existing| existing.id == event.id) {
            bail!("Event with id '{}' already exists", event.id);
        }

        events.push(event.clone());
        self.write_events(&events)?;
        info!("Stored event '{}' on {}", event.title, event.date);
        Ok(())
    }

    fn replace_events(&self, events: &[CalendarEvent]) -> Result<()> {
        self.write_events(events)?;
        info!("Replaced event snapshot with {} events", events.len());
        Ok(())
    }

    fn delete_event(&self, event_id: &str) -> Result<bool> {
        let mut events = self.read_events()?;
        let before = events.len();
        events.retain(|event| event.id != event_id);

        if events.len() == before {
            return Ok(false);
        }

        self.write_events(&events)?;
        info!("Deleted event '{}'", event_id);
        Ok(true)
    }
}
