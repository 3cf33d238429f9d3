//! # Tuition Dashboard Backend
//!
//! Contains all non-UI logic for the tuition center dashboard.
//!
//! This crate brings together:
//! - **Domain**: calendar grid construction, event aggregation, attendance
//!   export, invoice totals and dashboard statistics
//! - **Storage**: the CSV/YAML data directory standing in for the REST data source
//! - **Config**: dashboard settings loaded from the data directory
//!
//! The backend is UI-agnostic. Front ends receive the serializable DTOs
//! from the `shared` crate through the mappers in [`domain::mappers`].
//!
//! ## Architecture
//!
//! ```text
//! Front end (terminal, web, desktop)
//!     ↓
//! Domain Layer (calendar view, services)
//!     ↓
//! Storage Layer (CSV files, YAML config)
//! ```

pub mod config;
pub mod domain;
pub mod storage;

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::path::Path;

use crate::config::DashboardConfig;
use crate::domain::{
    AttendanceExportService, CalendarService, CalendarView, EventService, InvoiceCalculator, InvoiceLedger,
};
use crate::storage::csv::{ConfigRepository, CsvAttendanceRepository, CsvConnection, CsvEventRepository};

/// Application state that holds the configuration and all services
#[derive(Clone)]
pub struct AppState {
    pub config: DashboardConfig,
    pub calendar_service: CalendarService,
    pub event_service: EventService<CsvEventRepository>,
    pub attendance_export_service: AttendanceExportService,
    pub invoice_calculator: InvoiceCalculator,
    pub invoice_ledger: InvoiceLedger,
    pub event_repository: CsvEventRepository,
    pub attendance_repository: CsvAttendanceRepository,
}

impl AppState {
    /// Wire up all services over an opened data directory and a loaded config
    pub fn new(connection: CsvConnection, config: DashboardConfig) -> Self {
        info!("Setting up domain model");
        let event_repository = CsvEventRepository::new(connection.clone());
        let invoice_calculator = InvoiceCalculator::from_config(&config);

        Self {
            calendar_service: CalendarService::new(),
            event_service: EventService::new(event_repository.clone()),
            attendance_export_service: AttendanceExportService::new(),
            invoice_calculator,
            invoice_ledger: InvoiceLedger::new(invoice_calculator),
            event_repository,
            attendance_repository: CsvAttendanceRepository::new(connection),
            config,
        }
    }

    /// Load the current event snapshot and open a calendar view on it
    pub fn open_calendar_view(&self, today: NaiveDate) -> Result<CalendarView> {
        let (events, rejected) = self.event_service.load_events()?;
        info!(
            "Opening calendar view with {} events ({} rejected)",
            events.len(),
            rejected.len()
        );
        Ok(CalendarView::new(today, events).with_preview_limit(self.config.events_per_cell_preview))
    }
}

/// Open the data directory and load its config
pub fn open_data_directory<P: AsRef<Path>>(data_directory: P) -> Result<(CsvConnection, DashboardConfig)> {
    let connection = CsvConnection::new(data_directory)?;
    let config = ConfigRepository::new(connection.clone()).load_or_create()?;
    Ok((connection, config))
}

/// Initialize the backend against a data directory
pub fn initialize_backend<P: AsRef<Path>>(data_directory: P) -> Result<AppState> {
    info!("Setting up data directory and loading dashboard configuration");
    let (connection, config) = open_data_directory(data_directory)?;
    Ok(AppState::new(connection, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::EventStorage;
    use shared::CalendarEvent as EventDto;

    fn event(id: &str, date: &str, event_type: &str) -> EventDto {
        EventDto {
            id: id.to_string(),
            title: format!("Event {}", id),
            date: date.to_string(),
            time: "10:00 AM".to_string(),
            event_type: event_type.to_string(),
            course: None,
        }
    }

    #[test]
    fn test_initialize_backend_creates_config() -> Result<()> {
        let env = TestEnvironment::new()?;
        let state = initialize_backend(env.base_directory())?;

        assert!(env.base_directory().join("dashboard_config.yaml").exists());
        assert_eq!(state.config, DashboardConfig::default());
        Ok(())
    }

    #[test]
    fn test_open_calendar_view_skips_invalid_events() -> Result<()> {
        let env = TestEnvironment::new()?;
        let state = initialize_backend(env.base_directory())?;

        state.event_repository.replace_events(&[
            event("1", "2025-01-16", "class"),
            event("2", "16/01/2025", "class"),
            event("3", "2025-01-16", "exam"),
        ])?;

        let today = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        let view = state.open_calendar_view(today)?;
        let ids: Vec<&str> = view.selected_day_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        Ok(())
    }

    #[test]
    fn test_app_state_uses_loaded_config() -> Result<()> {
        let env = TestEnvironment::new()?;
        let config = DashboardConfig {
            tax_rate: 0.1,
            rate_multiplier: 2.0,
            events_per_cell_preview: 1,
            ..DashboardConfig::default()
        };
        ConfigRepository::new(env.connection.clone()).save(&config)?;

        let (connection, loaded) = open_data_directory(env.base_directory())?;
        assert_eq!(loaded, config);

        let state = AppState::new(connection, loaded);
        assert_eq!(state.invoice_calculator.line_amount(3, 5.0), 30.0);
        let today = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        assert_eq!(state.open_calendar_view(today)?.preview_limit(), 1);
        Ok(())
    }

    #[test]
    fn test_added_event_shows_in_calendar_view() -> Result<()> {
        let env = TestEnvironment::new()?;
        let state = initialize_backend(env.base_directory())?;

        state.event_service.add_event(shared::CreateEventRequest {
            title: "Mathematics Quiz Competition".to_string(),
            date: "2025-01-22".to_string(),
            time: "2:00 PM".to_string(),
            event_type: "exam".to_string(),
            course: Some("Advanced Mathematics".to_string()),
        })?;
        assert!(state
            .event_service
            .add_event(shared::CreateEventRequest {
                title: "Quiz".to_string(),
                date: "2025-02-30".to_string(),
                time: "2:00 PM".to_string(),
                event_type: "exam".to_string(),
                course: None,
            })
            .is_err());

        let mut view = state.open_calendar_view(NaiveDate::from_ymd_opt(2025, 1, 16).unwrap())?;
        view.set_selected_date(NaiveDate::from_ymd_opt(2025, 1, 22).unwrap());
        let titles: Vec<&str> = view.selected_day_events().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Mathematics Quiz Competition"]);
        assert_eq!(view.events().len(), 1);
        Ok(())
    }
}
