//! View state for the calendar page.
//!
//! The view holds two independent cursors, the displayed month and the
//! selected date, plus the current event snapshot. Day cells are derived
//! on every call and never stored.

use chrono::NaiveDate;
use log::debug;
use shared::NavigationDirection;

use crate::domain::calendar::{CalendarService, MonthGrid, WEEKDAY_NAMES};
use crate::domain::models::CalendarEvent;

/// Event titles shown inside a cell before the "+N more" marker
pub const DEFAULT_PREVIEW_LIMIT: usize = 2;

/// One rendered day of the month grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub is_today: bool,
    pub is_in_displayed_month: bool,
    pub is_selected: bool,
}

impl DayCell {
    /// Events shown inline, at most `limit`
    pub fn preview(&self, limit: usize) -> &[CalendarEvent] {
        &self.events[..self.events.len().min(limit)]
    }

    /// Events hidden behind the "+N more" marker
    pub fn overflow_count(&self, limit: usize) -> usize {
        self.events.len().saturating_sub(limit)
    }
}

#[derive(Debug, Clone)]
pub struct CalendarView {
    service: CalendarService,
    today: NaiveDate,
    displayed_month: NaiveDate,
    selected_date: NaiveDate,
    events: Vec<CalendarEvent>,
    preview_limit: usize,
}

impl CalendarView {
    /// Open the view on `today`: both cursors start there
    pub fn new(today: NaiveDate, events: Vec<CalendarEvent>) -> Self {
        Self {
            service: CalendarService::new(),
            today,
            displayed_month: today,
            selected_date: today,
            events,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }

    pub fn with_preview_limit(mut self, preview_limit: usize) -> Self {
        self.preview_limit = preview_limit;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Reference date of the displayed month; only its month and year matter for the grid
    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_limit
    }

    /// Step the displayed month. The selected date is left alone.
    pub fn navigate_month(&mut self, direction: NavigationDirection) -> NaiveDate {
        self.displayed_month = self.service.navigate_month(self.displayed_month, direction);
        debug!("Displayed month is now {}", self.displayed_month.format("%Y-%m"));
        self.displayed_month
    }

    /// Jump straight to the month containing `reference`
    pub fn show_month(&mut self, reference: NaiveDate) {
        self.displayed_month = reference;
    }

    /// Select any date, including ones outside the displayed month.
    /// Does not navigate.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Swap in a freshly fetched event snapshot
    pub fn replace_events(&mut self, events: Vec<CalendarEvent>) {
        debug!("Replacing {} events with {}", self.events.len(), events.len());
        self.events = events;
    }

    pub fn grid(&self) -> MonthGrid {
        self.service.build_month_grid(self.displayed_month)
    }

    /// Build the 6 x 7 cells for the displayed month
    pub fn day_cells(&self) -> Vec<Vec<DayCell>> {
        let events_by_date = self.service.group_events_by_date(&self.events);

        self.grid()
            .weeks()
            .iter()
            .map(|week| {
                week.iter()
                    .map(|&date| DayCell {
                        date,
                        events: events_by_date
                            .get(&date)
                            .map(|events| events.iter().map(|&event| event.clone()).collect())
                            .unwrap_or_default(),
                        is_today: self.is_today(date),
                        is_in_displayed_month: self.is_in_displayed_month(date),
                        is_selected: self.is_selected(date),
                    })
                    .collect()
            })
            .collect()
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn is_in_displayed_month(&self, date: NaiveDate) -> bool {
        self.service.is_in_displayed_month(date, self.displayed_month)
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.service.is_selected(date, self.selected_date)
    }

    /// Events for the side panel
    pub fn selected_day_events(&self) -> Vec<&CalendarEvent> {
        self.service.events_on_date(self.selected_date, &self.events)
    }

    /// Events on or after today, soonest first; same-day events keep their input order
    pub fn upcoming_events(&self, limit: usize) -> Vec<&CalendarEvent> {
        let mut upcoming: Vec<&CalendarEvent> = self.events.iter().filter(|event| event.date >= self.today).collect();
        upcoming.sort_by_key(|event| event.date);
        upcoming.truncate(limit);
        upcoming
    }

    /// Header title, e.g. "January 2025"
    pub fn title(&self) -> String {
        self.service.month_title(self.displayed_month)
    }

    pub fn selected_date_title(&self) -> String {
        self.service.format_date_long(self.selected_date)
    }

    pub fn weekday_names(&self) -> [&'static str; 7] {
        WEEKDAY_NAMES
    }
}
