//! Calendar domain logic for the tuition dashboard.
//!
//! This module contains the month grid construction, date-based event
//! lookup and the date predicates used to decorate grid cells. Everything
//! here works on `chrono::NaiveDate`, a plain calendar date without time
//! zone or clock time, so cells, cursors and event dates compare
//! structurally.

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use log::debug;
use shared::NavigationDirection;
use std::collections::BTreeMap;

use crate::domain::models::CalendarEvent;

/// Weeks shown in every month view
pub const WEEKS_PER_GRID: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;
/// Total cells in a month view
pub const GRID_CELLS: usize = WEEKS_PER_GRID * DAYS_PER_WEEK;

/// Short weekday headers, Sunday first
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Six Sunday-aligned weeks covering one month plus the leading and
/// trailing days borrowed from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first_of_month: NaiveDate,
    weeks: [[NaiveDate; DAYS_PER_WEEK]; WEEKS_PER_GRID],
}

impl MonthGrid {
    pub fn weeks(&self) -> &[[NaiveDate; DAYS_PER_WEEK]; WEEKS_PER_GRID] {
        &self.weeks
    }

    /// All 42 dates in display order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().copied())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.weeks[0][0]
    }

    pub fn last_day(&self) -> NaiveDate {
        self.weeks[WEEKS_PER_GRID - 1][DAYS_PER_WEEK - 1]
    }

    /// First day of the month this grid was built for
    pub fn first_of_month(&self) -> NaiveDate {
        self.first_of_month
    }

    pub fn month(&self) -> u32 {
        self.first_of_month.month()
    }

    pub fn year(&self) -> i32 {
        self.first_of_month.year()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }
}

/// Calendar service that handles all calendar-related business logic
#[derive(Debug, Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    /// Create a new CalendarService instance
    pub fn new() -> Self {
        Self
    }

    /// Build the 6 x 7 grid for the month containing `reference`.
    ///
    /// Only the year and month of `reference` are used. The grid starts on
    /// the Sunday on or before the 1st and runs for 42 consecutive days.
    ///
    /// The first and last months chrono can represent have no room for the
    /// usual padding. There the grid is shifted to stay inside the range, so
    /// it still holds 42 consecutive days and the whole month, but does not
    /// start on a Sunday.
    pub fn build_month_grid(&self, reference: NaiveDate) -> MonthGrid {
        let first_of_month = first_day_of_month(reference);
        let offset = self.first_weekday_offset(first_of_month);
        let start = first_of_month
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN)
            .min(latest_grid_start());

        debug!(
            "Building grid for {}: 1st falls on weekday {}, grid starts {}",
            first_of_month.format("%Y-%m"),
            offset,
            start
        );

        let weeks = std::array::from_fn(|week| {
            std::array::from_fn(|day| {
                start
                    .checked_add_days(Days::new((week * DAYS_PER_WEEK + day) as u64))
                    .unwrap_or(NaiveDate::MAX)
            })
        });

        MonthGrid { first_of_month, weeks }
    }

    /// Events on `date`, in the order they were given. Empty when none match.
    pub fn events_on_date<'a>(&self, date: NaiveDate, events: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
        events.iter().filter(|event| event.occurs_on(date)).collect()
    }

    /// Group events by calendar date, preserving input order within each day
    pub fn group_events_by_date<'a>(&self, events: &'a [CalendarEvent]) -> BTreeMap<NaiveDate, Vec<&'a CalendarEvent>> {
        let mut events_by_date: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
        for event in events {
            events_by_date.entry(event.date).or_default().push(event);
        }
        events_by_date
    }

    /// Move one calendar month forwards or backwards.
    ///
    /// The day of month is kept where it exists and otherwise clamped to the
    /// last day of the target month (Jan 31 -> Feb 28, or Feb 29 in a leap
    /// year). At the edge of chrono's date range `current` is returned.
    pub fn navigate_month(&self, current: NaiveDate, direction: NavigationDirection) -> NaiveDate {
        let moved = match direction {
            NavigationDirection::Prev => current.checked_sub_months(Months::new(1)),
            NavigationDirection::Next => current.checked_add_months(Months::new(1)),
        };
        moved.unwrap_or(current)
    }

    /// Check if `date` is the process's current local date
    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today()
    }

    /// Check if `date` falls in the same month and year as `reference`
    pub fn is_in_displayed_month(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        date.year() == reference.year() && date.month() == reference.month()
    }

    pub fn is_selected(&self, date: NaiveDate, selected: NaiveDate) -> bool {
        date == selected
    }

    /// Current local calendar date
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Get the first day of month offset (0 = Sunday, 1 = Monday, etc.)
    pub fn first_weekday_offset(&self, first_of_month: NaiveDate) -> u32 {
        first_of_month.weekday().num_days_from_sunday()
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Header title for a month view, e.g. "January 2025"
    pub fn month_title(&self, reference: NaiveDate) -> String {
        format!("{} {}", self.month_name(reference.month()), reference.year())
    }

    /// Long display form, e.g. "Thursday, January 16, 2025"
    pub fn format_date_long(&self, date: NaiveDate) -> String {
        format!(
            "{}, {} {}, {}",
            date.format("%A"),
            self.month_name(date.month()),
            date.day(),
            date.year()
        )
    }
}

fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last date a full grid can start on without running past `NaiveDate::MAX`
fn latest_grid_start() -> NaiveDate {
    NaiveDate::MAX
        .checked_sub_days(Days::new(GRID_CELLS as u64 - 1))
        .unwrap_or(NaiveDate::MAX)
}
