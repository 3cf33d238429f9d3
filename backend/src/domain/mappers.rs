//! Conversions from domain values to the wire DTOs in `shared`.

use chrono::Datelike;
use shared::{CalendarDayCell, CalendarEvent as EventDto, CalendarMonthGrid, SelectedDayEvents};

use crate::domain::calendar_view::{CalendarView, DayCell};
use crate::domain::models::CalendarEvent;

pub struct CalendarEventMapper;

impl CalendarEventMapper {
    pub fn to_dto(event: &CalendarEvent) -> EventDto {
        EventDto {
            id: event.id.clone(),
            title: event.title.clone(),
            date: event.date_key(),
            time: event.time.clone(),
            event_type: event.event_type.as_str().to_string(),
            course: event.course.clone(),
        }
    }
}

pub struct CalendarViewMapper;

impl CalendarViewMapper {
    pub fn day_cell_to_dto(cell: &DayCell, preview_limit: usize) -> CalendarDayCell {
        CalendarDayCell {
            date: cell.date.format("%Y-%m-%d").to_string(),
            day: cell.date.day(),
            is_today: cell.is_today,
            is_in_displayed_month: cell.is_in_displayed_month,
            is_selected: cell.is_selected,
            preview_events: cell.preview(preview_limit).iter().map(CalendarEventMapper::to_dto).collect(),
            overflow_count: cell.overflow_count(preview_limit),
        }
    }

    pub fn month_grid_to_dto(view: &CalendarView) -> CalendarMonthGrid {
        let preview_limit = view.preview_limit();
        let weeks = view
            .day_cells()
            .iter()
            .map(|week| week.iter().map(|cell| Self::day_cell_to_dto(cell, preview_limit)).collect())
            .collect();

        CalendarMonthGrid {
            month: view.displayed_month().month(),
            year: view.displayed_month().year(),
            title: view.title(),
            weekday_names: view.weekday_names().iter().map(|name| name.to_string()).collect(),
            weeks,
        }
    }

    pub fn selected_day_to_dto(view: &CalendarView) -> SelectedDayEvents {
        SelectedDayEvents {
            date: view.selected_date().format("%Y-%m-%d").to_string(),
            formatted_date: view.selected_date_title(),
            events: view
                .selected_day_events()
                .into_iter()
                .map(CalendarEventMapper::to_dto)
                .collect(),
        }
    }
}
