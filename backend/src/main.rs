use anyhow::Result;
use chrono::Datelike;
use env_logger::Env;
use log::info;
use std::env;
use std::fs;

use tuition_dashboard::config::resolve_data_directory;
use tuition_dashboard::domain::{CalendarView, DayCell};
use tuition_dashboard::storage::AttendanceStorage;
use tuition_dashboard::{open_data_directory, AppState};

mod cli;

fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());
    let data_dir = resolve_data_directory(args.data_dir.clone());

    // The log level lives in the config, so read it before anything logs
    let (connection, config) = open_data_directory(&data_dir)?;
    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str())).init();

    info!("Using data directory {}", data_dir.display());
    let state = AppState::new(connection, config);
    let today = state.calendar_service.today();

    if let Some(request) = args.new_event {
        let event = state.event_service.add_event(request)?;
        println!(
            "Added {} '{}' on {} at {}",
            event.event_type,
            event.title,
            state.calendar_service.format_date_long(event.date),
            event.time
        );
        return Ok(());
    }

    if let Some(target) = args.export_attendance {
        let records = state.attendance_repository.list_attendance()?;
        let export = state
            .attendance_export_service
            .export(&records, &args.attendance_filter, today)?;
        let stats = state
            .attendance_export_service
            .stats(state.attendance_export_service.filter(&records, &args.attendance_filter));

        let path = if target.is_dir() { target.join(&export.filename) } else { target };
        fs::write(&path, &export.csv_content)?;
        println!(
            "Exported {} records to {} ({} present, {} late, {} absent)",
            export.record_count,
            path.display(),
            stats.present,
            stats.late,
            stats.absent
        );
        return Ok(());
    }

    let mut view = state.open_calendar_view(today)?;
    if let Some(month) = args.month {
        view.show_month(month);
    }
    if let Some(selected) = args.select {
        view.set_selected_date(selected);
    }

    print!("{}", render_month(&view));
    println!();
    print!("{}", render_selected_day(&view));
    println!();
    print!("{}", render_upcoming(&view, state.config.upcoming_events_limit));
    Ok(())
}

/// `[16]*3`: brackets mark the selection, parentheses other months,
/// `*` today and the digit the event count.
fn render_cell(cell: &DayCell) -> String {
    let (open, close) = if cell.is_selected {
        ('[', ']')
    } else if !cell.is_in_displayed_month {
        ('(', ')')
    } else {
        (' ', ' ')
    };
    let today = if cell.is_today { '*' } else { ' ' };
    let count = match cell.events.len() {
        0 => ' ',
        n => char::from_digit(n as u32, 10).unwrap_or('+'),
    };
    format!("{}{:>2}{}{}{}", open, cell.date.day(), close, today, count)
}

fn render_month(view: &CalendarView) -> String {
    let mut out = format!("{:^42}\n", view.title());
    for name in view.weekday_names() {
        out.push_str(&format!("{:^6}", name));
    }
    out.push('\n');

    for week in view.day_cells() {
        for cell in &week {
            out.push_str(&render_cell(cell));
        }
        out.push('\n');
    }
    out
}

fn render_selected_day(view: &CalendarView) -> String {
    let mut out = format!("{}\n", view.selected_date_title());
    let events = view.selected_day_events();
    if events.is_empty() {
        out.push_str("  No events scheduled for this date\n");
    }
    for event in events {
        out.push_str(&format!("  {:<9} {} [{}]", event.time, event.title, event.event_type.label()));
        if let Some(course) = &event.course {
            out.push_str(&format!(" - {}", course));
        }
        out.push('\n');
    }
    out
}

fn render_upcoming(view: &CalendarView, limit: usize) -> String {
    let mut out = String::from("Upcoming Events\n");
    let events = view.upcoming_events(limit);
    if events.is_empty() {
        out.push_str("  Nothing scheduled\n");
    }
    for event in events {
        out.push_str(&format!(
            "  {} at {}  {} ({})\n",
            event.date_key(),
            event.time,
            event.title,
            event.event_type
        ));
    }
    out
}
