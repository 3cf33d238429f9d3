use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::process;

use chrono::{Datelike, NaiveDate};
use getopts::Options;
use shared::{AttendanceFilter, AttendanceStatus, CreateEventRequest};

/// Years accepted for `--month`, `--select` and the attendance date bounds
const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

pub struct Args {
    pub data_dir: Option<PathBuf>,
    pub month: Option<NaiveDate>,
    pub select: Option<NaiveDate>,
    pub export_attendance: Option<PathBuf>,
    pub attendance_filter: AttendanceFilter,
    pub new_event: Option<CreateEventRequest>,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", concat!("Print the help output of ", env!("CARGO_BIN_NAME")));
    opts.optopt(
        "d",
        "data-dir",
        "Data directory holding events.csv and attendance.csv [Default: $TUITION_DASHBOARD_DATA_DIR or ~/Documents/Tuition Dashboard]",
        "PATH",
    );
    opts.optopt("m", "month", "Month to display [Default: current month]", "YYYY-MM");
    opts.optopt("s", "select", "Day whose events are listed [Default: today]", "YYYY-MM-DD");
    opts.optopt(
        "e",
        "export-attendance",
        "Write filtered attendance as CSV to a file or directory instead of showing the calendar",
        "PATH",
    );
    opts.optopt("", "course", "Only export attendance for this course id", "COURSE_ID");
    opts.optopt("", "from", "Only export attendance on or after this day", "YYYY-MM-DD");
    opts.optopt("", "to", "Only export attendance on or before this day", "YYYY-MM-DD");
    opts.optopt("", "status", "Only export attendance with this status (present, absent, late)", "STATUS");
    opts.optopt("a", "add-event", "Add an event with this title instead of showing the calendar", "TITLE");
    opts.optopt("", "on", "Day of the added event", "YYYY-MM-DD");
    opts.optopt("", "time", "Time of the added event [Default: All Day]", "TIME");
    opts.optopt("", "type", "Type of the added event: class, exam, meeting, holiday, other [Default: other]", "TYPE");
    opts.optopt("", "event-course", "Course the added event belongs to", "NAME");
    opts
}

/// Parse `YYYY-MM` into the first day of that month
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .ok()
        .filter(is_supported)
}

fn is_supported(date: &NaiveDate) -> bool {
    SUPPORTED_YEARS.contains(&date.year())
}

fn invalid(option: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("Provided value for option '{option}' is invalid: {err}");
    process::exit(1);
}

fn date_opt(matches: &getopts::Matches, option: &str) -> Option<NaiveDate> {
    match matches.opt_get::<NaiveDate>(option) {
        Ok(Some(date)) if !is_supported(&date) => invalid(
            option,
            format!("year must be between {} and {}", SUPPORTED_YEARS.start(), SUPPORTED_YEARS.end()),
        ),
        Ok(date) => date,
        Err(err) => invalid(option, err),
    }
}

/// The date string is passed through unchecked; the event service validates it
fn new_event(matches: &getopts::Matches) -> Option<CreateEventRequest> {
    let title = matches.opt_str("add-event")?;
    let date = match matches.opt_str("on") {
        Some(date) => date,
        None => invalid("on", "required with --add-event"),
    };

    Some(CreateEventRequest {
        title,
        date,
        time: matches.opt_str("time").unwrap_or_else(|| "All Day".to_string()),
        event_type: matches.opt_str("type").unwrap_or_else(|| "other".to_string()),
        course: matches.opt_str("event-course"),
    })
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_BIN_NAME"))));
        process::exit(0);
    }

    let month = matches.opt_str("month").map(|value| match parse_month(&value) {
        Some(month) => month,
        None => invalid("month", format!("expected YYYY-MM, got {value}")),
    });

    let status = matches.opt_str("status").map(|value| match value.parse::<AttendanceStatus>() {
        Ok(status) => status,
        Err(err) => invalid("status", err),
    });

    Args {
        data_dir: matches.opt_str("data-dir").map(PathBuf::from),
        month,
        select: date_opt(&matches, "select"),
        export_attendance: matches.opt_str("export-attendance").map(PathBuf::from),
        attendance_filter: AttendanceFilter {
            course_id: matches.opt_str("course"),
            start_date: date_opt(&matches, "from"),
            end_date: date_opt(&matches, "to"),
            status,
        },
        new_event: new_event(&matches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-01"), NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(parse_month("2025-13"), None);
        assert_eq!(parse_month("January"), None);
    }

    #[test]
    fn test_parse_month_rejects_unsupported_years() {
        assert_eq!(parse_month("+262142-12"), None);
        assert_eq!(parse_month("0000-01"), None);
        assert_eq!(parse_month("9999-12"), NaiveDate::from_ymd_opt(9999, 12, 1));
        assert_eq!(parse_month("0001-01"), NaiveDate::from_ymd_opt(1, 1, 1));
    }

    #[test]
    fn test_parse_add_event() {
        let parsed = parse(args(&["-a", "Science Fair", "--on", "2025-01-25", "--type", "other", "--event-course", "Physics"]));
        let event = parsed.new_event.unwrap();

        assert_eq!(event.title, "Science Fair");
        assert_eq!(event.date, "2025-01-25");
        assert_eq!(event.time, "All Day");
        assert_eq!(event.course.as_deref(), Some("Physics"));

        // Left for the event service to reject
        let parsed = parse(args(&["--add-event", "Quiz", "--on", "25/01/2025"]));
        assert_eq!(parsed.new_event.unwrap().date, "25/01/2025");
        assert!(parse(args(&[])).new_event.is_none());
    }

    #[test]
    fn test_parse_calendar_options() {
        let parsed = parse(args(&["--data-dir", "/tmp/center", "-m", "2025-02", "--select", "2025-02-14"]));

        assert_eq!(parsed.data_dir, Some(PathBuf::from("/tmp/center")));
        assert_eq!(parsed.month, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(parsed.select, NaiveDate::from_ymd_opt(2025, 2, 14));
        assert!(parsed.export_attendance.is_none());
    }

    #[test]
    fn test_parse_export_filter() {
        let parsed = parse(args(&["-e", "out.csv", "--course", "math", "--from", "2025-01-01", "--status", "late"]));

        assert_eq!(parsed.export_attendance, Some(PathBuf::from("out.csv")));
        assert_eq!(parsed.attendance_filter.course_id.as_deref(), Some("math"));
        assert_eq!(parsed.attendance_filter.start_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(parsed.attendance_filter.end_date, None);
        assert_eq!(parsed.attendance_filter.status, Some(AttendanceStatus::Late));
    }
}
