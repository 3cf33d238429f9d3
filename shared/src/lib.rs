use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar event as it arrives from the data source.
///
/// Dates are kept as the raw `YYYY-MM-DD` string here; they are only turned
/// into calendar dates once the record has been validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Day key in `YYYY-MM-DD` format
    pub date: String,
    /// Free-form display time, e.g. "10:00 AM" or "All Day"
    pub time: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

impl CalendarEvent {
    /// Generate an event ID from the creation time
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("event::{}", epoch_millis)
    }
}

/// Body of the add-event form. The id is assigned when the event is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    /// Day key in `YYYY-MM-DD` format, validated before storing
    pub date: String,
    pub time: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

/// Classification of a calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Class,
    Exam,
    Meeting,
    Holiday,
    Other,
}

impl EventType {
    /// Wire name, as stored in `events.csv` and the REST payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Class => "class",
            EventType::Exam => "exam",
            EventType::Meeting => "meeting",
            EventType::Holiday => "holiday",
            EventType::Other => "other",
        }
    }

    /// Capitalized badge label
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Class => "Class",
            EventType::Exam => "Exam",
            EventType::Meeting => "Meeting",
            EventType::Holiday => "Holiday",
            EventType::Other => "Other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" => Ok(EventType::Class),
            "exam" => Ok(EventType::Exam),
            "meeting" => Ok(EventType::Meeting),
            "holiday" => Ok(EventType::Holiday),
            "other" => Ok(EventType::Other),
            other => Err(format!("Unknown event type: {}", other)),
        }
    }
}

/// Direction for month navigation in the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationDirection {
    Prev,
    Next,
}

/// A single rendered cell of the month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDayCell {
    /// Day key in `YYYY-MM-DD` format
    pub date: String,
    /// Day of month shown in the cell
    pub day: u32,
    pub is_today: bool,
    /// False for the leading/trailing days borrowed from adjacent months
    pub is_in_displayed_month: bool,
    pub is_selected: bool,
    /// Events shown inline in the cell (capped by the preview limit)
    pub preview_events: Vec<CalendarEvent>,
    /// Number of events on this day that did not fit in the preview
    pub overflow_count: usize,
}

/// The 6 x 7 month view sent to front ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonthGrid {
    pub month: u32,
    pub year: i32,
    /// Display title, e.g. "January 2025"
    pub title: String,
    pub weekday_names: Vec<String>,
    pub weeks: Vec<Vec<CalendarDayCell>>,
}

/// Events for the side panel of the selected day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDayEvents {
    pub date: String,
    /// Long form, e.g. "Thursday, January 16, 2025"
    pub formatted_date: String,
    pub events: Vec<CalendarEvent>,
}

/// Attendance status for a single check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("Unknown attendance status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub course_id: String,
    pub course_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Filter selection on the attendance export page. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceFilter {
    pub course_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub total: usize,
    pub present: usize,
    pub late: usize,
    pub absent: usize,
}

/// Generated attendance CSV, ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceExportResponse {
    pub csv_content: String,
    pub filename: String,
    pub record_count: usize,
}

/// A billable line on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: u64,
    pub description: String,
    pub quantity: u32,
    pub rate: f64,
    /// quantity x rate x rate multiplier
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLinePayload {
    pub description: String,
    pub qty: u32,
    pub rate: f64,
    pub amount: f64,
}

/// Body of the create-invoice request sent to the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub member_id: String,
    pub notes: String,
    pub items: Vec<InvoiceLinePayload>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Payment state of an issued invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(InvoiceStatus::Paid),
            "pending" => Ok(InvoiceStatus::Pending),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(format!("Unknown invoice status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    pub amount: f64,
}

/// An issued invoice as shown in the invoice list.
///
/// Amounts are in tuition units; the rate multiplier is applied for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub student_name: String,
    pub amount: f64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub items: Vec<InvoiceLine>,
}

/// Search box and status dropdown on the invoice list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceListFilter {
    /// Case-insensitive match against student name or invoice id
    pub search: Option<String>,
    pub status: Option<InvoiceStatus>,
}

/// Stat cards above the invoice list, after the rate multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSummary {
    pub total: f64,
    pub paid: f64,
    pub pending: f64,
    pub overdue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(EnrollmentStatus::Active),
            "inactive" => Ok(EnrollmentStatus::Inactive),
            other => Err(format!("Unknown status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course: String,
    pub join_date: NaiveDate,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub instructor: String,
    pub schedule: String,
    pub fee: f64,
    pub students: u32,
    pub max_students: u32,
    pub status: EnrollmentStatus,
}

/// Per-course capacity figures for the analytics page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseUtilization {
    pub name: String,
    pub students: u32,
    pub capacity: u32,
    /// Rounded and clamped to 0..=100
    pub percentage: u32,
}

/// Headline numbers for the dashboard landing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub todays_attendance: usize,
    pub todays_present: usize,
    pub total_courses: usize,
    pub active_courses: usize,
    pub total_enrollment: u32,
    pub projected_revenue: f64,
    pub course_utilization: Vec<CourseUtilization>,
}
