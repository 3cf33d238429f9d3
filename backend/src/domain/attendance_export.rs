//! Attendance filtering and CSV export.
//!
//! Filtering happens in memory over the full attendance snapshot; the CSV
//! is generated as a string so the caller decides where it goes.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use log::info;
use shared::{AttendanceExportResponse, AttendanceFilter, AttendanceRecord, AttendanceStats, AttendanceStatus};

const CSV_HEADERS: [&str; 5] = ["Student Name", "Course Name", "Date", "Status", "Notes"];

#[derive(Debug, Clone, Default)]
pub struct AttendanceExportService;

impl AttendanceExportService {
    pub fn new() -> Self {
        Self
    }

    /// Records matching every set field of `filter`. Date bounds are inclusive.
    pub fn filter<'a>(&self, records: &'a [AttendanceRecord], filter: &AttendanceFilter) -> Vec<&'a AttendanceRecord> {
        records.iter().filter(|record| matches_filter(record, filter)).collect()
    }

    pub fn stats<'a, I>(&self, records: I) -> AttendanceStats
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        records.into_iter().fold(AttendanceStats::default(), |mut stats, record| {
            stats.total += 1;
            match record.status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Late => stats.late += 1,
                AttendanceStatus::Absent => stats.absent += 1,
            }
            stats
        })
    }

    /// Render records as CSV with every field quoted
    pub fn to_csv(&self, records: &[&AttendanceRecord]) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADERS)?;
        for record in records {
            let date = record.date.format("%-m/%-d/%Y").to_string();
            writer.write_record([
                record.student_name.as_str(),
                record.course_name.as_str(),
                date.as_str(),
                record.status.as_str(),
                record.notes.as_deref().unwrap_or(""),
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("Failed to finish CSV: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn export_filename(&self, today: NaiveDate) -> String {
        format!("attendance-{}.csv", today.format("%Y-%m-%d"))
    }

    /// Filter and render in one step. Fails when nothing matches.
    pub fn export(
        &self,
        records: &[AttendanceRecord],
        filter: &AttendanceFilter,
        today: NaiveDate,
    ) -> Result<AttendanceExportResponse> {
        let selected = self.filter(records, filter);
        if selected.is_empty() {
            bail!("No records to export");
        }

        let csv_content = self.to_csv(&selected)?;
        let response = AttendanceExportResponse {
            csv_content,
            filename: self.export_filename(today),
            record_count: selected.len(),
        };

        info!(
            "Exported {} of {} attendance records to {}",
            response.record_count,
            records.len(),
            response.filename
        );
        Ok(response)
    }
}

fn matches_filter(record: &AttendanceRecord, filter: &AttendanceFilter) -> bool {
    if let Some(course_id) = filter.course_id.as_deref() {
        if record.course_id != course_id {
            return false;
        }
    }
    if let Some(start) = filter.start_date {
        if record.date < start {
            return false;
        }
    }
    if let Some(end) = filter.end_date {
        if record.date > end {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if record.status != status {
            return false;
        }
    }
    true
}
