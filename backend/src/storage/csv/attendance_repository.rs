use anyhow::Result;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};
use shared::{AttendanceRecord, AttendanceStatus};
use std::fs::File;
use std::io::BufReader;

use super::connection::CsvConnection;
use crate::storage::traits::AttendanceStorage;

const ATTENDANCE_HEADER: [&str; 8] = [
    "id",
    "student_id",
    "student_name",
    "course_id",
    "course_name",
    "date",
    "status",
    "notes",
];

/// CSV-based attendance repository backed by `attendance.csv`
#[derive(Debug, Clone)]
pub struct CsvAttendanceRepository {
    connection: CsvConnection,
}

impl CsvAttendanceRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<AttendanceRecord>> {
        let file_path = self.connection.attendance_file_path();
        self.connection.ensure_csv_file_exists(&file_path, &ATTENDANCE_HEADER)?;

        let reader = BufReader::new(File::open(&file_path)?);
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let mut records = Vec::new();
        for (line, result) in csv_reader.records().enumerate() {
            let row = result?;
            match record_from_row(&row) {
                Some(record) => records.push(record),
                // header is line 1
                None => warn!("Skipping malformed attendance row {} in {}", line + 2, file_path.display()),
            }
        }

        Ok(records)
    }

    fn write_records(&self, records: &[AttendanceRecord]) -> Result<()> {
        let rows = records.iter().map(|record| {
            vec![
                record.id.clone(),
                record.student_id.clone(),
                record.student_name.clone(),
                record.course_id.clone(),
                record.course_name.clone(),
                record.date.format("%Y-%m-%d").to_string(),
                record.status.as_str().to_string(),
                record.notes.clone().unwrap_or_default(),
            ]
        });
        self.connection
            .write_csv_atomically(&self.connection.attendance_file_path(), &ATTENDANCE_HEADER, rows)
    }
}

fn record_from_row(row: &StringRecord) -> Option<AttendanceRecord> {
    let field = |index: usize| row.get(index).unwrap_or("").to_string();

    let date = NaiveDate::parse_from_str(row.get(5)?.trim(), "%Y-%m-%d").ok()?;
    let status = row.get(6)?.parse::<AttendanceStatus>().ok()?;
    let notes = field(7);

    Some(AttendanceRecord {
        id: field(0),
        student_id: field(1),
        student_name: field(2),
        course_id: field(3),
        course_name: field(4),
        date,
        status,
        notes: if notes.trim().is_empty() { None } else { Some(notes) },
    })
}

impl AttendanceStorage for CsvAttendanceRepository {
    fn list_attendance(&self) -> Result<Vec<AttendanceRecord>> {
        self.read_records()
    }

    fn store_attendance_record(&self, record: &AttendanceRecord) -> Result<()> {
        let mut records = self.read_records()?;
        records.push(record.clone());
        self.write_records(&records)?;
        info!(
            "Recorded {} for {} on {}",
            record.status, record.student_name, record.date
        );
        Ok(())
    }

    fn replace_attendance(&self, records: &[AttendanceRecord]) -> Result<()> {
        self.write_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use std::fs;

    fn record(id: &str, status: AttendanceStatus, notes: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            student_id: "1".to_string(),
            student_name: "Alice Johnson".to_string(),
            course_id: "math".to_string(),
            course_name: "Mathematics".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            status,
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_store_and_list() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = CsvAttendanceRepository::new(env.connection.clone());

        let present = record("1", AttendanceStatus::Present, None);
        let late = record("2", AttendanceStatus::Late, Some("Bus delayed, 10 min"));
        repo.store_attendance_record(&present)?;
        repo.store_attendance_record(&late)?;

        assert_eq!(repo.list_attendance()?, vec![present, late]);
        Ok(())
    }

    #[test]
    fn test_malformed_rows_are_skipped() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = CsvAttendanceRepository::new(env.connection.clone());
        fs::write(
            env.connection.attendance_file_path(),
            "id,student_id,student_name,course_id,course_name,date,status,notes\n\
             1,1,Alice Johnson,math,Mathematics,2025-01-15,present,\n\
             2,2,Bob Smith,physics,Physics,15/01/2025,present,\n\
             3,3,Carol Davis,chem,Chemistry,2025-01-15,excused,\n",
        )?;

        let records = repo.list_attendance()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_name, "Alice Johnson");
        Ok(())
    }
}
