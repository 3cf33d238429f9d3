//! # CSV Storage Module
//!
//! File-based storage for the dashboard data directory.
//!
//! ## File Format
//!
//! ```csv
//! id,title,date,time,type,course
//! 1,Mathematics Class,2025-01-16,10:00 AM,class,Advanced Mathematics
//! 3,Mid-term Exam,2025-01-20,9:00 AM,exam,
//! ```
//!
//! ```csv
//! id,student_id,student_name,course_id,course_name,date,status,notes
//! 1,1,Alice Johnson,math,Mathematics,2025-01-15,present,
//! ```
//!
//! Writes go to a temp file first and are renamed into place.

pub mod attendance_repository;
pub mod config_repository;
pub mod connection;
pub mod event_repository;

#[cfg(test)]
pub mod test_utils;

pub use attendance_repository::CsvAttendanceRepository;
pub use config_repository::ConfigRepository;
pub use connection::CsvConnection;
pub use event_repository::CsvEventRepository;
