//! # Storage Module
//!
//! Data directory backing the dashboard when no REST API is available.
//! The domain layer only sees the traits in [`traits`]; the CSV
//! implementation in [`csv`] can be swapped without touching it.
//!
//! ## Layout
//!
//! ```text
//! data/
//! ├── dashboard_config.yaml
//! ├── events.csv
//! └── attendance.csv
//! ```

pub mod csv;
pub mod traits;

pub use traits::{AttendanceStorage, EventStorage};
