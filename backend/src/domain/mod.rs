//! # Domain Module
//!
//! Contains the business logic of the tuition dashboard, independent of
//! any UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **calendar**: month grid construction, event lookup and date predicates
//! - **calendar_view**: the calendar page's cursors and derived day cells
//! - **event_validation**: turns untyped event records into domain events
//! - **event_service**: loads stored events and validates new ones before storing
//! - **attendance_export**: attendance filtering, stats and CSV generation
//! - **invoice**: line-item amounts, tax, invoice drafts and the invoice list
//! - **member_directory**: member search and filters
//! - **dashboard_stats**: headline counts and course utilization
//! - **mappers**: domain values to `shared` DTOs
//!
//! ## Business Rules
//!
//! - Every month view is exactly 6 Sunday-aligned weeks
//! - Events join grid cells by calendar date equality only
//! - Month navigation clamps the day to the end of shorter months
//! - Malformed event records are rejected before reaching the calendar
//!   or storage

pub mod attendance_export;
pub mod calendar;
pub mod calendar_view;
pub mod dashboard_stats;
pub mod event_service;
pub mod event_validation;
pub mod invoice;
pub mod mappers;
pub mod member_directory;
pub mod models;

pub use attendance_export::*;
pub use calendar::*;
pub use calendar_view::*;
pub use dashboard_stats::*;
pub use event_service::*;
pub use event_validation::*;
pub use invoice::*;
pub use member_directory::*;
