//! Domain models that differ from their wire representation in `shared`.

pub mod event;

pub use event::CalendarEvent;
