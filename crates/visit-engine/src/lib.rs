//! # visit-engine
//!
//! Deterministic visit-time availability for an attraction booking service.
//!
//! Given a calendar date, the engine returns the ordered `HH:MM` slots a
//! visitor may book, using a weekday business-hours table. Everything is
//! computed from integer minute arithmetic; nothing reads the system clock.
//!
//! ## Modules
//!
//! - [`availability`] — date → bookable slots, ranges, next open date, slot checks
//! - [`hours`] — business-hours tables (standard table and TOML loading)
//! - [`slot`] — `HH:MM` time-of-day values
//! - [`status`] — active/inactive canonicalization for listed records
//! - [`error`] — Error types

pub mod availability;
pub mod error;
pub mod hours;
pub mod slot;
pub mod status;

pub use availability::{
    availability_range, compute_availability, compute_availability_with, is_slot_available,
    next_open_date, parse_civil_date, slots_for_date, DayAvailability,
};
pub use error::VisitError;
pub use hours::{BusinessHours, DayRule, OpeningWindow, DEFAULT_STEP_MINUTES};
pub use slot::TimeSlot;
pub use status::{canonicalize_status, filter_by_status, RecordStatus, StatusFilter};
