//! Visit-time availability.
//!
//! Turns a civil date into the ordered list of bookable [`TimeSlot`]s for that
//! date. Every function here is pure: the result depends only on the date and
//! the [`BusinessHours`] table, never on the current time.
//!
//! # Functions
//!
//! - [`compute_availability`] — `YYYY-MM-DD` (or nothing) → slots, standard table
//! - [`compute_availability_with`] — parsed date (or nothing) → slots, any table
//! - [`slots_for_date`] — slots for a known date
//! - [`availability_range`] — day-by-day availability over consecutive dates
//! - [`next_open_date`] — first date with an opening window
//! - [`is_slot_available`] — whether a chosen time is bookable on a date

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{Result, VisitError};
use crate::hours::{BusinessHours, DayRule, OpeningWindow};
use crate::slot::TimeSlot;

/// Availability for one date of a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    /// The date (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Day of the week of `date`.
    pub weekday: Weekday,
    /// Whether the table has an opening window for this weekday.
    pub open: bool,
    /// Bookable slots, ascending. Empty when closed.
    pub slots: Vec<TimeSlot>,
}

/// Compute the bookable slots for a `YYYY-MM-DD` date using the
/// [standard table](BusinessHours::standard).
///
/// `None` means no date has been chosen yet and yields no slots. Weekends
/// yield no slots. Weekdays yield 30-minute slots from 07:00 up to and
/// including closing time (16:00 on Friday, 17:00 otherwise).
///
/// # Errors
///
/// Returns [`VisitError::InvalidDate`] if `date` is not a valid `YYYY-MM-DD`
/// calendar date.
///
/// # Examples
///
/// ```
/// use visit_engine::compute_availability;
///
/// // 2024-06-10 is a Monday
/// let slots = compute_availability(Some("2024-06-10")).unwrap();
/// assert_eq!(slots.len(), 21);
/// assert_eq!(slots[0].to_string(), "07:00");
/// assert_eq!(slots[20].to_string(), "17:00");
///
/// // 2024-06-15 is a Saturday
/// assert!(compute_availability(Some("2024-06-15")).unwrap().is_empty());
/// assert!(compute_availability(None).unwrap().is_empty());
/// ```
pub fn compute_availability(date: Option<&str>) -> Result<Vec<TimeSlot>> {
    let date = date.map(parse_civil_date).transpose()?;
    Ok(compute_availability_with(date, &BusinessHours::standard()))
}

/// Compute the bookable slots for an optional, already-parsed date against
/// an explicit table.
pub fn compute_availability_with(
    date: Option<NaiveDate>,
    hours: &BusinessHours,
) -> Vec<TimeSlot> {
    match date {
        Some(date) => slots_for_date(date, hours),
        None => Vec::new(),
    }
}

/// Enumerate the slots `hours` offers on `date`, ascending.
///
/// Slots start at the opening hour and advance by the table's step while they
/// do not pass the closing hour. Closing time itself is included when the
/// step lands on it.
pub fn slots_for_date(date: NaiveDate, hours: &BusinessHours) -> Vec<TimeSlot> {
    match hours.rule_for(date.weekday()) {
        DayRule::Closed => {
            tracing::trace!(%date, "closed");
            Vec::new()
        }
        DayRule::Open(window) => window_slots(window, hours.step_minutes()),
    }
}

/// Availability for `days` consecutive dates starting at `from`.
///
/// Closed dates are included with `open == false` and no slots, so the output
/// always has one entry per requested day (fewer only if the range runs past
/// the last representable date).
pub fn availability_range(
    from: NaiveDate,
    days: u32,
    hours: &BusinessHours,
) -> Vec<DayAvailability> {
    (0..u64::from(days))
        .map_while(|offset| from.checked_add_days(Days::new(offset)))
        .map(|date| {
            let rule = hours.rule_for(date.weekday());
            DayAvailability {
                date,
                weekday: date.weekday(),
                open: rule.is_open(),
                slots: slots_for_date(date, hours),
            }
        })
        .collect()
}

/// The first date on or after `from`, among the next `horizon_days` dates,
/// on which `hours` has an opening window.
///
/// Returns `None` when every date in the horizon is closed (including when
/// `horizon_days` is zero).
pub fn next_open_date(
    from: NaiveDate,
    hours: &BusinessHours,
    horizon_days: u32,
) -> Option<NaiveDate> {
    from.iter_days()
        .take(horizon_days as usize)
        .find(|date| hours.rule_for(date.weekday()).is_open())
}

/// Whether `slot` is one of the slots offered on `date`.
pub fn is_slot_available(date: NaiveDate, slot: TimeSlot, hours: &BusinessHours) -> bool {
    let Some(window) = hours.rule_for(date.weekday()).window() else {
        return false;
    };
    let minute = slot.minutes_since_midnight();
    (window.start_minute()..=window.end_minute()).contains(&minute)
        && (minute - window.start_minute()) % hours.step_minutes() == 0
}

/// Parse a `YYYY-MM-DD` civil date. No timezone is involved.
///
/// # Errors
///
/// Returns [`VisitError::InvalidDate`] if the string is not a calendar date.
pub fn parse_civil_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| VisitError::InvalidDate(format!("'{}': {}", s, e)))
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn window_slots(window: OpeningWindow, step_minutes: u16) -> Vec<TimeSlot> {
    // end_minute() <= 23:00, so every point is a valid time of day
    (window.start_minute()..=window.end_minute())
        .step_by(usize::from(step_minutes))
        .map(TimeSlot)
        .collect()
}
