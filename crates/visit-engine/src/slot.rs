//! Wall-clock time-of-day slots.
//!
//! A [`TimeSlot`] is stored as whole minutes since local midnight. Slots are
//! built from integer hour/minute arithmetic and never from the system clock,
//! so a slot list for a given date is the same on every machine and on every
//! day of the year, DST transitions included.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, VisitError};

/// Minutes in one civil day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A bookable time of day, formatted as zero-padded 24-hour `HH:MM`.
///
/// Ordering follows the clock: `07:00 < 07:30 < 17:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(pub(crate) u16);

impl TimeSlot {
    /// Build a slot from an hour (0-23) and minute (0-59).
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::InvalidTime`] if either component is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use visit_engine::TimeSlot;
    ///
    /// let slot = TimeSlot::from_hm(7, 30).unwrap();
    /// assert_eq!(slot.to_string(), "07:30");
    /// ```
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(VisitError::InvalidTime(format!(
                "'{hour:02}:{minute:02}' is not a time of day"
            )));
        }
        Ok(TimeSlot(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Build a slot from minutes since midnight.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::InvalidTime`] if `minutes` reaches the next day.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(VisitError::InvalidTime(format!(
                "{minutes} minutes is past the end of the day"
            )));
        }
        Ok(TimeSlot(minutes))
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = VisitError;

    fn from_str(s: &str) -> Result<Self> {
        let time = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|e| VisitError::InvalidTime(format!("'{}': {}", s, e)))?;
        // hour() <= 23 and minute() <= 59 are guaranteed by NaiveTime
        Ok(TimeSlot((time.hour() * 60 + time.minute()) as u16))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
