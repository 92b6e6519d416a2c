//! Business-hours tables.
//!
//! A [`BusinessHours`] table holds exactly one [`DayRule`] per weekday plus the
//! slot step. The [standard table](BusinessHours::standard) is closed on
//! weekends, opens 07:00-16:00 on Friday and 07:00-17:00 Monday through
//! Thursday, in 30-minute steps.
//!
//! Tables can also be loaded from TOML. Weekdays that are not listed are
//! closed:
//!
//! ```toml
//! step_minutes = 30
//! monday = { start_hour = 7, end_hour = 17 }
//! friday = { start_hour = 7, end_hour = 16 }
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VisitError};
use crate::slot::MINUTES_PER_DAY;

/// Default distance between two consecutive slots.
pub const DEFAULT_STEP_MINUTES: u16 = 30;

/// Weekdays in table order (Sunday = 0 … Saturday = 6).
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

// ── OpeningWindow ───────────────────────────────────────────────────────────

/// An `(start_hour, end_hour)` pair in 24-hour local time.
///
/// Both bounds are bookable: a 07-17 window offers a slot at exactly 17:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct OpeningWindow {
    start_hour: u8,
    end_hour: u8,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWindow {
    start_hour: u8,
    end_hour: u8,
}

impl TryFrom<RawWindow> for OpeningWindow {
    type Error = VisitError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        OpeningWindow::new(raw.start_hour, raw.end_hour)
    }
}

impl OpeningWindow {
    /// Create a window opening at `start_hour` and closing at `end_hour`.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::InvalidHours`] if an hour is above 23 or the
    /// window closes before it opens.
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self> {
        if start_hour > 23 || end_hour > 23 {
            return Err(VisitError::InvalidHours(format!(
                "window {start_hour}-{end_hour} is outside 0-23"
            )));
        }
        if start_hour > end_hour {
            return Err(VisitError::InvalidHours(format!(
                "window {start_hour}-{end_hour} closes before it opens"
            )));
        }
        Ok(OpeningWindow {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Opening time as minutes since midnight.
    pub fn start_minute(&self) -> u16 {
        u16::from(self.start_hour) * 60
    }

    /// Closing time as minutes since midnight.
    pub fn end_minute(&self) -> u16 {
        u16::from(self.end_hour) * 60
    }
}

// ── DayRule ─────────────────────────────────────────────────────────────────

/// What a weekday offers: nothing, or one opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayRule {
    #[default]
    Closed,
    Open(OpeningWindow),
}

impl DayRule {
    pub fn is_open(&self) -> bool {
        matches!(self, DayRule::Open(_))
    }

    pub fn window(&self) -> Option<OpeningWindow> {
        match self {
            DayRule::Closed => None,
            DayRule::Open(window) => Some(*window),
        }
    }
}

impl From<Option<OpeningWindow>> for DayRule {
    fn from(window: Option<OpeningWindow>) -> Self {
        window.map_or(DayRule::Closed, DayRule::Open)
    }
}

// ── BusinessHours ───────────────────────────────────────────────────────────

/// A weekday → [`DayRule`] table with a fixed slot step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHours", into = "RawHours")]
pub struct BusinessHours {
    days: [DayRule; 7],
    step_minutes: u16,
}

/// On-disk shape of [`BusinessHours`]; absent weekdays are closed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHours {
    #[serde(default = "default_step")]
    step_minutes: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sunday: Option<OpeningWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monday: Option<OpeningWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tuesday: Option<OpeningWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wednesday: Option<OpeningWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thursday: Option<OpeningWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    friday: Option<OpeningWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saturday: Option<OpeningWindow>,
}

fn default_step() -> u16 {
    DEFAULT_STEP_MINUTES
}

impl TryFrom<RawHours> for BusinessHours {
    type Error = VisitError;

    fn try_from(raw: RawHours) -> Result<Self> {
        let hours = BusinessHours {
            days: [
                raw.sunday.into(),
                raw.monday.into(),
                raw.tuesday.into(),
                raw.wednesday.into(),
                raw.thursday.into(),
                raw.friday.into(),
                raw.saturday.into(),
            ],
            step_minutes: raw.step_minutes,
        };
        hours.validate()?;
        Ok(hours)
    }
}

impl From<BusinessHours> for RawHours {
    fn from(hours: BusinessHours) -> Self {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] =
            hours.days.map(|rule| rule.window());
        RawHours {
            step_minutes: hours.step_minutes,
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        }
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self::standard()
    }
}

impl BusinessHours {
    /// The fixed visiting table: weekends closed, Friday 07-16,
    /// Monday through Thursday 07-17, 30-minute steps.
    pub fn standard() -> Self {
        let weekday = DayRule::Open(OpeningWindow {
            start_hour: 7,
            end_hour: 17,
        });
        let friday = DayRule::Open(OpeningWindow {
            start_hour: 7,
            end_hour: 16,
        });
        BusinessHours {
            days: [
                DayRule::Closed,
                weekday,
                weekday,
                weekday,
                weekday,
                friday,
                DayRule::Closed,
            ],
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }

    /// A table with every weekday closed and the default step.
    pub fn closed() -> Self {
        BusinessHours {
            days: [DayRule::Closed; 7],
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }

    /// Replace the rule for one weekday.
    pub fn with_day(mut self, weekday: Weekday, rule: DayRule) -> Self {
        self.days[weekday.num_days_from_sunday() as usize] = rule;
        self
    }

    /// Replace the slot step.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::InvalidHours`] if the step is zero or longer
    /// than a day.
    pub fn with_step(mut self, step_minutes: u16) -> Result<Self> {
        self.step_minutes = step_minutes;
        self.validate()?;
        Ok(self)
    }

    /// The rule that applies on `weekday`.
    pub fn rule_for(&self, weekday: Weekday) -> DayRule {
        self.days[weekday.num_days_from_sunday() as usize]
    }

    pub fn step_minutes(&self) -> u16 {
        self.step_minutes
    }

    /// Weekdays with an opening window, Sunday first.
    pub fn open_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS
            .into_iter()
            .filter(move |day| self.rule_for(*day).is_open())
    }

    /// Check the table invariants.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::InvalidHours`] if the step is outside
    /// `1..=1440` minutes or any window is malformed.
    pub fn validate(&self) -> Result<()> {
        if self.step_minutes == 0 || self.step_minutes > MINUTES_PER_DAY {
            return Err(VisitError::InvalidHours(format!(
                "step of {} minutes is outside 1-{}",
                self.step_minutes, MINUTES_PER_DAY
            )));
        }
        for (day, rule) in WEEKDAYS.iter().zip(self.days.iter()) {
            if let DayRule::Open(window) = rule {
                OpeningWindow::new(window.start_hour, window.end_hour)
                    .map_err(|e| VisitError::InvalidHours(format!("{day:?}: {e}")))?;
            }
        }
        Ok(())
    }

    /// Parse a table from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::Config`] if the document is not valid TOML or has
    /// unknown keys, and [`VisitError::InvalidHours`] if the table it
    /// describes breaks an invariant.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawHours = toml::from_str(s).map_err(|e| VisitError::Config(e.to_string()))?;
        let hours = BusinessHours::try_from(raw)?;
        tracing::debug!(
            step_minutes = hours.step_minutes,
            open_days = hours.open_days().count(),
            "loaded business hours"
        );
        Ok(hours)
    }

    /// Render the table as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`VisitError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&RawHours::from(self.clone()))
            .map_err(|e| VisitError::Config(e.to_string()))
    }
}
