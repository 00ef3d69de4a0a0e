//! Core data types and enums for schedule data.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::identifiers::*;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

// ============================================================================
// Enums
// ============================================================================

/// Which of the two route tables applies to a date
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScheduleType {
    Weekday,
    Holiday,
}

// ============================================================================
// Clock times
// ============================================================================

/// Local wall-clock time of day at minute resolution.
///
/// Stored as minutes since midnight, always below [`MINUTES_PER_DAY`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(TransitError::InvalidClockTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Parse `HH:MM` (a single-digit hour is accepted).
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || TransitError::InvalidClockTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).map_err(|_| invalid())
    }

    pub fn minutes(&self) -> u32 {
        self.0 as u32
    }

    pub fn hour(&self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes() % 60
    }

    /// Minutes left in the day after this time (1440 at midnight)
    pub fn minutes_remaining_in_day(&self) -> u32 {
        MINUTES_PER_DAY - self.minutes()
    }
}

impl From<NaiveTime> for ClockTime {
    /// Seconds and below are truncated.
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(time: ClockTime) -> Self {
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or_default()
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TransitError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl std::str::FromStr for ClockTime {
    type Err = TransitError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A single scheduled departure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimedDeparture {
    pub time: ClockTime,
    pub detail: Arc<str>,
}

impl TimedDeparture {
    pub fn new(time: ClockTime, detail: impl Into<Arc<str>>) -> Self {
        Self {
            time,
            detail: detail.into(),
        }
    }
}

/// A service running continuously between two times of the same day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoopService {
    start: ClockTime,
    end: ClockTime,
    detail: Arc<str>,
}

/// Where a query time falls relative to a loop window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Query time is inside the window (both ends inclusive)
    Active,
    /// The window opens later today
    Pending { minutes_until: u32 },
    /// The window already closed today
    Finished,
}

impl LoopService {
    /// Returns `Err` if the window ends before it starts; overnight loops are not supported.
    pub fn new(start: ClockTime, end: ClockTime, detail: impl Into<Arc<str>>) -> Result<Self> {
        if start > end {
            return Err(TransitError::InvalidLoopWindow { start, end });
        }

        Ok(Self {
            start,
            end,
            detail: detail.into(),
        })
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn detail(&self) -> &Arc<str> {
        &self.detail
    }

    pub fn state_at(&self, query: ClockTime) -> LoopState {
        if query < self.start {
            LoopState::Pending {
                minutes_until: self.start.minutes() - query.minutes(),
            }
        } else if query <= self.end {
            LoopState::Active
        } else {
            LoopState::Finished
        }
    }
}

/// What an upcoming event shows in its time column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayTime {
    /// A loop service is running right now
    Running,
    At(ClockTime),
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayTime::Running => f.write_str("--"),
            DisplayTime::At(time) => fmt::Display::fmt(time, f),
        }
    }
}

impl Serialize for DisplayTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of lookup output. Produced fresh per query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub time: DisplayTime,
    /// Relative to the query time, not the live clock
    pub minutes_until: u32,
    pub is_next_day: bool,
    pub detail: Arc<str>,
    pub is_active_loop: bool,
}

impl UpcomingEvent {
    pub fn display_time(&self) -> String {
        self.time.to_string()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Route not found: {0}")]
    RouteNotFound(RouteIdentifier),

    #[error("Invalid clock time: {0:?}")]
    InvalidClockTime(String),

    #[error("Loop window ends before it starts: {start}-{end}")]
    InvalidLoopWindow { start: ClockTime, end: ClockTime },

    #[error("Departures of route {route} are not ascending: {previous} is followed by {next}")]
    UnsortedDepartures {
        route: RouteIdentifier,
        previous: ClockTime,
        next: ClockTime,
    },

    #[error("Duplicate route {route} in {schedule} table")]
    DuplicateRoute {
        route: RouteIdentifier,
        schedule: ScheduleType,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
