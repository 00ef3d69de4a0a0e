//! Schedule data models, types, and traits.

pub mod calendar;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use calendar::{resolve_schedule_type, Override, OverrideKind, OverrideSet, WeekdayFlags};
pub use traits::{Route, ScheduleProvider};
pub use types::{
    ClockTime, DisplayTime, LoopService, LoopState, ScheduleType, TimedDeparture, TransitError,
    UpcomingEvent, Result, MINUTES_PER_DAY,
};
