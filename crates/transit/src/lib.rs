//! # shuttle-transit
//!
//! Schedule data and next-departure lookups for a shuttle departure board.
//!
//! ## Features
//!
//! - **Two schedule types**: weekday and holiday route tables
//! - **Holiday overrides**: date-keyed overrides on top of a weekend heuristic
//! - **Loop services**: continuously running windows alongside timed departures
//! - **Next-day spillover**: lookups continue into tomorrow's table
//!
//! ## Example
//!
//! ```
//! use shuttle_transit::prelude::*;
//! use chrono::NaiveDate;
//!
//! let provider = StaticScheduleProvider::from_json(r#"{
//!     "version": "demo",
//!     "weekday": [{"id": "metro", "name": "Metro - Campus",
//!                  "departures": [{"time": "08:00", "detail": "Metro > Campus"}]}],
//!     "holiday": [{"id": "metro", "name": "Metro - Campus",
//!                  "departures": [{"time": "09:30", "detail": "Metro > Campus"}]}]
//! }"#).unwrap();
//!
//! let overrides = OverrideSet::new(2025);
//! let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
//! let today = resolve_schedule_type(friday, &overrides);
//! let tomorrow = resolve_schedule_type(friday.succ_opt().unwrap(), &overrides);
//! assert_eq!(today, ScheduleType::Weekday);
//! assert_eq!(tomorrow, ScheduleType::Holiday);
//!
//! let id = RouteIdentifier::new("metro");
//! let route = provider.route(today, &id).unwrap();
//! let next_day = provider.route(tomorrow, &id);
//!
//! let events = upcoming_departures(
//!     route.as_ref(),
//!     ClockTime::parse("23:00").unwrap(),
//!     next_day.as_deref(),
//!     2,
//! );
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].display_time(), "09:30");
//! assert_eq!(events[0].minutes_until, 60 + 570);
//! ```

pub mod identifiers;
pub mod lookup;
pub mod models;
pub mod provider;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::lookup::{loop_events, upcoming_departures};
    pub use crate::models::{calendar::*, traits::*, types::*};
    pub use crate::provider::{static_provider::StaticScheduleProvider, RouteImpl};
}

pub use prelude::*;
