//! Departure board service for a campus shuttle.
//!
//! Wraps the pure lookups of [`shuttle_transit`] with the holiday override
//! configuration, its storage, and the query interface a display renders.

pub mod board;
pub mod error;
pub mod holiday;
pub mod schedule;
pub mod settings;
pub mod storage;

// Re-export transit from the transit crate
pub use shuttle_transit as transit;

pub use board::{BoardQuery, BoardView, DepartureBoard, RouteBoard, ScheduleMode};
pub use error::{ConfigError, Result};
pub use holiday::HolidayManager;
pub use schedule::bundled_schedule;
pub use settings::BoardSettings;
