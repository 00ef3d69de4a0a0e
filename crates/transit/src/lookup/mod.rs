//! Departure lookups over loaded routes.

pub mod departures;

pub use departures::{loop_events, upcoming_departures};
