//! Core traits for schedule entities.
//!
//! These traits define the public interface for schedule data.
//! Implementations can be in-memory tables, database-backed, or remote.

use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

// ============================================================================
// Core Entity Traits
// ============================================================================

/// A shuttle line with its departures for one schedule type
pub trait Route: Send + Sync {
    fn id(&self) -> &RouteIdentifier;

    /// Display name (e.g., "Metro Station - Campus")
    fn name(&self) -> &str;

    /// Timed departures, ascending by clock time
    fn departures(&self) -> &[TimedDeparture];

    /// Continuously running services, in display order
    fn loop_services(&self) -> &[LoopService];
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Provider of the route tables for both schedule types
pub trait ScheduleProvider: Send + Sync {
    /// Version tag of the loaded table
    fn version(&self) -> &str;

    /// All routes of one table, in display order
    fn routes(&self, schedule: ScheduleType) -> Vec<Arc<dyn Route>>;

    fn route(&self, schedule: ScheduleType, id: &RouteIdentifier) -> Option<Arc<dyn Route>>;

    fn require_route(&self, schedule: ScheduleType, id: &RouteIdentifier) -> Result<Arc<dyn Route>> {
        self.route(schedule, id)
            .ok_or_else(|| TransitError::RouteNotFound(id.clone()))
    }
}
