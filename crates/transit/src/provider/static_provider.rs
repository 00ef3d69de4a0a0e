//! In-memory schedule provider backed by a versioned route table.
//!
//! Tables are validated once at load so the lookup engine can rely on
//! ascending departures and well-formed loop windows.

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use serde::Deserialize;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};

// ============================================================================
// Concrete Implementations of Traits
// ============================================================================

#[derive(Clone, Debug)]
pub struct RouteImpl {
    pub id: RouteIdentifier,
    pub name: Arc<str>,
    pub departures: Vec<TimedDeparture>,
    pub loop_services: Vec<LoopService>,
}

impl RouteImpl {
    /// Fails on departures that are not in ascending clock order
    pub fn validate(&self) -> Result<()> {
        if let Some((previous, next)) = self
            .departures
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.time > b.time)
        {
            return Err(TransitError::UnsortedDepartures {
                route: self.id.clone(),
                previous: previous.time,
                next: next.time,
            });
        }
        Ok(())
    }
}

impl Route for RouteImpl {
    fn id(&self) -> &RouteIdentifier {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn departures(&self) -> &[TimedDeparture] {
        &self.departures
    }

    fn loop_services(&self) -> &[LoopService] {
        &self.loop_services
    }
}

// ============================================================================
// Table format
// ============================================================================

#[derive(Deserialize)]
struct TableRecord {
    version: String,
    weekday: Vec<RouteRecord>,
    holiday: Vec<RouteRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteRecord {
    id: RouteIdentifier,
    name: String,
    #[serde(default)]
    departures: Vec<DepartureRecord>,
    #[serde(default)]
    loop_services: Vec<LoopRecord>,
}

#[derive(Deserialize)]
struct DepartureRecord {
    time: ClockTime,
    detail: String,
}

#[derive(Deserialize)]
struct LoopRecord {
    start: ClockTime,
    end: ClockTime,
    detail: String,
}

impl RouteRecord {
    fn into_route(self) -> Result<RouteImpl> {
        let loop_services = self
            .loop_services
            .into_iter()
            .map(|l| LoopService::new(l.start, l.end, l.detail))
            .collect::<Result<Vec<_>>>()?;

        Ok(RouteImpl {
            id: self.id,
            name: self.name.into(),
            departures: self
                .departures
                .into_iter()
                .map(|d| TimedDeparture::new(d.time, d.detail))
                .collect(),
            loop_services,
        })
    }
}

// ============================================================================
// Static Provider
// ============================================================================

#[derive(Clone, Default)]
struct RouteTable {
    routes: Vec<Arc<RouteImpl>>,
    route_map: HashMap<RouteIdentifier, Arc<RouteImpl>>,
}

impl RouteTable {
    fn build(schedule: ScheduleType, routes: Vec<RouteImpl>) -> Result<Self> {
        let mut table = Self::default();
        for route in routes {
            route.validate()?;
            let route = Arc::new(route);
            if table.route_map.insert(route.id.clone(), route.clone()).is_some() {
                return Err(TransitError::DuplicateRoute {
                    route: route.id.clone(),
                    schedule,
                });
            }
            table.routes.push(route);
        }
        Ok(table)
    }
}

/// In-memory provider for the weekday and holiday tables
///
/// This type is cheap to clone since all routes are stored in `Arc`s.
#[derive(Clone)]
pub struct StaticScheduleProvider {
    version: Arc<str>,
    weekday: RouteTable,
    holiday: RouteTable,
}

impl StaticScheduleProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self {
            version: "".into(),
            weekday: RouteTable::default(),
            holiday: RouteTable::default(),
        }
    }

    /// Build from already constructed routes, validating each table
    pub fn from_routes(
        version: impl Into<Arc<str>>,
        weekday: Vec<RouteImpl>,
        holiday: Vec<RouteImpl>,
    ) -> Result<Self> {
        Ok(Self {
            version: version.into(),
            weekday: RouteTable::build(ScheduleType::Weekday, weekday)?,
            holiday: RouteTable::build(ScheduleType::Holiday, holiday)?,
        })
    }

    /// Parse and validate a table in the `{version, weekday, holiday}` JSON format
    pub fn from_json(json: &str) -> Result<Self> {
        let record: TableRecord = serde_json::from_str(json)
            .map_err(|e| TransitError::SerializationError(e.to_string()))?;

        let weekday = record
            .weekday
            .into_iter()
            .map(RouteRecord::into_route)
            .collect::<Result<Vec<_>>>()?;
        let holiday = record
            .holiday
            .into_iter()
            .map(RouteRecord::into_route)
            .collect::<Result<Vec<_>>>()?;

        Self::from_routes(record.version, weekday, holiday)
    }

    fn table(&self, schedule: ScheduleType) -> &RouteTable {
        match schedule {
            ScheduleType::Weekday => &self.weekday,
            ScheduleType::Holiday => &self.holiday,
        }
    }
}

impl Default for StaticScheduleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleProvider for StaticScheduleProvider {
    fn version(&self) -> &str {
        &self.version
    }

    fn routes(&self, schedule: ScheduleType) -> Vec<Arc<dyn Route>> {
        self.table(schedule)
            .routes
            .iter()
            .map(|r| r.clone() as Arc<dyn Route>)
            .collect()
    }

    fn route(&self, schedule: ScheduleType, id: &RouteIdentifier) -> Option<Arc<dyn Route>> {
        self.table(schedule)
            .route_map
            .get(id)
            .map(|r| r.clone() as Arc<dyn Route>)
    }
}
