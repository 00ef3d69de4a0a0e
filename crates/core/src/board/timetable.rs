//! Full-day timetable for display next to the live board.

use std::sync::Arc;

use serde::Serialize;
use shuttle_transit::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopWindow {
    pub start: ClockTime,
    pub end: ClockTime,
    pub detail: Arc<str>,
}

/// Departure times sharing one detail line
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DetailGroup {
    pub detail: Arc<str>,
    pub times: Vec<ClockTime>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTimetable {
    pub id: RouteIdentifier,
    pub name: String,
    pub loop_windows: Vec<LoopWindow>,
    /// In order of each detail's first departure
    pub groups: Vec<DetailGroup>,
}

impl RouteTimetable {
    pub fn for_route(route: &dyn Route) -> Self {
        let loop_windows = route
            .loop_services()
            .iter()
            .map(|service| LoopWindow {
                start: service.start(),
                end: service.end(),
                detail: service.detail().clone(),
            })
            .collect();

        let mut groups: Vec<DetailGroup> = Vec::new();
        for departure in route.departures() {
            match groups.iter_mut().find(|g| g.detail == departure.detail) {
                Some(group) => group.times.push(departure.time),
                None => groups.push(DetailGroup {
                    detail: departure.detail.clone(),
                    times: vec![departure.time],
                }),
            }
        }

        Self {
            id: route.id().clone(),
            name: route.name().to_string(),
            loop_windows,
            groups,
        }
    }
}
