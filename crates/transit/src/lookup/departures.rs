//! Next-departure lookup for a single route.
//!
//! All countdowns are measured from the query time, so a query for 14:00 on
//! a future date yields the same numbers as one made live at 14:00.

use crate::models::{
    traits::Route,
    types::{ClockTime, DisplayTime, LoopState, UpcomingEvent},
};

/// Loop services that are running or still to start at `query`.
///
/// Finished loops produce nothing.
pub fn loop_events(route: &dyn Route, query: ClockTime) -> Vec<UpcomingEvent> {
    route
        .loop_services()
        .iter()
        .filter_map(|service| match service.state_at(query) {
            LoopState::Active => Some(UpcomingEvent {
                time: DisplayTime::Running,
                minutes_until: 0,
                is_next_day: false,
                detail: service.detail().clone(),
                is_active_loop: true,
            }),
            LoopState::Pending { minutes_until } => Some(UpcomingEvent {
                time: DisplayTime::At(service.start()),
                minutes_until,
                is_next_day: false,
                detail: service.detail().clone(),
                is_active_loop: false,
            }),
            LoopState::Finished => None,
        })
        .collect()
}

/// The next `count` events on `route` after `query`.
///
/// Loop events fill the budget first, then today's timed departures. When
/// today runs out, `tomorrow` (the same line in the next day's table)
/// supplies its loop start times and then its first departures.
///
/// Relies on `route.departures()` being ascending, which providers check at load.
pub fn upcoming_departures(
    route: &dyn Route,
    query: ClockTime,
    tomorrow: Option<&dyn Route>,
    count: usize,
) -> Vec<UpcomingEvent> {
    if count == 0 {
        return Vec::new();
    }

    let mut upcoming: Vec<UpcomingEvent> = loop_events(route, query)
        .into_iter()
        .take(count)
        .collect();

    // Same-day departures strictly after the query minute
    let departures = route.departures();
    let first_after = departures.partition_point(|d| d.time <= query);
    let remaining = count - upcoming.len();
    upcoming.extend(departures[first_after..].iter().take(remaining).map(|departure| {
        UpcomingEvent {
            time: DisplayTime::At(departure.time),
            minutes_until: departure.time.minutes().saturating_sub(query.minutes()),
            is_next_day: false,
            detail: departure.detail.clone(),
            is_active_loop: false,
        }
    }));

    let Some(tomorrow) = tomorrow else {
        return upcoming;
    };

    // Tomorrow only the scheduled loop starts count, nothing is running yet
    let rollover = query.minutes_remaining_in_day();
    let remaining = count - upcoming.len();
    upcoming.extend(tomorrow.loop_services().iter().take(remaining).map(|service| {
        UpcomingEvent {
            time: DisplayTime::At(service.start()),
            minutes_until: rollover + service.start().minutes(),
            is_next_day: true,
            detail: service.detail().clone(),
            is_active_loop: false,
        }
    }));

    let remaining = count - upcoming.len();
    upcoming.extend(tomorrow.departures().iter().take(remaining).map(|departure| {
        UpcomingEvent {
            time: DisplayTime::At(departure.time),
            minutes_until: rollover + departure.time.minutes(),
            is_next_day: true,
            detail: departure.detail.clone(),
            is_active_loop: false,
        }
    }));

    upcoming
}
