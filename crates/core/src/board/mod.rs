//! Query interface for the presentation layer.
//!
//! A board view bundles the resolved schedule type and the next few events
//! of every route for one query date and time.

pub mod timetable;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use shuttle_transit::prelude::*;
use tracing::debug;

use crate::holiday::HolidayManager;
use crate::settings::BoardSettings;
use crate::storage::ConfigStore;

pub use timetable::{DetailGroup, LoopWindow, RouteTimetable};

/// How today's schedule type is chosen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// Resolve from the query date and the holiday overrides
    #[default]
    Smart,
    /// Force a table for the query date. Tomorrow is still resolved.
    Manual(ScheduleType),
}

/// One board query. Date and time default to `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardQuery {
    pub now: NaiveDateTime,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub mode: ScheduleMode,
}

impl BoardQuery {
    pub fn live(now: NaiveDateTime) -> Self {
        Self {
            now,
            date: None,
            time: None,
            mode: ScheduleMode::Smart,
        }
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn at_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_mode(mut self, mode: ScheduleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn query_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| self.now.date())
    }

    pub fn query_time(&self) -> ClockTime {
        ClockTime::from(self.time.unwrap_or_else(|| self.now.time()))
    }

    /// True when neither date nor time was overridden
    pub fn is_live(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteBoard {
    pub id: RouteIdentifier,
    pub name: Arc<str>,
    pub events: Vec<UpcomingEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub query_date: NaiveDate,
    pub query_time: ClockTime,
    pub schedule_type: ScheduleType,
    pub mode: ScheduleMode,
    pub is_query_today: bool,
    /// Override registered for the query date
    pub holiday: Option<Override>,
    pub routes: Vec<RouteBoard>,
}

impl BoardView {
    /// Text for a route with no remaining events
    pub fn empty_message(&self) -> &'static str {
        if self.is_query_today {
            "No more departures today"
        } else {
            "No more departures that day"
        }
    }
}

/// Answers board queries against a schedule table and the holiday configuration
pub struct DepartureBoard<'a, P: ScheduleProvider + ?Sized, S: ConfigStore> {
    provider: &'a P,
    holidays: &'a HolidayManager<S>,
    lookahead: usize,
}

impl<'a, P: ScheduleProvider + ?Sized, S: ConfigStore> DepartureBoard<'a, P, S> {
    pub fn new(provider: &'a P, holidays: &'a HolidayManager<S>, settings: &BoardSettings) -> Self {
        Self {
            provider,
            holidays,
            lookahead: settings.lookahead,
        }
    }

    pub fn schedule_type(&self, query: &BoardQuery) -> ScheduleType {
        match query.mode {
            ScheduleMode::Smart => self.holidays.schedule_type(query.query_date()),
            ScheduleMode::Manual(schedule) => schedule,
        }
    }

    pub fn view(&self, query: &BoardQuery) -> BoardView {
        let query_date = query.query_date();
        let query_time = query.query_time();
        let schedule_type = self.schedule_type(query);
        let tomorrow_type = query_date
            .succ_opt()
            .map(|tomorrow| self.holidays.schedule_type(tomorrow));

        debug!(
            date = %query_date,
            time = %query_time,
            today = %schedule_type,
            tomorrow = ?tomorrow_type,
            "board query"
        );

        let routes = self
            .provider
            .routes(schedule_type)
            .into_iter()
            .map(|route| {
                let tomorrow =
                    tomorrow_type.and_then(|schedule| self.provider.route(schedule, route.id()));
                let events = upcoming_departures(
                    route.as_ref(),
                    query_time,
                    tomorrow.as_deref(),
                    self.lookahead,
                );
                RouteBoard {
                    id: route.id().clone(),
                    name: route.name().into(),
                    events,
                }
            })
            .collect();

        BoardView {
            query_date,
            query_time,
            schedule_type,
            mode: query.mode,
            is_query_today: query_date == query.now.date(),
            holiday: self.holidays.holiday_info(query_date).cloned(),
            routes,
        }
    }

    /// Every route of one table, for the full schedule listing
    pub fn timetable(&self, schedule: ScheduleType) -> Vec<RouteTimetable> {
        self.provider
            .routes(schedule)
            .iter()
            .map(|route| RouteTimetable::for_route(route.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::bundled_schedule;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
        day.and_hms_opt(h, m, 0).unwrap()
    }

    fn summary(route: &RouteBoard) -> Vec<(String, u32, bool, bool)> {
        route
            .events
            .iter()
            .map(|e| (e.display_time(), e.minutes_until, e.is_next_day, e.is_active_loop))
            .collect()
    }

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn test_weekday_midday() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        // Tuesday
        let view = board.view(&BoardQuery::live(at(date(2025, 3, 4), 12, 0)));
        assert_eq!(view.schedule_type, ScheduleType::Weekday);
        assert!(view.is_query_today);
        assert!(view.holiday.is_none());

        let metro = &view.routes[0];
        assert_eq!(summary(metro), vec![(s("--"), 0, false, true), (s("14:00"), 120, false, false)]);

        let dorm = &view.routes[1];
        assert_eq!(summary(dorm), vec![(s("21:30"), 570, false, false), (s("13:00"), 60, false, false)]);
    }

    #[test]
    fn test_friday_night_spills_into_holiday_table() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        let view = board.view(&BoardQuery::live(at(date(2025, 3, 7), 23, 30)));
        assert_eq!(view.schedule_type, ScheduleType::Weekday);

        let metro = &view.routes[0];
        assert_eq!(summary(metro), vec![(s("08:00"), 510, true, false), (s("09:30"), 600, true, false)]);

        // Saturday loop start comes before Saturday departures
        let dorm = &view.routes[1];
        assert_eq!(summary(dorm), vec![(s("21:00"), 1290, true, false), (s("09:00"), 570, true, false)]);
    }

    #[test]
    fn test_make_up_workday_uses_weekday_table() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        // Saturday 2025-02-08 is a make-up workday in the baseline
        let query = BoardQuery::live(at(date(2025, 2, 8), 7, 0));
        let view = board.view(&query);
        assert_eq!(view.schedule_type, ScheduleType::Weekday);
        assert_eq!(view.holiday.as_ref().map(|h| h.kind), Some(OverrideKind::Workday));
        // Midday loop is still pending, then the next timed departure
        let metro = &view.routes[0];
        assert_eq!(summary(metro), vec![(s("11:30"), 270, false, false), (s("07:20"), 20, false, false)]);
    }

    #[test]
    fn test_manual_mode_forces_today_only() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        // Saturday forced to weekday; Sunday still resolves to holiday
        let query = BoardQuery::live(at(date(2025, 3, 8), 21, 30))
            .with_mode(ScheduleMode::Manual(ScheduleType::Weekday));
        let view = board.view(&query);

        assert_eq!(view.schedule_type, ScheduleType::Weekday);
        let metro = &view.routes[0];
        assert_eq!(summary(metro), vec![(s("08:00"), 150 + 480, true, false), (s("09:30"), 150 + 570, true, false)]);
    }

    #[test]
    fn test_query_other_date_and_time() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        let now = at(date(2025, 3, 4), 9, 0);
        let query = BoardQuery::live(now)
            .on_date(date(2025, 10, 1))
            .at_time(NaiveTime::from_hms_opt(17, 45, 30).unwrap());
        let view = board.view(&query);

        assert!(!query.is_live());
        assert!(!view.is_query_today);
        assert_eq!(view.empty_message(), "No more departures that day");
        assert_eq!(view.query_time.to_string(), "17:45");
        assert_eq!(view.schedule_type, ScheduleType::Holiday);
        assert_eq!(view.holiday.as_ref().map(|h| h.label.as_str()), Some("National Day"));

        let metro = &view.routes[0];
        assert_eq!(metro.events[0].display_time(), "18:00");
        assert_eq!(metro.events[0].minutes_until, 15);
    }

    #[test]
    fn test_repeated_views_identical() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        let query = BoardQuery::live(at(date(2025, 5, 30), 22, 15));
        let first = serde_json::to_string(&board.view(&query)).unwrap();
        let second = serde_json::to_string(&board.view(&query)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_lookahead() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let settings = BoardSettings {
            lookahead: 0,
            ..BoardSettings::default()
        };
        let board = DepartureBoard::new(&provider, &holidays, &settings);

        let view = board.view(&BoardQuery::live(at(date(2025, 3, 4), 12, 0)));
        assert!(view.routes.iter().all(|r| r.events.is_empty()));
        assert_eq!(view.empty_message(), "No more departures today");
    }

    #[test]
    fn test_last_representable_date_has_no_spillover() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        let view = board.view(&BoardQuery::live(NaiveDate::MAX.and_hms_opt(23, 59, 0).unwrap()));
        assert!(view.routes.iter().all(|r| r.events.is_empty()));
    }

    #[test]
    fn test_timetable_lists_every_route() {
        let provider = bundled_schedule().unwrap();
        let holidays = HolidayManager::with_default_key(MemoryStore::new());
        let board = DepartureBoard::new(&provider, &holidays, &BoardSettings::default());

        let timetable = board.timetable(ScheduleType::Weekday);
        assert_eq!(timetable.len(), 2);
        assert_eq!(timetable[0].loop_windows.len(), 1);
        assert_eq!(timetable[0].groups.len(), 3);
        assert_eq!(timetable[1].groups[0].times.len(), 4);
    }
}
