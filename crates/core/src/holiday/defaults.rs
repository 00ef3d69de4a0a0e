//! Built-in public holiday calendar for 2025.

use chrono::{NaiveDate, Utc};
use shuttle_transit::models::{Override, OverrideKind, OverrideSet};

pub const DEFAULT_YEAR: i32 = 2025;

use OverrideKind::{Holiday, Workday};

// (month, day, kind, name, note)
const BASELINE_2025: &[(u32, u32, OverrideKind, &str, Option<&str>)] = &[
    (1, 1, Holiday, "New Year's Day", None),
    (1, 26, Workday, "Spring Festival make-up workday", Some("Sunday workday")),
    (1, 28, Holiday, "Spring Festival Eve", None),
    (1, 29, Holiday, "Spring Festival", None),
    (1, 30, Holiday, "Spring Festival", None),
    (1, 31, Holiday, "Spring Festival", None),
    (2, 1, Holiday, "Spring Festival", None),
    (2, 2, Holiday, "Spring Festival", None),
    (2, 3, Holiday, "Spring Festival", None),
    (2, 4, Holiday, "Spring Festival", None),
    (2, 8, Workday, "Spring Festival make-up workday", Some("Saturday workday")),
    (4, 5, Holiday, "Qingming Festival", None),
    (4, 6, Holiday, "Qingming Festival", None),
    (4, 7, Holiday, "Qingming Festival", None),
    (4, 27, Workday, "Labour Day make-up workday", Some("Sunday workday")),
    (5, 1, Holiday, "Labour Day", None),
    (5, 2, Holiday, "Labour Day", None),
    (5, 3, Holiday, "Labour Day", None),
    (5, 4, Holiday, "Labour Day", None),
    (5, 5, Holiday, "Labour Day", None),
    (5, 31, Holiday, "Dragon Boat Festival", None),
    (6, 1, Workday, "Dragon Boat Festival make-up workday", Some("Sunday workday")),
    (6, 2, Holiday, "Dragon Boat Festival", None),
    (9, 28, Workday, "National Day make-up workday", Some("Sunday workday")),
    (10, 1, Holiday, "National Day", None),
    (10, 2, Holiday, "National Day", None),
    (10, 3, Holiday, "National Day", None),
    (10, 4, Holiday, "National Day", None),
    (10, 5, Holiday, "National Day", None),
    (10, 6, Holiday, "Mid-Autumn Festival", None),
    (10, 7, Holiday, "National Day", None),
    (10, 8, Holiday, "National Day", None),
    (10, 11, Workday, "National Day make-up workday", Some("Saturday workday")),
];

/// The baseline used on first start, after a reset, and when storage fails
pub fn default_override_set() -> OverrideSet {
    let adjustments = BASELINE_2025
        .iter()
        .filter_map(|&(month, day, kind, name, note)| {
            let date = NaiveDate::from_ymd_opt(DEFAULT_YEAR, month, day)?;
            let adjustment = Override::new(date, kind, name);
            Some(match note {
                Some(note) => adjustment.with_note(note),
                None => adjustment,
            })
        });

    OverrideSet::from_adjustments(DEFAULT_YEAR, adjustments, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use shuttle_transit::models::{resolve_schedule_type, ScheduleType};

    #[test]
    fn test_baseline_complete_and_sorted() {
        let overrides = default_override_set();
        assert_eq!(overrides.year(), 2025);
        assert_eq!(overrides.len(), BASELINE_2025.len());
        assert!(overrides.adjustments().windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_make_up_workdays_fall_on_weekends() {
        let overrides = default_override_set();
        for adjustment in overrides.iter().filter(|a| a.kind == OverrideKind::Workday) {
            assert!(
                matches!(adjustment.date.weekday(), Weekday::Sat | Weekday::Sun),
                "{} is not a weekend day",
                adjustment.date
            );
            assert_eq!(resolve_schedule_type(adjustment.date, &overrides), ScheduleType::Weekday);
        }
    }

    #[test]
    fn test_weekday_holiday() {
        let overrides = default_override_set();
        // Wednesday, National Day
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        assert_eq!(resolve_schedule_type(date, &overrides), ScheduleType::Holiday);
    }
}
