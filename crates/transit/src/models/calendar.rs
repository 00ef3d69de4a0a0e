//! Holiday override calendar for choosing a schedule type.
//!
//! A date resolves to the holiday table when an override says so, or when it
//! falls on a weekend and no override says otherwise.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::types::ScheduleType;

/// Compact representation of a set of weekdays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeekdayFlags {
    pub(crate) flags: u8,
}

impl WeekdayFlags {
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    /// Saturday and Sunday
    pub fn weekend() -> Self {
        let mut flags = Self::new();
        flags.set(Weekday::Sat);
        flags.set(Weekday::Sun);
        flags
    }

    pub fn set(&mut self, weekday: Weekday) {
        self.flags |= 1 << weekday.number_from_monday();
    }

    pub fn unset(&mut self, weekday: Weekday) {
        self.flags &= !(1 << weekday.number_from_monday());
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        (self.flags & (1 << weekday.number_from_monday())) != 0
    }
}

/// Which table a date-specific override forces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideKind {
    /// Run the holiday table, even on a weekday
    Holiday,
    /// Run the weekday table, even on a weekend (make-up workday)
    Workday,
}

impl OverrideKind {
    pub fn schedule_type(self) -> ScheduleType {
        match self {
            OverrideKind::Holiday => ScheduleType::Holiday,
            OverrideKind::Workday => ScheduleType::Weekday,
        }
    }
}

/// A single date-keyed override
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: OverrideKind,
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Override {
    pub fn new(date: NaiveDate, kind: OverrideKind, label: impl Into<String>) -> Self {
        Self {
            date,
            kind,
            label: label.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Overrides for one year, kept sorted by date with at most one entry per date
#[derive(Clone, Debug)]
pub struct OverrideSet {
    year: i32,
    adjustments: Vec<Override>,
    last_modified: DateTime<Utc>,
}

impl OverrideSet {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            adjustments: Vec::new(),
            last_modified: Utc::now(),
        }
    }

    /// Build from unordered entries. A later entry replaces an earlier one with the same date.
    pub fn from_adjustments(
        year: i32,
        adjustments: impl IntoIterator<Item = Override>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let mut set = Self {
            year,
            adjustments: Vec::new(),
            last_modified,
        };
        for adjustment in adjustments {
            set.insert_sorted(adjustment);
        }
        set
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn adjustments(&self) -> &[Override] {
        &self.adjustments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Override> {
        self.adjustments.iter()
    }

    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }

    /// The override registered for `date`, if any
    pub fn get(&self, date: NaiveDate) -> Option<&Override> {
        self.adjustments
            .binary_search_by_key(&date, |adj| adj.date)
            .ok()
            .map(|idx| &self.adjustments[idx])
    }

    /// Insert or replace by date. Returns the replaced entry.
    pub fn upsert(&mut self, adjustment: Override) -> Option<Override> {
        let replaced = self.insert_sorted(adjustment);
        self.touch();
        replaced
    }

    /// Delete the entry for `date`. Absent dates are a no-op apart from the timestamp.
    pub fn remove(&mut self, date: NaiveDate) -> Option<Override> {
        let removed = self
            .adjustments
            .binary_search_by_key(&date, |adj| adj.date)
            .ok()
            .map(|idx| self.adjustments.remove(idx));
        self.touch();
        removed
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Same year and entries, ignoring the timestamp
    pub fn same_entries(&self, other: &OverrideSet) -> bool {
        self.year == other.year && self.adjustments == other.adjustments
    }

    fn insert_sorted(&mut self, adjustment: Override) -> Option<Override> {
        match self.adjustments.binary_search_by_key(&adjustment.date, |adj| adj.date) {
            Ok(idx) => Some(std::mem::replace(&mut self.adjustments[idx], adjustment)),
            Err(idx) => {
                self.adjustments.insert(idx, adjustment);
                None
            }
        }
    }
}

impl<'a> IntoIterator for &'a OverrideSet {
    type Item = &'a Override;
    type IntoIter = std::slice::Iter<'a, Override>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pick the schedule table for a local calendar date.
pub fn resolve_schedule_type(date: NaiveDate, overrides: &OverrideSet) -> ScheduleType {
    // Explicit overrides win over the weekend heuristic
    if let Some(adjustment) = overrides.get(date) {
        return adjustment.kind.schedule_type();
    }

    if WeekdayFlags::weekend().contains(date.weekday()) {
        ScheduleType::Holiday
    } else {
        ScheduleType::Weekday
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_flags() {
        let weekend = WeekdayFlags::weekend();
        assert!(weekend.contains(Weekday::Sat));
        assert!(weekend.contains(Weekday::Sun));
        assert!(!weekend.contains(Weekday::Mon));
        assert!(!weekend.contains(Weekday::Fri));

        let mut flags = weekend;
        flags.unset(Weekday::Sat);
        assert!(!flags.contains(Weekday::Sat));
    }

    #[test]
    fn test_resolve_without_overrides() {
        let overrides = OverrideSet::new(2025);

        assert_eq!(resolve_schedule_type(date(2025, 3, 1), &overrides), ScheduleType::Holiday); // Saturday
        assert_eq!(resolve_schedule_type(date(2025, 3, 2), &overrides), ScheduleType::Holiday); // Sunday
        assert_eq!(resolve_schedule_type(date(2025, 3, 4), &overrides), ScheduleType::Weekday); // Tuesday
    }

    #[test]
    fn test_resolve_with_overrides() {
        let overrides = OverrideSet::from_adjustments(
            2025,
            vec![
                Override::new(date(2025, 1, 26), OverrideKind::Workday, "Make-up workday"), // Sunday
                Override::new(date(2025, 3, 4), OverrideKind::Holiday, "Campus closure"), // Tuesday
            ],
            Utc::now(),
        );

        assert_eq!(resolve_schedule_type(date(2025, 1, 26), &overrides), ScheduleType::Weekday);
        assert_eq!(resolve_schedule_type(date(2025, 3, 4), &overrides), ScheduleType::Holiday);
        // Neighbouring dates fall back to the heuristic
        assert_eq!(resolve_schedule_type(date(2025, 1, 25), &overrides), ScheduleType::Holiday);
        assert_eq!(resolve_schedule_type(date(2025, 3, 5), &overrides), ScheduleType::Weekday);
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let overrides = OverrideSet::from_adjustments(
            2025,
            vec![Override::new(date(2025, 5, 1), OverrideKind::Holiday, "Labour Day")],
            Utc::now(),
        );
        let day = date(2025, 5, 1);
        assert_eq!(
            resolve_schedule_type(day, &overrides),
            resolve_schedule_type(day, &overrides)
        );
    }

    #[test]
    fn test_upsert_keeps_sorted_and_unique() {
        let mut overrides = OverrideSet::new(2025);
        overrides.upsert(Override::new(date(2025, 10, 1), OverrideKind::Holiday, "National Day"));
        overrides.upsert(Override::new(date(2025, 1, 1), OverrideKind::Holiday, "New Year"));
        overrides.upsert(Override::new(date(2025, 5, 1), OverrideKind::Holiday, "Labour Day"));

        let replaced = overrides.upsert(
            Override::new(date(2025, 5, 1), OverrideKind::Workday, "Swapped").with_note("Thursday"),
        );
        assert_eq!(replaced.map(|o| o.label), Some("Labour Day".to_string()));

        let dates: Vec<_> = overrides.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(2025, 1, 1), date(2025, 5, 1), date(2025, 10, 1)]);
        assert_eq!(overrides.get(date(2025, 5, 1)).unwrap().kind, OverrideKind::Workday);
    }

    #[test]
    fn test_from_adjustments_last_write_wins() {
        let overrides = OverrideSet::from_adjustments(
            2025,
            vec![
                Override::new(date(2025, 2, 8), OverrideKind::Holiday, "first"),
                Override::new(date(2025, 2, 8), OverrideKind::Workday, "second"),
            ],
            Utc::now(),
        );
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get(date(2025, 2, 8)).unwrap().label, "second");
    }

    #[test]
    fn test_remove() {
        let mut overrides = OverrideSet::new(2025);
        overrides.upsert(Override::new(date(2025, 4, 5), OverrideKind::Holiday, "Qingming"));
        let before = overrides.last_modified();

        assert!(overrides.remove(date(2025, 4, 6)).is_none());
        assert_eq!(overrides.len(), 1);
        assert!(overrides.last_modified() >= before);

        assert!(overrides.remove(date(2025, 4, 5)).is_some());
        assert!(overrides.is_empty());
        assert!(overrides.get(date(2025, 4, 5)).is_none());
    }

    #[test]
    fn test_override_wire_names() {
        let adjustment =
            Override::new(date(2025, 2, 8), OverrideKind::Workday, "Make-up workday").with_note("Saturday");
        let json = serde_json::to_value(&adjustment).unwrap();

        assert_eq!(json["date"], "2025-02-08");
        assert_eq!(json["type"], "workday");
        assert_eq!(json["name"], "Make-up workday");
        assert_eq!(json["description"], "Saturday");

        let plain = Override::new(date(2025, 1, 1), OverrideKind::Holiday, "New Year");
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("description").is_none());
    }
}
