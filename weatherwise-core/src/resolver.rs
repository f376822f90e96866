//! Normalizes what the date picker hands over into one selection shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw date-picker output before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDateInput {
    /// Range picker: either end may still be unset while the user is picking.
    Range(Option<NaiveDate>, Option<NaiveDate>),
    /// Single-day picker.
    Single(Option<NaiveDate>),
}

/// A resolved date selection.
///
/// Hourly picks are stored as a degenerate pair (`start == end`), so both
/// modes share this shape. A daily pick may still lack its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateSelection {
    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end: Some(end) }
    }

    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: Some(date) }
    }

    /// Number of forecast days needed to reach `end` from `today`, counting
    /// both ends. `None` until the end is known.
    pub fn horizon(&self, today: NaiveDate) -> Option<u32> {
        self.end.map(|end| horizon(today, end))
    }
}

/// `|end - today|` in whole days, plus one.
pub fn horizon(today: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - today).num_days().unsigned_abs();
    u32::try_from(days).unwrap_or(u32::MAX - 1) + 1
}

/// Resolve raw picker output. Returns `None` until a start is present.
pub fn resolve(raw: RawDateInput) -> Option<DateSelection> {
    match raw {
        RawDateInput::Range(Some(start), Some(end)) if end < start => None,
        RawDateInput::Range(start, end) => start.map(|start| DateSelection { start, end }),
        RawDateInput::Single(date) => date.map(DateSelection::single),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn horizon_counts_today_as_one() {
        let today = day(2024, 6, 18);
        assert_eq!(horizon(today, today), 1);
        for n in 1..20 {
            assert_eq!(horizon(today, today + Duration::days(n)), n as u32 + 1);
        }
    }

    #[test]
    fn horizon_uses_absolute_distance() {
        let today = day(2024, 6, 18);
        assert_eq!(horizon(today, today - Duration::days(2)), 3);
    }

    #[test]
    fn horizon_requires_end() {
        let sel = DateSelection { start: day(2024, 6, 18), end: None };
        assert_eq!(sel.horizon(day(2024, 6, 18)), None);
    }

    #[test]
    fn single_date_becomes_degenerate_pair() {
        let d = day(2024, 6, 19);
        let sel = resolve(RawDateInput::Single(Some(d))).unwrap();
        assert_eq!(sel.start, d);
        assert_eq!(sel.end, Some(d));
    }

    #[test]
    fn nothing_resolved_without_start() {
        assert_eq!(resolve(RawDateInput::Single(None)), None);
        assert_eq!(resolve(RawDateInput::Range(None, None)), None);
        assert_eq!(resolve(RawDateInput::Range(None, Some(day(2024, 6, 20)))), None);
    }

    #[test]
    fn open_range_keeps_start_only() {
        let sel = resolve(RawDateInput::Range(Some(day(2024, 6, 18)), None)).unwrap();
        assert_eq!(sel.end, None);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let raw = RawDateInput::Range(Some(day(2024, 6, 20)), Some(day(2024, 6, 18)));
        assert_eq!(resolve(raw), None);
    }
}
