//! Occurrence computation.
//!
//! Both entry points are pure functions of `(rule, date)`. Dates are calendar
//! dates already truncated by the caller; no time zone handling happens here.
//!
//! The weekday scans are bounded (`14 + 7n` days for the first occurrence,
//! `7n + 7` for the next one) and fall back to a plain `n` week advance when
//! nothing matches.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, trace};

use super::calendar::{add_days, add_period, add_weeks};
use super::rule::{RecurrenceRule, WeekdaySet};
use crate::error::RecurrenceError;

/// Initial due date for an item created on `from_date`.
///
/// For weekly rules with weekdays the scan includes `from_date` itself, so a
/// Monday chore created on a Monday is due the same day.
pub fn first_occurrence(
    rule: &RecurrenceRule,
    from_date: NaiveDate,
) -> Result<NaiveDate, RecurrenceError> {
    let interval = rule.effective_interval();

    let due = match rule.active_weekdays() {
        Some(days) => {
            let limit = interval.saturating_mul(7).saturating_add(14);
            match scan_weekdays(from_date, 0, limit, days) {
                Some(date) => date,
                None => {
                    debug!(%from_date, interval, "weekday scan found no match, advancing by weeks");
                    add_weeks(from_date, interval)?
                }
            }
        }
        None => add_period(from_date, rule.period, interval)?,
    };

    trace!(%from_date, %due, period = %rule.period, "first occurrence");
    Ok(due)
}

/// Due date following an occurrence anchored at `anchor_date`.
///
/// The anchor is never returned: weekly scans start the day after it.
pub fn next_occurrence(
    rule: &RecurrenceRule,
    anchor_date: NaiveDate,
) -> Result<NaiveDate, RecurrenceError> {
    let interval = rule.effective_interval();

    let due = match rule.active_weekdays() {
        Some(days) => {
            let limit = interval.saturating_mul(7).saturating_add(7);
            match scan_weekdays(anchor_date, 1, limit, days) {
                Some(date) => date,
                None => {
                    debug!(%anchor_date, interval, "weekday scan found no match, advancing by weeks");
                    let advanced = add_weeks(anchor_date, interval)?;
                    scan_weekdays(advanced, 0, 6, days).unwrap_or(advanced)
                }
            }
        }
        None => add_period(anchor_date, rule.period, interval)?,
    };

    trace!(%anchor_date, %due, period = %rule.period, "next occurrence");
    Ok(due)
}

/// `count` successive due dates starting from [`first_occurrence`].
pub fn upcoming(
    rule: &RecurrenceRule,
    from_date: NaiveDate,
    count: usize,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    let mut dates = Vec::with_capacity(count);
    if count == 0 {
        return Ok(dates);
    }

    let mut current = first_occurrence(rule, from_date)?;
    dates.push(current);
    while dates.len() < count {
        current = next_occurrence(rule, current)?;
        dates.push(current);
    }
    Ok(dates)
}

/// First date in `start + first ..= start + last` whose weekday is in `days`.
fn scan_weekdays(start: NaiveDate, first: i64, last: i64, days: &WeekdaySet) -> Option<NaiveDate> {
    (first..=last)
        .map_while(|offset| add_days(start, offset).ok())
        .find(|date| days.contains(date.weekday()))
}

impl RecurrenceRule {
    /// See [`first_occurrence`].
    pub fn first_occurrence(&self, from_date: NaiveDate) -> Result<NaiveDate, RecurrenceError> {
        first_occurrence(self, from_date)
    }

    /// See [`next_occurrence`].
    pub fn next_occurrence(&self, anchor_date: NaiveDate) -> Result<NaiveDate, RecurrenceError> {
        next_occurrence(self, anchor_date)
    }

    /// See [`upcoming`].
    pub fn upcoming(&self, from_date: NaiveDate, count: usize) -> Result<Vec<NaiveDate>, RecurrenceError> {
        upcoming(self, from_date, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Period;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mwf() -> WeekdaySet {
        WeekdaySet::from_indices([1, 3, 5]).unwrap()
    }

    // 2025-06-02 is a Monday
    fn monday() -> NaiveDate {
        date(2025, 6, 2)
    }

    #[test]
    fn daily_adds_interval_days() {
        let rule = RecurrenceRule::daily(3);
        assert_eq!(first_occurrence(&rule, monday()).unwrap(), date(2025, 6, 5));
        assert_eq!(next_occurrence(&rule, monday()).unwrap(), date(2025, 6, 5));
    }

    #[test]
    fn weekly_without_weekdays_adds_weeks() {
        let rule = RecurrenceRule::weekly(2, WeekdaySet::new());
        assert_eq!(first_occurrence(&rule, monday()).unwrap(), date(2025, 6, 16));
        assert_eq!(next_occurrence(&rule, monday()).unwrap(), date(2025, 6, 16));
    }

    #[test]
    fn first_occurrence_includes_the_from_date() {
        let rule = RecurrenceRule::weekly(1, WeekdaySet::from_indices([1]).unwrap());
        assert_eq!(first_occurrence(&rule, monday()).unwrap(), monday());
    }

    #[test]
    fn first_occurrence_picks_nearest_later_weekday() {
        // Saturday only, created on a Monday
        let rule = RecurrenceRule::weekly(1, WeekdaySet::from_indices([6]).unwrap());
        assert_eq!(first_occurrence(&rule, monday()).unwrap(), date(2025, 6, 7));
    }

    #[test]
    fn next_occurrence_never_returns_the_anchor() {
        let rule = RecurrenceRule::weekly(1, WeekdaySet::from_indices([1]).unwrap());
        assert_eq!(next_occurrence(&rule, monday()).unwrap(), date(2025, 6, 9));
    }

    #[test]
    fn next_occurrence_walks_mon_wed_fri() {
        let rule = RecurrenceRule::weekly(1, mwf());
        let wed = next_occurrence(&rule, monday()).unwrap();
        assert_eq!(wed, date(2025, 6, 4));
        let fri = next_occurrence(&rule, wed).unwrap();
        assert_eq!(fri, date(2025, 6, 6));
        let mon = next_occurrence(&rule, fri).unwrap();
        assert_eq!(mon, date(2025, 6, 9));
    }

    #[test]
    fn weekly_interval_does_not_skip_weeks_when_weekdays_set() {
        // Nearest selected weekday wins even with a 2 week interval.
        let rule = RecurrenceRule::weekly(2, WeekdaySet::from_indices([1]).unwrap());
        assert_eq!(next_occurrence(&rule, monday()).unwrap(), date(2025, 6, 9));
    }

    #[test]
    fn weekdays_ignored_for_non_weekly_periods() {
        let rule = RecurrenceRule::daily(1).with_weekdays(WeekdaySet::from_indices([5]).unwrap());
        assert_eq!(next_occurrence(&rule, monday()).unwrap(), date(2025, 6, 3));
    }

    #[test]
    fn monthly_clamps_end_of_month() {
        let rule = RecurrenceRule::monthly(1);
        assert_eq!(first_occurrence(&rule, date(2025, 1, 31)).unwrap(), date(2025, 2, 28));
        assert_eq!(next_occurrence(&rule, date(2024, 1, 31)).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn yearly_adds_years() {
        let rule = RecurrenceRule::yearly(2);
        assert_eq!(next_occurrence(&rule, date(2024, 2, 29)).unwrap(), date(2026, 2, 28));
        assert_eq!(first_occurrence(&rule, monday()).unwrap(), date(2027, 6, 2));
    }

    #[test]
    fn zero_and_negative_intervals_behave_like_one() {
        let one = RecurrenceRule::daily(1);
        for raw in [0, -1, -30] {
            let rule = RecurrenceRule::daily(raw);
            assert_eq!(
                first_occurrence(&rule, monday()).unwrap(),
                first_occurrence(&one, monday()).unwrap()
            );
            assert_eq!(
                next_occurrence(&rule, monday()).unwrap(),
                next_occurrence(&one, monday()).unwrap()
            );
        }
    }

    #[test]
    fn upcoming_chains_first_then_next() {
        let rule = RecurrenceRule::weekly(1, mwf());
        let dates = upcoming(&rule, monday(), 4).unwrap();
        assert_eq!(
            dates,
            vec![date(2025, 6, 2), date(2025, 6, 4), date(2025, 6, 6), date(2025, 6, 9)]
        );
        assert!(upcoming(&rule, monday(), 0).unwrap().is_empty());
    }

    #[test]
    fn overflow_surfaces_as_error() {
        let rule = RecurrenceRule::yearly(1);
        assert!(next_occurrence(&rule, NaiveDate::MAX).is_err());
    }

    #[test]
    fn method_forms_delegate() {
        let rule = RecurrenceRule::weekly(1, mwf());
        assert_eq!(rule.next_occurrence(monday()).unwrap(), date(2025, 6, 4));
        assert_eq!(rule.first_occurrence(monday()).unwrap(), monday());
        assert_eq!(rule.upcoming(monday(), 2).unwrap(), vec![monday(), date(2025, 6, 4)]);
    }

    fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (0u64..36_500).prop_map(|offset| {
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Days::new(offset)
        })
    }

    fn arb_rule() -> impl Strategy<Value = RecurrenceRule> {
        let period = prop_oneof![
            Just(Period::Day),
            Just(Period::Week),
            Just(Period::Month),
            Just(Period::Year),
        ];
        (period, -2i64..12, 0u8..128).prop_map(|(period, interval, mask)| {
            let days: Vec<i64> = (0..7i64).filter(|i| mask & (1u8 << *i) != 0).collect();
            RecurrenceRule::new(period, interval)
                .with_weekdays(WeekdaySet::from_indices(days).unwrap())
        })
    }

    proptest! {
        #[test]
        fn successive_occurrences_strictly_increase(rule in arb_rule(), start in arb_date()) {
            let dates = upcoming(&rule, start, 12).unwrap();
            prop_assert!(dates[0] >= start);
            for pair in dates.windows(2) {
                prop_assert!(pair[0] < pair[1], "{:?} then {:?}", pair[0], pair[1]);
            }
        }

        #[test]
        fn daily_is_plain_addition(interval in 1i64..400, start in arb_date()) {
            let rule = RecurrenceRule::daily(interval);
            let expected = start + chrono::Days::new(interval as u64);
            prop_assert_eq!(first_occurrence(&rule, start).unwrap(), expected);
            prop_assert_eq!(next_occurrence(&rule, start).unwrap(), expected);
        }

        #[test]
        fn weekly_without_days_is_plain_addition(interval in 1i64..60, start in arb_date()) {
            let rule = RecurrenceRule::weekly(interval, WeekdaySet::new());
            let expected = start + chrono::Days::new(7 * interval as u64);
            prop_assert_eq!(first_occurrence(&rule, start).unwrap(), expected);
            prop_assert_eq!(next_occurrence(&rule, start).unwrap(), expected);
        }

        #[test]
        fn weekday_results_land_on_selected_days(rule in arb_rule(), start in arb_date()) {
            if let Some(days) = rule.active_weekdays() {
                let first = first_occurrence(&rule, start).unwrap();
                let next = next_occurrence(&rule, start).unwrap();
                prop_assert!(days.contains(first.weekday()));
                prop_assert!(days.contains(next.weekday()));
                prop_assert!(first - start < chrono::Duration::days(7));
                prop_assert!(next > start && next - start <= chrono::Duration::days(7));
            }
        }
    }
}
