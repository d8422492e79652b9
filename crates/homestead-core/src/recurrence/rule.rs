//! Recurrence rule model.
//!
//! A rule is a period (day, week, month, year), an interval and, for weekly
//! rules, an optional set of weekdays. Stored documents historically used
//! loose values (`"weekly"`, `"months"`, weekday numbers as strings), so the
//! serde impls accept those forms and normalize them on the way in.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::calendar::{weekday_from_index, weekday_index};
use crate::error::RecurrenceError;

/// Unit of repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" | "daily" => Ok(Period::Day),
            "week" | "weeks" | "weekly" => Ok(Period::Week),
            "month" | "months" | "monthly" => Ok(Period::Month),
            "year" | "years" | "yearly" | "annually" => Ok(Period::Year),
            _ => Err(RecurrenceError::UnknownPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = RecurrenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Weekday value as found in stored documents: a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawWeekday {
    Number(i64),
    Text(String),
}

/// Normalized set of weekdays, Sunday = 0 through Saturday = 6.
///
/// Backed by a 7-bit mask, so iteration is always sorted and duplicates
/// collapse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawWeekday>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Build from numeric indices, rejecting anything outside `0..=6`.
    pub fn from_indices<I>(indices: I) -> Result<Self, RecurrenceError>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut set = Self::new();
        for index in indices {
            let day = u8::try_from(index)
                .ok()
                .and_then(weekday_from_index)
                .ok_or_else(|| RecurrenceError::InvalidWeekday(index.to_string()))?;
            set.insert(day);
        }
        Ok(set)
    }

    /// Parse a comma separated list such as `"1,3,5"`. Blank entries are skipped.
    pub fn parse_list(text: &str) -> Result<Self, RecurrenceError> {
        let mut set = Self::new();
        for part in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            set.insert(parse_weekday_text(part)?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1u8 << weekday_index(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1u8 << weekday_index(day)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Weekdays in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> {
        let mask = self.0;
        (0u8..7)
            .filter(move |i| mask & (1u8 << *i) != 0)
            .filter_map(weekday_from_index)
    }

    pub fn indices(&self) -> Vec<u8> {
        self.iter().map(weekday_index).collect()
    }
}

impl FromStr for WeekdaySet {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_list(s)
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl TryFrom<Vec<RawWeekday>> for WeekdaySet {
    type Error = RecurrenceError;

    fn try_from(values: Vec<RawWeekday>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for value in values {
            let day = match value {
                RawWeekday::Number(n) => u8::try_from(n)
                    .ok()
                    .and_then(weekday_from_index)
                    .ok_or_else(|| RecurrenceError::InvalidWeekday(n.to_string()))?,
                RawWeekday::Text(text) => parse_weekday_text(&text)?,
            };
            set.insert(day);
        }
        Ok(set)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.indices()
    }
}

fn parse_weekday_text(text: &str) -> Result<Weekday, RecurrenceError> {
    text.trim()
        .parse::<u8>()
        .ok()
        .and_then(weekday_from_index)
        .ok_or_else(|| RecurrenceError::InvalidWeekday(text.to_string()))
}

fn default_interval() -> i64 {
    1
}

/// How a recurring item repeats.
///
/// `interval` is kept as supplied so stored values round-trip untouched; every
/// computation goes through [`RecurrenceRule::effective_interval`], which
/// clamps it to at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub period: Period,
    #[serde(default = "default_interval")]
    pub interval: i64,
    #[serde(default, skip_serializing_if = "WeekdaySet::is_empty")]
    pub weekdays: WeekdaySet,
}

impl RecurrenceRule {
    pub fn new(period: Period, interval: i64) -> Self {
        Self {
            period,
            interval,
            weekdays: WeekdaySet::new(),
        }
    }

    pub fn daily(interval: i64) -> Self {
        Self::new(Period::Day, interval)
    }

    pub fn weekly(interval: i64, weekdays: WeekdaySet) -> Self {
        Self::new(Period::Week, interval).with_weekdays(weekdays)
    }

    pub fn monthly(interval: i64) -> Self {
        Self::new(Period::Month, interval)
    }

    pub fn yearly(interval: i64) -> Self {
        Self::new(Period::Year, interval)
    }

    pub fn with_weekdays(mut self, weekdays: WeekdaySet) -> Self {
        self.weekdays = weekdays;
        self
    }

    /// Interval clamped to at least 1.
    pub fn effective_interval(&self) -> i64 {
        self.interval.max(1)
    }

    /// Weekday constraint, only when it applies (weekly rule, non-empty set).
    pub fn active_weekdays(&self) -> Option<&WeekdaySet> {
        match self.period {
            Period::Week if !self.weekdays.is_empty() => Some(&self.weekdays),
            _ => None,
        }
    }

    /// Copy with the interval clamped and weekdays dropped for non-weekly periods.
    pub fn normalized(&self) -> Self {
        Self {
            period: self.period,
            interval: self.effective_interval(),
            weekdays: self.active_weekdays().copied().unwrap_or_default(),
        }
    }

    /// Human-readable summary, e.g. "Every 2 weeks on Mon, Thu".
    pub fn describe(&self) -> String {
        let interval = self.effective_interval();
        let mut text = if interval == 1 {
            format!("Every {}", self.period)
        } else {
            format!("Every {} {}s", interval, self.period)
        };

        if let Some(days) = self.active_weekdays() {
            let names: Vec<String> = days.iter().map(|d| d.to_string()).collect();
            text.push_str(" on ");
            text.push_str(&names.join(", "));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_parses_aliases() {
        assert_eq!("daily".parse::<Period>().unwrap(), Period::Day);
        assert_eq!(" Weeks ".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("months".parse::<Period>().unwrap(), Period::Month);
        assert_eq!("annually".parse::<Period>().unwrap(), Period::Year);
    }

    #[test]
    fn period_rejects_unknown_text() {
        let err = "fortnightly".parse::<Period>().unwrap_err();
        assert_eq!(err, RecurrenceError::UnknownPeriod("fortnightly".into()));
    }

    #[test]
    fn weekday_set_sorts_and_dedups() {
        let set = WeekdaySet::from_indices([5, 1, 3, 1]).unwrap();
        assert_eq!(set.indices(), vec![1, 3, 5]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(Weekday::Wed));
        assert!(!set.contains(Weekday::Sun));
    }

    #[test]
    fn weekday_set_rejects_out_of_range() {
        assert!(matches!(
            WeekdaySet::from_indices([7]),
            Err(RecurrenceError::InvalidWeekday(_))
        ));
        assert!(WeekdaySet::from_indices([-1]).is_err());
        assert!(WeekdaySet::parse_list("1,x").is_err());
    }

    #[test]
    fn weekday_set_parses_list() {
        let set = WeekdaySet::parse_list("0, 6,,2").unwrap();
        assert_eq!(set.indices(), vec![0, 2, 6]);
        assert!(WeekdaySet::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn rule_deserializes_legacy_document() {
        let json = r#"{"period":"weekly","interval":2,"weekdays":["5","1",3]}"#;
        let rule: RecurrenceRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.period, Period::Week);
        assert_eq!(rule.interval, 2);
        assert_eq!(rule.weekdays.indices(), vec![1, 3, 5]);
    }

    #[test]
    fn rule_defaults_interval_and_weekdays() {
        let rule: RecurrenceRule = serde_json::from_str(r#"{"period":"months"}"#).unwrap();
        assert_eq!(rule, RecurrenceRule::monthly(1));
    }

    #[test]
    fn rule_serializes_canonical_form() {
        let rule = RecurrenceRule::weekly(1, WeekdaySet::from_indices([3, 1]).unwrap());
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"period": "week", "interval": 1, "weekdays": [1, 3]})
        );

        let daily = serde_json::to_value(RecurrenceRule::daily(2)).unwrap();
        assert!(daily.get("weekdays").is_none());
    }

    #[test]
    fn rule_rejects_bad_period_in_document() {
        let result = serde_json::from_str::<RecurrenceRule>(r#"{"period":"hourly"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn normalized_clamps_and_drops_irrelevant_weekdays() {
        let rule = RecurrenceRule::new(Period::Month, -4)
            .with_weekdays(WeekdaySet::from_indices([1]).unwrap());
        let normalized = rule.normalized();
        assert_eq!(normalized.interval, 1);
        assert!(normalized.weekdays.is_empty());
        assert!(rule.active_weekdays().is_none());
    }

    #[test]
    fn describe_reads_naturally() {
        assert_eq!(RecurrenceRule::daily(1).describe(), "Every day");
        assert_eq!(RecurrenceRule::monthly(3).describe(), "Every 3 months");
        assert_eq!(RecurrenceRule::yearly(0).describe(), "Every year");
        let weekly = RecurrenceRule::weekly(2, WeekdaySet::from_indices([4, 1]).unwrap());
        assert_eq!(weekly.describe(), "Every 2 weeks on Mon, Thu");
    }
}
