//! Recurrence engine for chores and maintenance reminders.
//!
//! # Usage
//! ```rust
//! use chrono::NaiveDate;
//! use homestead_core::recurrence::{next_occurrence, RecurrenceRule, WeekdaySet};
//!
//! let rule = RecurrenceRule::weekly(1, WeekdaySet::from_indices([1, 3, 5]).unwrap());
//! let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//! let next = next_occurrence(&rule, monday).unwrap();
//! assert_eq!(next, NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
//! ```

pub mod calendar;
mod engine;
mod rule;

pub use calendar::start_of_day;
pub use engine::{first_occurrence, next_occurrence, upcoming};
pub use rule::{Period, RawWeekday, RecurrenceRule, WeekdaySet};
