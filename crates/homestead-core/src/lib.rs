//! # Homestead Core Library
//!
//! Scheduling logic for the Homestead household manager: chores and
//! maintenance reminders that repeat every N days, weeks, months or years.
//! Everything here is pure computation over calendar dates; storing the
//! results and presenting them belongs to the caller.
//!
//! ## Key Components
//!
//! - [`first_occurrence`] / [`next_occurrence`]: the recurrence engine
//! - [`RecurrenceRule`]: period, interval and weekday set
//! - [`ScheduledItem`]: item lifecycle with an [`AnchorPolicy`]
//! - [`DueStatus`]: overdue / today / upcoming classification
//! - [`Config`]: user preferences stored as TOML

pub mod config;
pub mod due;
pub mod error;
pub mod recurrence;
pub mod schedule;

pub use config::Config;
pub use due::DueStatus;
pub use error::{ConfigError, CoreError, RecurrenceError, Result, ScheduleError};
pub use recurrence::{
    first_occurrence, next_occurrence, start_of_day, upcoming, Period, RecurrenceRule, WeekdaySet,
};
pub use schedule::{agenda, Agenda, AnchorPolicy, Completion, ScheduledItem};
