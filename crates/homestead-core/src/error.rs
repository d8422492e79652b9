//! Core error types for homestead-core.
//!
//! This module defines the error hierarchy using thiserror. Rule parsing is
//! strict (unknown periods and weekday values are rejected), while the
//! recurrence engine itself only fails when calendar arithmetic leaves the
//! range chrono can represent.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::recurrence::Period;

/// Core error type for homestead-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Recurrence rule or occurrence computation errors
    #[error("Recurrence error: {0}")]
    Recurrence(#[from] RecurrenceError),

    /// Scheduled item errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while building rules or computing occurrences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// Period text that does not name day, week, month or year
    #[error("Unknown recurrence period: '{0}'")]
    UnknownPeriod(String),

    /// Weekday value outside 0..=6 or not a number
    #[error("Invalid weekday '{0}': expected a number from 0 (Sunday) to 6 (Saturday)")]
    InvalidWeekday(String),

    /// Calendar arithmetic overflowed the supported date range
    #[error("Adding {amount} {period}(s) to {date} leaves the supported date range")]
    DateOutOfRange {
        date: NaiveDate,
        period: Period,
        amount: i64,
    },
}

/// Errors raised by the scheduled item helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Item is flagged recurring but carries no rule
    #[error("Recurring item has no recurrence rule")]
    MissingRule,

    /// Item is not recurring, so it cannot be rescheduled
    #[error("Item is not recurring")]
    NotRecurring,

    #[error(transparent)]
    Recurrence(#[from] RecurrenceError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home/config directory could not be prepared
    #[error("Failed to prepare config directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = RecurrenceError::DateOutOfRange {
            date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            period: Period::Month,
            amount: 3,
        };
        assert_eq!(
            err.to_string(),
            "Adding 3 month(s) to 2025-01-31 leaves the supported date range"
        );
    }

    #[test]
    fn schedule_errors_wrap_recurrence_errors() {
        let inner = RecurrenceError::UnknownPeriod("hourly".into());
        let err: ScheduleError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());

        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::Schedule(ScheduleError::Recurrence(_))));
        assert!(core.to_string().starts_with("Schedule error:"));
    }
}
