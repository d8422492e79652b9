//! Due-date classification relative to "today".

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default look-ahead for [`DueStatus::Upcoming`], in days.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 7;

/// Where a due date sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    /// Item has no due date
    NoDate,
    /// Due before today
    Overdue,
    /// Due today
    DueToday,
    /// Due within the look-ahead window
    Upcoming,
    /// Due after the look-ahead window
    Later,
}

impl DueStatus {
    /// Classify `due` against `today` with a look-ahead of `window_days`.
    ///
    /// `Upcoming` covers `today < due < today + window_days`.
    pub fn classify(due: Option<NaiveDate>, today: NaiveDate, window_days: u32) -> Self {
        let Some(due) = due else {
            return DueStatus::NoDate;
        };

        if due < today {
            return DueStatus::Overdue;
        }
        if due == today {
            return DueStatus::DueToday;
        }
        match today.checked_add_days(Days::new(u64::from(window_days))) {
            Some(horizon) if due < horizon => DueStatus::Upcoming,
            _ => DueStatus::Later,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::NoDate => "No Date",
            DueStatus::Overdue => "Overdue",
            DueStatus::DueToday => "Due Today",
            DueStatus::Upcoming => "Upcoming",
            DueStatus::Later => "Later",
        }
    }

    /// Overdue or due today; reported by `due status`.
    pub fn needs_attention(&self) -> bool {
        matches!(self, DueStatus::Overdue | DueStatus::DueToday)
    }
}

/// Due on or before today.
pub fn is_active(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    due.is_some_and(|d| d <= today)
}

/// Due strictly after today.
pub fn is_upcoming(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    due.is_some_and(|d| d > today)
}
