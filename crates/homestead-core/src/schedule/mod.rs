//! Scheduled items and the caller-side policy for advancing them.
//!
//! The recurrence engine only maps `(rule, date)` to a date. This module owns
//! the item lifecycle around it: the first due date is set when an item
//! becomes recurring, and each completion replaces it with the next one,
//! anchored according to an [`AnchorPolicy`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::due::{self, DueStatus};
use crate::error::ScheduleError;
use crate::recurrence::{first_occurrence, next_occurrence, RecurrenceRule};

/// Which date a completion is anchored on when computing the next due date.
///
/// Serialized as `previous_due` / `completion`; deserializing goes through
/// [`FromStr`], so config files accept the same spellings as the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AnchorPolicy {
    /// Anchor on the due date being completed. Late completions do not shift
    /// the schedule.
    #[default]
    PreviousDue,
    /// Anchor on the day the item was completed.
    Completion,
}

impl AnchorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorPolicy::PreviousDue => "previous_due",
            AnchorPolicy::Completion => "completion",
        }
    }
}

impl fmt::Display for AnchorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "previous_due" | "due" => Ok(AnchorPolicy::PreviousDue),
            "completion" | "completed" => Ok(AnchorPolicy::Completion),
            other => Err(format!("unknown anchor policy: {other}")),
        }
    }
}

impl TryFrom<String> for AnchorPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Outcome of completing one instance of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Completion {
    /// Recurring item moved to its next due date
    Rescheduled {
        anchor: NaiveDate,
        next_due_date: NaiveDate,
    },
    /// One-off item marked done
    Done { completed_on: NaiveDate },
}

/// A chore or maintenance reminder as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub title: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub rule: Option<RecurrenceRule>,
    #[serde(default)]
    pub next_due_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_completed_on: Option<NaiveDate>,
    #[serde(default)]
    pub done: bool,
}

impl ScheduledItem {
    /// A non-recurring item with an optional due date.
    pub fn one_off(title: impl Into<String>, due: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            is_recurring: false,
            rule: None,
            next_due_date: due,
            last_completed_on: None,
            done: false,
        }
    }

    /// A recurring item created on `today`, due on the rule's first occurrence.
    pub fn recurring(
        title: impl Into<String>,
        rule: RecurrenceRule,
        today: NaiveDate,
    ) -> Result<Self, ScheduleError> {
        let mut item = Self::one_off(title, None);
        item.set_recurrence(Some(rule), today)?;
        Ok(item)
    }

    fn rule(&self) -> Result<&RecurrenceRule, ScheduleError> {
        if !self.is_recurring {
            return Err(ScheduleError::NotRecurring);
        }
        self.rule.as_ref().ok_or(ScheduleError::MissingRule)
    }

    /// Turn recurrence on, change it, or (with `None`) turn it off.
    ///
    /// A first due date is computed when the item becomes recurring or has
    /// no due date yet. Editing the rule of an already scheduled item keeps
    /// its current due date. Turning recurrence off clears the due date the
    /// rule produced.
    pub fn set_recurrence(
        &mut self,
        rule: Option<RecurrenceRule>,
        today: NaiveDate,
    ) -> Result<(), ScheduleError> {
        match rule {
            Some(rule) => {
                let rule = rule.normalized();
                if !self.is_recurring || self.next_due_date.is_none() {
                    self.next_due_date = Some(first_occurrence(&rule, today)?);
                }
                self.is_recurring = true;
                self.rule = Some(rule);
                self.done = false;
            }
            None => {
                if self.is_recurring {
                    self.next_due_date = None;
                }
                self.is_recurring = false;
                self.rule = None;
            }
        }
        Ok(())
    }

    /// Complete the current instance on `today`.
    pub fn complete_instance(
        &mut self,
        today: NaiveDate,
        policy: AnchorPolicy,
    ) -> Result<Completion, ScheduleError> {
        if !self.is_recurring {
            self.done = true;
            self.last_completed_on = Some(today);
            return Ok(Completion::Done { completed_on: today });
        }

        let rule = self.rule()?;
        let anchor = match policy {
            AnchorPolicy::PreviousDue => self.next_due_date.unwrap_or(today),
            AnchorPolicy::Completion => today,
        };
        let next_due_date = next_occurrence(rule, anchor)?;
        debug!(title = %self.title, %anchor, %next_due_date, %policy, "rescheduled recurring item");

        self.next_due_date = Some(next_due_date);
        self.last_completed_on = Some(today);
        Ok(Completion::Rescheduled {
            anchor,
            next_due_date,
        })
    }

    /// Push the due date to one interval after `today`, ignoring the
    /// previous due date. Used for maintenance reminders that restart their
    /// cycle when serviced.
    pub fn reschedule_from(&mut self, today: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        let next = next_occurrence(self.rule()?, today)?;
        self.next_due_date = Some(next);
        Ok(next)
    }

    pub fn status(&self, today: NaiveDate, window_days: u32) -> DueStatus {
        DueStatus::classify(self.next_due_date, today, window_days)
    }

    /// Belongs in today's to-do list.
    ///
    /// One-off items stay active until done; recurring items are active once
    /// their due date has arrived.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        if self.is_recurring {
            due::is_active(self.next_due_date, today)
        } else {
            !self.done
        }
    }
}

/// Items split into what needs doing now and what is coming up.
#[derive(Debug, Clone, Default)]
pub struct Agenda<'a> {
    pub active: Vec<&'a ScheduledItem>,
    pub upcoming: Vec<&'a ScheduledItem>,
}

/// Split `items` into active and upcoming lists, each ordered by due date.
///
/// Active items without a due date sort last. Done one-off items appear in
/// neither list.
pub fn agenda(items: &[ScheduledItem], today: NaiveDate) -> Agenda<'_> {
    let mut agenda = Agenda::default();
    for item in items {
        if item.is_active(today) {
            agenda.active.push(item);
        } else if item.is_recurring && due::is_upcoming(item.next_due_date, today) {
            agenda.upcoming.push(item);
        }
    }

    // None sorts after every date
    agenda
        .active
        .sort_by_key(|item| (item.next_due_date.is_none(), item.next_due_date));
    agenda.upcoming.sort_by_key(|item| item.next_due_date);
    agenda
}
