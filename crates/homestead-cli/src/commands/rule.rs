//! Recurrence rule commands for CLI.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use homestead_core::{AnchorPolicy, Config, Period, RecurrenceRule, ScheduledItem, WeekdaySet};
use serde_json::json;

use super::today;

/// Rule definition shared by every rule command.
#[derive(Args)]
pub struct RuleArgs {
    /// Repetition unit: day, week, month or year (aliases like "weekly" work)
    #[arg(long)]
    period: Period,
    /// Repeat every N periods (default: schedule.default_interval)
    #[arg(long, allow_negative_numbers = true)]
    interval: Option<i64>,
    /// Comma-separated weekdays for weekly rules, 0 = Sunday (e.g. "1,3,5")
    #[arg(long)]
    weekdays: Option<WeekdaySet>,
}

impl RuleArgs {
    fn into_rule(self, config: &Config) -> RecurrenceRule {
        let interval = self.interval.unwrap_or(config.schedule.default_interval);
        RecurrenceRule::new(self.period, interval).with_weekdays(self.weekdays.unwrap_or_default())
    }
}

#[derive(Subcommand)]
pub enum RuleAction {
    /// Initial due date for an item created on a date
    First {
        #[command(flatten)]
        rule: RuleArgs,
        /// Creation date, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<NaiveDate>,
    },
    /// Due date after completing the occurrence anchored at a date
    Next {
        #[command(flatten)]
        rule: RuleArgs,
        /// Anchor date, YYYY-MM-DD (default: today)
        #[arg(long)]
        anchor: Option<NaiveDate>,
    },
    /// Preview successive due dates
    Upcoming {
        #[command(flatten)]
        rule: RuleArgs,
        /// Start date, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Number of dates (default: schedule.preview_count)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Complete an occurrence and print the rescheduled due date
    Complete {
        #[command(flatten)]
        rule: RuleArgs,
        /// Due date being completed, YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Completion date, YYYY-MM-DD (default: today)
        #[arg(long)]
        completed: Option<NaiveDate>,
        /// previous-due or completion (default: schedule.anchor_policy)
        #[arg(long)]
        policy: Option<AnchorPolicy>,
    },
    /// Describe a rule in words
    Describe {
        #[command(flatten)]
        rule: RuleArgs,
    },
}

pub fn run(action: RuleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    let output = match action {
        RuleAction::First { rule, from } => {
            let rule = rule.into_rule(&config);
            let from = from.unwrap_or_else(today);
            let due = rule.first_occurrence(from)?;
            json!({ "rule": rule, "from": from, "due": due })
        }
        RuleAction::Next { rule, anchor } => {
            let rule = rule.into_rule(&config);
            let anchor = anchor.unwrap_or_else(today);
            let due = rule.next_occurrence(anchor)?;
            json!({ "rule": rule, "anchor": anchor, "due": due })
        }
        RuleAction::Upcoming { rule, from, count } => {
            let rule = rule.into_rule(&config);
            let from = from.unwrap_or_else(today);
            let count = count.unwrap_or(config.schedule.preview_count);
            let dates = rule.upcoming(from, count)?;
            json!({ "rule": rule, "from": from, "dates": dates })
        }
        RuleAction::Complete {
            rule,
            due,
            completed,
            policy,
        } => {
            let rule = rule.into_rule(&config);
            let completed = completed.unwrap_or_else(today);
            let policy = policy.unwrap_or(config.schedule.anchor_policy);
            let mut item = ScheduledItem {
                is_recurring: true,
                rule: Some(rule.clone()),
                ..ScheduledItem::one_off("rule", due)
            };
            let completion = item.complete_instance(completed, policy)?;
            json!({
                "rule": rule,
                "policy": policy,
                "completed": completed,
                "completion": completion,
                "due": item.next_due_date,
            })
        }
        RuleAction::Describe { rule } => {
            let rule = rule.into_rule(&config);
            json!({ "rule": rule, "description": rule.describe() })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
