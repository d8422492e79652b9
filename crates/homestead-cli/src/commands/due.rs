use chrono::NaiveDate;
use clap::Subcommand;
use homestead_core::{Config, DueStatus};
use serde_json::json;

use super::today;

#[derive(Subcommand)]
pub enum DueAction {
    /// Classify a due date relative to today
    Status {
        /// Due date, YYYY-MM-DD (omit for an undated item)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Look-ahead in days (default: due.upcoming_window_days)
        #[arg(long)]
        window: Option<u32>,
    },
}

pub fn run(action: DueAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DueAction::Status { date, today: reference, window } => {
            let window = window.unwrap_or_else(|| Config::load_or_default().due.upcoming_window_days);
            let reference = reference.unwrap_or_else(today);
            let status = DueStatus::classify(date, reference, window);
            let output = json!({
                "date": date,
                "today": reference,
                "status": status,
                "label": status.label(),
                "needs_attention": status.needs_attention(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
