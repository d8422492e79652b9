pub mod config;
pub mod due;
pub mod rule;

use chrono::{Local, NaiveDate};
use homestead_core::start_of_day;

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    start_of_day(&Local::now())
}
