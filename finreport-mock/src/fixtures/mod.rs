pub mod metrics;
pub mod news;
pub mod quotes;

use chrono::NaiveDate;

pub fn date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
