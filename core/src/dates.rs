//! Date ranges for the summaries endpoint.

use chrono::{Days, Local, NaiveDate};

/// `YYYY-MM-DD`, zero-padded.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's calendar date in the host's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inclusive `start..=end` span requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SummaryRange {
    pub fn days_back(days: u64, today: NaiveDate) -> Self {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn start_param(&self) -> String {
        format_date(self.start)
    }

    pub fn end_param(&self) -> String {
        format_date(self.end)
    }
}
