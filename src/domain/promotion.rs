use chrono::{Datelike, NaiveDate};

/// A month/day on which successful checkouts receive a free gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionalDate {
    month: u32,
    day: u32,
}

impl PromotionalDate {
    /// Returns `None` if the month/day never occurs. Feb 29 is accepted.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        // 2000 is a leap year, so every real month/day validates.
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}
