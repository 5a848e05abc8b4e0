use chrono::NaiveDate;
use serde::Serialize;

/// Longest run of consecutive calendar days with at least one entry each.
///
/// `length == 0` implies `start` and `end` are both `None`; otherwise both
/// are set and `end - start == length - 1` days.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StreakResult {
    pub length: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl StreakResult {
    pub fn empty() -> Self {
        Self {
            length: 0,
            start: None,
            end: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthCount {
    /// Calendar month as `YYYY-MM`.
    pub month: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Calendar aggregates over one year of diary entries.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsResult {
    /// Number of distinct days with at least one entry.
    pub active_days: u32,
    /// At most five months, busiest first.
    pub top_months: Vec<MonthCount>,
    /// At most five days, busiest first.
    pub top_days: Vec<DayCount>,
    pub longest_streak: StreakResult,
}
