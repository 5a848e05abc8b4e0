//! Calendar aggregation over an accumulated entry list.
//!
//! Pure functions: deterministic for a given input, no I/O.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use film_diary_models::{DayCount, DiaryEntry, MonthCount, StatsResult, StreakResult};

const TOP_N: usize = 5;

/// Compute all calendar aggregates for one year of entries.
///
/// Top lists are sorted by count descending; equal counts are ordered
/// chronologically ascending so output is deterministic.
pub fn compute_stats(entries: &[DiaryEntry]) -> StatsResult {
    let mut month_counts: HashMap<String, u32> = HashMap::new();
    let mut day_counts: HashMap<NaiveDate, u32> = HashMap::new();

    for entry in entries {
        *month_counts
            .entry(entry.date.format("%Y-%m").to_string())
            .or_insert(0) += 1;
        *day_counts.entry(entry.date).or_insert(0) += 1;
    }

    let active_days = day_counts.len() as u32;

    let mut top_months: Vec<MonthCount> = month_counts
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect();
    // ISO month keys sort lexicographically in chronological order.
    top_months.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.month.cmp(&b.month)));
    top_months.truncate(TOP_N);

    let mut top_days: Vec<DayCount> = day_counts
        .into_iter()
        .map(|(date, count)| DayCount { date, count })
        .collect();
    top_days.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.date.cmp(&b.date)));
    top_days.truncate(TOP_N);

    let longest_streak = compute_longest_streak(entries.iter().map(|e| e.date));

    StatsResult {
        active_days,
        top_months,
        top_days,
        longest_streak,
    }
}

/// Longest run of consecutive calendar days, over the deduplicated dates.
///
/// Single linear pass over the sorted unique dates; a day gap of anything
/// but exactly one resets the run. Ties keep the earliest run.
pub fn compute_longest_streak<I>(dates: I) -> StreakResult
where
    I: IntoIterator<Item = NaiveDate>,
{
    let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut best = StreakResult::empty();
    let mut run_length = 0u32;
    let mut run_start: Option<NaiveDate> = None;
    let mut previous: Option<NaiveDate> = None;

    for date in unique {
        let extends = previous
            .map(|prev| date.signed_duration_since(prev).num_days() == 1)
            .unwrap_or(false);
        if extends {
            run_length += 1;
        } else {
            run_length = 1;
            run_start = Some(date);
        }

        if run_length > best.length {
            best = StreakResult {
                length: run_length,
                start: run_start,
                end: Some(date),
            };
        }
        previous = Some(date);
    }

    best
}
