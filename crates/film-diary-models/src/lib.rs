pub mod entry;
pub mod fetch;
pub mod recap;
pub mod stats;

pub use entry::{DiaryEntry, RawEntry};
pub use fetch::{DiaryFetchResult, FetchDiagnostics, StopReason};
pub use recap::{RecapOutcome, RecapReport};
pub use stats::{DayCount, MonthCount, StatsResult, StreakResult};
