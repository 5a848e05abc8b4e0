use serde::Serialize;

use crate::fetch::{FetchDiagnostics, StopReason};
use crate::stats::StatsResult;

/// The assembled recap payload for one user and year.
#[derive(Debug, Clone, Serialize)]
pub struct RecapReport {
    pub user: String,
    pub year: i32,
    /// Total entries collected, counting rewatches and same-day logs.
    pub films_logged: usize,
    pub stats: StatsResult,
    pub pages_fetched: u32,
    pub stopped_because: StopReason,
    pub diagnostics: FetchDiagnostics,
}

/// Outcome of a recap request, before rendering.
#[derive(Debug, Clone)]
pub enum RecapOutcome {
    /// The profile page returned 404; no diary was fetched.
    UserNotFound,
    Report(RecapReport),
}
