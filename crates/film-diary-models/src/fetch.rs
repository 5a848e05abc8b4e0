use std::fmt;

use serde::{Serialize, Serializer};

use crate::entry::DiaryEntry;

/// Why the pagination loop terminated.
///
/// The string codes are part of the observable surface (logs, JSON payloads,
/// tests) and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The diary page returned 404: unknown user, or diary set to private.
    DiaryNotFoundOrPrivate,
    /// Any other non-ok HTTP status after redirects were followed.
    DiaryHttp(u16),
    /// A page parsed to zero entries; listings never have empty pages
    /// mid-sequence, so this means the end of the data.
    NoEntriesOnPage,
    /// Hit the page ceiling without a single usable entry.
    NoEntriesCollected,
    /// Hit the page ceiling with entries collected along the way.
    MaxPagesReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::DiaryNotFoundOrPrivate => write!(f, "diary_not_found_or_private"),
            StopReason::DiaryHttp(status) => write!(f, "diary_http_{}", status),
            StopReason::NoEntriesOnPage => write!(f, "no_entries_on_page"),
            StopReason::NoEntriesCollected => write!(f, "no_entries_collected"),
            StopReason::MaxPagesReached => write!(f, "max_pages_reached"),
        }
    }
}

impl Serialize for StopReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-request observability data recorded while paginating.
///
/// The two film-link counts are independent heuristics (tree query vs naive
/// substring search) kept side by side to spot markup drift; they are never
/// used for correctness. Fields reflect the last page visited.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FetchDiagnostics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub film_link_count: usize,
    pub film_href_occurrences: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_snippet: Option<String>,
}

/// Everything the pagination loop produced for one user+year.
#[derive(Debug, Clone, Serialize)]
pub struct DiaryFetchResult {
    pub year: i32,
    pub pages_fetched: u32,
    pub entries: Vec<DiaryEntry>,
    pub stopped_because: StopReason,
    pub diagnostics: FetchDiagnostics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_reason_codes_are_stable() {
        assert_eq!(
            StopReason::DiaryNotFoundOrPrivate.to_string(),
            "diary_not_found_or_private"
        );
        assert_eq!(StopReason::DiaryHttp(500).to_string(), "diary_http_500");
        assert_eq!(StopReason::DiaryHttp(429).to_string(), "diary_http_429");
        assert_eq!(StopReason::NoEntriesOnPage.to_string(), "no_entries_on_page");
        assert_eq!(
            StopReason::NoEntriesCollected.to_string(),
            "no_entries_collected"
        );
        assert_eq!(StopReason::MaxPagesReached.to_string(), "max_pages_reached");
    }

    #[test]
    fn stop_reason_serializes_as_code() {
        let json = serde_json::to_string(&StopReason::DiaryHttp(503)).unwrap();
        assert_eq!(json, "\"diary_http_503\"");
        let json = serde_json::to_string(&StopReason::MaxPagesReached).unwrap();
        assert_eq!(json, "\"max_pages_reached\"");
    }
}
