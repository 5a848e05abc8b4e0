use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One candidate entry as extracted from a diary page.
///
/// Every field is optional because the markup varies between page contexts;
/// the paginator drops candidates that are missing a date or film URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub date: Option<String>,
    pub title: Option<String>,
    pub film_url: Option<String>,
}

/// A validated diary entry: one film logged on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub film_url: String,
}
