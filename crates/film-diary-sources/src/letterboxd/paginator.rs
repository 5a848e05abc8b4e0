//! Sequential page loop over a user's diary year.
//!
//! Pages are fetched one at a time: a page is only known to exist after the
//! previous one came back non-empty, so there is nothing to parallelize.
//! Every termination is expressed as a [`StopReason`]; only transport
//! failures bubble up as errors.

use anyhow::Result;
use chrono::NaiveDate;
use film_diary_models::{DiaryEntry, DiaryFetchResult, FetchDiagnostics, StopReason};
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::letterboxd::parser::{self, FILM_PATH_SEGMENT};
use crate::traits::{FetchedPage, PageFetcher};

/// Hard ceiling on pages per diary year. Reaching it is a stop condition,
/// not an error.
pub const MAX_PAGES: u32 = 30;

const SNIPPET_LEN: usize = 400;

pub struct DiaryPaginator<'a> {
    fetcher: &'a dyn PageFetcher,
    base_url: String,
    max_pages: u32,
}

impl<'a> DiaryPaginator<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_pages: MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn page_url(&self, user: &str, year: i32, page: u32) -> String {
        let first = format!("{}/{}/films/diary/for/{}/", self.base_url, user, year);
        if page <= 1 {
            first
        } else {
            format!("{}page/{}/", first, page)
        }
    }

    /// Fetch and accumulate all diary entries for one user+year.
    ///
    /// No retries: a single non-ok response ends the whole fetch.
    pub async fn fetch_year(&self, user: &str, year: i32) -> Result<DiaryFetchResult> {
        let mut entries: Vec<DiaryEntry> = Vec::new();
        let mut diagnostics = FetchDiagnostics::default();
        let mut pages_fetched = 0u32;
        let mut stopped_because = StopReason::MaxPagesReached;

        for page in 1..=self.max_pages {
            let url = self.page_url(user, year, page);
            let fetched = self.fetcher.fetch_page(&url).await?;
            pages_fetched += 1;
            record_page_diagnostics(&mut diagnostics, &url, &fetched);

            if fetched.status == 404 {
                stopped_because = StopReason::DiaryNotFoundOrPrivate;
                break;
            }
            if !fetched.ok {
                stopped_because = StopReason::DiaryHttp(fetched.status);
                break;
            }

            let raw = parser::parse_diary_page(&fetched.body, &self.base_url);
            debug!(page, url = %url, raw_entries = raw.len(), "parsed diary page");
            if raw.is_empty() {
                stopped_because = StopReason::NoEntriesOnPage;
                break;
            }

            for candidate in raw {
                let (date, film_url) = match (candidate.date, candidate.film_url) {
                    (Some(date), Some(film_url)) => (date, film_url),
                    _ => continue,
                };
                let trimmed: String = date.chars().take(10).collect();
                let date = match NaiveDate::parse_from_str(&trimmed, "%Y-%m-%d") {
                    Ok(date) => date,
                    Err(_) => continue,
                };
                entries.push(DiaryEntry {
                    date,
                    title: candidate.title,
                    film_url,
                });
            }
        }

        // Distinguish "hit the ceiling with data" from "hit it with nothing".
        if entries.is_empty() && stopped_because == StopReason::MaxPagesReached {
            stopped_because = StopReason::NoEntriesCollected;
        }

        info!(
            user,
            year,
            pages_fetched,
            entries = entries.len(),
            stopped_because = %stopped_because,
            "diary fetch finished"
        );

        Ok(DiaryFetchResult {
            year,
            pages_fetched,
            entries,
            stopped_because,
            diagnostics,
        })
    }
}

/// Record observability data for a fetched page; the last page wins.
fn record_page_diagnostics(diagnostics: &mut FetchDiagnostics, url: &str, page: &FetchedPage) {
    let title_el = Selector::parse("title").unwrap();
    let film_link = Selector::parse(&format!(r#"a[href*="{}"]"#, FILM_PATH_SEGMENT)).unwrap();
    let feed_link = Selector::parse(
        r#"link[type="application/rss+xml"], link[type="application/atom+xml"]"#,
    )
    .unwrap();

    let document = Html::parse_document(&page.body);

    diagnostics.last_url = Some(url.to_string());
    diagnostics.final_url = Some(page.final_url.clone());
    diagnostics.page_title = document
        .select(&title_el)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string());
    diagnostics.film_link_count = document.select(&film_link).count();
    diagnostics.film_href_occurrences = page.body.matches(FILM_PATH_SEGMENT).count();
    diagnostics.feed_url = document
        .select(&feed_link)
        .next()
        .and_then(|l| l.value().attr("href"))
        .map(|href| href.to_string());
    diagnostics.html_snippet = Some(page.body.chars().take(SNIPPET_LEN).collect());
}
