//! Recap request orchestration: profile check, then paginate, then aggregate.

use anyhow::Result;
use film_diary_models::{RecapOutcome, RecapReport};
use film_diary_sources::{DiaryPaginator, PageFetcher};
use tracing::{debug, info};

use crate::stats::compute_stats;

/// Build the recap payload for one user and year.
///
/// Transport failures propagate as errors; every HTTP-level outcome is data
/// (either `UserNotFound` or the stop reason inside the report).
pub async fn build_recap(
    fetcher: &dyn PageFetcher,
    base_url: &str,
    user: &str,
    year: i32,
    max_pages: u32,
) -> Result<RecapOutcome> {
    let base = base_url.trim_end_matches('/');

    let profile_url = format!("{}/{}/", base, user);
    debug!(url = %profile_url, "checking profile");
    let profile = fetcher.fetch_page(&profile_url).await?;
    if profile.status == 404 {
        info!(user, "profile not found");
        return Ok(RecapOutcome::UserNotFound);
    }

    let paginator = DiaryPaginator::new(fetcher, base).with_max_pages(max_pages);
    let fetched = paginator.fetch_year(user, year).await?;
    let stats = compute_stats(&fetched.entries);

    Ok(RecapOutcome::Report(RecapReport {
        user: user.to_string(),
        year,
        films_logged: fetched.entries.len(),
        stats,
        pages_fetched: fetched.pages_fetched,
        stopped_because: fetched.stopped_because,
        diagnostics: fetched.diagnostics,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use film_diary_models::StopReason;
    use film_diary_sources::FetchedPage;
    use std::sync::Mutex;

    struct ScriptedFetcher {
        responses: Mutex<Vec<FetchedPage>>,
    }

    impl ScriptedFetcher {
        fn new(mut responses: Vec<FetchedPage>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| anyhow!("fetcher script exhausted at {}", url))
        }
    }

    fn page(status: u16, body: &str) -> FetchedPage {
        FetchedPage {
            status,
            ok: (200..300).contains(&status),
            body: body.to_string(),
            final_url: "https://letterboxd.com/resolved/".to_string(),
        }
    }

    const PROFILE: &str = "<html><body>profile</body></html>";
    const EMPTY_DIARY: &str = "<html><body></body></html>";

    fn diary_body(dates: &[&str]) -> String {
        let rows: String = dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                format!(
                    r#"<tr class="diary-entry-row" data-viewing-date="{date}">
                         <td><h3><a href="/film/film-{i}/">Film {i}</a></h3></td>
                       </tr>"#
                )
            })
            .collect();
        format!("<html><body><table><tbody>{rows}</tbody></table></body></html>")
    }

    #[tokio::test]
    async fn missing_profile_short_circuits() {
        let fetcher = ScriptedFetcher::new(vec![page(404, "")]);

        let outcome = build_recap(&fetcher, "https://letterboxd.com", "ghost", 2025, 30)
            .await
            .unwrap();
        assert!(matches!(outcome, RecapOutcome::UserNotFound));
    }

    #[tokio::test]
    async fn assembles_report_from_fetched_entries() {
        let fetcher = ScriptedFetcher::new(vec![
            page(200, PROFILE),
            page(200, &diary_body(&["2025-01-01", "2025-01-02", "2025-01-02"])),
            page(200, EMPTY_DIARY),
        ]);

        let outcome = build_recap(&fetcher, "https://letterboxd.com", "someone", 2025, 30)
            .await
            .unwrap();
        let report = match outcome {
            RecapOutcome::Report(report) => report,
            other => panic!("expected report, got {:?}", other),
        };

        assert_eq!(report.user, "someone");
        assert_eq!(report.year, 2025);
        assert_eq!(report.films_logged, 3);
        assert_eq!(report.stats.active_days, 2);
        assert_eq!(report.stats.longest_streak.length, 2);
        assert_eq!(report.stopped_because, StopReason::NoEntriesOnPage);
        assert_eq!(report.pages_fetched, 2);
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let fetcher = ScriptedFetcher::new(vec![]);

        let result = build_recap(&fetcher, "https://letterboxd.com", "someone", 2025, 30).await;
        assert!(result.is_err());
    }
}
