use std::time::Duration;

use chrono::Datelike;
use color_eyre::eyre::Context;
use color_eyre::Result;
use film_diary_config::Config;
use film_diary_core::build_recap;
use film_diary_models::RecapOutcome;
use film_diary_sources::LetterboxdClient;
use indicatif::ProgressBar;

use crate::output::{Output, OutputFormat};

pub async fn run_recap(
    user: &str,
    year: Option<i32>,
    max_pages: Option<u32>,
    output: &Output,
) -> Result<()> {
    tracing::debug!("Recap command started");

    let config = Config::load_default()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load configuration: {}", e))?;
    let year = year.unwrap_or_else(|| chrono::Utc::now().year());
    let max_pages = max_pages.unwrap_or(config.fetch.max_pages);

    let client = LetterboxdClient::new(&config.site)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create HTTP client: {}", e))?;

    let spinner = if output.format() == OutputFormat::Human && !output.is_quiet() {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("Fetching {}'s {} diary", user, year));
        spinner.enable_steady_tick(Duration::from_millis(120));
        Some(spinner)
    } else {
        None
    };

    let outcome = build_recap(&client, &config.site.base_url, user, year, max_pages)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("{e:#}"))
        .context("Diary site unreachable")?;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match outcome {
        RecapOutcome::UserNotFound => {
            output.error(format!("No profile found for '{}'", user));
            std::process::exit(2);
        }
        RecapOutcome::Report(report) => {
            output.recap(&report);
            Ok(())
        }
    }
}
