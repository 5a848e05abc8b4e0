use clap::ValueEnum;
use film_diary_models::RecapReport;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "error",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "info",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    /// Render the assembled recap payload.
    pub fn recap(&self, report: &RecapReport) {
        match self.format {
            OutputFormat::Human => self.recap_human(report),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let value = serde_json::to_value(report).unwrap_or_default();
                self.print_json(&value);
            }
        }
    }

    fn recap_human(&self, report: &RecapReport) {
        println!();
        println!(
            "{}",
            format!("Recap for {} ({})", report.user, report.year).bold()
        );
        println!();
        println!("  Films logged    {}", report.films_logged);
        println!("  Active days     {}", report.stats.active_days);

        let streak = &report.stats.longest_streak;
        match (streak.start, streak.end) {
            (Some(start), Some(end)) if streak.length > 1 => {
                println!(
                    "  Longest streak  {} days ({} to {})",
                    streak.length, start, end
                );
            }
            (Some(start), _) => {
                println!("  Longest streak  1 day ({})", start);
            }
            _ => {
                println!("  Longest streak  0 days");
            }
        }

        if !report.stats.top_months.is_empty() {
            println!();
            println!("  {}", "Busiest months".bold());
            for month in &report.stats.top_months {
                println!("    {}     {:>3}", month.month, month.count);
            }
        }

        if !report.stats.top_days.is_empty() {
            println!();
            println!("  {}", "Busiest days".bold());
            for day in &report.stats.top_days {
                println!("    {}  {:>3}", day.date, day.count);
            }
        }

        println!();
        println!(
            "  {}",
            format!(
                "{} page(s) fetched, stopped: {}",
                report.pages_fetched, report.stopped_because
            )
            .dimmed()
        );
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                // Shouldn't happen, but fallback to string representation
                println!("{}", data);
            }
        }
    }
}
