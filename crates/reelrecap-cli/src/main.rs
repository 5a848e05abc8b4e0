use clap::{ArgAction, Parser, Subcommand};
use commands::{config, recap};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelrecap")]
#[command(about = "Year-in-review recaps from a public film diary")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file instead of stderr (daily rotation)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a recap of one year of a user's diary
    #[command(long_about = "Fetch a user's public diary pages for one year, extract the \
logged films, and report calendar statistics: active days, busiest months and days, and \
the longest run of consecutive days with at least one film.")]
    Recap {
        /// Username on the diary site
        user: String,

        /// Diary year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Override the configured page ceiling
        #[arg(long, value_name = "N")]
        max_pages: Option<u32>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the active configuration
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Recap {
            user,
            year,
            max_pages,
        } => recap::run_recap(&user, year, max_pages, &output).await,
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config::run_show(&output),
            ConfigCommands::Path => config::run_path(&output),
        },
    }
}
