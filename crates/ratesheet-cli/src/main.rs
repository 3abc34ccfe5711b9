mod commands;
mod logging;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ratesheet",
    version,
    about = "Track residential electricity rates published as PDF rate sheets"
)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where rate sheets come from and where state is kept.
#[derive(Args)]
pub struct SourceArgs {
    /// Predefined provider key
    #[arg(long, global = true, env = "RATESHEET_PROVIDER", default_value = "cemc")]
    pub provider: String,

    /// Custom JSON provider file (overrides --provider)
    #[arg(long, global = true, value_name = "FILE")]
    pub provider_file: Option<PathBuf>,

    /// Rate sheet URL (defaults to the provider's pdf_url)
    #[arg(long, global = true, env = "RATESHEET_PDF_URL")]
    pub url: Option<String>,

    /// Directory holding the downloaded rate sheet
    #[arg(long, global = true, env = "RATESHEET_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Baseline snapshot file
    #[arg(long, global = true, env = "RATESHEET_SNAPSHOT", value_name = "FILE")]
    pub snapshot: Option<PathBuf>,
}

/// Input selection shared by parse, normalize, diff and snapshot update.
#[derive(Args)]
pub struct InputArgs {
    /// Re-download the rate sheet even if a cached copy exists
    #[arg(long)]
    pub force: bool,

    /// Use a local PDF or pre-parsed JSON instead of the cached download
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Keep the physical page layout when extracting text
    #[arg(long)]
    pub layout: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the current rate sheet into the cache
    Fetch {
        /// Re-download even if a cached copy exists
        #[arg(long)]
        force: bool,
    },
    /// Parse the rate sheet into per-section records
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Produce the normalized JSON record
    Normalize {
        #[command(flatten)]
        input: InputArgs,

        /// Write the record to a file instead of stdout
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Compare the current rate sheet against the snapshot
    Diff {
        #[command(flatten)]
        input: InputArgs,

        /// Output format: text (default) or markdown
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Manage the baseline snapshot
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
    /// Force-fetch, diff against the snapshot and report changes
    Check {
        /// File a GitHub issue when changes are found (needs GITHUB_REPOSITORY and GITHUB_TOKEN)
        #[arg(long)]
        open_issue: bool,
    },
    /// Inspect provider definitions
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
}

#[derive(Subcommand)]
enum SnapshotAction {
    /// Replace the snapshot with the current rate sheet's values
    Update {
        #[command(flatten)]
        input: InputArgs,

        /// Human-readable version label stored in the snapshot metadata
        #[arg(long)]
        label: Option<String>,
    },
    /// Print the stored snapshot
    Show,
}

#[derive(Subcommand)]
enum ProvidersAction {
    /// List predefined providers
    List,
    /// Explain what a provider extracts
    Explain {
        /// Provider key (e.g., "cemc")
        key: String,
    },
    /// Validate a custom provider file
    Validate {
        /// Path to JSON provider file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging();

    let result = match cli.command {
        Commands::Fetch { force } => commands::fetch::run(&cli.source, force),
        Commands::Parse { input, output, out } => {
            commands::parse::run(&cli.source, &input, &output, out)
        }
        Commands::Normalize { input, out } => commands::normalize::run(&cli.source, &input, out),
        Commands::Diff { input, format } => commands::diff::run(&cli.source, &input, &format),
        Commands::Snapshot { action } => match action {
            SnapshotAction::Update { input, label } => {
                commands::snapshot::update(&cli.source, &input, label.as_deref())
            }
            SnapshotAction::Show => commands::snapshot::show(&cli.source),
        },
        Commands::Check { open_issue } => commands::check::run(&cli.source, open_issue),
        Commands::Providers { action } => match action {
            ProvidersAction::List => commands::providers::list(),
            ProvidersAction::Explain { key } => commands::providers::explain(&key),
            ProvidersAction::Validate { file } => commands::providers::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
