//! quizdrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizdrill_core::parser::MalformedRowPolicy;

mod commands;
mod config;
mod style;

use style::ColorMode;

#[derive(Parser)]
#[command(name = "quizdrill", version, about = "Timed quiz trainer for comma-separated question banks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administer a quiz
    Run {
        /// Path to the CSV quiz file
        #[arg(long)]
        quiz: Option<PathBuf>,

        /// Malformed-row policy: fail, skip, empty-answer
        #[arg(long)]
        on_malformed: Option<MalformedRowPolicy>,

        /// Color output: auto, always, never
        #[arg(long)]
        color: Option<ColorMode>,

        /// Print a per-question breakdown table after the tally
        #[arg(long)]
        breakdown: bool,

        /// Save the session report as JSON
        #[arg(long)]
        save: bool,

        /// Directory for saved session reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz CSV files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Compare two saved session reports
    Compare {
        /// Baseline session JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current session JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if lapses found
        #[arg(long)]
        fail_on_lapse: bool,
    },

    /// Create a starter config and example quiz
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            quiz,
            on_malformed,
            color,
            breakdown,
            save,
            output,
            config,
        } => commands::run::execute(quiz, on_malformed, color, breakdown, save, output, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Compare {
            baseline,
            current,
            format,
            fail_on_lapse,
        } => commands::compare::execute(baseline, current, format, fail_on_lapse),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
