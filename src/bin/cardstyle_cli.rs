//! CardStyle CLI - JSON bridge for the rendering layer
//!
//! Commands: tags, explain, batch, rules, check
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on bad input

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cardstyle_core::{
    needs_reverse_holo, needs_shiny, CardAttributes, CardBatch, ReportError, Rulebook, TagEngine,
    ENGINE_VERSION,
};

#[derive(Parser)]
#[command(name = "cardstyle-cli")]
#[command(about = "CardStyle CLI - card attribute to style tag classifier")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter, overrides CARDSTYLE_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Compact single-line JSON output
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tag sequence for one card
    Tags {
        /// JSON payload (CardAttributes)
        #[arg(short, long)]
        payload: String,
    },

    /// Tag sequence plus the stage that produced each tag
    Explain {
        /// JSON payload (CardAttributes)
        #[arg(short, long)]
        payload: String,
    },

    /// Classify a file holding one card or an array of cards
    Batch {
        /// Path to JSON file, `-` for stdin
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Dump the rulebook
    Rules,

    /// Rarity predicates without full classification
    Check {
        #[arg(short, long)]
        rarity: Option<String>,
    },
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(l) => EnvFilter::new(l),
        None => EnvFilter::try_from_env("CARDSTYLE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("cardstyle_core=warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<T: Serialize>(value: &T, compact: bool) -> ExitCode {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn fail(message: &str) -> ExitCode {
    println!("{}", serde_json::json!({ "error": message }));
    ExitCode::FAILURE
}

fn parse_card(payload: &str) -> Result<CardAttributes, String> {
    serde_json::from_str(payload).map_err(|e| format!("Invalid payload: {}", e))
}

fn load_batch(file: &Path) -> Result<CardBatch, ReportError> {
    if file.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        CardBatch::from_json_str(&content)
    } else {
        CardBatch::from_path(file)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let engine = TagEngine::new(Rulebook::standard());

    match cli.command {
        Commands::Tags { payload } => match parse_card(&payload) {
            Ok(card) => emit(&engine.compose(&card), cli.compact),
            Err(e) => fail(&e),
        },

        Commands::Explain { payload } => match parse_card(&payload) {
            Ok(card) => {
                let (tags, resolutions) = engine.compose_explained(&card);
                emit(
                    &serde_json::json!({ "tags": tags, "resolutions": resolutions }),
                    cli.compact,
                )
            }
            Err(e) => fail(&e),
        },

        Commands::Batch { file } => {
            let batch = match load_batch(&file) {
                Ok(b) => b,
                Err(e) => return fail(&e.to_string()),
            };
            tracing::info!(path = %file.display(), cards = batch.len(), "Classifying batch");
            match engine.classify_batch(&batch) {
                Ok(report) => emit(&report, cli.compact),
                Err(e) => fail(&e.to_string()),
            }
        }

        Commands::Rules => {
            let book = engine.rulebook();
            match book.fingerprint() {
                Ok(fingerprint) => emit(
                    &serde_json::json!({
                        "engineVersion": ENGINE_VERSION,
                        "fingerprint": fingerprint,
                        "rulebook": book.describe(),
                    }),
                    cli.compact,
                ),
                Err(e) => fail(&e.to_string()),
            }
        }

        Commands::Check { rarity } => {
            let rarity = rarity.as_deref();
            emit(
                &serde_json::json!({
                    "reverseHolo": needs_reverse_holo(rarity),
                    "shiny": needs_shiny(rarity),
                }),
                cli.compact,
            )
        }
    }
}
