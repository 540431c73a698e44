//! `tripplan` CLI — score candidate trip windows and print recommendations.
//!
//! Input is a JSON document with a plan and the responses collected so far:
//!
//! ```json
//! {
//!   "plan": {"startRange": "2025-06-01", "endRange": "2025-06-10", "numDays": 3},
//!   "responses": [
//!     {"id": "a", "name": "Ana", "availableDates": ["2025-06-01", "2025-06-02"]}
//!   ]
//! }
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Recommendation as JSON (stdin → stdout)
//! cat trip.json | tripplan recommend
//!
//! # Human-readable, with threshold overrides
//! tripplan recommend -i trip.json --format text --config thresholds.json
//!
//! # Top five scored windows
//! tripplan windows -i trip.json --limit 5
//!
//! # Compatible ranges, partial-match stats and per-day availability
//! tripplan stats -i trip.json
//! ```
//!
//! Logs go to stderr; raise the level with `-v`/`-vv` or `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use trip_engine::{
    compatible_ranges, daily_availability, evaluate_with_config, partial_match_stats,
    score_all_windows, DateRange, DayAvailability, EngineConfig, EvaluationInput,
    PartialMatchStats, Plan, Recommendation, RecommendationResult, Response, ScoredWindow,
};

#[derive(Parser)]
#[command(
    name = "tripplan",
    version,
    about = "Find the trip dates that work for the most people"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the plan and print the primary recommendation plus alternatives
    Recommend {
        #[command(flatten)]
        io: IoArgs,
        /// JSON file with engine threshold overrides
        #[arg(long)]
        config: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// List scored windows, best first
    Windows {
        #[command(flatten)]
        io: IoArgs,
        /// Only print the first N windows
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Show compatible ranges, partial-match stats and daily availability
    Stats {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
}

impl IoArgs {
    /// Decode the evaluation document straight from the input file or stdin.
    fn read_evaluation(&self) -> Result<EvaluationInput> {
        let parsed: serde_json::Result<EvaluationInput> = match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path))?;
                serde_json::from_reader(BufReader::new(file))
            }
            None => serde_json::from_reader(io::stdin().lock()),
        };
        parsed.context("Failed to parse input JSON")
    }

    fn emit(&self, content: &str) -> Result<()> {
        let mut sink: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path))?,
            ),
            None => Box::new(io::stdout().lock()),
        };
        sink.write_all(content.as_bytes())
            .and_then(|()| sink.flush())
            .context("Failed to write output")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Serialize)]
struct StatsReport {
    partial_match: Option<PartialMatchStats>,
    compatible_ranges: Vec<DateRange>,
    daily: Vec<DayAvailability>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Recommend { io, config, format } => {
            let input = io.read_evaluation()?;
            let config = load_config(config.as_deref(), &input)?;
            let (plan, responses) = input.parse().context("Invalid plan or responses")?;

            let result = evaluate_with_config(&plan, &responses, &config);
            if let Some(r) = &result {
                info!(primary = r.primary.priority, alternatives = r.alternatives.len(), "evaluated");
            }
            let out = match format {
                Format::Json => serde_json::to_string_pretty(&result)?,
                Format::Text => render_result(result.as_ref()),
            };
            io.emit(&out)?;
        }
        Commands::Windows { io, limit, format } => {
            let input = io.read_evaluation()?;
            let (plan, responses) = input.parse().context("Invalid plan or responses")?;

            let mut scored = score(&plan, &responses);
            if let Some(n) = limit {
                scored.truncate(n);
            }
            let out = match format {
                Format::Json => serde_json::to_string_pretty(&scored)?,
                Format::Text => render_windows(&scored),
            };
            io.emit(&out)?;
        }
        Commands::Stats { io } => {
            let input = io.read_evaluation()?;
            let (plan, responses) = input.parse().context("Invalid plan or responses")?;

            let scored = score(&plan, &responses);
            let report = StatsReport {
                partial_match: partial_match_stats(&scored),
                compatible_ranges: compatible_ranges(&scored),
                daily: daily_availability(&plan, &responses),
            };
            io.emit(&serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Failed to parse log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
    Ok(())
}

fn score(plan: &Plan, responses: &[Response]) -> Vec<ScoredWindow> {
    score_all_windows(plan.start_range, plan.end_range, plan.num_days, responses)
}

/// `--config` file first, then a config embedded in the input, then defaults.
fn load_config(path: Option<&str>, input: &EvaluationInput) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            debug!(path, "loaded config file");
            EngineConfig::from_json(&raw)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => input.config.clone().unwrap_or_default(),
    };
    config.validate().context("Invalid engine config")?;
    Ok(config)
}

fn render_result(result: Option<&RecommendationResult>) -> String {
    let Some(result) = result else {
        return "No responses yet.\n".to_string();
    };
    let mut out = render_recommendation(&result.primary, "");
    if !result.alternatives.is_empty() {
        out.push_str("\nAlternatives:\n");
        for alt in &result.alternatives {
            out.push_str(&render_recommendation(alt, "  "));
        }
    }
    out
}

fn render_recommendation(rec: &Recommendation, indent: &str) -> String {
    let mut out = format!(
        "{}[P{} {}] {}\n{}  {}\n{}  Next step: {}\n",
        indent,
        rec.priority,
        rec.status,
        rec.headline,
        indent,
        rec.detail,
        indent,
        rec.recommendation_text
    );
    if let Some(best) = &rec.best_window {
        out.push_str(&format!(
            "{}  Window: {} ({}%)\n",
            indent,
            best.label(),
            best.percentage
        ));
    }
    out
}

fn render_windows(scored: &[ScoredWindow]) -> String {
    scored
        .iter()
        .map(|w| {
            let blockers: Vec<&str> = w.blockers.iter().map(|b| b.name.as_str()).collect();
            if blockers.is_empty() {
                format!("{:>3}%  {}\n", w.percentage, w.label())
            } else {
                format!(
                    "{:>3}%  {}  (missing: {})\n",
                    w.percentage,
                    w.label(),
                    blockers.join(", ")
                )
            }
        })
        .collect()
}
