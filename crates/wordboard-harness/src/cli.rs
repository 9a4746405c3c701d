use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use web_time::Instant;
use wordboard_core::trace::{ReplayStep, TraceRecord, read_trace_file, replay};
use wordboard_core::{TableConfig, TableView, WordTable};

use crate::error::{HarnessError, Result};
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "wordboard-harness",
    about = "Replay wordboard gesture traces and check table configs",
    version
)]
pub struct Cli {
    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSONL trace onto a fresh table and print the final view.
    Replay(ReplayArgs),

    /// Load and validate a TOML or JSON table config.
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),

    /// Print the built-in default config as JSON.
    #[command(name = "default-config")]
    DefaultConfig,
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Trace file written by `TraceWriter`.
    pub trace: PathBuf,

    /// Table config; built-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override `shuffle_seed` from the config.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exit non-zero if any record fails to apply.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    pub path: PathBuf,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Replay(args) => run_replay(&args, &mut out),
        Commands::CheckConfig(args) => run_check_config(&args, &mut out),
        Commands::DefaultConfig => {
            serde_json::to_writer_pretty(&mut out, &TableConfig::default())?;
            writeln!(out)?;
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// replay
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct FailedRecord {
    index: usize,
    error: String,
    protocol_violation: bool,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    session: Option<String>,
    records: usize,
    applied: usize,
    failed: Vec<FailedRecord>,
    view: TableView,
}

fn load_config(args: &ReplayArgs) -> Result<TableConfig> {
    let mut config = match &args.config {
        Some(path) => TableConfig::from_file(path)?,
        None => TableConfig::default(),
    };
    if args.seed.is_some() {
        config.shuffle_seed = args.seed;
    }
    let problems = config.validate();
    if !problems.is_empty() {
        return Err(HarnessError::InvalidConfig { problems });
    }
    Ok(config)
}

fn build_report(records: &[TraceRecord], steps: &[ReplayStep], table: &WordTable) -> ReplayReport {
    let session = match records.first() {
        Some(TraceRecord::Header { session, .. }) => Some(session.clone()),
        _ => None,
    };
    let failed: Vec<FailedRecord> = steps
        .iter()
        .filter_map(|step| {
            step.result.as_ref().err().map(|err| FailedRecord {
                index: step.index,
                error: err.to_string(),
                protocol_violation: err.is_protocol_violation(),
            })
        })
        .collect();
    ReplayReport {
        session,
        records: records.len(),
        applied: steps.len() - failed.len(),
        failed,
        view: table.view(),
    }
}

pub fn run_replay(args: &ReplayArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args)?;
    let records = read_trace_file(&args.trace)?;
    let mut table = WordTable::new(&config)?;

    let steps = replay(&mut table, &records, Instant::now());
    let report = build_report(&records, &steps, &table);
    tracing::info!(
        target: "wordboard.harness",
        trace = %args.trace.display(),
        records = report.records,
        applied = report.applied,
        failed = report.failed.len(),
        revision = table.revision(),
        "replay complete"
    );

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;

    if args.strict && !report.failed.is_empty() {
        return Err(HarnessError::ReplayFailed {
            failed: report.failed.len(),
            total: steps.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// check-config
// ---------------------------------------------------------------------------

pub fn run_check_config(args: &CheckConfigArgs, out: &mut impl Write) -> Result<()> {
    let config = TableConfig::from_file(&args.path)?;
    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            tracing::warn!(target: "wordboard.harness", %problem, "config rejected");
        }
        return Err(HarnessError::InvalidConfig { problems });
    }
    // Issues ids once; catches layouts the field checks cannot.
    let table = WordTable::new(&config)?;
    writeln!(
        out,
        "{}: ok ({} board, {} hand, {} in deck, tap < {}ms)",
        args.path.display(),
        table.snapshot().board.len(),
        table.snapshot().hand.len(),
        table.deck_remaining(),
        config.gesture.tap_max_ms,
    )?;
    Ok(())
}
