//! CLI argument definitions for the turn visualizer.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use vis_model::Problem;

/// Rows shown by `inspect --all-turns` unless `--limit` says otherwise.
pub const DEFAULT_TURN_LIMIT: usize = 1000;

#[derive(Parser)]
#[command(
    name = "vis",
    version,
    about = "Turn visualizer - generate cases and inspect solutions turn by turn",
    long_about = "Generate heuristic-contest test cases from seeds and inspect a candidate\n\
                  output against an input, one simulated turn at a time.\n\n\
                  Generation and rendering are delegated to external generator and\n\
                  visualizer commands, configured in the config file or on the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Engine command overrides.
#[derive(Args)]
pub struct EngineArgs {
    /// Generator command line, split on whitespace; overrides `engine.generator`.
    #[arg(long = "generator", value_name = "CMD", global = true)]
    pub generator: Option<String>,

    /// Visualizer command line, split on whitespace; overrides `engine.visualizer`.
    #[arg(long = "visualizer", value_name = "CMD", global = true)]
    pub visualizer: Option<String>,
}

impl EngineArgs {
    /// Apply the overrides to `config`.
    pub fn apply(&self, config: &mut vis_engine::ProcessEngineConfig) {
        if let Some(command) = &self.generator {
            config.generator = split_command(command);
        }
        if let Some(command) = &self.visualizer {
            config.visualizer = split_command(command);
        }
    }
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate test cases for consecutive seeds.
    Gen(GenArgs),

    /// Inspect a candidate output against an input.
    Inspect(InspectArgs),

    /// Print the number of turns an output plays out.
    MaxTurn(MaxTurnArgs),
}

#[derive(Parser)]
pub struct GenArgs {
    /// First seed. Non-numeric text means seed 0.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<String>,

    /// Number of cases (1 to 10000). Non-numeric text means 0.
    #[arg(long = "count", short = 'n', value_name = "N")]
    pub count: Option<String>,

    /// Write one file per seed into DIR instead of printing to stdout.
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Input file. Without it, the input is generated from the seed.
    #[arg(long = "input", value_name = "FILE", conflicts_with = "case")]
    pub input: Option<PathBuf>,

    /// Candidate output file.
    #[arg(long = "output", value_name = "FILE", conflicts_with = "case")]
    pub output: Option<PathBuf>,

    /// JSON case file with `input` and `output` strings.
    #[arg(long = "case", value_name = "FILE")]
    pub case: Option<PathBuf>,

    /// Seed to generate the input from.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<String>,

    /// Problem selector (A, B, C).
    #[arg(long = "problem", value_name = "PROBLEM")]
    pub problem: Option<Problem>,

    /// Turn to show; clamped into the valid range.
    #[arg(long = "turn", value_name = "TURN", allow_hyphen_values = true)]
    pub turn: Option<i64>,

    /// Show one row per turn instead of a single frame.
    #[arg(long = "all-turns", conflicts_with = "turn")]
    pub all_turns: bool,

    /// Maximum number of rows shown by --all-turns.
    #[arg(
        long = "limit",
        value_name = "N",
        default_value_t = DEFAULT_TURN_LIMIT,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
        requires = "all_turns"
    )]
    pub limit: usize,

    /// Write the frame's SVG markup to PATH.
    #[arg(long = "svg", value_name = "PATH", conflicts_with = "all_turns")]
    pub svg: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MaxTurnArgs {
    /// Input file.
    #[arg(long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Candidate output file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
