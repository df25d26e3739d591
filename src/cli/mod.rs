//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Rubik's cube guide - scan a cube, solve it, and walk through the moves.
///
/// Robot Mode: Use --robot or --format json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "cubeguide", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "CUBEGUIDE_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only log errors)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Settings file (TOML or YAML); defaults to ./cubeguide.toml if present
    #[arg(long, global = true, env = "CUBEGUIDE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Session state file
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// HSV calibration file
    #[arg(long, global = true)]
    pub calibration: Option<PathBuf>,

    /// Do not connect to the companion viewer
    #[arg(long, global = true)]
    pub no_viewer: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Colors ===
    /// Classify one HSV sample (H 0-179, S and V 0-255)
    Classify(ClassifyArgs),

    /// Show the active color ranges and where they come from
    Calibration,

    // === Solving ===
    /// Scan face images from a directory and save the scan
    Scan(ScanArgs),

    /// Solve the scanned (or given) cube and start a session
    Solve(SolveArgs),

    /// Walk through the current session, one move at a time
    Guide,

    /// Scan, solve and guide in one go
    Run(ScanArgs),

    // === Session ===
    /// Show session progress
    Status,

    /// Clear the session and delete its state file
    Reset,

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Hue (0-179)
    #[arg(value_parser = clap::value_parser!(u8).range(0..=179))]
    pub h: u8,
    /// Saturation (0-255)
    pub s: u8,
    /// Value (0-255)
    pub v: u8,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory holding one image per face
    pub dir: PathBuf,

    /// Filename pattern with a {face} placeholder (default from settings)
    #[arg(long, short = 'p')]
    pub pattern: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SolveArgs {
    /// 54-character cube description instead of the saved scan
    #[arg(long, conflicts_with = "scan_file")]
    pub cube: Option<String>,

    /// Scan record to solve (default from settings)
    #[arg(long)]
    pub scan_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
