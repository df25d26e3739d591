//! cubeguide - scan, solve and step through a Rubik's cube solution.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cubeguide::cli::{ClassifyArgs, Cli, Commands, CompletionsArgs, ScanArgs, SolveArgs};
use cubeguide::color::{Classifier, HsvSample, load_calibration};
use cubeguide::config::Settings;
use cubeguide::cube::{CubeDescription, ScanRecord};
use cubeguide::error::Result;
use cubeguide::frame::{ImageDirSource, scan_faces};
use cubeguide::guide::{ConsoleInput, run_guide};
use cubeguide::logging::init_logging;
use cubeguide::output::{
    CalibrationReport, ClassificationReport, FaceReport, Output, OutputMode, ScanReport,
};
use cubeguide::solver::{CommandSolver, SolveReport, solve_description};
use cubeguide::state::{ProgressTracker, SessionStore};
use cubeguide::viewer::ViewerLink;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> Option<&'static str> {
        option_env!("VERGEN_GIT_SHA")
    }

    pub fn build_timestamp() -> Option<&'static str> {
        option_env!("VERGEN_BUILD_TIMESTAMP")
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let mode = OutputMode::from_cli(&cli);
    let output = mode.into_output();

    if let Err(e) = run(&cli, mode, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, mode: OutputMode, output: &dyn Output) -> Result<()> {
    // These work without (or despite) a settings file
    match &cli.command {
        Commands::Version => return cmd_version(output),
        Commands::Completions(args) => return cmd_completions(args),
        _ => {}
    }

    let settings = Settings::discover(cli.config.as_deref())?.with_overrides(
        cli.state_file.clone(),
        cli.calibration.clone(),
        cli.no_viewer,
    );
    debug!(source = ?settings.source, state_file = %settings.state_file.display(), "Settings ready");

    match &cli.command {
        Commands::Classify(args) => cmd_classify(&settings, args, output),
        Commands::Calibration => cmd_calibration(&settings, output),
        Commands::Scan(args) => cmd_scan(&settings, args, output).map(|_| ()),
        Commands::Solve(args) => cmd_solve(&settings, args, mode, output).map(|_| ()),
        Commands::Guide => cmd_guide(&settings, output),
        Commands::Run(args) => cmd_run(&settings, args, mode, output),
        Commands::Status => cmd_status(&settings, output),
        Commands::Reset => cmd_reset(&settings, output),
        Commands::Version | Commands::Completions(_) => Ok(()),
    }
}

// === Colors ===

fn load_classifier(settings: &Settings) -> Result<Classifier> {
    let table = load_calibration(&settings.calibration_file)?;
    if let Some(table) = &table {
        info!(
            path = %settings.calibration_file.display(),
            colors = table.len(),
            "Using calibrated ranges"
        );
    }
    Ok(Classifier::new(table))
}

fn cmd_classify(settings: &Settings, args: &ClassifyArgs, output: &dyn Output) -> Result<()> {
    let classifier = load_classifier(settings)?;
    let sample = HsvSample::new(args.h, args.s, args.v);
    let color = classifier.classify(sample);
    output.classification(&ClassificationReport::new(
        sample,
        color,
        classifier.calibration().is_some(),
    ));
    Ok(())
}

fn cmd_calibration(settings: &Settings, output: &dyn Output) -> Result<()> {
    let classifier = load_classifier(settings)?;
    let source = classifier
        .calibration()
        .map(|_| settings.calibration_file.as_path());
    output.calibration(&CalibrationReport::new(source, classifier.active_ranges()));
    Ok(())
}

// === Solving ===

fn cmd_scan(settings: &Settings, args: &ScanArgs, output: &dyn Output) -> Result<ScanRecord> {
    let classifier = load_classifier(settings)?;
    let pattern = args.pattern.as_deref().unwrap_or(&settings.face_pattern);
    let mut source = ImageDirSource::open(&args.dir, pattern)?;
    for path in source.unmatched() {
        debug!(path = %path.display(), "Ignoring file");
    }

    let faces = scan_faces(&mut source, &classifier)?;
    let record = ScanRecord::new(source.dir().display().to_string(), faces);
    record.save(&settings.scan_file)?;

    let description = record.faces.describe().ok();
    let count_warnings = description
        .as_ref()
        .map(|d| d.count_warnings().iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    output.scan(&ScanReport {
        source: record.source.clone(),
        faces: record
            .faces
            .iter()
            .map(|(face, scan)| FaceReport {
                face,
                colors: scan.symbols(),
                stickers: scan.stickers.to_vec(),
            })
            .collect(),
        missing: record.faces.missing_faces(),
        description: description.map(|d| d.to_string()),
        count_warnings,
        record: settings.scan_file.display().to_string(),
    });
    Ok(record)
}

fn cmd_solve(
    settings: &Settings,
    args: &SolveArgs,
    mode: OutputMode,
    output: &dyn Output,
) -> Result<SolveReport> {
    let description = match &args.cube {
        Some(cube) => CubeDescription::parse(cube)?,
        None => {
            let path = args.scan_file.as_deref().unwrap_or(&settings.scan_file);
            ScanRecord::load(path)?.faces.describe()?
        }
    };
    solve(settings, &description, mode, output)
}

fn solve(
    settings: &Settings,
    description: &CubeDescription,
    mode: OutputMode,
    output: &dyn Output,
) -> Result<SolveReport> {
    let solver = CommandSolver::new(settings.solver.command.clone(), settings.solver.args.clone());
    let mut tracker = ProgressTracker::restore(SessionStore::new(&settings.state_file));

    let spinner = (!mode.is_robot() && io::stderr().is_terminal()).then(|| spinner("Solving..."));
    let result = solve_description(&solver, description, &mut tracker, settings.max_expected_moves);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = result?;
    output.solve(&report);
    Ok(report)
}

fn cmd_guide(settings: &Settings, output: &dyn Output) -> Result<()> {
    let mut tracker = ProgressTracker::restore(SessionStore::new(&settings.state_file));
    let mut viewer = ViewerLink::connect(&settings.viewer.address, settings.viewer.enabled);
    if viewer.is_connected() {
        output.info(&format!("Connected to viewer at {}", settings.viewer.address));
    }
    let mut input = ConsoleInput::new();
    run_guide(&mut tracker, &mut input, output, &mut viewer)?;
    Ok(())
}

fn cmd_run(settings: &Settings, args: &ScanArgs, mode: OutputMode, output: &dyn Output) -> Result<()> {
    let record = cmd_scan(settings, args, output)?;
    let description = record.faces.describe()?;
    let report = solve(settings, &description, mode, output)?;
    if report.already_solved {
        return Ok(());
    }
    cmd_guide(settings, output)
}

// === Session ===

fn cmd_status(settings: &Settings, output: &dyn Output) -> Result<()> {
    let store = SessionStore::new(&settings.state_file);
    let state = store.load_or_default();
    output.session_status(&state.summary(), store.path());
    Ok(())
}

fn cmd_reset(settings: &Settings, output: &dyn Output) -> Result<()> {
    let mut tracker = ProgressTracker::restore(SessionStore::new(&settings.state_file));
    tracker.reset()?;
    output.session_reset(tracker.store().path());
    Ok(())
}

// === Utilities ===

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(output: &dyn Output) -> Result<()> {
    output.version_info(
        build_info::VERSION,
        build_info::git_sha(),
        build_info::build_timestamp(),
    );
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), "cubeguide", &mut io::stdout());
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
