//! Human-friendly output implementation using colored.

use std::path::Path;

use colored::Colorize;
use tracing::{debug, instrument, trace};

use crate::cube::Face;
use crate::error::CubeError;
use crate::guide::{GuideOutcome, GuideStep};
use crate::solver::SolveReport;
use crate::state::{Phase, SessionSummary};
use crate::theme::CubeTheme;

use super::{CalibrationReport, ClassificationReport, FaceReport, Output, ScanReport};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    theme: CubeTheme,
}

impl HumanOutput {
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating HumanOutput");
        Self {
            theme: CubeTheme::default(),
        }
    }

    fn label(&self, name: &str) -> String {
        self.theme.label(&format!("  {name:<12}")).to_string()
    }

    fn rule(&self, title: &str) {
        println!("{}", self.theme.header(&format!("== {title} ==")));
    }

    /// A face as a 3x3 block of swatches, one row per line.
    fn face_rows(&self, face: &FaceReport) -> [String; 3] {
        std::array::from_fn(|row| {
            face.stickers[row * 3..row * 3 + 3]
                .iter()
                .map(|s| self.theme.sticker(s.color).to_string())
                .collect()
        })
    }
}

impl Default for HumanOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for HumanOutput {
    fn success(&self, message: &str) {
        println!("{}{message}", "[OK] ".bold().color(self.theme.success));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &CubeError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!();
        eprintln!(
            "  {}{}",
            "[ERR] ".bold().color(self.theme.error),
            error.to_string().bold()
        );
        if let CubeError::IncompleteScan { missing, .. } = error {
            eprintln!();
            eprintln!("{}", self.theme.label("  Missing faces:"));
            for face in missing {
                eprintln!("    - {face} ({})", face.name());
            }
        }
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            eprintln!();
            eprintln!("{}", self.theme.label("  Suggestion:"));
            eprintln!("  {}", suggestion.color(self.theme.muted));
        }
        eprintln!();
    }

    fn warning(&self, message: &str) {
        println!("{}{message}", "[WARN] ".bold().color(self.theme.warning));
    }

    fn info(&self, message: &str) {
        println!("{}{message}", "[INFO] ".bold().color(self.theme.accent));
    }

    fn classification(&self, report: &ClassificationReport) {
        let source = if report.calibrated { "calibrated" } else { "default" };
        println!(
            "{}  {} {}  {}",
            report.sample,
            self.theme.sticker(report.color),
            self.theme.value(report.name),
            self.theme.label(&format!("({source} ranges)"))
        );
    }

    fn calibration(&self, report: &CalibrationReport) {
        match &report.source {
            Some(path) => self.rule(&format!("Calibration: {path}")),
            None => self.rule("Default ranges"),
        }
        println!("{}", self.theme.label("  White: S < 75 and V > 150, or S < 90 and V > 180"));
        for entry in &report.ranges {
            let r = entry.range;
            println!(
                "  {}  H {:>3}-{:<3}  S {:>3}-{:<3}  V {:>3}-{:<3}",
                self.theme.sticker(entry.color),
                r.h.0,
                r.h.1,
                r.s.0,
                r.s.1,
                r.v.0,
                r.v.1
            );
        }
    }

    #[instrument(skip_all, fields(faces = report.faces.len()))]
    fn scan(&self, report: &ScanReport) {
        debug!("Outputting scan");
        self.rule(&format!("Scan of {}", report.source));
        for face in &report.faces {
            let rows = self.face_rows(face);
            println!("  {} {}", self.theme.value(&format!("{:<6}", face.face.name())), rows[0]);
            println!("         {}", rows[1]);
            println!("         {}", rows[2]);
            // White detections are the usual misreads; show what the camera saw
            for (i, sticker) in face.stickers.iter().enumerate() {
                if let (crate::color::Color::White, Some(sample)) = (sticker.color, sticker.sample) {
                    trace!(face = %face.face, index = i, %sample, "White sticker");
                    println!(
                        "{}",
                        self.theme
                            .label(&format!("         #{i} white at S:{} V:{}", sample.s, sample.v))
                    );
                }
            }
        }
        if !report.missing.is_empty() {
            let missing: Vec<String> = report.missing.iter().map(Face::to_string).collect();
            self.warning(&format!(
                "Only scanned {} faces, missing: {}",
                report.faces.len(),
                missing.join(", ")
            ));
        }
        for warning in &report.count_warnings {
            self.warning(warning);
        }
        if let Some(description) = &report.description {
            println!("{}{}", self.label("Cube"), description);
        }
        self.success(&format!("Scan saved to {}", report.record));
    }

    #[instrument(skip_all)]
    fn solve(&self, report: &SolveReport) {
        debug!(total = report.total_moves, "Outputting solve");
        for warning in &report.count_warnings {
            self.warning(warning);
        }
        if report.already_solved {
            self.success("Cube is already solved! Steps required: 0");
            return;
        }
        self.success(&format!("Solution found: {}", report.solution));
        println!("{}{}", self.label("Steps"), report.total_moves);
        println!("{}{}", self.label("Turns"), report.move_count);
        if report.suspicious_length {
            self.warning(&format!(
                "Solution has {} moves, more than expected. This usually means a scanning error; consider re-scanning.",
                report.move_count
            ));
        }
    }

    fn guide_start(&self, solution: &str, step: usize, total: usize) {
        self.rule("Guidance");
        println!("{}{solution}", self.label("Solution"));
        if step > 0 {
            self.info(&format!("Resuming at step {} of {total}", step + 1));
        }
        println!(
            "{}",
            self.theme
                .label("  Press SPACE or ENTER after each move, ESC or q to stop. X2 means do X twice.")
        );
    }

    fn guide_step(&self, step: &GuideStep) {
        let progress = self.theme.label(&format!("Step {}/{}", step.step, step.total));
        let mut line = format!(
            "{progress}  {}  {}",
            self.theme.value(&step.token).color(self.theme.accent),
            step.instruction
        );
        if step.twice {
            line.push_str(&format!("  {}", "DO THIS TWICE".bold().color(self.theme.warning)));
        }
        println!("{line}");
    }

    fn guide_finished(&self, outcome: &GuideOutcome) {
        match outcome {
            GuideOutcome::Completed { total } => {
                self.success(&format!("Cube solved! All {total} moves completed."));
            }
            GuideOutcome::Aborted { completed, total } => {
                self.info(&format!(
                    "Stopped after {completed} of {total} moves. Run `cubeguide guide` to resume."
                ));
            }
        }
    }

    fn session_status(&self, summary: &SessionSummary, state_file: &Path) {
        self.rule("Session");
        println!("{}{}", self.label("State file"), state_file.display());
        println!("{}{}", self.label("Phase"), self.theme.value(&summary.phase.to_string()));
        if summary.phase == Phase::Idle {
            println!("{}", self.theme.label("  No solution assigned. Run: cubeguide solve"));
            return;
        }
        println!("{}{}", self.label("Solution"), summary.solution);
        println!(
            "{}{}/{} ({} remaining, {} turns total)",
            self.label("Progress"),
            summary.step,
            summary.total_moves,
            summary.remaining,
            summary.turn_count
        );
        if let Some(next) = &summary.next_move {
            println!("{}{}", self.label("Next move"), self.theme.value(next));
        }
    }

    fn session_reset(&self, state_file: &Path) {
        self.success(&format!("Session cleared ({} removed)", state_file.display()));
    }

    #[instrument(skip(self))]
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        debug!(version, ?git_sha, ?build_time, "Outputting version info");
        println!("{}", self.theme.header("cubeguide"));
        println!("{}{}", self.label("Version"), self.theme.value(version));
        if let Some(sha) = git_sha {
            let dirty = matches!(option_env!("VERGEN_GIT_DIRTY"), Some("true"));
            print!("{}{}", self.label("Git SHA"), self.theme.value(sha));
            if dirty {
                print!("{}", " (dirty)".color(self.theme.warning));
            }
            println!();
        }
        if let Some(time) = build_time {
            println!("{}{}", self.label("Built"), time.color(self.theme.muted));
        }
        if let Some(rustc) = option_env!("VERGEN_RUSTC_SEMVER") {
            println!("{}{}", self.label("Rust"), rustc.color(self.theme.muted));
        }
        if let Some(target) = option_env!("VERGEN_CARGO_TARGET_TRIPLE") {
            println!("{}{}", self.label("Target"), target.color(self.theme.muted));
        }
    }
}
