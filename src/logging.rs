//! Log setup for the CLI.
//!
//! Logs always go to stderr so stdout stays reserved for command output
//! (human text, or JSON in robot mode).

use std::io::{self, IsTerminal};

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// One JSON object per line, for scripts driving `--robot`.
    Json,
    /// Colored multi-field lines for an interactive terminal.
    Pretty,
    /// Compact lines without ANSI codes for pipes and files.
    Plain,
}

impl LogStyle {
    #[must_use]
    pub const fn select(robot_mode: bool, stderr_is_tty: bool) -> Self {
        match (robot_mode, stderr_is_tty) {
            (true, _) => Self::Json,
            (false, true) => Self::Pretty,
            (false, false) => Self::Plain,
        }
    }

    fn layer<S>(self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let base = fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_writer(io::stderr);
        match self {
            Self::Json => base.json().with_target(true).boxed(),
            Self::Pretty => base.with_target(false).boxed(),
            Self::Plain => base.with_target(false).with_ansi(false).compact().boxed(),
        }
    }
}

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "cubeguide=error";
    }
    match verbose {
        0 => "cubeguide=info",
        1 => "cubeguide=debug",
        _ => "cubeguide=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`/`-q`.
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    let style = LogStyle::select(robot_mode, io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(style.layer())
        .with(filter)
        .init();
}
