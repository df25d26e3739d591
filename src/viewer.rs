//! Best-effort link to a companion viewer.
//!
//! The viewer listens on a local TCP port and receives one JSON object per
//! line. A viewer that is not running, or that goes away mid-session, is not
//! an error: the link drops to local-only and guidance carries on.

use std::io::Write;
use std::net::TcpStream;

use serde::Serialize;
use tracing::{debug, info, trace};

/// Default viewer endpoint.
pub const DEFAULT_VIEWER_ADDRESS: &str = "127.0.0.1:9999";

/// Notification sent to the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewerEvent<'a> {
    /// A guidance session is starting or resuming.
    Session { solution: &'a str, total: usize },
    /// The user should perform `mv` as step `step` of `total` (1-based).
    Move { step: usize, total: usize, #[serde(rename = "move")] mv: &'a str },
    /// Every move is done.
    Done,
}

/// Connection to the viewer, or nothing.
#[derive(Debug, Default)]
pub struct ViewerLink {
    stream: Option<TcpStream>,
}

impl ViewerLink {
    /// A link that never sends anything.
    #[must_use]
    pub fn local_only() -> Self {
        Self::default()
    }

    /// Try to reach the viewer at `address`. Never fails.
    #[must_use]
    pub fn connect(address: &str, enabled: bool) -> Self {
        if !enabled {
            debug!("Viewer disabled");
            return Self::local_only();
        }
        let stream = TcpStream::connect(address)
            .map_err(|e| debug!(address, error = %e, "Viewer not reachable"))
            .ok();
        if stream.is_some() {
            info!(address, "Connected to viewer");
        }
        Self { stream }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Send `event`. On any failure the link is dropped.
    pub fn notify(&mut self, event: &ViewerEvent<'_>) {
        let Some(stream) = self.stream.as_mut() else {
            return;
        };
        let Ok(mut line) = serde_json::to_vec(event) else {
            return;
        };
        line.push(b'\n');
        if let Err(e) = stream.write_all(&line).and_then(|()| stream.flush()) {
            debug!(error = %e, "Viewer link lost, continuing locally");
            self.stream = None;
        } else {
            trace!(?event, "Viewer notified");
        }
    }
}
