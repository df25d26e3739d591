//! Common test utilities for the cubeguide CLI.
//!
//! This module provides infrastructure for end-to-end CLI testing with:
//! - `cli`: CLI runner with output verification and fluent assertions
//! - `env`: Environment variable isolation
//! - `fixtures`: Face images, calibration files, settings and a stub solver
#![allow(dead_code)]

pub mod env;
pub mod fixtures;

use tracing_subscriber::EnvFilter;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Solved cube description.
pub const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// Solved cube after one clockwise U turn; `U'` solves it.
pub const ONE_TURN: &str = "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB";
