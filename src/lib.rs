//! Cube guide library - scan a Rubik's cube, solve it with an external
//! solver, and guide the user through the solution one move at a time.
//!
//! This library exposes the core functionality of the `cubeguide` CLI for
//! use in tests and potentially other applications.
//!
//! # Modules
//!
//! - `color`: HSV sample classification and calibration tables
//! - `cube`: faces, scans, cube descriptions and move notation
//! - `frame`: frame sources and 3x3 grid sampling
//! - `solver`: external solver boundary
//! - `state`: solve session tracking and persistence
//! - `guide`: interactive step-by-step guidance
//! - `viewer`: best-effort companion viewer link
//! - `output`: output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod cli;
pub mod color;
pub mod config;
pub mod cube;
pub mod error;
pub mod frame;
pub mod guide;
pub mod logging;
pub mod output;
pub mod solver;
pub mod state;
pub mod theme;
pub mod viewer;
