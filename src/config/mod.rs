//! Configuration: settings files and path resolution.
//!
//! Settings come from an optional TOML or YAML file; command-line flags
//! override individual values.

mod path;
mod settings;

pub use path::{PathResolver, home_dir, resolve_path};
pub use settings::{ConfigFormat, DEFAULT_CONFIG_FILE, Settings, SolverSettings, ViewerSettings};
