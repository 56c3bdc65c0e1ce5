//! # Runtime Configuration Module
//!
//! Environment variables that change how a generation run behaves without
//! touching the protoc command line.
//!
//! ## Environment Variables
//!
//! ### `KUBESCAFFOLD_SKIP_FORMAT`
//!
//! `true` or `1` skips the formatting pass; generated Rust is emitted exactly as
//! rendered. Default: `false`.
//!
//! ### `KUBESCAFFOLD_CONFIG`
//!
//! Path to a TOML scaffold config (crate name, version, extra dependencies).
//! Unset means defaults; a path that cannot be read fails the run.
//!
//! ## Usage
//!
//! ```rust
//! use kubescaffold::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("skip format: {}", config.skip_format);
//! ```

use std::env;
use std::path::PathBuf;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Skip the prettyplease pass over generated Rust (default: false)
    pub skip_format: bool,
    /// Optional scaffold config file
    pub scaffold_config: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let skip_format = match env::var("KUBESCAFFOLD_SKIP_FORMAT") {
            Ok(val) => parse_flag(&val),
            Err(_) => false,
        };
        let scaffold_config = env::var_os("KUBESCAFFOLD_CONFIG")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        RuntimeConfig {
            skip_format,
            scaffold_config,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
