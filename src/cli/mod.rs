//! # CLI Module
//!
//! Command-line surface of `protoc-gen-kubescaffold`.
//!
//! ## Usage
//!
//! Run by protoc, the plugin takes no arguments: it reads a
//! `CodeGeneratorRequest` from stdin and writes a `CodeGeneratorResponse` to
//! stdout.
//!
//! ```bash
//! protoc --kubescaffold_out=out --kubescaffold_opt=group=drekle.example.io widgets.proto
//! ```
//!
//! Two flags help when debugging without protoc:
//!
//! - `--request <FILE>` - Read the encoded request from a file
//! - `--out-dir <DIR>` - Write the generated files to disk instead of stdout

mod commands;

pub use commands::{run_cli, Cli};
