//! # kubescaffold
//!
//! **kubescaffold** is a `protoc` plugin that turns annotated protobuf messages
//! into the scaffold of a Kubernetes controller written with kube-rs.
//!
//! ## Overview
//!
//! A message becomes a custom resource when the comment immediately preceding
//! it carries the marker `k8s.io/apimachinery/pkg/runtime.Object`. For every
//! such resource the plugin emits a controller, an entrypoint, a CLI command,
//! API type definitions and registration, plus the crate skeleton around them.
//! Message structs themselves come from `prost-build`, fed with a rewritten
//! copy of the schema in which every resource message is renamed `XXX_<Name>`.
//!
//! ## Architecture
//!
//! - **[`plugin`]** - Request decoding, option validation, response encoding
//! - **[`schema`]** - Typed schema model, annotation scanner and rewriter
//! - **[`delegate`]** - Native binding emitters (`prost-build`)
//! - **[`generator`]** - File planner, templates and output assembler
//! - **[`naming`]** - Path and identifier derivations shared by every stage
//! - **[`cli`]**, **[`logging`]**, **[`runtime_config`]** - Process surface
//!
//! ## Example
//!
//! ```bash
//! protoc \
//!   --plugin=protoc-gen-kubescaffold=target/release/protoc-gen-kubescaffold \
//!   --kubescaffold_out=./widgets-controller \
//!   --kubescaffold_opt=group=drekle.example.io \
//!   widgets.proto
//! ```
//!
//! ## Configuration
//!
//! | Variable | Default | Effect |
//! |----------|---------|--------|
//! | `KUBESCAFFOLD_LOG_LEVEL` | `warn` | stderr log level |
//! | `KUBESCAFFOLD_LOG_FORMAT` | `pretty` | `pretty` or `json` |
//! | `KUBESCAFFOLD_SKIP_FORMAT` | `false` | emit Rust without prettyplease |
//! | `KUBESCAFFOLD_CONFIG` | unset | TOML scaffold config |

pub mod cli;
pub mod delegate;
pub mod error;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod plugin;
pub mod runtime_config;
pub mod schema;

pub use error::{GeneratorError, Result};
