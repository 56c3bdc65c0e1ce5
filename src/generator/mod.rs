//! # Generator Module
//!
//! Turns a parsed protobuf schema into the files of a kube-rs controller crate.
//!
//! ## Architecture
//!
//! ```text
//! Options → SchemaRequest → Planner ─────────────┐
//!                         └→ Rewriter → Delegate ┴→ Assembler → Response
//! ```
//!
//! 1. **Planner** ([`Planner`]) - Renders the Askama templates of every stage
//! 2. **Delegate** ([`crate::delegate`]) - Produces native bindings per proto file
//! 3. **Assembler** ([`Assembler`]) - Formats Rust sources and keeps stage order
//!
//! Stages run in a fixed order: controllers, commands, runtime support, API
//! types, bindings, and finally the build descriptor.
//!
//! ## Generated Structure
//!
//! For `group=foo.bar` and a `Widget` resource declared in `widgets.proto`
//! (package `v1`):
//!
//! ```text
//! Cargo.toml
//! src/
//! ├── main.rs
//! ├── signals.rs
//! ├── cmd/
//! │   ├── mod.rs                  # root command
//! │   └── widget.rs
//! ├── controller/
//! │   ├── mod.rs
//! │   ├── widget_controller.rs
//! │   └── widget_entrypoint.rs
//! └── apis/
//!     ├── mod.rs
//!     └── foobar/
//!         ├── mod.rs              # group registration
//!         └── v1/
//!             ├── mod.rs          # package doc
//!             ├── widgets.pb.rs   # prost bindings (XxxWidget)
//!             ├── widgets_types.rs
//!             └── widgets_register.rs
//! ```
//!
//! ## Template Customization
//!
//! Templates live in `templates/` and are compiled into the binary:
//!
//! - `controller.rs.txt`, `entrypoint.rs.txt` - per-resource controller
//! - `command.rs.txt`, `command_root.rs.txt` - clap commands
//! - `types.rs.txt`, `register.rs.txt` - per-file API types
//! - `package_doc.rs.txt`, `group_register.rs.txt`, `apis_mod.rs.txt` - module wiring
//! - `main.rs.txt`, `signals.rs.txt`, `controller_mod.rs.txt`, `Cargo.toml.txt`

mod assemble;
mod plan;
mod project;
mod scaffold_config;
mod templates;

pub use assemble::{format_rust, format_source, Assembler, OutputFile};
pub use plan::*;
pub use project::{emit_bindings, generate, generate_files, write_files};
pub use scaffold_config::{
    default_dependencies, load_scaffold_config, DependencySpec, PackageConfig, ScaffoldConfig,
    DEFAULT_CRATE_VERSION,
};
pub use templates::*;
