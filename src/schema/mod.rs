//! # Schema Module
//!
//! Typed model of the protobuf schema carried by a `CodeGeneratorRequest`.
//!
//! ## Annotations
//!
//! A message becomes a *resource* when the comment block immediately preceding it
//! contains [`RESOURCE_MARKER`] on some line:
//!
//! ```proto
//! // Widget describes a widget.
//! // +k8s:deepcopy-gen:interfaces=k8s.io/apimachinery/pkg/runtime.Object
//! message Widget {
//!   string color = 1;
//! }
//! ```
//!
//! The comment is scanned once, when [`SchemaRequest`] is built, and turned into
//! an [`Annotation`] on the message. Later stages never look at comment text.
//!
//! ## Rewriting
//!
//! [`rewrite_for_target`] produces the request handed to the native binding
//! emitter: a copy in which flagged messages carry their internal name
//! (`XXX_Widget`), so the binding and the resource wrapper (`Widget`) can live
//! side by side in the same module.

mod rewrite;
mod scan;
mod types;

pub use rewrite::rewrite_for_target;
pub use scan::{documentation_lines, has_marker, scan_file, ScannedResource, RESOURCE_MARKER};
pub use types::{AnnotatedResource, Annotation, MessageDescriptor, SchemaFile, SchemaRequest};
