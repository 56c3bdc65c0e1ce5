//! Error type shared by every stage of the generation pipeline.
//!
//! Each variant maps to one failure class of the plugin:
//!
//! - **Input** - the request could not be decoded or describes an impossible schema
//! - **Configuration** - the plugin parameter or scaffold config is invalid
//! - **Rendering** - a template failed to render
//! - **Delegate** - the native binding emitter failed
//!
//! All of them are terminal. Formatting failures never surface here: the assembler
//! keeps the unformatted text instead.

use std::path::PathBuf;

/// Errors that abort a generation run
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The request bytes are not a valid `CodeGeneratorRequest`
    #[error("failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A name listed in `file_to_generate` has no matching descriptor
    #[error("file `{0}` is listed for generation but has no descriptor in the request")]
    UnknownFile(String),

    /// A file to generate does not declare a protobuf package
    #[error("file `{0}` has no package; a package is required to place generated API types")]
    MissingPackage(String),

    /// The resource marker decorates something other than a top-level message
    #[error("resource marker in `{file}` at location path {path:?} does not precede a top-level message")]
    MisplacedMarker {
        /// Proto file carrying the comment
        file: String,
        /// Source location path of the comment
        path: Vec<i32>,
    },

    /// An internal binding type name equals a resource type name
    #[error("internal binding type `{0}` collides with a resource of the same name")]
    NameCollision(String),

    /// The plugin parameter contains a key this plugin does not understand
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// A required plugin option is absent or empty
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    /// The scaffold configuration file could not be read or parsed
    #[error("invalid scaffold config {path}: {message}")]
    Config {
        /// Path of the offending file
        path: PathBuf,
        /// Reader or parser message
        message: String,
    },

    /// A template failed to render
    #[error("failed to render template `{template}`: {source}")]
    Render {
        /// Template identifier
        template: &'static str,
        /// Underlying askama error
        #[source]
        source: askama::Error,
    },

    /// The native binding emitter reported a failure; the message is kept verbatim
    #[error("binding emitter failed for `{file}`: {message}")]
    Delegate {
        /// File the emitter was asked to generate
        file: String,
        /// Emitter message
        message: String,
    },

    /// Reading the request or writing generated files failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for generation stages
pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;
