//! # Plugin Module
//!
//! Request intake for the `protoc` plugin protocol: decoding the
//! `CodeGeneratorRequest` read from stdin, validating the parameter string, and
//! encoding the `CodeGeneratorResponse` written back to stdout.
//!
//! The protocol is all-or-nothing. The request is read completely before any
//! work starts, and the response is encoded into one buffer and written with a
//! single call once every stage has succeeded.

mod io;
mod options;

pub use io::{build_response, decode_request, read_request, write_response};
pub use options::{strip_dots, GenerationOptions, GROUP_OPTION};
