//! Native binding emitters.
//!
//! The scaffold does not generate message structs itself. It hands a rewritten
//! copy of the request to a [`BindingEmitter`] once per file to generate and
//! relocates whatever the emitter produces under `src/apis/<namespace>/<package>/`.
//!
//! [`ProstEmitter`] is the production emitter, backed by `prost-build`.

use std::any::Any;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use prost_build::Module;
use prost_types::compiler::CodeGeneratorRequest;

use crate::error::{GeneratorError, Result};
use crate::generator::OutputFile;
use crate::naming;

/// Converts protobuf messages into native Rust bindings
pub trait BindingEmitter {
    /// Generate bindings for every file listed in `request.file_to_generate`.
    ///
    /// Returned paths are relative; only their base name is kept by the caller.
    fn emit(&self, request: &CodeGeneratorRequest) -> Result<Vec<OutputFile>>;
}

/// Derives added to every generated binding so it can back a custom resource spec
const SERDE_DERIVES: &str =
    "#[derive(serde::Serialize, serde::Deserialize, schemars::JsonSchema)]";
const SERDE_RENAME: &str = "#[serde(rename_all = \"camelCase\")]";

/// [`BindingEmitter`] backed by `prost_build::Config::generate`
///
/// A fresh `prost_build::Config` is built for every call, so no state carries
/// over from one file to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProstEmitter;

impl ProstEmitter {
    pub fn new() -> Self {
        Self
    }

    fn config() -> prost_build::Config {
        let mut config = prost_build::Config::new();
        config.type_attribute(".", SERDE_DERIVES);
        config.type_attribute(".", SERDE_RENAME);
        config
    }
}

impl BindingEmitter for ProstEmitter {
    fn emit(&self, request: &CodeGeneratorRequest) -> Result<Vec<OutputFile>> {
        let mut files = Vec::with_capacity(request.file_to_generate.len());
        for name in &request.file_to_generate {
            let closure = dependency_closure(request, name)?;
            let target = request
                .proto_file
                .iter()
                .find(|f| f.name() == name)
                .ok_or_else(|| GeneratorError::UnknownFile(name.clone()))?;
            let module = Module::from_protobuf_package_name(target.package());

            // prost resolves references through every descriptor it is given but
            // writes code for each of them; dependencies go to a module that is
            // thrown away.
            let discarded = Module::from_parts([DEPENDENCY_MODULE]);
            let requests: Vec<_> = request
                .proto_file
                .iter()
                .filter(|f| closure.contains(f.name()))
                .map(|f| {
                    let module = if f.name() == name {
                        module.clone()
                    } else {
                        discarded.clone()
                    };
                    (module, f.clone())
                })
                .collect();

            let generated = panic::catch_unwind(AssertUnwindSafe(|| {
                Self::config().generate(requests)
            }))
            .map_err(|payload| GeneratorError::Delegate {
                file: name.clone(),
                message: panic_message(payload.as_ref()),
            })?;
            let mut generated = generated.map_err(|e| GeneratorError::Delegate {
                file: name.clone(),
                message: e.to_string(),
            })?;
            let content = generated.remove(&module).unwrap_or_default();
            tracing::debug!(
                file = %name,
                dependencies = closure.len() - 1,
                bytes = content.len(),
                "prost bindings generated"
            );
            files.push(OutputFile::new(naming::bindings_file_name(name), content));
        }
        Ok(files)
    }
}

/// Module receiving the code prost writes for dependency files
const DEPENDENCY_MODULE: &str = "__kubescaffold_dependencies";

/// Names of `root` and every file it imports, directly or transitively
fn dependency_closure(request: &CodeGeneratorRequest, root: &str) -> Result<HashSet<String>> {
    let mut seen = HashSet::new();
    let mut pending = vec![root.to_string()];
    while let Some(name) = pending.pop() {
        if seen.contains(&name) {
            continue;
        }
        let descriptor = request
            .proto_file
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| GeneratorError::UnknownFile(name.clone()))?;
        pending.extend(descriptor.dependency.iter().cloned());
        seen.insert(name);
    }
    Ok(seen)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("prost-build panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("prost-build panicked: {message}")
    } else {
        "prost-build panicked".to_string()
    }
}
