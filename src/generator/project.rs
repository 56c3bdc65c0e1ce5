use std::fs;
use std::path::Path;

use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use tracing::{debug, info};

use super::assemble::{Assembler, OutputFile};
use super::plan::Planner;
use super::scaffold_config::{load_scaffold_config, ScaffoldConfig};
use crate::delegate::BindingEmitter;
use crate::error::Result;
use crate::naming;
use crate::plugin::{build_response, GenerationOptions};
use crate::runtime_config::RuntimeConfig;
use crate::schema::{rewrite_for_target, SchemaRequest};

/// Run the whole pipeline and wrap the result in a protoc response.
pub fn generate(
    request: CodeGeneratorRequest,
    emitter: &dyn BindingEmitter,
    runtime: &RuntimeConfig,
) -> Result<CodeGeneratorResponse> {
    let files = generate_files(request, emitter, runtime)?;
    Ok(build_response(files))
}

/// Run the whole pipeline and return the generated files in emission order.
///
/// Options are validated before anything else, so an unknown option never
/// produces a partial file list.
pub fn generate_files(
    request: CodeGeneratorRequest,
    emitter: &dyn BindingEmitter,
    runtime: &RuntimeConfig,
) -> Result<Vec<OutputFile>> {
    let options = GenerationOptions::parse(request.parameter())?;
    let config = match &runtime.scaffold_config {
        Some(path) => load_scaffold_config(path)?,
        None => ScaffoldConfig::default(),
    };
    let schema = SchemaRequest::from_plugin_request(request)?;
    info!(
        group = %options.group(),
        files = schema.targets().count(),
        resources = schema.resources().count(),
        "generating scaffold"
    );

    let planner = Planner::new(&options, &schema, &config);
    let mut assembler = Assembler::new(runtime.skip_format);
    assembler.extend(planner.controllers()?);
    assembler.extend(planner.commands()?);
    assembler.extend(planner.runtime()?);
    assembler.extend(planner.api_types()?);
    assembler.extend(emit_bindings(&schema, options.namespace(), emitter)?);
    assembler.push(planner.build_descriptor()?);

    info!(count = assembler.len(), "scaffold generated");
    Ok(assembler.finish())
}

/// Invoke the delegate once per file to generate, against a fresh rewritten
/// copy of the request, and move its output into the package directory.
pub fn emit_bindings(
    schema: &SchemaRequest,
    namespace: &str,
    emitter: &dyn BindingEmitter,
) -> Result<Vec<OutputFile>> {
    let mut files = Vec::new();
    for target in schema.targets() {
        let rewritten = rewrite_for_target(schema, target);
        let dir = naming::package_dir(namespace, target.package());
        for file in emitter.emit(&rewritten)? {
            let path = format!("{dir}/{}", naming::base_name(&file.path));
            debug!(target = %target.name(), path = %path, "relocated bindings");
            files.push(OutputFile::new(path, file.content));
        }
    }
    Ok(files)
}

/// Write generated files below `out_dir`, creating directories as needed
pub fn write_files(out_dir: &Path, files: &[OutputFile]) -> Result<()> {
    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        debug!(path = %path.display(), "wrote file");
    }
    Ok(())
}
