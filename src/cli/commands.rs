use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::info;

use crate::delegate::ProstEmitter;
use crate::generator::{generate, generate_files, write_files};
use crate::plugin::{read_request, write_response};
use crate::runtime_config::RuntimeConfig;

/// Command-line interface of the protoc plugin
#[derive(Debug, Parser)]
#[command(name = "protoc-gen-kubescaffold", version)]
#[command(about = "protoc plugin generating Kubernetes controller scaffolds", long_about = None)]
pub struct Cli {
    /// Read the CodeGeneratorRequest from FILE instead of stdin
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Write generated files below DIR instead of emitting a CodeGeneratorResponse
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Run one generation request
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let runtime = RuntimeConfig::from_env();
    let request = match &cli.request {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open request {}", path.display()))?;
            read_request(file)?
        }
        None => read_request(io::stdin().lock())?,
    };
    let emitter = ProstEmitter::new();

    match &cli.out_dir {
        Some(dir) => {
            let files = generate_files(request, &emitter, &runtime)?;
            write_files(dir, &files)?;
            info!(count = files.len(), dir = %dir.display(), "wrote generated files");
        }
        None => {
            let response = generate(request, &emitter, &runtime)?;
            write_response(io::stdout().lock(), &response)?;
        }
    }
    Ok(())
}
