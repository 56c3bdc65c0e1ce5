use clap::Parser;
use kubescaffold::cli::{run_cli, Cli};
use kubescaffold::logging::{init_logging_with_config, LogConfig};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging_with_config(&LogConfig::from_env()) {
        eprintln!("protoc-gen-kubescaffold: {err:#}");
    }

    // Nothing reaches stdout on failure; protoc only sees the exit status.
    if let Err(err) = run_cli(cli) {
        tracing::error!(error = %format!("{err:#}"), "generation failed");
        eprintln!("protoc-gen-kubescaffold: {err:#}");
        std::process::exit(1);
    }
}
