#![deny(missing_docs)]

//! # st
//!
//! Adds serialization tags (`json`, `yaml`, `msgpack`, ...) to the exported
//! fields of Go structs.
//!
//! - `st [FLAGS] PATH...`: tags files, printing the result or writing it back.
//! - `st --serve`: exposes the same rewrite over HTTP (`server` feature).

use clap::Parser;
use std::process::ExitCode;

mod error;
mod files;
#[cfg(feature = "server")]
mod server;
mod tag;

use crate::error::CliResult;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Go struct tag annotator")]
struct Cli {
    #[clap(flatten)]
    tag: tag::TagArgs,

    /// Serve POST /tag_struct instead of processing files.
    #[cfg(feature = "server")]
    #[clap(long)]
    serve: bool,

    /// Address for --serve.
    #[cfg(feature = "server")]
    #[clap(long, env = "ST_BIND", default_value = "127.0.0.1:8080")]
    bind: String,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    #[cfg(feature = "server")]
    if cli.serve {
        return Ok(server::serve(&cli.bind)?);
    }

    tag::execute(&cli.tag)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.tag.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
