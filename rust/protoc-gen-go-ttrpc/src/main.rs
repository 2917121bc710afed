//! protoc-gen-go-ttrpc: protoc plugin for Go ttrpc service bindings.
//!
//! Run by protoc as `--go-ttrpc_out=<dir>`. Reads a `CodeGeneratorRequest`
//! on stdin and writes a `CodeGeneratorResponse` on stdout. Logs go to
//! stderr and are controlled with `RUST_LOG`.

use std::io::{Read, Write};
use std::process::ExitCode;

use facet::Facet;
use facet_args as args;
use prost::Message;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Generate Go ttrpc bindings (normally invoked by protoc, not by hand)
#[derive(Facet)]
struct Cli {
    /// Print the plugin version and exit
    #[facet(args::named, default)]
    version: bool,
}

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = args::from_std_args()?;
    if cli.version {
        println!("protoc-gen-go-ttrpc {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // stdout carries the response
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;
    let request = ttrpc_codegen::driver::decode_request(&input)?;
    tracing::debug!(
        files = request.file_to_generate.len(),
        parameter = request.parameter(),
        "received request"
    );

    let response = ttrpc_codegen::driver::generate_response(&request);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&response.encode_to_vec())?;
    stdout.flush()?;
    Ok(())
}
