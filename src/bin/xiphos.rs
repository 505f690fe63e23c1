//! Xiphos CLI binary.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use xiphos::cli::{args::XiphosArgs, commands::execute_command};

fn main() {
    let args = XiphosArgs::parse();

    // RUST_LOG wins over the verbosity flags.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
