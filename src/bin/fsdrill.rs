//! fsdrill CLI Binary

use anyhow::Context;
use clap::Parser;
use fsdrill::logging::init_logging;
use fsdrill::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let context = CliContext::new(&cli).context("Failed to load configuration")?;
    init_logging(Some(&context.config().logging)).context("Failed to initialize logging")?;

    // Timers run on the runtime; the prompt itself stays on this thread.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    let _guard = runtime.enter();

    let output = context.execute(&cli.command)?;
    println!("{}", output);
    Ok(())
}
