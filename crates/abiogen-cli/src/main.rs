mod cli;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use abiogen::engine::progress::ProgressReporter;
use abiogen::workflows::simulate;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        error!("❌ Simulation failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 Abiogen CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = config::build_config(&cli)?;
    info!(
        trials = config.trials,
        seed = config.seed,
        "Configuration resolved."
    );

    let progress_handler = CliProgressHandler::new(!cli.no_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let report = simulate::run(&config, &reporter)?;
    println!("{report}");

    info!("✅ Simulation completed successfully.");
    Ok(())
}
