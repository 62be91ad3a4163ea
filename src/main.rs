//! Route-to-BigIP controller binary.
//!
//! Loads configuration, writes the initial document and runs the controller
//! until interrupted. Route discovery is an external collaborator; it drives
//! the intake operations on [`RouteController`] once the ready signal fires.

use std::sync::Arc;

use clap::Parser;
use tokio::sync::oneshot;

use bigip_router::config::loader::load_config;
use bigip_router::observability;
use bigip_router::{FileConfigWriter, RouteController, ShutdownSignal};

#[derive(Parser)]
#[command(name = "bigip-router")]
#[command(about = "Translates route membership events into BigIP configuration", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "router.toml")]
    config: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Arc::new(load_config(&cli.config)?);
    observability::logging::init_logging(&config.logging.level);

    tracing::info!(
        config = %cli.config.display(),
        target = %config.writer.path,
        "bigip-router starting"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let writer = Box::new(FileConfigWriter::new(&config.writer.path));
    let controller = Arc::new(RouteController::new(config, writer)?);

    let shutdown = ShutdownSignal::new();
    let signals = shutdown.signal_channel();
    shutdown.arm_ctrl_c();

    let (ready_tx, ready_rx) = oneshot::channel();
    let runner = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.run(signals, ready_tx).await })
    };

    ready_rx.await?;
    tracing::info!("initial configuration written, controller ready");

    runner.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
