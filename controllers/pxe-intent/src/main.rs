//! PXE Intent Controller
//!
//! Serves what machines boot and how they install:
//! - PXELinux and Kickstart configuration elements per MAC address
//! - Boot-mode changes with boot and build history
//! - DNS, DHCP and zone records per site
//! - Intake of PXE clients the inventory does not know
//!
//! Runs one command against an inventory snapshot and prints the result on
//! stdout. Logs go to stderr.

mod cli;
mod config;
mod controller;
mod error;
mod snapshot;

use clap::Parser;
use cli::Cli;
use config::ControllerConfig;
use controller::Controller;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting PXE Intent Controller");

    let config = ControllerConfig::from_env()?;
    let controller = Controller::new(config).await?;

    match controller.run(cli.command).await {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(e) => {
            error!(status = e.status_code(), "{}", e);
            Err(e.into())
        }
    }
}
