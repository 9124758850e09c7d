//! Archaudit - architecture audit CLI
//!
//! A read-only audit tool for multi-subsystem products: inventories,
//! pattern detection, security posture, quality scoring, and prioritized
//! recommendations.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = archaudit::cli::Cli::parse();
    archaudit::cli::run(cli)
}
