// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod routes;
mod scheduler;

#[cfg(test)]
mod tests;

use std::process::ExitCode;

use axum::Router;
use breakshot::{MaintenanceOutcome, MaintenanceReport};
use breakshot_persistence::Persistence;
use clap::Parser;
use tracing::info;

use crate::config::{Cli, Command, ServerConfig};
use crate::routes::{AppState, TimeSource, build_router};
use crate::scheduler::{log_outcome, run_scheduled_maintenance, spawn_maintenance_scheduler};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli: Cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config: ServerConfig = ServerConfig::try_from(cli.settings)?;

    info!(
        timezone = %config.timezone,
        horizon = config.horizon,
        "Initializing Breakshot Server"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &config.database {
        info!("Using file-based database at: {}", db_path.display());
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState::new(persistence, &config, TimeSource::System);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Maintain => {
            let outcome: MaintenanceOutcome<MaintenanceReport> =
                run_scheduled_maintenance(&app_state).await;
            log_outcome(&outcome);

            if outcome.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Serve => {
            if let Some(period) = config.maintenance_interval {
                spawn_maintenance_scheduler(app_state.clone(), period);
            }

            // Build router
            let app: Router = build_router(app_state);

            // Bind to address
            let addr: std::net::SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
            info!("Server listening on {}", addr);

            // Run server
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;

            Ok(ExitCode::SUCCESS)
        }
    }
}
