// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments and the validated server configuration.

use std::path::PathBuf;
use std::time::Duration;

use breakshot_domain::{DEFAULT_HORIZON, Tz, parse_timezone};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

/// Breakshot Server - HTTP server and maintenance runner for the Breakshot
/// tournament service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What the binary does once configured.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the HTTP API (the default)
    Serve,
    /// Run every maintenance step once and exit; non-zero on failure
    Maintain,
}

/// Raw settings, from flags or the environment.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "BREAKSHOT_DATABASE")]
    pub database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, env = "BREAKSHOT_PORT", default_value_t = 3000)]
    pub port: u16,

    /// IANA timezone used to decide what "today" is
    #[arg(long, env = "BREAKSHOT_TIMEZONE", default_value = "UTC")]
    pub timezone: String,

    /// Future instances kept per recurring series
    #[arg(long, env = "BREAKSHOT_HORIZON", default_value_t = DEFAULT_HORIZON)]
    pub horizon: usize,

    /// Run maintenance in-process every this many seconds
    #[arg(long, env = "BREAKSHOT_MAINTENANCE_INTERVAL")]
    pub maintenance_interval: Option<u64>,
}

/// Rejected configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The timezone is not an IANA name.
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
    /// A zero horizon would never generate anything.
    #[error("horizon must be at least 1")]
    ZeroHorizon,
    /// A zero interval would spin.
    #[error("maintenance interval must be at least 1 second")]
    ZeroInterval,
}

/// Validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Database file; in-memory when `None`.
    pub database: Option<PathBuf>,
    /// HTTP port.
    pub port: u16,
    /// Service timezone.
    pub timezone: Tz,
    /// Future instances kept per series.
    pub horizon: usize,
    /// In-process maintenance period.
    pub maintenance_interval: Option<Duration>,
}

impl TryFrom<Settings> for ServerConfig {
    type Error = ConfigError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let timezone: Tz = parse_timezone(&settings.timezone)
            .map_err(|_| ConfigError::UnknownTimezone(settings.timezone.clone()))?;

        if settings.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }

        let maintenance_interval: Option<Duration> = match settings.maintenance_interval {
            Some(0) => return Err(ConfigError::ZeroInterval),
            Some(seconds) => Some(Duration::from_secs(seconds)),
            None => None,
        };

        Ok(Self {
            database: settings.database,
            port: settings.port,
            timezone,
            horizon: settings.horizon,
            maintenance_interval,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("breakshot-server").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_serve_is_the_default() {
        let cli = parse(&["--timezone", "America/Phoenix"]);

        assert_eq!(cli.command, None);
        let config = ServerConfig::try_from(cli.settings).unwrap();
        assert_eq!(config.timezone, Tz::America__Phoenix);
        assert_eq!(config.horizon, DEFAULT_HORIZON);
    }

    #[test]
    fn test_maintain_subcommand() {
        let cli = parse(&["--horizon", "6", "maintain"]);

        assert_eq!(cli.command, Some(Command::Maintain));
        assert_eq!(cli.settings.horizon, 6);
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let cli = parse(&["--timezone", "Mars/Olympus"]);

        assert_eq!(
            ServerConfig::try_from(cli.settings),
            Err(ConfigError::UnknownTimezone(String::from("Mars/Olympus")))
        );
    }

    #[test]
    fn test_rejects_zero_horizon_and_interval() {
        let horizon = parse(&["--horizon", "0"]);
        let interval = parse(&["--maintenance-interval", "0"]);

        assert_eq!(
            ServerConfig::try_from(horizon.settings),
            Err(ConfigError::ZeroHorizon)
        );
        assert_eq!(
            ServerConfig::try_from(interval.settings),
            Err(ConfigError::ZeroInterval)
        );
    }

    #[test]
    fn test_interval_in_seconds() {
        let cli = parse(&["--maintenance-interval", "3600"]);

        let config = ServerConfig::try_from(cli.settings).unwrap();
        assert_eq!(config.maintenance_interval, Some(Duration::from_secs(3600)));
    }
}
