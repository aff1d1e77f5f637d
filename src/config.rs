// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;

use crate::logic::simulator::SimulatorConfig;
use crate::mvu::Timings;

/// Seller registration desktop client.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "techora-seller", version, about)]
pub struct Cli {
    /// Simulated network delay for a submission, in milliseconds.
    #[arg(long, env = "TECHORA_SUBMIT_DELAY_MS", default_value_t = 2000)]
    pub submit_delay_ms: u64,

    /// Probability that a simulated submission succeeds (clamped to 0..=1).
    #[arg(long, env = "TECHORA_SUCCESS_RATE", default_value_t = 0.9)]
    pub success_rate: f64,

    /// Fixed seed for the submission outcome generator.
    #[arg(long, env = "TECHORA_SEED")]
    pub seed: Option<u64>,

    /// Delay between the success banner and the confirmation screen.
    #[arg(long, default_value_t = 3000)]
    pub confirm_delay_ms: u64,

    /// How long page-level error banners stay visible.
    #[arg(long, default_value_t = 5000)]
    pub banner_ms: u64,

    /// Log filter directive, e.g. `debug` or `techora_seller=trace`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

/// Resolved runtime settings.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub timings: Timings,
    pub simulator: SimulatorConfig,
    pub log_filter: String,
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        Self {
            timings: Timings {
                confirm_delay: Duration::from_millis(cli.confirm_delay_ms),
                banner_ttl: Duration::from_millis(cli.banner_ms),
            },
            simulator: SimulatorConfig {
                delay: Duration::from_millis(cli.submit_delay_ms),
                success_rate: cli.success_rate.clamp(0.0, 1.0),
                seed: cli.seed,
            },
            log_filter: cli.log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            simulator: SimulatorConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "techora-seller",
            "--submit-delay-ms",
            "10",
            "--success-rate",
            "0.5",
            "--seed",
            "42",
            "--confirm-delay-ms",
            "0",
            "--banner-ms",
            "250",
            "--log-level",
            "debug",
        ])
        .expect("valid flags");

        let config = AppConfig::from(cli);

        assert_eq!(config.simulator.delay, Duration::from_millis(10));
        assert_eq!(config.simulator.success_rate, 0.5);
        assert_eq!(config.simulator.seed, Some(42));
        assert_eq!(config.timings.confirm_delay, Duration::ZERO);
        assert_eq!(config.timings.banner_ttl, Duration::from_millis(250));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn success_rate_is_clamped() {
        let cli = Cli::try_parse_from(["techora-seller", "--success-rate", "3.5"]).unwrap();
        assert_eq!(AppConfig::from(cli).simulator.success_rate, 1.0);
    }

    #[test]
    fn rejects_non_numeric_delay() {
        assert!(Cli::try_parse_from(["techora-seller", "--submit-delay-ms", "soon"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
