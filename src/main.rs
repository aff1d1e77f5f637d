// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod config;
mod error;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Cli};

fn main() -> eframe::Result<()> {
    let config = AppConfig::from(Cli::parse());

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    app::run(config)
}
