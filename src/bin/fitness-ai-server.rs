// ABOUTME: Server binary for the Fitness AI flow service
// ABOUTME: Loads environment configuration, applies CLI overrides and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitness AI Server Binary

use anyhow::Result;
use clap::Parser;
use fitness_ai_server::config::ServerConfig;
use fitness_ai_server::{logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitness-ai-server")]
#[command(about = "Fitness AI - generative feedback and recommendation flows over HTTP")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env()?;

    info!("Starting Fitness AI server");
    info!("{}", config.summary());

    if let Err(e) = server::serve(config).await {
        error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}
