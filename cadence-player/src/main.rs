//! Cadence runner - Main entry point
//!
//! Loads a playlist from the TOML config, plays it through once while
//! logging progress, and exits when playback goes idle. Ctrl+C cancels
//! playback (no resume point is kept).

use std::path::PathBuf;

use anyhow::{Context, Result};
use cadence_player::config::Config;
use cadence_player::{PlaybackState, Player};
use clap::Parser;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for cadence
#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(about = "Plays a configured playlist through a timed playback controller")]
#[command(version)]
struct Args {
    /// Config file (falls back to CADENCE_CONFIG, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter directive, overrides the config file
    #[arg(short, long, env = "CADENCE_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (config, toml_config) = Config::resolve(args.config.as_deref(), args.log_level.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &config.config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults"),
    }

    let player = Player::from_config(&toml_config).context("Failed to build playlist")?;
    if player.is_empty().await {
        warn!("Playlist is empty, nothing to play");
        return Ok(());
    }
    info!("Loaded {} tracks", player.len().await);

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    player.play(&cancel).await?;

    let mut ticker = interval(config.status_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        let snapshot = player.snapshot().await;
        if snapshot.state == PlaybackState::Idle {
            break;
        }
        info!("{}", snapshot);
    }

    if cancel.is_cancelled() {
        info!("Playback cancelled");
    } else {
        info!("Playlist finished");
    }
    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, stopping playback");
        cancel.cancel();
    }
}
