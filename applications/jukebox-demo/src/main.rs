/// Jukebox Demo - headless jukebox against a simulated engine
use clap::Parser;
use jukebox_playback::{
    runtime::{spawn_player, PlayerHandle},
    EngineEvent, PlayerConfig, PlayerController, PlayerInput,
};
use rand::{rngs::StdRng, SeedableRng};
use std::{path::PathBuf, time::Duration};
use tokio::{
    sync::{broadcast, mpsc},
    time::{interval, Instant},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod engine;

use engine::SimulatedEngine;

#[derive(Parser)]
#[command(name = "jukebox-demo")]
#[command(about = "Run the jukebox against a simulated playback engine", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for track selection
    #[arg(long, env = "JUKEBOX_SEED")]
    seed: Option<u64>,

    /// Length of every simulated track in seconds
    #[arg(long, default_value_t = 12)]
    track_secs: u64,

    /// How long to run before shutting down
    #[arg(long, default_value_t = 30)]
    run_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jukebox=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = PlayerConfig::load(cli.config.as_deref())?;
    tracing::info!("Starting jukebox demo");
    tracing::info!("Main pool: {} tracks", config.main_pool.len());
    tracing::info!("Alternate pool: {} tracks", config.alternate_pool.len());

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (engine_tx, engine_rx) = mpsc::unbounded_channel();
    let engine = SimulatedEngine::new(Duration::from_secs(cli.track_secs), engine_tx.clone());
    let watcher = tokio::spawn(engine.clone().watch_for_end());

    let controller = PlayerController::with_rng(engine, config, rng)?;
    let (handle, player) = spawn_player(controller);

    tokio::spawn(forward_engine_events(engine_rx, handle.clone()));
    tokio::spawn(log_events(handle.clone()));

    // The simulated player is ready as soon as it exists
    engine_tx.send(EngineEvent::Ready)?;
    handle.send(PlayerInput::TogglePlay).await?;

    run_session(&handle, Duration::from_secs(cli.run_secs)).await?;

    handle.shutdown().await?;
    let controller = player.await?;
    watcher.abort();

    tracing::info!(
        "Stopped on {:?} after {} earlier tracks",
        controller.current_track().map(ToString::to_string),
        controller.history().len()
    );

    Ok(())
}

/// Log a snapshot every second; skip once halfway through
async fn run_session(handle: &PlayerHandle, run_for: Duration) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut ticker = interval(Duration::from_secs(1));
    let mut skipped = false;

    while started.elapsed() < run_for {
        ticker.tick().await;

        let snapshot = handle.snapshot().await?;
        tracing::info!(
            "{} {} | {} | {} | vol {} | {:?}",
            snapshot.view.play_toggle.symbol(),
            snapshot.view.song_title,
            snapshot.view.channel_name,
            snapshot.view.time_display,
            snapshot.view.volume_level(),
            snapshot.state,
        );

        if !skipped && started.elapsed() >= run_for / 2 {
            tracing::info!("Skipping to next track");
            handle.send(PlayerInput::Next).await?;
            skipped = true;
        }
    }

    Ok(())
}

async fn forward_engine_events(
    mut events: mpsc::UnboundedReceiver<EngineEvent>,
    handle: PlayerHandle,
) {
    while let Some(event) = events.recv().await {
        if handle.engine_event(event).await.is_err() {
            break;
        }
    }
}

async fn log_events(handle: PlayerHandle) {
    let mut events = handle.subscribe();
    loop {
        match events.recv().await {
            Ok(event) => tracing::debug!(?event, "Player event"),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Event log fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
