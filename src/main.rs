use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};

use replayer::{
    asset::AssetLibrary,
    config::Config,
    playback::{PlaybackSession, SessionState, SimulatedPlayer},
};

#[derive(Parser)]
#[command(
    name = "replayer",
    version,
    about = "Play a bundled video, restarting from the head on every interaction",
    long_about = "Replayer resolves a bundled media asset, wraps it in a freshly built \
composition with an identity frame pipeline, and plays it on a simulated engine. Every \
simulated interaction prepares a new playback item on the same session, exercising the \
create-or-replace path and the restart-from-head readiness handling."
)]
struct Cli {
    /// Bundle directory containing the media assets
    #[arg(short, long)]
    bundle: Option<PathBuf>,

    /// Asset name resolved inside the bundle
    #[arg(short, long)]
    name: Option<String>,

    /// Asset file extension
    #[arg(short, long)]
    ext: Option<String>,

    /// Number of simulated interactions, each restarting playback
    #[arg(short, long, default_value_t = 3)]
    taps: u32,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting replayer v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    config.validate()?;

    let bundle_dir = cli
        .bundle
        .unwrap_or_else(|| config.bundle.asset_dir.clone());
    let name = cli.name.unwrap_or_else(|| config.bundle.default_name.clone());
    let ext = cli.ext.unwrap_or_else(|| config.bundle.default_ext.clone());

    info!("Bundle: {:?}", bundle_dir);
    info!("Asset: {}.{}", name, ext);

    let mut library = AssetLibrary::new(&bundle_dir);

    let ready_delay = Duration::from_millis(config.playback.ready_delay_ms);
    let mut session = PlaybackSession::new(config.surface.bounds(), move |tx| {
        SimulatedPlayer::new(tx, ready_delay)
    });

    for tap in 1..=cli.taps {
        info!("Interaction {}/{}", tap, cli.taps);

        // Each interaction resolves the asset and prepares a fresh item;
        // failures abort this interaction without touching current playback.
        let asset = match library.resolve(&name, &ext) {
            Ok(asset) => asset,
            Err(e) => {
                warn!("{}", e.user_message());
                continue;
            }
        };

        if let Err(e) = session.prepare_to_play(&asset) {
            warn!("Could not prepare playback: {}", e.user_message());
            continue;
        }

        match session.pump_until_settled().await {
            SessionState::Ready => info!("Playback running from the head"),
            SessionState::Failed => warn!("Playback failed: {:?}", session.last_error()),
            state => warn!("Session settled in unexpected state {:?}", state),
        }
    }

    session.teardown();
    info!("Done after {} interactions", cli.taps);
    Ok(())
}
