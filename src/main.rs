// Module declarations
mod app;

use app::artwork::{ChafaArtwork, ensure_cache_dir};
use app::cli::Args;
use app::error::StartupError;
use app::input::spawn_input_producer;
use app::player::{MprisPlayer, player_is_running};
use app::{App, AppMainLoop, terminal::init_terminal};
use clap::Parser;
use tokio::sync::mpsc;

const PLAYER_NOT_RUNNING: &str = "Spotify is not running. Please start Spotify first.";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger first
    let logging_config = args.logging_config();
    let logger = app::logging::init_logger(&logging_config).map_err(StartupError::Logger)?;
    app::logging::log_startup_info(&logging_config);

    let result = run(args).await;
    if let Err(ref e) = result {
        log::error!("Fatal error: {}", e);
    }

    app::logging::log_shutdown_info();
    logger.flush();
    result
}

async fn run(args: Args) -> color_eyre::Result<()> {
    let connection = zbus::Connection::session()
        .await
        .inspect_err(|e| app::logging::log_bus_connection(false, Some(&e.to_string())))
        .map_err(StartupError::Bus)?;
    app::logging::log_bus_connection(true, None);

    if !player_is_running(&connection)
        .await
        .map_err(StartupError::Bus)?
    {
        log::info!("Spotify is not running, nothing to display");
        println!("{}", PLAYER_NOT_RUNNING);
        return Ok(());
    }

    let cache_dir = ensure_cache_dir()?;
    let player = MprisPlayer::connect(&connection)
        .await
        .map_err(StartupError::Bus)?;
    let artwork = ChafaArtwork::new(&cache_dir, args.renderer.clone());
    let mut app = App::new(player, artwork, args.display_config());

    // Initialize terminal; the guard restores it on every exit path
    let terminal = init_terminal()?;

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    // Detached: the reader stays blocked on input until the process exits
    spawn_input_producer(input_tx).map_err(StartupError::Input)?;

    let result = app.run(input_rx).await;

    // Restore terminal
    let restored = terminal.restore();
    result?;
    restored?;
    Ok(())
}
