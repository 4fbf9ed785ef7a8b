use std::io::{self, Write};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;

use super::{App, LoopState};
use crate::app::artwork::ArtworkSource;
use crate::app::error::StartupError;
use crate::app::event_handlers::EventHandlers;
use crate::app::input::InputEvent;
use crate::app::layout::compute_geometry;
use crate::app::player::MetadataSource;
use crate::app::ui::{draw_frame, paint_artwork};

/// Interval between metadata refreshes
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Metadata could not be fetched; nothing was drawn
    Skipped,
    Drawn,
    ArtworkRefreshed,
    ArtworkFailed,
}

/// Trait for main application loop
pub trait AppMainLoop {
    async fn run(&mut self, input: UnboundedReceiver<InputEvent>) -> color_eyre::Result<()>;
    async fn drive<W, F>(
        &mut self,
        out: &mut W,
        input: UnboundedReceiver<InputEvent>,
        terminal_size: F,
    ) -> color_eyre::Result<()>
    where
        W: Write,
        F: Fn() -> io::Result<(u16, u16)>;
    async fn on_tick<W: Write>(&mut self, out: &mut W, size: (u16, u16)) -> TickOutcome;
}

impl<S: MetadataSource, A: ArtworkSource> AppMainLoop for App<S, A> {
    /// Run on the real terminal until the quit key or a termination signal.
    async fn run(&mut self, input: UnboundedReceiver<InputEvent>) -> color_eyre::Result<()> {
        self.drive(&mut io::stdout(), input, crossterm::terminal::size).await
    }

    /// Multiplex input, the tick timer and shutdown signals, drawing to `out`
    async fn drive<W, F>(
        &mut self,
        out: &mut W,
        mut input: UnboundedReceiver<InputEvent>,
        terminal_size: F,
    ) -> color_eyre::Result<()>
    where
        W: Write,
        F: Fn() -> io::Result<(u16, u16)>,
    {
        self.state = LoopState::Running;

        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut signals = ShutdownSignals::new().map_err(StartupError::Signals)?;
        let mut input_open = true;

        log::info!("Entering event loop");

        while self.state == LoopState::Running {
            tokio::select! {
                event = input.recv(), if input_open => match event {
                    Some(event) => self.on_input(out, event),
                    None => {
                        log::warn!("Keyboard input closed, continuing without it");
                        input_open = false;
                    }
                },

                _ = ticker.tick() => match terminal_size() {
                    Ok(size) => {
                        self.on_tick(out, size).await;
                    }
                    Err(e) => log::warn!("Failed to read terminal size: {}", e),
                },

                signal = signals.recv() => {
                    log::info!("Received {}, shutting down gracefully", signal);
                    self.quit();
                }
            }
        }

        log::info!("Exiting event loop");
        Ok(())
    }

    /// Refresh metadata, redraw, and update artwork when its reference changed
    async fn on_tick<W: Write>(&mut self, out: &mut W, size: (u16, u16)) -> TickOutcome {
        let geometry = compute_geometry(size.0, size.1, &self.display);

        let metadata = match self.source.fetch_metadata().await {
            Ok(metadata) => {
                if self.metadata_failing {
                    log::info!("Player metadata available again");
                    self.metadata_failing = false;
                }
                metadata
            }
            Err(e) => {
                // Every tick fails while the player is gone; warn only once
                if self.metadata_failing {
                    log::debug!("Metadata fetch failed: {}", e);
                } else {
                    log::warn!("Metadata fetch failed, keeping last frame: {}", e);
                    self.metadata_failing = true;
                }
                return TickOutcome::Skipped;
            }
        };

        if let Err(e) = draw_frame(out, &metadata, &geometry) {
            log::warn!("Failed to draw frame: {}", e);
        }

        let reference = metadata.art_reference.as_str();
        if !self.art_cache.needs_refresh(reference) {
            return TickOutcome::Drawn;
        }

        log::debug!("Art reference changed to {}", reference);
        self.art_cache.mark_attempted(reference);

        match self.artwork.load(reference).await {
            Ok(artwork) => {
                if let Err(e) = paint_artwork(out, &artwork.rows, &geometry) {
                    log::warn!("Failed to paint artwork: {}", e);
                }
                self.art_cache.store(reference, artwork.file);
                log::debug!(
                    "Artwork for {} cached at {:?}",
                    self.art_cache.last_reference(),
                    self.art_cache.cached_file()
                );
                TickOutcome::ArtworkRefreshed
            }
            Err(e) => {
                log::warn!("Artwork update for {} failed: {}", reference, e);
                TickOutcome::ArtworkFailed
            }
        }
    }
}

#[cfg(unix)]
struct ShutdownSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    fn new() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}

#[cfg(not(unix))]
struct ShutdownSignals;

#[cfg(not(unix))]
impl ShutdownSignals {
    fn new() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> &'static str {
        let _ = tokio::signal::ctrl_c().await;
        "Ctrl-C"
    }
}
