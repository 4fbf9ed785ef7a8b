use crate::app::config::DisplayConfig;
use crate::app::cover_cache::ArtworkCache;

/// Event loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminating,
}

/// Everything the event loop owns: alignment, the artwork slot and the
/// handles to the metadata and artwork collaborators.
pub struct App<S, A> {
    pub state: LoopState,
    pub display: DisplayConfig,
    pub art_cache: ArtworkCache,
    /// Whether the previous tick failed to fetch metadata
    pub metadata_failing: bool,
    pub source: S,
    pub artwork: A,
}

impl<S, A> App<S, A> {
    pub fn new(source: S, artwork: A, display: DisplayConfig) -> Self {
        Self {
            state: LoopState::Running,
            display,
            art_cache: ArtworkCache::new(),
            metadata_failing: false,
            source,
            artwork,
        }
    }
}
