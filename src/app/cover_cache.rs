//! Single-slot cover art cache.
//!
//! Remembers which art reference was last fetched and where its bytes live.
//! A refresh is due only when a non-empty reference differs from the last
//! one.

use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct ArtworkCache {
    /// Last reference a fetch was attempted for
    last_reference: String,
    /// File holding the most recently fetched artwork
    cached_file: Option<PathBuf>,
}

impl ArtworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_refresh(&self, reference: &str) -> bool {
        !reference.is_empty() && reference != self.last_reference
    }

    /// Record an attempt so a failing reference is not retried every tick
    pub fn mark_attempted(&mut self, reference: &str) {
        self.last_reference = reference.to_string();
    }

    pub fn store(&mut self, reference: &str, file: PathBuf) {
        self.last_reference = reference.to_string();
        self.cached_file = Some(file);
    }

    /// Forget the last reference so the next tick re-renders the artwork
    pub fn invalidate(&mut self) {
        self.last_reference.clear();
    }

    pub fn last_reference(&self) -> &str {
        &self.last_reference
    }

    pub fn cached_file(&self) -> Option<&Path> {
        self.cached_file.as_deref()
    }
}
