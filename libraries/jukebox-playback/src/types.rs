//! Core types for the jukebox widget

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque track identifier understood by the playback engine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The two fixed track pools
///
/// The main pool feeds normal selection; the alternate pool is the rare
/// "easter egg" pool. Both are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPool {
    main: Vec<TrackId>,
    alternate: Vec<TrackId>,
}

impl TrackPool {
    /// Build a pool, rejecting an empty main pool, repeated main entries,
    /// or overlapping pools
    pub fn new(main: Vec<TrackId>, alternate: Vec<TrackId>) -> Result<Self> {
        if main.is_empty() {
            return Err(PlaybackError::EmptyPool);
        }

        // Selection resamples until the pick changes, so entries must be distinct
        let mut main_ids: HashSet<&TrackId> = HashSet::with_capacity(main.len());
        if let Some(repeated) = main.iter().find(|id| !main_ids.insert(*id)) {
            return Err(PlaybackError::InvalidConfig(format!(
                "track {} appears more than once in the main pool",
                repeated
            )));
        }

        if let Some(shared) = alternate.iter().find(|id| main_ids.contains(id)) {
            return Err(PlaybackError::InvalidConfig(format!(
                "track {} appears in both the main and alternate pools",
                shared
            )));
        }

        Ok(Self { main, alternate })
    }

    pub fn main(&self) -> &[TrackId] {
        &self.main
    }

    pub fn alternate(&self) -> &[TrackId] {
        &self.alternate
    }
}

/// Title and channel reported by the engine for the loaded track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackMetadata {
    pub title: String,
    pub author: String,
}

/// Transition controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionState {
    /// Nothing has been played yet
    Idle,

    /// Volume ramping up toward the slider target
    FadingIn,

    /// Volume ramping down toward silence
    FadingOut,

    /// Playing at the slider volume
    Playing,

    /// Paused after a fade-out
    Paused,
}

/// Label shown on the play/pause toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayGlyph {
    /// Playback is stopped; pressing the toggle starts it
    Play,

    /// Playback is running; pressing the toggle stops it
    Stop,
}

impl PlayGlyph {
    pub fn symbol(self) -> &'static str {
        match self {
            PlayGlyph::Play => "\u{25B6}",
            PlayGlyph::Stop => "\u{25A0}",
        }
    }
}
