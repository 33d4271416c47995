//! Playback history tracking
//!
//! Stack of previously played tracks for "previous" navigation

use crate::error::{PlaybackError, Result};
use crate::types::TrackId;
use std::collections::VecDeque;

/// Playback history
///
/// Tracks are pushed on forward navigation and popped on back navigation
/// (last in, first out). An optional limit discards the oldest entries.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// History buffer (most recent = back)
    tracks: VecDeque<TrackId>,

    /// Maximum history size (`None` = unbounded)
    max_size: Option<usize>,
}

impl History {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `max_size` tracks
    pub fn with_limit(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size: Some(max_size),
        }
    }

    /// Add track to history
    ///
    /// If history is full, oldest track is discarded
    pub fn push(&mut self, track: TrackId) {
        if let Some(max_size) = self.max_size {
            if max_size == 0 {
                return;
            }
            if self.tracks.len() >= max_size {
                self.tracks.pop_front();
            }
        }
        self.tracks.push_back(track);
    }

    /// Pop the most recent track for back-navigation
    ///
    /// Fails with [`PlaybackError::EmptyHistory`] when nothing was played
    /// before the current track.
    pub fn pick_previous(&mut self) -> Result<TrackId> {
        self.tracks.pop_back().ok_or(PlaybackError::EmptyHistory)
    }

    /// Most recent track (without removing)
    pub fn peek(&self) -> Option<&TrackId> {
        self.tracks.back()
    }

    /// All history tracks (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &TrackId> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}
