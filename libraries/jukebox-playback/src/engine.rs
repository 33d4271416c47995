//! Playback engine abstraction
//!
//! The engine that actually decodes and plays a track lives outside this
//! crate (an embedded video player in the browser, a simulated engine in the
//! demo, a recording fake in tests). The controller only talks to it through
//! [`PlaybackEngine`] and learns about it through [`EngineEvent`].

use crate::types::{TrackId, TrackMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations the controller needs from a playback engine
pub trait PlaybackEngine {
    /// Prepare a track without starting playback
    fn cue(&mut self, track: &TrackId);

    /// Load a track and begin buffering it
    fn load(&mut self, track: &TrackId);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek to an absolute position in seconds
    fn seek(&mut self, seconds: f64);

    /// Current playback position in seconds
    ///
    /// May be NaN while nothing is loaded.
    fn current_time(&self) -> f64;

    /// Duration of the loaded track in seconds (0 or NaN when unknown)
    fn duration(&self) -> f64;

    /// Current output volume (0-100)
    fn volume(&self) -> u8;

    /// Set output volume (0-100)
    fn set_volume(&mut self, level: u8);

    /// Title and author of the loaded track, once the engine knows them
    fn metadata(&self) -> Option<TrackMetadata>;
}

/// Player state as reported by the engine
///
/// Numeric codes follow the usual embedded-player convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl EngineState {
    /// Map an engine state code to a state
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::Unstarted),
            0 => Some(Self::Ended),
            1 => Some(Self::Playing),
            2 => Some(Self::Paused),
            3 => Some(Self::Buffering),
            5 => Some(Self::Cued),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Unstarted => -1,
            Self::Ended => 0,
            Self::Playing => 1,
            Self::Paused => 2,
            Self::Buffering => 3,
            Self::Cued => 5,
        }
    }
}

/// Failure code reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineErrorCode(pub i32);

impl EngineErrorCode {
    /// Short description of well-known codes
    pub fn describe(self) -> &'static str {
        match self.0 {
            2 => "invalid track parameter",
            5 => "player could not render the track",
            100 => "track not found or removed",
            101 | 150 => "track owner does not allow embedded playback",
            _ => "unknown engine error",
        }
    }
}

impl fmt::Display for EngineErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code {} ({})", self.0, self.describe())
    }
}

/// Notifications emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Engine finished initializing and accepts commands
    Ready,

    /// Engine moved to a new player state
    StateChanged(EngineState),

    /// Engine reported a failure
    Error(EngineErrorCode),
}
