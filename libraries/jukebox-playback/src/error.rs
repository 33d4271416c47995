//! Error types for the jukebox controller

use crate::engine::EngineErrorCode;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Operation attempted before the engine signalled ready
    #[error("Playback engine is not ready")]
    EngineNotReady,

    /// Failure reported by the playback engine
    #[error("Playback engine error: {0}")]
    Engine(EngineErrorCode),

    /// Back-navigation requested with nothing in history
    #[error("No previous track in history")]
    EmptyHistory,

    /// The main track pool has no entries
    #[error("Main track pool is empty")]
    EmptyPool,

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The player task has shut down
    #[error("Player task has stopped")]
    PlayerStopped,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
