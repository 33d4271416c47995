//! Player Events
//!
//! Event-based communication for UI synchronization.
//! Events are emitted at key points:
//! - Transition state changes (fading in/out, playing, paused)
//! - Track changes (on load, before the engine reports metadata)
//! - Volume changes applied to the engine by the user
//! - Seeks and engine errors

use crate::engine::EngineErrorCode;
use crate::fade::FadeDirection;
use crate::types::{TrackId, TransitionState};
use serde::{Deserialize, Serialize};

/// Events emitted by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transition state changed
    StateChanged {
        /// The new state
        state: TransitionState,
    },

    /// A new track was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the replaced track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// User set the volume directly
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
    },

    /// Position slider committed a seek
    Seeked {
        /// Target position in seconds
        position_secs: f64,
    },

    /// A fade ramp reached its bound
    FadeCompleted {
        /// Direction of the finished ramp
        direction: FadeDirection,
    },

    /// Engine reported a failure
    EngineError {
        /// Engine error code
        code: EngineErrorCode,
    },
}
