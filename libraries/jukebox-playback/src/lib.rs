//! Jukebox - Playback Control
//!
//! Platform-agnostic core of an embedded jukebox widget.
//!
//! This crate provides:
//! - Random track selection with a rare alternate ("easter egg") pool
//! - Back-navigation history
//! - Fade-in/fade-out volume ramps around play, pause, and skip
//! - Progress and volume slider synchronization with a drag guard
//! - A widget view model (toggle glyph, title, channel, time, album art)
//!
//! # Architecture
//!
//! `jukebox-playback` never plays audio itself:
//! - The playback engine is supplied through [`PlaybackEngine`]
//! - Timers are supplied by a driver: the tokio [`runtime`] (feature
//!   `runtime`, on by default) or the page via the `wasm` bindings
//! - All session state lives in one [`PlayerController`]
//!
//! # Example: Driving the controller by hand
//!
//! ```rust
//! use jukebox_playback::{
//!     EngineEvent, PlaybackEngine, PlayerConfig, PlayerController, TrackId, TrackMetadata,
//! };
//!
//! #[derive(Default)]
//! struct SilentEngine {
//!     volume: u8,
//! }
//!
//! impl PlaybackEngine for SilentEngine {
//!     fn cue(&mut self, _track: &TrackId) {}
//!     fn load(&mut self, _track: &TrackId) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn duration(&self) -> f64 { 0.0 }
//!     fn volume(&self) -> u8 { self.volume }
//!     fn set_volume(&mut self, level: u8) { self.volume = level; }
//!     fn metadata(&self) -> Option<TrackMetadata> { None }
//! }
//!
//! let mut player = PlayerController::new(SilentEngine::default(), PlayerConfig::default())?;
//! player.handle_engine_event(EngineEvent::Ready);
//! player.toggle_play()?;
//!
//! // The driver delivers one tick per fade interval
//! while player.is_fading() {
//!     let generation = player.fade_generation();
//!     player.fade_tick(generation);
//! }
//! assert_eq!(player.engine().volume, player.config().initial_volume);
//! # Ok::<(), jukebox_playback::PlaybackError>(())
//! ```

mod config;
mod controller;
mod engine;
mod error;
mod events;
pub mod fade;
mod history;
#[cfg(feature = "runtime")]
pub mod runtime;
pub mod selector;
mod slider;
pub mod time;
pub mod types;
mod view;
pub mod wasm;

// Public exports
pub use config::PlayerConfig;
pub use controller::{PlayerController, PlayerInput};
pub use engine::{EngineErrorCode, EngineEvent, EngineState, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use history::History;
pub use slider::SliderBinding;
pub use types::{PlayGlyph, TrackId, TrackMetadata, TrackPool, TransitionState};
pub use view::{WidgetView, EMPTY_PROGRESS, LOADING_TITLE};
