//! WASM bindings for jukebox-playback
//!
//! This module exposes the controller to the page hosting the widget. The
//! page owns the embedded video player and the timers; it forwards player
//! callbacks and control input here and renders the returned view.

#[cfg(feature = "wasm")]
pub mod engine;

#[cfg(feature = "wasm")]
pub mod player;

#[cfg(feature = "wasm")]
pub use engine::{JsEngine, YtPlayer};

#[cfg(feature = "wasm")]
pub use player::WasmJukebox;
