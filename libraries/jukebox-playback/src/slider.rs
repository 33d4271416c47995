//! Slider bindings for the volume and position controls
//!
//! A slider value can be written by the user (dragging) or by the program
//! (engine sync). While the user is dragging, program writes are dropped so
//! the poller never fights the pointer.

use serde::{Deserialize, Serialize};

const TRAIL_FILLED: &str = "#FAE6C8";
const TRAIL_EMPTY: &str = "#FAD9E1";

/// A numeric UI slider with a drag guard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderBinding {
    min: f64,
    max: f64,
    value: f64,
    dragging: bool,
}

impl Default for SliderBinding {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl SliderBinding {
    /// A 0-100 slider at `value`
    pub fn new(value: f64) -> Self {
        let mut slider = Self {
            min: 0.0,
            max: 100.0,
            value: 0.0,
            dragging: false,
        };
        slider.value = slider.clamp(value);
        slider
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// User moved the slider
    ///
    /// Marks the slider as being dragged until [`SliderBinding::release`].
    pub fn drag(&mut self, value: f64) {
        self.dragging = true;
        self.value = self.clamp(value);
    }

    /// User let go of the slider; returns the committed value
    pub fn release(&mut self) -> f64 {
        self.dragging = false;
        self.value
    }

    /// User input that does not start a drag (e.g. the volume slider)
    pub fn set_by_user(&mut self, value: f64) {
        self.value = self.clamp(value);
    }

    /// Program-driven update; ignored while the user is dragging
    ///
    /// Returns whether the value was written.
    pub fn set_from_engine(&mut self, value: f64) -> bool {
        if self.dragging {
            return false;
        }
        self.value = self.clamp(value);
        true
    }

    /// Unconditional reset, used when a new track is loaded
    pub fn reset(&mut self, value: f64) {
        self.value = self.clamp(value);
    }

    /// Share of the track that is filled, in percent
    pub fn trail_percent(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        (self.value - self.min) / span * 100.0
    }

    /// CSS background rendering the filled track
    pub fn trail_gradient(&self) -> String {
        let percent = self.trail_percent();
        format!(
            "linear-gradient(to right, {filled} 0%, {filled} {percent}%, {empty} {percent}%, {empty} 100%)",
            filled = TRAIL_FILLED,
            empty = TRAIL_EMPTY,
            percent = percent,
        )
    }

    /// Position in seconds implied by this slider for a track of `duration`
    pub fn seek_position(&self, duration: f64) -> f64 {
        if !duration.is_finite() || duration <= 0.0 {
            return 0.0;
        }
        self.trail_percent() / 100.0 * duration
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}
