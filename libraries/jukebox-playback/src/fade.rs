//! Volume fade ramps
//!
//! A fade moves the engine volume toward a bound in fixed integer steps, one
//! step per timer tick:
//! - Fade-in: from 0 up to the volume slider target
//! - Fade-out: from the engine's current volume down to 0
//!
//! Each step is clamped at the bound, so a fade always terminates in at most
//! `ceil(100 / step)` ticks regardless of where it started.
//!
//! [`FadeSlot`] holds at most one active fade. Starting a fade bumps a
//! generation counter; a tick armed for an older generation is ignored, so a
//! cancelled fade can never touch the volume again.

use serde::{Deserialize, Serialize};

/// Direction of a volume ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeDirection {
    In,
    Out,
}

/// A single volume ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    direction: FadeDirection,
    level: u8,
    target: u8,
    step: u8,
}

/// Result of advancing a fade by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeStep {
    /// Volume to apply to the engine
    pub level: u8,

    /// Whether the ramp reached its bound on this tick
    pub finished: bool,
}

impl Fade {
    /// Ramp from silence up to `target` (clamped to 100)
    pub fn fade_in(target: u8, step: u8) -> Self {
        Self {
            direction: FadeDirection::In,
            level: 0,
            target: target.min(100),
            step: step.max(1),
        }
    }

    /// Ramp from `from` (clamped to 100) down to silence
    pub fn fade_out(from: u8, step: u8) -> Self {
        Self {
            direction: FadeDirection::Out,
            level: from.min(100),
            target: 0,
            step: step.max(1),
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Current ramp level (last applied value)
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    /// Advance one tick
    pub fn step(&mut self) -> FadeStep {
        let finished = match self.direction {
            FadeDirection::In => {
                let next = self.level.saturating_add(self.step);
                if next >= self.target {
                    self.level = self.target;
                    true
                } else {
                    self.level = next;
                    false
                }
            }
            FadeDirection::Out => {
                self.level = self.level.saturating_sub(self.step);
                self.level == 0
            }
        };

        FadeStep {
            level: self.level,
            finished,
        }
    }
}

/// Outcome of delivering a tick to a [`FadeSlot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FadeTick<C> {
    /// Tick belonged to a cancelled or replaced fade
    Stale,

    /// Ramp advanced; apply `level`
    Step { level: u8 },

    /// Ramp reached its bound; apply `level`, then run `completion`
    Finished {
        level: u8,
        direction: FadeDirection,
        completion: C,
    },
}

#[derive(Debug, Clone)]
struct ActiveFade<C> {
    fade: Fade,
    completion: C,
}

/// Holder for the single in-flight fade
///
/// `C` is the action to run once the ramp completes.
#[derive(Debug, Clone)]
pub struct FadeSlot<C> {
    generation: u64,
    active: Option<ActiveFade<C>>,
}

impl<C> Default for FadeSlot<C> {
    fn default() -> Self {
        Self {
            generation: 0,
            active: None,
        }
    }
}

impl<C> FadeSlot<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fade, replacing any in-flight one
    ///
    /// Returns the generation that ticks for this fade must carry.
    pub fn start(&mut self, fade: Fade, completion: C) -> u64 {
        if let Some(previous) = self.active.take() {
            tracing::debug!(
                direction = ?previous.fade.direction,
                level = previous.fade.level,
                "Preempting in-flight fade"
            );
        }

        self.generation = self.generation.wrapping_add(1);
        self.active = Some(ActiveFade { fade, completion });
        self.generation
    }

    /// Cancel the in-flight fade, returning it with its completion action
    pub fn cancel(&mut self) -> Option<(Fade, C)> {
        let cancelled = self.active.take()?;
        self.generation = self.generation.wrapping_add(1);
        Some((cancelled.fade, cancelled.completion))
    }

    /// Deliver a tick armed for `generation`
    pub fn tick(&mut self, generation: u64) -> FadeTick<C> {
        if generation != self.generation {
            return FadeTick::Stale;
        }

        let Some(active) = self.active.as_mut() else {
            return FadeTick::Stale;
        };

        let step = active.fade.step();
        if !step.finished {
            return FadeTick::Step { level: step.level };
        }

        match self.active.take() {
            Some(done) => FadeTick::Finished {
                level: step.level,
                direction: done.fade.direction,
                completion: done.completion,
            },
            None => FadeTick::Stale,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the most recent start or cancel
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The in-flight fade, if any
    pub fn current(&self) -> Option<&Fade> {
        self.active.as_ref().map(|active| &active.fade)
    }
}
