//! Simulated playback engine
//!
//! Tracks advance on the tokio clock. State changes are reported through an
//! unbounded channel the way a real player fires callbacks.

use jukebox_playback::{EngineEvent, EngineState, PlaybackEngine, TrackId, TrackMetadata};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{interval, Instant};
use tracing::{debug, trace};

#[derive(Debug)]
struct Deck {
    track: Option<TrackId>,
    track_len: f64,
    offset: f64,
    started_at: Option<Instant>,
    volume: u8,
}

impl Deck {
    fn position(&self) -> f64 {
        let running = self
            .started_at
            .map_or(0.0, |started| started.elapsed().as_secs_f64());
        (self.offset + running).min(self.track_len)
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    fn halt(&mut self) {
        self.offset = self.position();
        self.started_at = None;
    }
}

/// Engine with no audio output
#[derive(Debug, Clone)]
pub struct SimulatedEngine {
    deck: Arc<Mutex<Deck>>,
    events: UnboundedSender<EngineEvent>,
}

impl SimulatedEngine {
    pub fn new(track_len: Duration, events: UnboundedSender<EngineEvent>) -> Self {
        Self {
            deck: Arc::new(Mutex::new(Deck {
                track: None,
                track_len: track_len.as_secs_f64(),
                offset: 0.0,
                started_at: None,
                volume: 100,
            })),
            events,
        }
    }

    fn deck(&self) -> MutexGuard<'_, Deck> {
        self.deck.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, state: EngineState) {
        // Receiver gone means the demo is shutting down
        let _ = self.events.send(EngineEvent::StateChanged(state));
    }

    /// Watch for the end of the loaded track
    ///
    /// Runs until the event receiver is dropped.
    pub async fn watch_for_end(self) {
        let mut ticker = interval(Duration::from_millis(250));

        loop {
            ticker.tick().await;

            let ended = {
                let mut deck = self.deck();
                if deck.is_running() && deck.position() >= deck.track_len {
                    deck.halt();
                    true
                } else {
                    false
                }
            };

            if ended {
                debug!("Simulated track reached its end");
                if self
                    .events
                    .send(EngineEvent::StateChanged(EngineState::Ended))
                    .is_err()
                {
                    break;
                }
            } else if self.events.is_closed() {
                break;
            }
        }
    }
}

impl PlaybackEngine for SimulatedEngine {
    fn cue(&mut self, track: &TrackId) {
        let mut deck = self.deck();
        deck.track = Some(track.clone());
        deck.offset = 0.0;
        deck.started_at = None;
        drop(deck);
        self.report(EngineState::Cued);
    }

    fn load(&mut self, track: &TrackId) {
        let mut deck = self.deck();
        deck.track = Some(track.clone());
        deck.offset = 0.0;
        deck.started_at = Some(Instant::now());
        drop(deck);
        self.report(EngineState::Buffering);
        self.report(EngineState::Playing);
    }

    fn play(&mut self) {
        let mut deck = self.deck();
        if deck.position() >= deck.track_len {
            deck.offset = 0.0;
        }
        if deck.started_at.is_none() {
            deck.started_at = Some(Instant::now());
        }
        drop(deck);
        self.report(EngineState::Playing);
    }

    fn pause(&mut self) {
        self.deck().halt();
        self.report(EngineState::Paused);
    }

    fn seek(&mut self, seconds: f64) {
        let mut deck = self.deck();
        deck.offset = seconds.clamp(0.0, deck.track_len);
        if deck.is_running() {
            deck.started_at = Some(Instant::now());
        }
    }

    fn current_time(&self) -> f64 {
        self.deck().position()
    }

    fn duration(&self) -> f64 {
        self.deck().track_len
    }

    fn volume(&self) -> u8 {
        self.deck().volume
    }

    fn set_volume(&mut self, level: u8) {
        trace!(level, "Simulated volume");
        self.deck().volume = level;
    }

    fn metadata(&self) -> Option<TrackMetadata> {
        self.deck().track.as_ref().map(|track| TrackMetadata {
            title: format!("Simulated {track}"),
            author: "Demo Channel".to_string(),
        })
    }
}
