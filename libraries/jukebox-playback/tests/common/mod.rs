//! Shared test utilities

#![allow(dead_code)]

use jukebox_playback::{PlaybackEngine, PlayerConfig, PlayerController, TrackId, TrackMetadata};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Engine that records every command it receives
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub cued: Option<TrackId>,
    pub loaded: Vec<TrackId>,
    pub playing: bool,
    pub pause_calls: usize,
    pub volume: u8,
    pub volume_log: Vec<u8>,
    pub seeks: Vec<f64>,
    pub time: f64,
    pub duration: f64,
    pub metadata: Option<TrackMetadata>,
}

impl PlaybackEngine for RecordingEngine {
    fn cue(&mut self, track: &TrackId) {
        self.cued = Some(track.clone());
    }

    fn load(&mut self, track: &TrackId) {
        self.loaded.push(track.clone());
        self.time = 0.0;
        self.metadata = None;
        self.playing = true;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
        self.pause_calls += 1;
    }

    fn seek(&mut self, seconds: f64) {
        self.seeks.push(seconds);
        self.time = seconds;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn volume(&self) -> u8 {
        self.volume
    }

    fn set_volume(&mut self, level: u8) {
        self.volume = level;
        self.volume_log.push(level);
    }

    fn metadata(&self) -> Option<TrackMetadata> {
        self.metadata.clone()
    }
}

pub fn metadata(title: &str, author: &str) -> TrackMetadata {
    TrackMetadata {
        title: title.to_string(),
        author: author.to_string(),
    }
}

/// Four-track pool, no easter egg, slider at 80
pub fn test_config() -> PlayerConfig {
    PlayerConfig {
        main_pool: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        alternate_pool: vec!["egg".into()],
        alternate_probability: 0.0,
        initial_volume: 80,
        ..PlayerConfig::default()
    }
}

pub fn controller_with(config: PlayerConfig, seed: u64) -> PlayerController<RecordingEngine, StdRng> {
    PlayerController::with_rng(RecordingEngine::default(), config, StdRng::seed_from_u64(seed))
        .unwrap()
}

/// Controller whose engine has already signalled ready
pub fn ready_controller(seed: u64) -> PlayerController<RecordingEngine, StdRng> {
    let mut player = controller_with(test_config(), seed);
    player.handle_engine_event(jukebox_playback::EngineEvent::Ready);
    player
}

/// Deliver ticks until no fade is in flight; returns the tick count
pub fn run_fades(player: &mut PlayerController<RecordingEngine, StdRng>) -> usize {
    let mut ticks = 0;
    while player.is_fading() {
        let generation = player.fade_generation();
        assert!(player.fade_tick(generation));
        ticks += 1;
        assert!(ticks < 1000, "fade never settled");
    }
    ticks
}
