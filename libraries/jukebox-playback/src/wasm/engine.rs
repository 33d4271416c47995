//! Embedded video player as a [`PlaybackEngine`]

use crate::engine::PlaybackEngine;
use crate::types::{TrackId, TrackMetadata};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Player object created by the page's embed API
    pub type YtPlayer;

    #[wasm_bindgen(method, js_name = cueVideoById)]
    fn cue_video_by_id(this: &YtPlayer, id: &str);

    #[wasm_bindgen(method, js_name = loadVideoById)]
    fn load_video_by_id(this: &YtPlayer, id: &str);

    #[wasm_bindgen(method, js_name = playVideo)]
    fn play_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = pauseVideo)]
    fn pause_video(this: &YtPlayer);

    #[wasm_bindgen(method, js_name = seekTo)]
    fn seek_to(this: &YtPlayer, seconds: f64, allow_seek_ahead: bool);

    #[wasm_bindgen(method, js_name = getCurrentTime)]
    fn get_current_time(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = getDuration)]
    fn get_duration(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = getVolume)]
    fn get_volume(this: &YtPlayer) -> f64;

    #[wasm_bindgen(method, js_name = setVolume)]
    fn set_volume(this: &YtPlayer, level: f64);

    #[wasm_bindgen(method, js_name = getVideoData)]
    fn get_video_data(this: &YtPlayer) -> JsValue;
}

/// Adapter from the page's player object to the engine trait
pub struct JsEngine {
    player: YtPlayer,
}

impl JsEngine {
    pub fn new(player: YtPlayer) -> Self {
        Self { player }
    }
}

impl PlaybackEngine for JsEngine {
    fn cue(&mut self, track: &TrackId) {
        self.player.cue_video_by_id(track.as_str());
    }

    fn load(&mut self, track: &TrackId) {
        self.player.load_video_by_id(track.as_str());
    }

    fn play(&mut self) {
        self.player.play_video();
    }

    fn pause(&mut self) {
        self.player.pause_video();
    }

    fn seek(&mut self, seconds: f64) {
        self.player.seek_to(seconds, true);
    }

    fn current_time(&self) -> f64 {
        self.player.get_current_time()
    }

    fn duration(&self) -> f64 {
        self.player.get_duration()
    }

    fn volume(&self) -> u8 {
        let level = self.player.get_volume();
        if level.is_finite() {
            level.clamp(0.0, 100.0).round() as u8
        } else {
            0
        }
    }

    fn set_volume(&mut self, level: u8) {
        self.player.set_volume(f64::from(level));
    }

    fn metadata(&self) -> Option<TrackMetadata> {
        let data = self.player.get_video_data();
        if data.is_undefined() || data.is_null() {
            return None;
        }
        serde_wasm_bindgen::from_value(data).ok()
    }
}
