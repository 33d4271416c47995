//! Widget view model
//!
//! Mirrors the fixed set of named controls on the page. Front-ends render
//! this snapshot; the controller is the only writer.

use crate::slider::SliderBinding;
use crate::types::PlayGlyph;
use serde::{Deserialize, Serialize};

/// Placeholder title shown while a track is loading
pub const LOADING_TITLE: &str = "Loading...";

/// Time label before any position is known
pub const EMPTY_PROGRESS: &str = "00:00 / 00:00";

/// State of every control on the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetView {
    pub play_toggle: PlayGlyph,
    pub song_title: String,
    pub channel_name: String,
    pub time_display: String,
    pub album_art: String,
    pub volume: SliderBinding,
    pub progress: SliderBinding,
}

impl WidgetView {
    pub fn new(initial_volume: u8) -> Self {
        Self {
            play_toggle: PlayGlyph::Play,
            song_title: LOADING_TITLE.to_string(),
            channel_name: String::new(),
            time_display: EMPTY_PROGRESS.to_string(),
            album_art: String::new(),
            volume: SliderBinding::new(f64::from(initial_volume)),
            progress: SliderBinding::new(0.0),
        }
    }

    /// Volume slider value as an engine level
    pub fn volume_level(&self) -> u8 {
        self.volume.value().round() as u8
    }

    /// Show the "loading" placeholders for a freshly loaded track
    pub fn show_loading(&mut self, album_art: String) {
        self.progress.reset(0.0);
        self.song_title = LOADING_TITLE.to_string();
        self.channel_name.clear();
        self.time_display = EMPTY_PROGRESS.to_string();
        self.album_art = album_art;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_view_shows_placeholders() {
        let view = WidgetView::new(50);
        assert_eq!(view.play_toggle, PlayGlyph::Play);
        assert_eq!(view.song_title, "Loading...");
        assert_eq!(view.time_display, "00:00 / 00:00");
        assert_eq!(view.volume_level(), 50);
        assert_eq!(view.progress.value(), 0.0);
    }

    #[test]
    fn show_loading_resets_track_controls() {
        let mut view = WidgetView::new(50);
        view.song_title = "Old".to_string();
        view.channel_name = "Published by Someone".to_string();
        view.progress.set_from_engine(70.0);

        view.show_loading("art.jpg".to_string());

        assert_eq!(view.song_title, LOADING_TITLE);
        assert!(view.channel_name.is_empty());
        assert_eq!(view.progress.value(), 0.0);
        assert_eq!(view.album_art, "art.jpg");
    }
}
