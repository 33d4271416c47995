//! Player configuration

use crate::error::{PlaybackError, Result};
use crate::types::{TrackId, TrackPool};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the jukebox controller
///
/// Every field has a default, so an empty file (or no file at all) yields
/// the stock widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Main playlist track ids
    #[serde(default = "default_main_pool")]
    pub main_pool: Vec<String>,

    /// Rare "easter egg" track ids
    #[serde(default = "default_alternate_pool")]
    pub alternate_pool: Vec<String>,

    /// Chance (0.0-1.0) that forward navigation picks from the alternate pool
    #[serde(default = "default_alternate_probability")]
    pub alternate_probability: f64,

    /// Volume change per fade tick
    #[serde(default = "default_fade_step")]
    pub fade_step: u8,

    /// Fade tick interval in milliseconds
    #[serde(default = "default_fade_tick_ms")]
    pub fade_tick_ms: u64,

    /// Progress poll interval in milliseconds
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Initial volume slider position (0-100)
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    /// Album art URL template; `{id}` is replaced by the track id
    #[serde(default = "default_thumbnail_template")]
    pub thumbnail_template: String,

    /// Maximum history entries kept for back-navigation (unbounded if unset)
    #[serde(default)]
    pub history_limit: Option<usize>,
}

fn default_main_pool() -> Vec<String> {
    [
        "n_Dxix0lvDM",
        "hLDull8aPDw",
        "7GIWV__qx4M",
        "ZEZRa41ury4",
        "b4dbjk2HcYo",
        "UWdCGihgiX8",
        "ZHGonUUMeO8",
        "uF9xZPwaIUY",
        "DepK5YBmWfA",
        "MQYmjpdA_Pw",
        "LjyToU14TBM",
        "z2NNo23Q9do",
    ]
    .iter()
    .map(|id| (*id).to_string())
    .collect()
}

fn default_alternate_pool() -> Vec<String> {
    vec!["3jF5hK3h0wk".to_string(), "oIyRzl8zVWE".to_string()]
}

fn default_alternate_probability() -> f64 {
    0.01
}

fn default_fade_step() -> u8 {
    5
}

fn default_fade_tick_ms() -> u64 {
    100
}

fn default_progress_interval_ms() -> u64 {
    500
}

fn default_initial_volume() -> u8 {
    50
}

fn default_thumbnail_template() -> String {
    "https://img.youtube.com/vi/{id}/mqdefault.jpg".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            main_pool: default_main_pool(),
            alternate_pool: default_alternate_pool(),
            alternate_probability: default_alternate_probability(),
            fade_step: default_fade_step(),
            fade_tick_ms: default_fade_tick_ms(),
            progress_interval_ms: default_progress_interval_ms(),
            initial_volume: default_initial_volume(),
            thumbnail_template: default_thumbnail_template(),
            history_limit: None,
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables are prefixed with `JUKEBOX_`, e.g.
    /// `JUKEBOX_FADE_STEP=10`. Pools are comma-separated:
    /// `JUKEBOX_MAIN_POOL=id1,id2,id3`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("JUKEBOX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("main_pool")
            .with_list_parse_key("alternate_pool")
    }

    fn load_with(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        let config: Self = settings
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.main_pool.is_empty() {
            return Err(PlaybackError::EmptyPool);
        }

        if !(0.0..=1.0).contains(&self.alternate_probability) {
            return Err(PlaybackError::InvalidConfig(format!(
                "alternate_probability must be within 0.0..=1.0, got {}",
                self.alternate_probability
            )));
        }

        if self.fade_step == 0 {
            return Err(PlaybackError::InvalidConfig(
                "fade_step must be greater than zero".to_string(),
            ));
        }

        if self.fade_tick_ms == 0 || self.progress_interval_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "timer intervals must be greater than zero".to_string(),
            ));
        }

        if self.initial_volume > 100 {
            return Err(PlaybackError::InvalidConfig(format!(
                "initial_volume must be within 0..=100, got {}",
                self.initial_volume
            )));
        }

        // Overlapping pools are rejected here too
        self.track_pool().map(|_| ())
    }

    /// Build the immutable track pool
    pub fn track_pool(&self) -> Result<TrackPool> {
        TrackPool::new(
            self.main_pool.iter().map(|id| TrackId::new(id.as_str())).collect(),
            self.alternate_pool
                .iter()
                .map(|id| TrackId::new(id.as_str()))
                .collect(),
        )
    }

    pub fn fade_tick(&self) -> Duration {
        Duration::from_millis(self.fade_tick_ms)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    /// Album art URL for a track
    pub fn thumbnail_url(&self, track: &TrackId) -> String {
        self.thumbnail_template.replace("{id}", track.as_str())
    }
}
