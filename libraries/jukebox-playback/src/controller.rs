//! Player controller - transition state machine
//!
//! Coordinates track selection, history, volume fades, and slider sync.
//! The controller owns the whole playback session; it never blocks and never
//! schedules anything itself. A driver (the tokio runtime, the wasm
//! bindings, a test) feeds it inputs and timer ticks:
//!
//! - [`PlayerController::dispatch`] for UI input and engine events
//! - [`PlayerController::fade_tick`] every fade interval while
//!   [`PlayerController::is_fading`]
//! - [`PlayerController::progress_tick`] every poll interval while
//!   [`PlayerController::is_polling`]

use crate::{
    config::PlayerConfig,
    engine::{EngineErrorCode, EngineEvent, EngineState, PlaybackEngine},
    error::{PlaybackError, Result},
    events::PlayerEvent,
    fade::{Fade, FadeSlot, FadeTick},
    history::History,
    selector::{pick_initial, pick_next},
    time::format_progress,
    types::{PlayGlyph, TrackId, TrackPool, TransitionState},
    view::WidgetView,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Inputs understood by the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Play/pause toggle pressed
    TogglePlay,

    /// Next button pressed
    Next,

    /// Previous button pressed
    Previous,

    /// Volume slider moved (0-100)
    VolumeInput(f64),

    /// Position slider dragged (0-100)
    ProgressInput(f64),

    /// Position slider released
    ProgressCommit,

    /// Notification from the playback engine
    Engine(EngineEvent),
}

/// What to do once the in-flight fade reaches its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterFade {
    /// Fade-in finished: settle in `Playing`
    Settle,
    /// Pause the engine
    Pause,
    /// Forward navigation
    Next,
    /// Back navigation
    Previous,
}

/// Central playback session
///
/// Owns the engine handle, the track pool, history, the fade slot, and the
/// widget view. `R` is the random source used for track selection.
pub struct PlayerController<E, R = StdRng> {
    engine: E,
    rng: R,
    config: PlayerConfig,
    pool: TrackPool,

    // Session
    current: Option<TrackId>,
    history: History,
    is_playing: bool,
    ready: bool,
    state: TransitionState,

    // Engine output as last commanded or reported
    engine_running: bool,
    started: bool,

    // Timers
    fade: FadeSlot<AfterFade>,
    polling: bool,

    // UI
    view: WidgetView,
    pending_events: Vec<PlayerEvent>,
}

impl<E: PlaybackEngine> PlayerController<E, StdRng> {
    /// Create a controller with an entropy-seeded random source
    pub fn new(engine: E, config: PlayerConfig) -> Result<Self> {
        Self::with_rng(engine, config, StdRng::from_entropy())
    }
}

impl<E: PlaybackEngine, R: Rng> PlayerController<E, R> {
    /// Create a controller with an explicit random source
    ///
    /// Picks the opening track and cues it on the engine.
    pub fn with_rng(mut engine: E, config: PlayerConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let pool = config.track_pool()?;

        let history = match config.history_limit {
            Some(limit) => History::with_limit(limit),
            None => History::new(),
        };

        let initial = pick_initial(&pool, &mut rng);
        engine.cue(&initial);
        info!(track = %initial, "Cued opening track");

        Ok(Self {
            engine,
            rng,
            view: WidgetView::new(config.initial_volume),
            config,
            pool,
            current: Some(initial),
            history,
            is_playing: false,
            ready: false,
            state: TransitionState::Idle,
            engine_running: false,
            started: false,
            fade: FadeSlot::new(),
            polling: false,
            pending_events: Vec::new(),
        })
    }

    // ===== Dispatch =====

    /// Route a tagged input to its handler
    pub fn dispatch(&mut self, input: PlayerInput) -> Result<()> {
        match input {
            PlayerInput::TogglePlay => self.toggle_play(),
            PlayerInput::Next => self.next(),
            PlayerInput::Previous => self.previous(),
            PlayerInput::VolumeInput(value) => {
                self.volume_input(value);
                Ok(())
            }
            PlayerInput::ProgressInput(value) => {
                self.progress_input(value);
                Ok(())
            }
            PlayerInput::ProgressCommit => self.progress_commit(),
            PlayerInput::Engine(event) => {
                self.handle_engine_event(event);
                Ok(())
            }
        }
    }

    // ===== Engine Events =====

    /// React to an engine notification
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Ready => self.on_ready(),
            EngineEvent::StateChanged(state) => self.on_state_changed(state),
            EngineEvent::Error(code) => self.on_error(code),
        }
    }

    fn on_ready(&mut self) {
        self.ready = true;
        self.engine.set_volume(self.view.volume_level());
        self.refresh_song_info();
        if let Some(track) = &self.current {
            self.view.album_art = self.config.thumbnail_url(track);
        }
        info!("Playback engine ready");
    }

    fn on_state_changed(&mut self, state: EngineState) {
        debug!(?state, "Engine state changed");

        match state {
            EngineState::Playing => {
                self.mark_running(true);
                self.polling = true;
                self.refresh_song_info();
            }
            EngineState::Paused | EngineState::Ended => {
                self.mark_running(false);
                self.polling = false;
            }
            _ => self.polling = false,
        }

        if state == EngineState::Ended {
            info!("Track ended, advancing");
            self.play_next();
        }
    }

    fn on_error(&mut self, code: EngineErrorCode) {
        error!(code = code.0, "{}", PlaybackError::Engine(code));
        self.pending_events.push(PlayerEvent::EngineError { code });
    }

    // ===== Playback Control =====

    /// Play/pause toggle
    ///
    /// Playing: fade out, then pause. Otherwise: fade in.
    pub fn toggle_play(&mut self) -> Result<()> {
        self.ensure_ready()?;

        if self.is_playing {
            self.view.play_toggle = PlayGlyph::Play;
            self.is_playing = false;
            self.fade_out(AfterFade::Pause);
        } else {
            self.view.play_toggle = PlayGlyph::Stop;
            self.is_playing = true;
            self.fade_in();
        }

        Ok(())
    }

    /// Fade out, then advance to a freshly picked track
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.fade_out(AfterFade::Next);
        Ok(())
    }

    /// Fade out, then go back in history
    ///
    /// With no history the current track restarts from the beginning.
    pub fn previous(&mut self) -> Result<()> {
        self.ensure_ready()?;
        self.fade_out(AfterFade::Previous);
        Ok(())
    }

    // ===== Slider Input =====

    /// Volume slider moved by the user
    ///
    /// Any in-flight fade is abandoned and the engine takes the slider value.
    pub fn volume_input(&mut self, value: f64) {
        self.view.volume.set_by_user(value);

        if !self.ready {
            return;
        }

        if let Some((fade, after)) = self.fade.cancel() {
            debug!(direction = ?fade.direction(), level = fade.level(), ?after, "Fade cancelled by volume input");
            self.settle_cancelled();
        }

        let level = self.view.volume_level();
        self.engine.set_volume(level);
        self.pending_events.push(PlayerEvent::VolumeChanged { level });
    }

    /// Position slider dragged by the user
    pub fn progress_input(&mut self, value: f64) {
        self.view.progress.drag(value);
    }

    /// Position slider released: seek once to the implied position
    pub fn progress_commit(&mut self) -> Result<()> {
        self.view.progress.release();
        self.ensure_ready()?;

        let position_secs = self.view.progress.seek_position(self.engine.duration());
        self.engine.seek(position_secs);
        debug!(position_secs, "Seeked from position slider");
        self.pending_events.push(PlayerEvent::Seeked { position_secs });
        Ok(())
    }

    // ===== Timer Ticks =====

    /// Advance the fade armed for `generation`
    ///
    /// Returns false for a stale tick (the fade was cancelled or replaced).
    pub fn fade_tick(&mut self, generation: u64) -> bool {
        match self.fade.tick(generation) {
            FadeTick::Stale => false,
            FadeTick::Step { level } => {
                self.engine.set_volume(level);
                true
            }
            FadeTick::Finished {
                level,
                direction,
                completion,
            } => {
                self.engine.set_volume(level);
                self.pending_events
                    .push(PlayerEvent::FadeCompleted { direction });
                self.complete_fade(completion);
                true
            }
        }
    }

    /// Refresh the position slider and time label from the engine
    ///
    /// Returns whether the view was updated. Skipped entirely while the user
    /// drags the position slider.
    pub fn progress_tick(&mut self) -> bool {
        if !self.ready || !self.polling || self.view.progress.is_dragging() {
            return false;
        }

        let current = self.engine.current_time();
        let duration = self.engine.duration();
        if !(duration.is_finite() && duration > 0.0) {
            return false;
        }

        let percent = current / duration * 100.0;
        if !self.view.progress.set_from_engine(percent) {
            return false;
        }
        self.view.time_display = format_progress(current, duration);
        true
    }

    // ===== Transitions =====

    fn fade_in(&mut self) {
        let target = self.view.volume_level();
        self.engine.set_volume(0);
        self.engine.play();
        self.mark_running(true);

        let generation = self
            .fade
            .start(Fade::fade_in(target, self.config.fade_step), AfterFade::Settle);
        debug!(target, generation, "Fading in");
        self.set_state(TransitionState::FadingIn);
    }

    fn fade_out(&mut self, after: AfterFade) {
        let from = self.engine.volume();
        let generation = self
            .fade
            .start(Fade::fade_out(from, self.config.fade_step), after);
        debug!(from, generation, ?after, "Fading out");
        self.set_state(TransitionState::FadingOut);
    }

    fn complete_fade(&mut self, after: AfterFade) {
        match after {
            AfterFade::Settle => self.set_state(TransitionState::Playing),
            AfterFade::Pause => {
                self.engine.pause();
                self.mark_running(false);
                self.set_state(TransitionState::Paused);
            }
            AfterFade::Next => self.play_next(),
            AfterFade::Previous => self.play_previous(),
        }
    }

    /// A fade was abandoned by the user; settle on what the engine is doing
    fn settle_cancelled(&mut self) {
        if self.engine_running {
            self.is_playing = true;
            self.view.play_toggle = PlayGlyph::Stop;
            self.set_state(TransitionState::Playing);
        } else {
            self.is_playing = false;
            self.view.play_toggle = PlayGlyph::Play;
            let settled = if self.started {
                TransitionState::Paused
            } else {
                TransitionState::Idle
            };
            self.set_state(settled);
        }
    }

    fn mark_running(&mut self, running: bool) {
        self.engine_running = running;
        self.started |= running;
    }

    fn play_next(&mut self) {
        let previous = self.current.take();
        if let Some(track) = &previous {
            self.history.push(track.clone());
        }

        let next = pick_next(
            previous.as_ref(),
            &self.pool,
            &mut self.rng,
            self.config.alternate_probability,
        );
        self.load_and_play(next, previous);
    }

    fn play_previous(&mut self) {
        match self.history.pick_previous() {
            Ok(track) => {
                let previous = self.current.take();
                self.load_and_play(track, previous);
            }
            Err(PlaybackError::EmptyHistory) => {
                debug!("No history, restarting current track");
                self.engine.seek(0.0);
                self.view.progress.reset(0.0);
                self.view.time_display = format_progress(0.0, self.engine.duration());
                self.is_playing = true;
                self.view.play_toggle = PlayGlyph::Stop;
                self.fade_in();
            }
            Err(e) => warn!("Back navigation failed: {}", e),
        }
    }

    fn load_and_play(&mut self, track: TrackId, previous: Option<TrackId>) {
        info!(track = %track, previous = ?previous.as_ref().map(TrackId::as_str), "Loading track");

        self.engine.load(&track);
        self.mark_running(true);
        self.view.show_loading(self.config.thumbnail_url(&track));
        self.current = Some(track.clone());

        self.fade_in();
        self.is_playing = true;
        self.view.play_toggle = PlayGlyph::Stop;

        self.pending_events.push(PlayerEvent::TrackChanged {
            track_id: track,
            previous_track_id: previous,
        });
    }

    fn refresh_song_info(&mut self) {
        let Some(metadata) = self.engine.metadata() else {
            return;
        };

        if !metadata.title.is_empty() {
            self.view.song_title = metadata.title;
        }
        if !metadata.author.is_empty() {
            self.view.channel_name = format!("Published by {}", metadata.author);
        }
    }

    fn set_state(&mut self, state: TransitionState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "Transition");
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(PlaybackError::EngineNotReady)
        }
    }

    // ===== Accessors =====

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn current_track(&self) -> Option<&TrackId> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn view(&self) -> &WidgetView {
        &self.view
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Whether a fade ramp is waiting for ticks
    pub fn is_fading(&self) -> bool {
        self.fade.is_active()
    }

    /// Generation the next fade tick must carry
    pub fn fade_generation(&self) -> u64 {
        self.fade.generation()
    }

    /// Whether the progress poll should be running
    pub fn is_polling(&self) -> bool {
        self.polling
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
