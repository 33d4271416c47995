//! Transition controller integration tests
//!
//! Drives the controller through full play / pause / skip / back cycles
//! against a recording engine, delivering fade ticks by hand.

mod common;

use common::{controller_with, metadata, ready_controller, run_fades, test_config};
use jukebox_playback::{
    EngineEvent, EngineState, PlayGlyph, PlayerConfig, PlayerEvent, PlayerInput, TrackId,
    TransitionState, LOADING_TITLE,
};

// ===== End-to-end =====

#[test]
fn natural_end_advances_to_new_track() {
    let mut player = ready_controller(17);
    player.toggle_play().unwrap();
    run_fades(&mut player);

    player.engine_mut().metadata = Some(metadata("First Song", "First Channel"));
    player.handle_engine_event(EngineEvent::StateChanged(EngineState::Playing));
    assert_eq!(player.view().song_title, "First Song");

    let first = player.current_track().cloned().unwrap();
    player.drain_events();

    // Engine reports the end of the track
    player.handle_engine_event(EngineEvent::StateChanged(EngineState::Ended));

    // History received the finished track; a different one was loaded
    assert_eq!(player.history().peek(), Some(&first));
    let second = player.current_track().cloned().unwrap();
    assert_ne!(second, first);
    assert_eq!(player.engine().loaded, vec![second.clone()]);
    assert!(!player.is_polling());

    // Placeholders while the engine fetches metadata
    assert_eq!(player.view().song_title, LOADING_TITLE);
    assert_eq!(player.view().channel_name, "");
    assert_eq!(player.view().time_display, "00:00 / 00:00");
    assert_eq!(
        player.view().album_art,
        format!("https://img.youtube.com/vi/{}/mqdefault.jpg", second)
    );

    // No fade-out on natural end: straight into the fade-in
    assert_eq!(player.state(), TransitionState::FadingIn);
    assert_eq!(run_fades(&mut player), 16);
    assert_eq!(player.engine().volume, 80);
    assert_eq!(player.state(), TransitionState::Playing);

    // Title follows the engine once metadata arrives
    player.engine_mut().metadata = Some(metadata("Second Song", "Second Channel"));
    player.handle_engine_event(EngineEvent::StateChanged(EngineState::Playing));
    assert_eq!(player.view().song_title, "Second Song");
    assert_eq!(player.view().channel_name, "Published by Second Channel");

    let events = player.drain_events();
    assert!(events.contains(&PlayerEvent::TrackChanged {
        track_id: second,
        previous_track_id: Some(first),
    }));
}

#[test]
fn ready_applies_slider_volume_and_album_art() {
    let mut player = controller_with(test_config(), 3);
    let opening = player.current_track().cloned().unwrap();
    assert_eq!(player.engine().cued.as_ref(), Some(&opening));

    player.handle_engine_event(EngineEvent::Ready);

    assert!(player.is_ready());
    assert_eq!(player.engine().volume, 80);
    assert_eq!(player.state(), TransitionState::Idle);
    assert!(player.view().album_art.contains(opening.as_str()));
}

// ===== Play / Pause =====

#[test]
fn toggle_gives_immediate_glyph_feedback() {
    let mut player = ready_controller(1);

    player.toggle_play().unwrap();
    assert_eq!(player.view().play_toggle, PlayGlyph::Stop);
    assert!(player.is_playing());

    player.toggle_play().unwrap();
    assert_eq!(player.view().play_toggle, PlayGlyph::Play);
    assert!(!player.is_playing());
}

#[test]
fn pause_completes_exactly_once() {
    let mut player = ready_controller(2);
    player.toggle_play().unwrap();
    run_fades(&mut player);

    player.toggle_play().unwrap();
    run_fades(&mut player);

    assert_eq!(player.engine().pause_calls, 1);
    assert_eq!(player.engine().volume, 0);
    assert_eq!(player.state(), TransitionState::Paused);

    // Resume fades back in from silence
    player.toggle_play().unwrap();
    assert_eq!(player.engine().volume, 0);
    assert_eq!(run_fades(&mut player), 16);
    assert_eq!(player.engine().volume, 80);
}

#[test]
fn resume_preempts_pause_fade() {
    let mut player = ready_controller(4);
    player.toggle_play().unwrap();
    run_fades(&mut player);

    player.toggle_play().unwrap();
    let pause_generation = player.fade_generation();
    player.fade_tick(pause_generation);
    player.fade_tick(pause_generation);
    assert_eq!(player.engine().volume, 70);

    // Newer request wins; the pause never happens
    player.toggle_play().unwrap();
    assert!(!player.fade_tick(pause_generation));
    run_fades(&mut player);

    assert_eq!(player.engine().pause_calls, 0);
    assert_eq!(player.engine().volume, 80);
    assert_eq!(player.state(), TransitionState::Playing);
}

// ===== Skip / Back =====

#[test]
fn next_fades_out_before_loading() {
    let mut player = ready_controller(5);
    player.toggle_play().unwrap();
    run_fades(&mut player);
    let first = player.current_track().cloned().unwrap();

    player.next().unwrap();
    assert_eq!(player.state(), TransitionState::FadingOut);
    assert!(player.engine().loaded.is_empty());

    // 80 -> 0 in steps of 5, then the new track fades in 0 -> 80
    let generation = player.fade_generation();
    for _ in 0..16 {
        assert!(player.fade_tick(generation));
    }
    assert_eq!(player.engine().loaded.len(), 1);
    assert_ne!(player.current_track(), Some(&first));
    assert_eq!(player.history().peek(), Some(&first));
    assert_eq!(player.state(), TransitionState::FadingIn);

    run_fades(&mut player);
    assert_eq!(player.engine().volume, 80);
}

#[test]
fn previous_returns_through_history_in_reverse() {
    let mut player = ready_controller(6);
    player.toggle_play().unwrap();
    run_fades(&mut player);

    let mut played = vec![player.current_track().cloned().unwrap()];
    for _ in 0..3 {
        player.next().unwrap();
        run_fades(&mut player);
        played.push(player.current_track().cloned().unwrap());
    }
    assert_eq!(player.history().len(), 3);

    for expected in played.iter().rev().skip(1) {
        player.previous().unwrap();
        run_fades(&mut player);
        assert_eq!(player.current_track(), Some(expected));
    }
    assert!(player.history().is_empty());

    // Nothing left: restart the current track instead of changing it
    let loads = player.engine().loaded.len();
    player.previous().unwrap();
    run_fades(&mut player);
    assert_eq!(player.engine().loaded.len(), loads);
    assert_eq!(player.engine().seeks.last(), Some(&0.0));
    assert_eq!(player.current_track(), played.first());
    assert_eq!(player.state(), TransitionState::Playing);
}

#[test]
fn skip_while_paused_starts_playing() {
    let mut player = ready_controller(7);
    player.toggle_play().unwrap();
    run_fades(&mut player);
    player.toggle_play().unwrap();
    run_fades(&mut player);
    assert_eq!(player.state(), TransitionState::Paused);

    player.next().unwrap();
    // Already silent: a single tick finishes the fade-out
    let generation = player.fade_generation();
    assert!(player.fade_tick(generation));
    assert_eq!(player.engine().loaded.len(), 1);
    assert!(player.is_playing());
    assert_eq!(player.view().play_toggle, PlayGlyph::Stop);
}

#[test]
fn certain_alternate_probability_plays_easter_egg() {
    let config = PlayerConfig {
        alternate_probability: 1.0,
        ..test_config()
    };
    let mut player = controller_with(config, 8);
    player.handle_engine_event(EngineEvent::Ready);

    player.handle_engine_event(EngineEvent::StateChanged(EngineState::Ended));
    assert_eq!(player.current_track(), Some(&TrackId::from("egg")));
}

// ===== Sliders =====

#[test]
fn volume_input_cancels_fade_in() {
    let mut player = ready_controller(9);
    player.toggle_play().unwrap();
    let generation = player.fade_generation();
    player.fade_tick(generation);
    player.fade_tick(generation);

    player.volume_input(33.0);

    assert!(!player.is_fading());
    assert!(!player.fade_tick(generation));
    assert_eq!(player.engine().volume, 33);
    assert_eq!(player.state(), TransitionState::Playing);
    assert!(player
        .drain_events()
        .contains(&PlayerEvent::VolumeChanged { level: 33 }));
}

#[test]
fn volume_input_abandons_pending_skip() {
    let mut player = ready_controller(10);
    player.toggle_play().unwrap();
    run_fades(&mut player);

    player.next().unwrap();
    player.volume_input(60.0);

    assert!(!player.is_fading());
    assert!(player.engine().loaded.is_empty());
    assert_eq!(player.engine().volume, 60);
    assert_eq!(player.state(), TransitionState::Playing);
}

#[test]
fn volume_input_during_skip_from_paused_stays_paused() {
    let mut player = ready_controller(7);
    player.toggle_play().unwrap();
    run_fades(&mut player);
    player.toggle_play().unwrap();
    run_fades(&mut player);
    assert_eq!(player.state(), TransitionState::Paused);

    player.next().unwrap();
    player.volume_input(50.0);

    assert!(!player.is_fading());
    assert_eq!(player.state(), TransitionState::Paused);
    assert!(!player.is_playing());
    assert!(!player.engine().playing);
    assert_eq!(player.view().play_toggle, PlayGlyph::Play);
    assert!(player.engine().loaded.is_empty());
    assert_eq!(player.engine().volume, 50);
}

#[test]
fn volume_input_during_skip_from_idle_stays_idle() {
    let mut player = ready_controller(16);
    player.previous().unwrap();
    assert_eq!(player.state(), TransitionState::FadingOut);

    player.volume_input(50.0);

    assert!(!player.is_fading());
    assert_eq!(player.state(), TransitionState::Idle);
    assert!(!player.is_playing());
    assert!(!player.engine().playing);
    assert_eq!(player.view().play_toggle, PlayGlyph::Play);
    assert!(player.engine().seeks.is_empty());
}

#[test]
fn pause_then_skip_cancelled_keeps_playing() {
    let mut player = ready_controller(18);
    player.toggle_play().unwrap();
    run_fades(&mut player);

    // Skip preempts the pause before the engine was ever paused
    player.toggle_play().unwrap();
    player.next().unwrap();
    player.volume_input(40.0);

    assert_eq!(player.engine().pause_calls, 0);
    assert_eq!(player.state(), TransitionState::Playing);
    assert!(player.is_playing());
    assert_eq!(player.view().play_toggle, PlayGlyph::Stop);
}

#[test]
fn restart_without_history_clears_elapsed_time() {
    let mut player = ready_controller(19);
    player.toggle_play().unwrap();
    run_fades(&mut player);

    player.engine_mut().duration = 200.0;
    player.engine_mut().time = 50.0;
    player.handle_engine_event(EngineEvent::StateChanged(EngineState::Playing));
    assert!(player.progress_tick());
    assert_eq!(player.view().time_display, "00:50 / 03:20");

    player.previous().unwrap();
    run_fades(&mut player);

    assert_eq!(player.engine().seeks, vec![0.0]);
    assert_eq!(player.view().progress.value(), 0.0);
    assert_eq!(player.view().time_display, "00:00 / 03:20");
}

#[test]
fn dragging_blocks_progress_poll() {
    let mut player = ready_controller(11);
    player.engine_mut().duration = 200.0;
    player.engine_mut().time = 50.0;
    player.handle_engine_event(EngineEvent::StateChanged(EngineState::Playing));
    assert!(player.progress_tick());
    assert_eq!(player.view().progress.value(), 25.0);

    player.progress_input(90.0);
    for second in 51..60 {
        player.engine_mut().time = f64::from(second);
        assert!(!player.progress_tick());
        assert_eq!(player.view().progress.value(), 90.0);
    }

    // Release seeks once to the dragged position
    player.progress_commit().unwrap();
    assert_eq!(player.engine().seeks, vec![180.0]);
    assert!(!player.view().progress.is_dragging());

    assert!(player.progress_tick());
    assert_eq!(player.view().progress.value(), 90.0);
    assert_eq!(player.view().time_display, "03:00 / 03:20");
}

#[test]
fn progress_commit_before_ready_releases_drag() {
    let mut player = controller_with(test_config(), 12);
    player.progress_input(40.0);

    assert!(player.progress_commit().is_err());
    assert!(!player.view().progress.is_dragging());
    assert!(player.engine().seeks.is_empty());
}

// ===== Dispatch and errors =====

#[test]
fn dispatch_routes_tagged_inputs() {
    let mut player = controller_with(test_config(), 13);

    player
        .dispatch(PlayerInput::Engine(EngineEvent::Ready))
        .unwrap();
    player.dispatch(PlayerInput::TogglePlay).unwrap();
    assert_eq!(player.state(), TransitionState::FadingIn);

    player.dispatch(PlayerInput::VolumeInput(20.0)).unwrap();
    assert_eq!(player.engine().volume, 20);

    player.dispatch(PlayerInput::ProgressInput(10.0)).unwrap();
    assert!(player.view().progress.is_dragging());
    player.dispatch(PlayerInput::ProgressCommit).unwrap();
    assert!(!player.view().progress.is_dragging());
}

#[test]
fn engine_errors_leave_playback_alone() {
    let mut player = ready_controller(14);
    player.toggle_play().unwrap();
    run_fades(&mut player);
    player.drain_events();

    player.handle_engine_event(EngineEvent::Error(jukebox_playback::EngineErrorCode(5)));

    assert_eq!(player.state(), TransitionState::Playing);
    assert!(player.is_playing());
    assert!(player.engine().loaded.is_empty());
    assert_eq!(player.drain_events().len(), 1);
}

#[test]
fn empty_metadata_keeps_placeholders() {
    let mut player = ready_controller(15);
    player.engine_mut().metadata = Some(metadata("", ""));
    player.handle_engine_event(EngineEvent::StateChanged(EngineState::Playing));

    assert_eq!(player.view().song_title, LOADING_TITLE);
    assert_eq!(player.view().channel_name, "");
}
