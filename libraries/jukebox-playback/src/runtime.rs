//! Tokio driver for the player controller
//!
//! One task owns the [`PlayerController`] and multiplexes:
//! - commands from any number of [`PlayerHandle`]s
//! - the fade timer, armed only while a fade is in flight and re-armed
//!   whenever the fade generation changes
//! - the progress timer, armed only while the engine reports playing
//!
//! Each fade tick carries the generation its timer was armed for, so a tick
//! that races with a newer fade request is dropped by the controller.

use crate::{
    controller::{PlayerController, PlayerInput},
    engine::{EngineEvent, PlaybackEngine},
    error::{PlaybackError, Result},
    events::PlayerEvent,
    types::{TrackId, TransitionState},
    view::WidgetView,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

const COMMAND_BUFFER: usize = 64;
const EVENT_BUFFER: usize = 256;

/// Commands accepted by the player task
#[derive(Debug)]
pub enum PlayerCommand {
    /// UI input or engine notification
    Input(PlayerInput),

    /// Reply with the current state
    Snapshot(oneshot::Sender<PlayerSnapshot>),

    /// Stop the task
    Shutdown,
}

/// Point-in-time copy of the session for front-ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub state: TransitionState,
    pub is_playing: bool,
    pub current_track: Option<TrackId>,
    pub history: Vec<TrackId>,
    pub view: WidgetView,
}

impl PlayerSnapshot {
    fn capture<E: PlaybackEngine, R: Rng>(controller: &PlayerController<E, R>) -> Self {
        Self {
            state: controller.state(),
            is_playing: controller.is_playing(),
            current_track: controller.current_track().cloned(),
            history: controller.history().iter().cloned().collect(),
            view: controller.view().clone(),
        }
    }
}

/// Cloneable handle to a running player task
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    commands: mpsc::Sender<PlayerCommand>,
    events: broadcast::Sender<PlayerEvent>,
}

impl PlayerHandle {
    /// Send a UI input or engine notification
    pub async fn send(&self, input: PlayerInput) -> Result<()> {
        self.commands
            .send(PlayerCommand::Input(input))
            .await
            .map_err(|_| PlaybackError::PlayerStopped)
    }

    /// Forward an engine notification
    pub async fn engine_event(&self, event: EngineEvent) -> Result<()> {
        self.send(PlayerInput::Engine(event)).await
    }

    /// Fetch the current state
    pub async fn snapshot(&self) -> Result<PlayerSnapshot> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(PlayerCommand::Snapshot(reply))
            .await
            .map_err(|_| PlaybackError::PlayerStopped)?;
        response.await.map_err(|_| PlaybackError::PlayerStopped)
    }

    /// Subscribe to controller events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Ask the task to stop
    pub async fn shutdown(&self) -> Result<()> {
        self.commands
            .send(PlayerCommand::Shutdown)
            .await
            .map_err(|_| PlaybackError::PlayerStopped)
    }
}

/// Spawn the player task
///
/// The join handle yields the controller back once the task stops.
pub fn spawn_player<E, R>(
    controller: PlayerController<E, R>,
) -> (PlayerHandle, JoinHandle<PlayerController<E, R>>)
where
    E: PlaybackEngine + Send + 'static,
    R: Rng + Send + 'static,
{
    let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
    let (events, _) = broadcast::channel(EVENT_BUFFER);

    let handle = PlayerHandle {
        commands,
        events: events.clone(),
    };
    let task = tokio::spawn(run(controller, receiver, events));
    (handle, task)
}

struct Timers {
    fade_period: Duration,
    poll_period: Duration,
    fade: Option<(u64, Interval)>,
    poll: Option<Interval>,
}

impl Timers {
    /// Arm, re-arm, or drop timers to match the controller
    fn sync<E: PlaybackEngine, R: Rng>(&mut self, controller: &PlayerController<E, R>) {
        if controller.is_fading() {
            let generation = controller.fade_generation();
            let armed = self.fade.as_ref().map(|(armed, _)| *armed);
            if armed != Some(generation) {
                self.fade = Some((generation, repeating(self.fade_period)));
            }
        } else {
            self.fade = None;
        }

        if controller.is_polling() {
            if self.poll.is_none() {
                self.poll = Some(repeating(self.poll_period));
            }
        } else {
            self.poll = None;
        }
    }
}

/// Interval whose first tick fires one full period from now
fn repeating(period: Duration) -> Interval {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_fade_tick(fade: &mut Option<(u64, Interval)>) -> u64 {
    match fade {
        Some((generation, interval)) => {
            interval.tick().await;
            *generation
        }
        None => std::future::pending().await,
    }
}

async fn next_poll_tick(poll: &mut Option<Interval>) {
    match poll {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn run<E, R>(
    mut controller: PlayerController<E, R>,
    mut commands: mpsc::Receiver<PlayerCommand>,
    events: broadcast::Sender<PlayerEvent>,
) -> PlayerController<E, R>
where
    E: PlaybackEngine,
    R: Rng,
{
    let mut timers = Timers {
        fade_period: controller.config().fade_tick(),
        poll_period: controller.config().progress_interval(),
        fade: None,
        poll: None,
    };

    info!("Player task started");

    loop {
        timers.sync(&controller);

        tokio::select! {
            command = commands.recv() => match command {
                Some(PlayerCommand::Input(input)) => {
                    if let Err(e) = controller.dispatch(input) {
                        debug!(?input, "Input ignored: {}", e);
                    }
                }
                Some(PlayerCommand::Snapshot(reply)) => {
                    // Requester may have given up waiting
                    let _ = reply.send(PlayerSnapshot::capture(&controller));
                }
                Some(PlayerCommand::Shutdown) | None => break,
            },
            generation = next_fade_tick(&mut timers.fade) => {
                controller.fade_tick(generation);
            }
            () = next_poll_tick(&mut timers.poll) => {
                controller.progress_tick();
            }
        }

        for event in controller.drain_events() {
            // No subscribers is fine
            let _ = events.send(event);
        }
    }

    info!("Player task stopped");
    controller
}
