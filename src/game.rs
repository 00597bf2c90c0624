//! Game lifecycle controller
//!
//! Owns the simulation state, the spawn timer and the frame clock. Hosts
//! drive it with `frame(now)` once per display frame (or with `step` and
//! `pump_spawn_timer` directly) and feed text through `handle_input`.

use std::fmt;
use std::time::Duration;

use crate::sim::snapshot::{self, CityView, ExplosionView, Snapshot, ThreatView};
use crate::sim::{
    FrameClock, GameEvent, GameState, InputOutcome, SpawnTimer, StepOutcome, handle_input,
    spawn_threat, step,
};
use crate::tuning::Tuning;

type GameOverCallback = Box<dyn FnMut(u64)>;

/// A typing-defence game session
pub struct Game {
    state: GameState,
    spawn_timer: SpawnTimer,
    frame_clock: FrameClock,
    on_game_over: Option<GameOverCallback>,
    /// Set once the callback has fired for the current run
    game_over_reported: bool,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("spawn_timer", &self.spawn_timer)
            .field("frame_clock", &self.frame_clock)
            .field("on_game_over", &self.on_game_over.is_some())
            .finish()
    }
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let frame_clock = FrameClock::new(tuning.max_frame_dt);
        Self {
            state: GameState::new(seed, tuning),
            spawn_timer: SpawnTimer::default(),
            frame_clock,
            on_game_over: None,
            game_over_reported: false,
        }
    }

    /// Register the game-over callback. It receives the final score and fires
    /// once per run.
    pub fn on_game_over(&mut self, callback: impl FnMut(u64) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    /// Return to a fresh run. Stops the game first if it is still running so
    /// no timer from the old run survives.
    pub fn reset(&mut self) {
        if self.state.running {
            log::warn!("reset() while running; stopping first");
            self.stop();
        }
        self.state.reset();
        self.game_over_reported = false;
    }

    /// Begin (or resume) play. Starting after game over begins a new run.
    pub fn start(&mut self) {
        if self.state.running {
            return;
        }
        if self.state.game_over {
            self.reset();
        }
        self.state.running = true;
        self.frame_clock.arm();
        self.spawn_timer.schedule(self.state.spawn_interval);
        log::info!(
            "Game started (seed {}, {} cities)",
            self.state.seed,
            self.state.cities.len()
        );
    }

    /// Halt play and cancel both timers. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.state.running {
            log::info!("Game stopped at score {}", self.state.score);
        }
        self.state.running = false;
        self.halt_timers();
    }

    /// One display frame at host time `now_secs`: derive Δt, fire the spawn
    /// timer if due, then advance the simulation.
    pub fn frame(&mut self, now_secs: f64) -> StepOutcome {
        let Some(dt) = self.frame_clock.tick(now_secs) else {
            return StepOutcome::Idle;
        };
        self.pump_spawn_timer(dt);
        self.step(dt)
    }

    /// Advance the spawn timer by `dt` seconds, spawning a threat if it fires.
    /// Returns the id of the spawned threat.
    pub fn pump_spawn_timer(&mut self, dt: f32) -> Option<u32> {
        if !self.state.running {
            return None;
        }
        let elapsed = Duration::try_from_secs_f32(dt).unwrap_or_default();
        if !self.spawn_timer.poll(elapsed) {
            return None;
        }
        let spawned = spawn_threat(&mut self.state);
        self.spawn_timer.schedule(self.state.spawn_interval);
        spawned
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        let outcome = step(&mut self.state, dt);
        match outcome {
            StepOutcome::LevelUp => {
                // Next spawn waits the new, shorter interval
                self.spawn_timer.schedule(self.state.spawn_interval);
            }
            StepOutcome::GameOver => {
                self.halt_timers();
                self.report_game_over();
            }
            StepOutcome::Idle | StepOutcome::Continue => {}
        }
        outcome
    }

    /// Feed the full contents of the player's text field
    pub fn handle_input(&mut self, text: &str) -> InputOutcome {
        handle_input(&mut self.state, text)
    }

    fn halt_timers(&mut self) {
        self.spawn_timer.cancel();
        self.frame_clock.cancel();
    }

    fn report_game_over(&mut self) {
        if self.game_over_reported {
            return;
        }
        self.game_over_reported = true;
        let score = self.state.score;
        if let Some(callback) = self.on_game_over.as_mut() {
            callback(score);
        }
    }

    // === Read-only accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn threats(&self) -> Vec<ThreatView> {
        snapshot::threats(&self.state)
    }

    pub fn cities(&self) -> Vec<CityView> {
        snapshot::cities(&self.state)
    }

    pub fn explosions(&self) -> Vec<ExplosionView> {
        snapshot::explosions(&self.state)
    }

    pub fn snapshot(&self) -> Snapshot {
        snapshot::snapshot(&self.state)
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn alive_city_count(&self) -> usize {
        self.state.alive_city_count()
    }

    pub fn typed(&self) -> &str {
        &self.state.typed
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn spawn_interval(&self) -> Duration {
        self.state.spawn_interval
    }

    /// Time until the next spawn, `None` when the timer is cancelled
    pub fn next_spawn_in(&self) -> Option<Duration> {
        self.spawn_timer.remaining()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
