//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `step` and the timers it is fed
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod input;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use difficulty::{speed_for_level, tightened_interval};
pub use input::{InputOutcome, destroy, handle_input};
pub use snapshot::{CityView, ExplosionView, Snapshot, ThreatView};
pub use spawn::spawn_threat;
pub use state::{City, EffectColor, Explosion, GameEvent, GameState, Particle, Threat};
pub use tick::{StepOutcome, step};
pub use timer::{FrameClock, SpawnTimer};
