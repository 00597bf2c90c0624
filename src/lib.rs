//! Type Attack - a missile-command style typing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (threats, cities, explosions, input matching)
//! - `game`: Lifecycle controller owning the simulation and its timers
//! - `tuning`: Data-driven game balance
//! - `vocab`: Fixed word pool for falling threats
//! - `autopilot`: Simulated typist for demo mode and soak runs

pub mod autopilot;
pub mod game;
pub mod sim;
pub mod tuning;
pub mod vocab;

pub use autopilot::Autopilot;
pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// City footprint (pixels)
    pub const CITY_WIDTH: f32 = 48.0;
    pub const CITY_HEIGHT: f32 = 28.0;
    /// Gap between the bottom of a city and the playfield edge
    pub const CITY_BASE_OFFSET: f32 = 4.0;

    /// A threat closer than this to its target city hits it
    pub const IMPACT_RADIUS: f32 = CITY_WIDTH / 2.0;

    /// Threats appear at this height
    pub const SPAWN_Y: f32 = 20.0;
    /// Horizontal inset for spawn positions
    pub const SPAWN_MARGIN: f32 = 40.0;

    /// Trail points kept per threat
    pub const TRAIL_LENGTH: usize = 28;

    /// Points per letter (multiplied by level)
    pub const POINTS_PER_LETTER: u64 = 10;

    /// Explosion defaults
    pub const EXPLOSION_DURATION: f32 = 0.55;
    pub const CITY_EXPLOSION_RADIUS: f32 = 40.0;
    pub const THREAT_EXPLOSION_RADIUS: f32 = 30.0;
    pub const EXPLOSION_PARTICLES: usize = 18;
    /// Particle speed range (pixels/s)
    pub const PARTICLE_MIN_SPEED: f32 = 40.0;
    pub const PARTICLE_SPEED_SPREAD: f32 = 80.0;
    /// Random angular jitter added to each particle (radians)
    pub const PARTICLE_ANGLE_JITTER: f32 = 0.3;
}
