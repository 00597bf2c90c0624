//! Game balance and playfield settings
//!
//! Defaults reproduce the classic arcade feel; hosts may override any field
//! from JSON. Missing fields fall back to their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CITY_BASE_OFFSET, CITY_HEIGHT, SPAWN_MARGIN};

/// Errors produced while loading or validating a [`Tuning`].
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("playfield {width}x{height} is too small")]
    Playfield { width: f32, height: f32 },
    #[error("city count must be at least 1")]
    NoCities,
    #[error("speeds must be finite and non-negative (base {base}, increment {increment})")]
    Speed { base: f32, increment: f32 },
    #[error("minimum spawn interval {min_ms}ms exceeds starting interval {start_ms}ms")]
    SpawnInterval { start_ms: u64, min_ms: u64 },
    #[error("words per level must be at least 1")]
    ZeroQuota,
    #[error("max frame delta must be positive, got {0}")]
    FrameDelta(f32),
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    /// Playfield width (pixels)
    pub width: f32,
    /// Playfield height (pixels)
    pub height: f32,
    /// Number of defended cities
    pub city_count: usize,

    // === Difficulty ===
    /// Threat speed at level 1 (pixels/s)
    pub base_speed: f32,
    /// Extra threat speed per level (pixels/s)
    pub speed_increment: f32,
    /// Delay between spawns at level 1
    pub spawn_interval_start_ms: u64,
    /// Spawn delay never drops below this
    pub spawn_interval_min_ms: u64,
    /// Spawn delay reduction per level-up
    pub spawn_interval_step_ms: u64,
    /// Destroyed words needed to clear a level
    pub words_per_level: u32,

    // === Frame pacing ===
    /// Largest Δt a single frame may advance (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            city_count: 6,

            base_speed: 28.0,
            speed_increment: 8.0,
            spawn_interval_start_ms: 2200,
            spawn_interval_min_ms: 600,
            spawn_interval_step_ms: 200,
            words_per_level: 10,

            max_frame_dt: 0.1,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.width > SPAWN_MARGIN * 2.0) || !(self.height > CITY_HEIGHT + CITY_BASE_OFFSET)
        {
            return Err(TuningError::Playfield {
                width: self.width,
                height: self.height,
            });
        }
        if self.city_count == 0 {
            return Err(TuningError::NoCities);
        }
        let speed_ok = |v: f32| v.is_finite() && v >= 0.0;
        if !speed_ok(self.base_speed) || !speed_ok(self.speed_increment) {
            return Err(TuningError::Speed {
                base: self.base_speed,
                increment: self.speed_increment,
            });
        }
        if self.spawn_interval_min_ms > self.spawn_interval_start_ms {
            return Err(TuningError::SpawnInterval {
                start_ms: self.spawn_interval_start_ms,
                min_ms: self.spawn_interval_min_ms,
            });
        }
        if self.words_per_level == 0 {
            return Err(TuningError::ZeroQuota);
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(TuningError::FrameDelta(self.max_frame_dt));
        }
        Ok(())
    }

    pub fn spawn_interval_start(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_start_ms)
    }

    pub fn spawn_interval_min(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_min_ms)
    }

    pub fn spawn_interval_step(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_step_ms)
    }

    /// Y coordinate of the city row; also where threats hit the ground
    pub fn ground_y(&self) -> f32 {
        self.height - CITY_HEIGHT - CITY_BASE_OFFSET
    }
}
