//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]. Timers and host callbacks
//! live one level up in [`crate::game::Game`].

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::tuning::Tuning;

/// Explosion color tag (renderers map it to a palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectColor {
    /// A city was hit
    Impact,
    /// A threat was typed out
    Intercept,
}

impl EffectColor {
    /// CSS-style hex color
    pub fn hex(&self) -> &'static str {
        match self {
            EffectColor::Impact => "#f80",
            EffectColor::Intercept => "#4af",
        }
    }
}

/// A falling word aimed at a city
#[derive(Debug, Clone)]
pub struct Threat {
    pub id: u32,
    pub word: &'static str,
    /// Number of leading characters the player has typed
    pub matched: usize,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Index into [`GameState::cities`]
    pub target: usize,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Threat {
    pub fn new(id: u32, word: &'static str, pos: Vec2, vel: Vec2, target: usize) -> Self {
        Self {
            id,
            word,
            matched: 0,
            pos,
            vel,
            target,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Record current position to trail (call each step before moving)
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Integrate position
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// A defended city
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub pos: Vec2,
    pub alive: bool,
}

/// A particle thrown out by an explosion. Position is derived from the
/// owning explosion's age, so particles carry no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub origin: Vec2,
    pub vel: Vec2,
}

/// Time-bounded blast animation (not gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub color: EffectColor,
    pub radius: f32,
    pub age: f32,
    pub duration: f32,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new(pos: Vec2, color: EffectColor, radius: f32, rng: &mut Pcg32) -> Self {
        let count = EXPLOSION_PARTICLES;
        let particles = (0..count)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / count as f32
                    + rng.random::<f32>() * PARTICLE_ANGLE_JITTER;
                let speed = PARTICLE_MIN_SPEED + rng.random::<f32>() * PARTICLE_SPEED_SPREAD;
                Particle {
                    origin: pos,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                }
            })
            .collect();

        Self {
            pos,
            color,
            radius,
            age: 0.0,
            duration: EXPLOSION_DURATION,
            particles,
        }
    }

    /// 0 at creation, 1 when finished
    pub fn progress(&self) -> f32 {
        (self.age / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.age >= self.duration
    }

    pub fn particle_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.particles.iter().map(|p| p.origin + p.vel * self.age)
    }
}

/// Gameplay events for audio/HUD hooks, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ThreatSpawned { id: u32, word: &'static str, target: usize },
    ThreatDestroyed { id: u32, word: &'static str, points: u64 },
    /// A threat reached the ground without hitting a city
    ThreatGrounded { id: u32 },
    CityDestroyed { city: usize },
    LevelUp { level: u32 },
    GameOver { score: u64 },
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance and playfield settings
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Spawn and particle randomness
    pub rng: Pcg32,
    /// Threats in flight, in spawn order
    pub threats: Vec<Threat>,
    /// Fixed set of cities (indices are stable for the whole run)
    pub cities: Vec<City>,
    /// Active explosions
    pub explosions: Vec<Explosion>,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub words_destroyed: u32,
    pub words_this_level: u32,
    pub running: bool,
    pub game_over: bool,
    /// Id of the threat currently being typed
    pub locked: Option<u32>,
    /// Lowercased text typed so far
    pub typed: String,
    /// Current delay between spawns
    pub spawn_interval: Duration,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run. The RNG is seeded once here and keeps its stream
    /// across later resets.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            spawn_interval: tuning.spawn_interval_start(),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            threats: Vec::new(),
            cities: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            level: 1,
            words_destroyed: 0,
            words_this_level: 0,
            running: false,
            game_over: false,
            locked: None,
            typed: String::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Reinitialize everything except the RNG stream
    pub fn reset(&mut self) {
        self.threats.clear();
        self.explosions.clear();
        self.cities = init_cities(&self.tuning);
        self.score = 0;
        self.level = 1;
        self.words_destroyed = 0;
        self.words_this_level = 0;
        self.running = false;
        self.game_over = false;
        self.locked = None;
        self.typed.clear();
        self.spawn_interval = self.tuning.spawn_interval_start();
        self.events.clear();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn alive_city_count(&self) -> usize {
        self.cities.iter().filter(|c| c.alive).count()
    }

    pub fn threat(&self, id: u32) -> Option<&Threat> {
        self.threats.iter().find(|t| t.id == id)
    }

    pub fn threat_mut(&mut self, id: u32) -> Option<&mut Threat> {
        self.threats.iter_mut().find(|t| t.id == id)
    }

    /// The locked threat, if the lock still points at a live threat
    pub fn locked_threat(&self) -> Option<&Threat> {
        self.locked.and_then(|id| self.threat(id))
    }

    /// Remove a threat by id. Removing the locked threat also clears the lock
    /// and the typed buffer. Returns `None` if the threat is already gone.
    pub fn remove_threat(&mut self, id: u32) -> Option<Threat> {
        let idx = self.threats.iter().position(|t| t.id == id)?;
        let threat = self.threats.remove(idx);
        if self.locked == Some(id) {
            self.locked = None;
            self.typed.clear();
        }
        Some(threat)
    }

    /// Spawn an explosion animation
    pub fn explode(&mut self, pos: Vec2, color: EffectColor, radius: f32) {
        let explosion = Explosion::new(pos, color, radius, &mut self.rng);
        self.explosions.push(explosion);
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Test helper: place a threat aimed at `target` flying at `speed`
    #[cfg(test)]
    pub(crate) fn insert_threat(
        &mut self,
        word: &'static str,
        pos: Vec2,
        target: usize,
        speed: f32,
    ) -> u32 {
        let id = self.next_entity_id();
        let vel = (self.cities[target].pos - pos).normalize_or_zero() * speed;
        self.threats.push(Threat::new(id, word, pos, vel, target));
        id
    }
}

/// Cities evenly spaced across the playfield, all alive
fn init_cities(tuning: &Tuning) -> Vec<City> {
    let spacing = tuning.width / (tuning.city_count + 1) as f32;
    let y = tuning.ground_y();
    (0..tuning.city_count)
        .map(|i| City {
            pos: Vec2::new(spacing * (i + 1) as f32, y),
            alive: true,
        })
        .collect()
}
