//! Read-only views for renderers and HUDs
//!
//! Snapshots copy what a frame needs to draw so hosts never hold a borrow of
//! the live state across frames. They serialize to JSON for web hosts.

use glam::Vec2;
use serde::Serialize;

use super::state::{EffectColor, GameState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatView {
    pub id: u32,
    pub word: &'static str,
    pub matched: usize,
    pub pos: Vec2,
    /// Oldest first
    pub trail: Vec<Vec2>,
    pub locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CityView {
    pub pos: Vec2,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplosionView {
    pub pos: Vec2,
    pub color: EffectColor,
    /// Default palette entry for `color`
    pub hex: &'static str,
    pub radius: f32,
    /// 0..=1 through the animation
    pub progress: f32,
    pub particles: Vec<Vec2>,
}

/// Everything a frame needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub threats: Vec<ThreatView>,
    pub cities: Vec<CityView>,
    pub explosions: Vec<ExplosionView>,
    pub score: u64,
    pub level: u32,
    pub alive_cities: usize,
    pub typed: String,
    pub running: bool,
    pub game_over: bool,
}

pub fn threats(state: &GameState) -> Vec<ThreatView> {
    let locked = state.locked_threat().map(|t| t.id);
    state
        .threats
        .iter()
        .map(|t| ThreatView {
            id: t.id,
            word: t.word,
            matched: t.matched,
            pos: t.pos,
            trail: t.trail.iter().copied().collect(),
            locked: locked == Some(t.id),
        })
        .collect()
}

pub fn cities(state: &GameState) -> Vec<CityView> {
    state
        .cities
        .iter()
        .map(|c| CityView {
            pos: c.pos,
            alive: c.alive,
        })
        .collect()
}

pub fn explosions(state: &GameState) -> Vec<ExplosionView> {
    state
        .explosions
        .iter()
        .map(|e| ExplosionView {
            pos: e.pos,
            color: e.color,
            hex: e.color.hex(),
            radius: e.radius,
            progress: e.progress(),
            particles: e.particle_positions().collect(),
        })
        .collect()
}

pub fn snapshot(state: &GameState) -> Snapshot {
    Snapshot {
        threats: threats(state),
        cities: cities(state),
        explosions: explosions(state),
        score: state.score,
        level: state.level,
        alive_cities: state.alive_city_count(),
        typed: state.typed.clone(),
        running: state.running,
        game_over: state.game_over,
    }
}
