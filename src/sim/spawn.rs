//! Threat spawning
//!
//! Picks a living city and a word that is not already falling, then launches
//! a threat from the top of the playfield in a straight line at the city.

use glam::Vec2;
use rand::Rng;

use super::difficulty::speed_for_level;
use super::state::{GameEvent, GameState, Threat};
use crate::consts::{SPAWN_MARGIN, SPAWN_Y};
use crate::vocab::WORDS;

/// Spawn one threat. Returns its id, or `None` if every city is gone.
pub fn spawn_threat(state: &mut GameState) -> Option<u32> {
    let alive: Vec<usize> = state
        .cities
        .iter()
        .enumerate()
        .filter(|(_, c)| c.alive)
        .map(|(i, _)| i)
        .collect();
    if alive.is_empty() {
        return None;
    }
    let target = alive[state.rng.random_range(0..alive.len())];

    let word = pick_word(state);

    let width = state.tuning.width;
    let x = SPAWN_MARGIN + state.rng.random::<f32>() * (width - SPAWN_MARGIN * 2.0);
    let pos = Vec2::new(x, SPAWN_Y);

    // Straight line at the city; cities never move so this never needs updating
    let speed = speed_for_level(&state.tuning, state.level);
    let vel = (state.cities[target].pos - pos).normalize_or_zero() * speed;

    let id = state.next_entity_id();
    state.threats.push(Threat::new(id, word, pos, vel, target));
    state
        .events
        .push(GameEvent::ThreatSpawned { id, word, target });
    log::debug!("Spawned '{}' (#{}) at x={:.0} -> city {}", word, id, x, target);

    Some(id)
}

/// Uniform over words not in flight, or over the whole pool if all are taken
fn pick_word(state: &mut GameState) -> &'static str {
    let available: Vec<&'static str> = WORDS
        .iter()
        .copied()
        .filter(|w| !state.threats.iter().any(|t| t.word == *w))
        .collect();
    let pool: &[&'static str] = if available.is_empty() {
        WORDS
    } else {
        &available
    };
    pool[state.rng.random_range(0..pool.len())]
}
