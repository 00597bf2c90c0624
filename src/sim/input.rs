//! Typed-text matching and targeting
//!
//! The host feeds the whole contents of its text field on every change. The
//! first threat whose word starts with that text becomes the locked target;
//! finishing the word destroys it.

use serde::Serialize;

use super::state::{EffectColor, GameEvent, GameState};
use crate::consts::{POINTS_PER_LETTER, THREAT_EXPLOSION_RADIUS};

/// Result of feeding one input event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InputOutcome {
    /// Empty buffer or game not running; nothing is locked
    Idle,
    /// Text matches no threat
    NoMatch,
    /// Threat `id` is locked with `matched` leading characters typed
    Locked { id: u32, matched: usize },
    /// Threat was completed. The typed buffer is now empty, so the host
    /// should clear its text field.
    Destroyed { id: u32, word: &'static str, points: u64 },
}

/// Feed the cumulative typed text
pub fn handle_input(state: &mut GameState, raw: &str) -> InputOutcome {
    if !state.running {
        return InputOutcome::Idle;
    }
    state.typed = raw.to_lowercase();

    // Continue typing the locked threat while it still matches
    if let Some(id) = state.locked {
        let typed_len = state.typed.len();
        let still_matches = !state.typed.is_empty()
            && state
                .threat(id)
                .is_some_and(|t| t.word.starts_with(state.typed.as_str()));

        if still_matches {
            return advance_match(state, id, typed_len);
        }
        release_lock(state);
    }

    if state.typed.is_empty() {
        return InputOutcome::Idle;
    }

    let typed = state.typed.as_str();
    let found = state
        .threats
        .iter()
        .find(|t| t.word.starts_with(typed))
        .map(|t| t.id);

    match found {
        Some(id) => {
            state.locked = Some(id);
            let typed_len = state.typed.len();
            advance_match(state, id, typed_len)
        }
        None => InputOutcome::NoMatch,
    }
}

/// Record progress on a locked threat and destroy it once fully typed
fn advance_match(state: &mut GameState, id: u32, matched: usize) -> InputOutcome {
    let complete = match state.threat_mut(id) {
        Some(threat) => {
            threat.matched = matched;
            matched == threat.word.len()
        }
        None => return InputOutcome::NoMatch,
    };

    if complete {
        if let Some((word, points)) = destroy(state, id) {
            return InputOutcome::Destroyed { id, word, points };
        }
    }
    InputOutcome::Locked { id, matched }
}

/// Drop the lock, clearing the old target's highlight if it still exists
fn release_lock(state: &mut GameState) {
    if let Some(id) = state.locked.take() {
        if let Some(threat) = state.threat_mut(id) {
            threat.matched = 0;
        }
    }
}

/// Destroy a threat by typing. Returns the word and points awarded, or `None`
/// if the threat was already gone.
pub fn destroy(state: &mut GameState, id: u32) -> Option<(&'static str, u64)> {
    let threat = state.remove_threat(id)?;
    state.explode(threat.pos, EffectColor::Intercept, THREAT_EXPLOSION_RADIUS);

    let points = threat.word.len() as u64 * POINTS_PER_LETTER * state.level as u64;
    state.score += points;
    state.words_destroyed += 1;
    state.words_this_level += 1;
    state.locked = None;
    state.typed.clear();

    state.events.push(GameEvent::ThreatDestroyed {
        id,
        word: threat.word,
        points,
    });
    log::debug!("Destroyed '{}' (+{} -> {})", threat.word, points, state.score);

    Some((threat.word, points))
}
