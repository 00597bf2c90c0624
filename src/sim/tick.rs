//! Variable timestep simulation step
//!
//! Moves threats, resolves hits against cities and the ground, ages
//! explosions and applies level-ups.

use glam::Vec2;

use super::difficulty::tightened_interval;
use super::state::{EffectColor, GameEvent, GameState};
use crate::consts::*;

/// What a step changed that the owner of the timers must react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Game not running, nothing advanced
    Idle,
    Continue,
    /// Level increased; spawn cadence changed
    LevelUp,
    /// Last city fell during this step
    GameOver,
}

/// Advance the game state by `dt` seconds
pub fn step(state: &mut GameState, dt: f32) -> StepOutcome {
    if !state.running || state.game_over {
        return StepOutcome::Idle;
    }

    let ground_y = state.tuning.ground_y();
    let mut to_remove: Vec<u32> = Vec::new();

    for i in 0..state.threats.len() {
        let threat = &mut state.threats[i];
        threat.record_trail();
        let prev = threat.pos;
        threat.advance(dt);

        let (id, pos, target) = (threat.id, threat.pos, threat.target);
        let city = state.cities[target];

        // Test the whole path covered this step so fast threats can't skip the city
        if city.alive && segment_distance(prev, pos, city.pos) < IMPACT_RADIUS {
            state.cities[target].alive = false;
            state.explode(city.pos, EffectColor::Impact, CITY_EXPLOSION_RADIUS);
            state.events.push(GameEvent::CityDestroyed { city: target });
            log::info!("City {} destroyed by '{}'", target, state.threats[i].word);
            to_remove.push(id);

            if state.alive_city_count() == 0 {
                trigger_game_over(state);
                return StepOutcome::GameOver;
            }
        } else if pos.y >= ground_y {
            // Overshot a dead city (or missed a live one) into the ground
            state.events.push(GameEvent::ThreatGrounded { id });
            to_remove.push(id);
        }
    }

    for id in to_remove {
        state.remove_threat(id);
    }

    for explosion in &mut state.explosions {
        explosion.age += dt;
    }
    state.explosions.retain(|e| !e.is_finished());

    if state.words_this_level >= state.tuning.words_per_level {
        state.words_this_level = 0;
        state.level += 1;
        state.spawn_interval = tightened_interval(&state.tuning, state.spawn_interval);
        state.events.push(GameEvent::LevelUp { level: state.level });
        log::info!(
            "Level {} (spawn every {}ms)",
            state.level,
            state.spawn_interval.as_millis()
        );
        return StepOutcome::LevelUp;
    }

    StepOutcome::Continue
}

/// Distance from `point` to the segment `a`-`b`
fn segment_distance(a: Vec2, b: Vec2, point: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a.distance(point);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(point)
}

fn trigger_game_over(state: &mut GameState) {
    state.running = false;
    state.game_over = true;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {} at level {} ({} words)",
        state.score,
        state.level,
        state.words_destroyed
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use std::time::Duration;

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, Tuning::default());
        state.running = true;
        state
    }

    #[test]
    fn test_step_idle_when_stopped() {
        let mut state = GameState::new(12345, Tuning::default());
        let id = state.insert_threat("code", Vec2::new(100.0, 20.0), 0, 28.0);
        assert_eq!(step(&mut state, 0.1), StepOutcome::Idle);
        assert_eq!(state.threat(id).unwrap().pos, Vec2::new(100.0, 20.0));
    }

    #[test]
    fn test_step_moves_and_records_trail() {
        let mut state = running_state();
        let start = Vec2::new(100.0, 20.0);
        let id = state.insert_threat("code", start, 0, 28.0);

        assert_eq!(step(&mut state, 0.5), StepOutcome::Continue);
        let threat = state.threat(id).unwrap();
        assert!((threat.pos.distance(start) - 14.0).abs() < 1e-3);
        assert_eq!(threat.trail.len(), 1);
        assert_eq!(threat.trail[0], start);
    }

    #[test]
    fn test_hit_registers_at_impact_radius_not_sooner() {
        let mut state = running_state();
        let city = state.cities[2].pos;
        // 300px straight above the city at level-1 speed
        let start = city - Vec2::new(0.0, 300.0);
        let id = state.insert_threat("blast", start, 2, 28.0);

        let dt = 0.05;
        let mut travelled = 0.0;
        while state.cities[2].alive {
            assert!(
                travelled <= 300.0 - IMPACT_RADIUS + 28.0 * dt,
                "hit registered too late"
            );
            step(&mut state, dt);
            travelled += 28.0 * dt;
            if state.cities[2].alive {
                assert!(state.threat(id).unwrap().pos.distance(city) >= IMPACT_RADIUS);
            }
        }
        assert!(travelled > 300.0 - IMPACT_RADIUS - 0.05);
        assert!(state.threat(id).is_none());
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].color, EffectColor::Impact);
        assert!(state.events.contains(&GameEvent::CityDestroyed { city: 2 }));
    }

    #[test]
    fn test_city_destroyed_only_once() {
        let mut state = running_state();
        let city = state.cities[0].pos;
        let a = state.insert_threat("fire", city - Vec2::new(0.0, 5.0), 0, 28.0);
        let b = state.insert_threat("code", city - Vec2::new(0.0, 6.0), 0, 28.0);

        step(&mut state, 0.01);
        assert!(!state.cities[0].alive);
        assert!(state.threat(a).is_none());
        // Second threat saw a dead city and keeps falling
        assert!(state.threat(b).is_some());
        let hits = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::CityDestroyed { .. }))
            .count();
        assert_eq!(hits, 1);
        assert_eq!(state.alive_city_count(), 5);
    }

    #[test]
    fn test_threat_overshoots_dead_city_into_ground() {
        let mut state = running_state();
        state.cities[1].alive = false;
        let ground = state.tuning.ground_y();
        let above = state.cities[1].pos - Vec2::new(0.0, 2.0);
        let id = state.insert_threat("nuke", above, 1, 28.0);
        state.locked = Some(id);
        state.typed.push_str("nu");

        step(&mut state, 0.01);
        assert!(state.threat(id).is_some());
        step(&mut state, 0.1);
        assert!(state.threats.iter().all(|t| t.pos.y < ground));
        assert!(state.threat(id).is_none());
        assert!(state.locked.is_none());
        assert!(state.typed.is_empty());
        assert_eq!(state.alive_city_count(), 5);
    }

    #[test]
    fn test_fast_threat_cannot_skip_city() {
        let mut state = running_state();
        let city = state.cities[2].pos;
        // 50px per step jumps from 25px above the city to 25px below it
        let id = state.insert_threat("trajectory", city - Vec2::new(0.0, 325.0), 2, 500.0);

        for _ in 0..7 {
            step(&mut state, 0.1);
        }
        assert!(!state.cities[2].alive);
        assert!(state.threat(id).is_none());
        assert!(state.events.contains(&GameEvent::CityDestroyed { city: 2 }));
    }

    #[test]
    fn test_large_dt_still_hits() {
        let mut state = running_state();
        let city = state.cities[4].pos;
        let id = state.insert_threat("payload", city - Vec2::new(0.0, 300.0), 4, 28.0);

        step(&mut state, 60.0);
        assert!(!state.cities[4].alive);
        assert!(state.threat(id).is_none());
    }

    #[test]
    fn test_threat_missing_live_city_is_grounded() {
        let mut state = running_state();
        let id = state.insert_threat("signal", Vec2::new(10.0, 20.0), 0, 28.0);
        state.threat_mut(id).unwrap().vel = Vec2::new(0.0, 600.0);

        step(&mut state, 1.0);
        assert!(state.threat(id).is_none());
        assert!(state.events.contains(&GameEvent::ThreatGrounded { id }));
        assert_eq!(state.alive_city_count(), 6);
    }

    #[test]
    fn test_segment_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(0.0, 100.0);
        assert_eq!(segment_distance(a, b, Vec2::new(5.0, 50.0)), 5.0);
        assert_eq!(segment_distance(a, b, Vec2::new(0.0, 130.0)), 30.0);
        assert_eq!(segment_distance(a, b, Vec2::new(0.0, -10.0)), 10.0);
        assert_eq!(segment_distance(a, a, Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_locked_threat_hitting_city_clears_lock() {
        let mut state = running_state();
        let city = state.cities[3].pos;
        let id = state.insert_threat("cipher", city - Vec2::new(0.0, 30.0), 3, 28.0);
        let other = state.insert_threat("matrix", Vec2::new(100.0, 20.0), 0, 28.0);
        state.locked = Some(id);
        state.typed.push_str("ciph");
        state.threat_mut(id).unwrap().matched = 4;

        assert_eq!(step(&mut state, 0.25), StepOutcome::Continue);
        assert!(!state.cities[3].alive);
        assert!(state.threat(id).is_none());
        assert!(state.locked.is_none());
        assert!(state.typed.is_empty());
        assert!(state.threat(other).is_some());
        assert_eq!(state.alive_city_count(), 5);
        assert!(!state.game_over);
    }

    #[test]
    fn test_last_city_triggers_game_over() {
        let mut state = running_state();
        for city in state.cities.iter_mut().skip(1) {
            city.alive = false;
        }
        state.score = 420;
        let city = state.cities[0].pos;
        state.insert_threat("bomb", city - Vec2::new(0.0, 1.0), 0, 28.0);
        let other = state.insert_threat("raid", Vec2::new(50.0, 20.0), 0, 28.0);

        assert_eq!(step(&mut state, 0.01), StepOutcome::GameOver);
        assert!(!state.running);
        assert!(state.game_over);
        assert!(state.events.contains(&GameEvent::GameOver { score: 420 }));
        // Processing stopped before the second threat moved
        assert_eq!(state.threat(other).unwrap().pos, Vec2::new(50.0, 20.0));
        // Further steps do nothing
        assert_eq!(step(&mut state, 0.01), StepOutcome::Idle);
    }

    #[test]
    fn test_explosions_expire() {
        let mut state = running_state();
        state.explode(Vec2::new(10.0, 10.0), EffectColor::Intercept, 30.0);
        step(&mut state, 0.3);
        assert_eq!(state.explosions.len(), 1);
        assert!((state.explosions[0].age - 0.3).abs() < 1e-6);
        step(&mut state, 0.3);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_level_up_after_quota() {
        let mut state = running_state();
        state.words_this_level = 9;
        assert_eq!(step(&mut state, 0.01), StepOutcome::Continue);
        assert_eq!(state.level, 1);

        state.words_this_level = 10;
        assert_eq!(step(&mut state, 0.01), StepOutcome::LevelUp);
        assert_eq!(state.level, 2);
        assert_eq!(state.words_this_level, 0);
        assert_eq!(state.spawn_interval, Duration::from_millis(2000));
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut state = running_state();
        for _ in 0..20 {
            state.words_this_level = 10;
            step(&mut state, 0.01);
        }
        assert_eq!(state.level, 21);
        assert_eq!(state.spawn_interval, Duration::from_millis(600));
    }
}
