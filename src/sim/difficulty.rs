//! Difficulty curve: threat speed and spawn cadence as functions of level

use std::time::Duration;

use crate::tuning::Tuning;

/// Threat speed (pixels/s) for newly spawned threats at `level`
pub fn speed_for_level(tuning: &Tuning, level: u32) -> f32 {
    tuning.base_speed + tuning.speed_increment * level.saturating_sub(1) as f32
}

/// Spawn delay after one more level-up, floored at the configured minimum
pub fn tightened_interval(tuning: &Tuning, current: Duration) -> Duration {
    current
        .saturating_sub(tuning.spawn_interval_step())
        .max(tuning.spawn_interval_min())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Spawn delay reached after `level - 1` level-ups from the start
    fn interval_for_level(tuning: &Tuning, level: u32) -> Duration {
        (1..level).fold(tuning.spawn_interval_start(), |interval, _| {
            tightened_interval(tuning, interval)
        })
    }

    #[test]
    fn test_speed_curve() {
        let tuning = Tuning::default();
        assert_eq!(speed_for_level(&tuning, 1), 28.0);
        assert_eq!(speed_for_level(&tuning, 2), 36.0);
        assert_eq!(speed_for_level(&tuning, 5), 60.0);
    }

    #[test]
    fn test_interval_floor() {
        let tuning = Tuning::default();
        assert_eq!(interval_for_level(&tuning, 1), Duration::from_millis(2200));
        assert_eq!(interval_for_level(&tuning, 2), Duration::from_millis(2000));
        assert_eq!(interval_for_level(&tuning, 9), Duration::from_millis(600));
        assert_eq!(interval_for_level(&tuning, 30), Duration::from_millis(600));
        assert_eq!(
            tightened_interval(&tuning, Duration::from_millis(700)),
            Duration::from_millis(600)
        );
    }

    #[test]
    fn test_interval_non_increasing() {
        let tuning = Tuning::default();
        let mut prev = interval_for_level(&tuning, 1);
        for level in 2..20 {
            let next = interval_for_level(&tuning, level);
            assert!(next <= prev);
            prev = next;
        }
    }
}
