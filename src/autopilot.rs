//! Simulated typist for demo mode and soak runs
//!
//! Types at a steady rate, always going after the threat closest to the
//! ground, and occasionally fumbles a key (then backspaces over it).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::game::Game;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Keystrokes per second
    chars_per_sec: f32,
    /// Chance (0-1) that a keystroke is a wrong letter
    mistake_chance: f32,
    rng: Pcg32,
    /// What the typist's text field holds
    buffer: String,
    target: Option<u32>,
    cooldown: f32,
    /// Last keystroke was a typo that still needs erasing
    fumbled: bool,
}

impl Autopilot {
    pub fn new(seed: u64, chars_per_sec: f32, mistake_chance: f32) -> Self {
        Self {
            chars_per_sec: chars_per_sec.max(0.1),
            mistake_chance: mistake_chance.clamp(0.0, 1.0),
            rng: Pcg32::seed_from_u64(seed),
            buffer: String::new(),
            target: None,
            cooldown: 0.0,
            fumbled: false,
        }
    }

    /// Advance by `dt` seconds. Returns the new text field contents when the
    /// typist pressed a key; feed it to [`Game::handle_input`].
    pub fn update(&mut self, game: &Game, dt: f32) -> Option<String> {
        if !game.is_running() {
            return None;
        }

        // The game clears its buffer on kills and when the locked threat dies
        if self.buffer != game.typed() {
            self.buffer = game.typed().to_owned();
            self.fumbled = false;
        }

        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown += 1.0 / self.chars_per_sec;

        if self.fumbled {
            self.fumbled = false;
            self.buffer.pop();
            return Some(self.buffer.clone());
        }

        let word = match self.current_word(game) {
            Some(word) => word,
            None => {
                self.target = self.pick_target(game);
                match self.current_word(game) {
                    Some(word) => word,
                    // Half-typed text that doesn't lead to the new target gets wiped
                    None if !self.buffer.is_empty() => {
                        self.buffer.clear();
                        return Some(String::new());
                    }
                    None => return None,
                }
            }
        };

        let next = word.as_bytes()[self.buffer.len()] as char;
        if self.rng.random::<f32>() < self.mistake_chance {
            let wrong = loop {
                let c = self.rng.random_range(b'a'..=b'z') as char;
                if c != next {
                    break c;
                }
            };
            self.buffer.push(wrong);
            self.fumbled = true;
        } else {
            self.buffer.push(next);
        }
        Some(self.buffer.clone())
    }

    /// Word of the current target if it still exists and the buffer is on track
    fn current_word(&self, game: &Game) -> Option<&'static str> {
        let threat = game.state().threat(self.target?)?;
        (threat.word.starts_with(self.buffer.as_str()) && threat.word.len() > self.buffer.len())
            .then_some(threat.word)
    }

    /// Most dangerous threat: the one lowest on screen
    fn pick_target(&self, game: &Game) -> Option<u32> {
        game.state()
            .threats
            .iter()
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|t| t.id)
    }
}
