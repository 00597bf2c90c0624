//! Type Attack headless runner
//!
//! Plays one game with the autopilot typist at a simulated 60 fps and logs
//! how it went. Usage: `type-attack [seed] [tuning.json]`

use type_attack::sim::GameEvent;
use type_attack::{Autopilot, Game, Tuning};

/// Simulated display rate
const FPS: f64 = 60.0;
/// Give up after this much simulated time
const MAX_SECONDS: f64 = 600.0;
/// Autopilot skill
const AUTOPILOT_CPS: f32 = 4.0;
const AUTOPILOT_MISTAKES: f32 = 0.05;

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Using default tuning ({}): {}", path, e);
            Tuning::default()
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x7a7e_a77a);
    let tuning = load_tuning(args.get(1).map(String::as_str));

    log::info!("Type Attack (headless) starting with seed {}", seed);

    let mut game = Game::new(seed, tuning);
    game.on_game_over(|score| log::info!("GAME OVER - final score {}", score));
    let mut pilot = Autopilot::new(seed ^ 0x5eed, AUTOPILOT_CPS, AUTOPILOT_MISTAKES);

    game.start();
    let frame_dt = 1.0 / FPS;
    let mut now = 0.0;
    while game.is_running() && now < MAX_SECONDS {
        game.frame(now);
        if let Some(text) = pilot.update(&game, frame_dt as f32) {
            game.handle_input(&text);
        }
        for event in game.drain_events() {
            match event {
                GameEvent::LevelUp { level } => log::info!("[{:6.1}s] level {}", now, level),
                GameEvent::CityDestroyed { city } => {
                    log::info!("[{:6.1}s] city {} lost", now, city)
                }
                other => log::debug!("[{:6.1}s] {:?}", now, other),
            }
        }
        now += frame_dt;
    }
    game.stop();

    let state = game.state();
    println!(
        "seed {}: score {}, level {}, {} words, {} cities left, {:.1}s",
        seed,
        state.score,
        state.level,
        state.words_destroyed,
        state.alive_city_count(),
        now
    );
}
