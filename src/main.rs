//! Flappy Core headless entry point
//!
//! Plays autopilot rounds against the real settings and score files:
//!
//! ```text
//! flappy-core [player] [rounds]
//! ```
//!
//! Reads `config.json` and `scores.json` from the working directory. Set
//! `RUST_LOG=info` (or `debug`) to follow along.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use flappy_core::consts::LEADERBOARD_SIZE;
use flappy_core::sim::{GameEvent, GameState, TickInput, TickOutcome, tick};
use flappy_core::{ScoreLedger, Settings};

const CONFIG_FILE: &str = "config.json";
const SCORES_FILE: &str = "scores.json";

/// Longest round the demo will play before quitting it (in seconds)
const MAX_ROUND_SECS: u64 = 300;

fn main() {
    env_logger::init();
    log::info!("Flappy Core (headless) starting...");

    let mut args = std::env::args().skip(1);
    let player = args.next().unwrap_or_else(|| "autopilot".to_string());
    let rounds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    let settings = Settings::load(Path::new(CONFIG_FILE));
    let ledger = ScoreLedger::new(SCORES_FILE);
    let board = ledger.load_all();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(&settings, seed, board.high_score);
    log::info!("Game initialized with seed: {}", seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let max_ticks = MAX_ROUND_SECS * u64::from(settings.fps.max(1));

    for round in 1..=rounds {
        // A second of "menu" time: the spawn clock keeps running
        for _ in 0..settings.fps {
            tick(&mut state, &input);
        }

        state.start_round();
        let mut result = None;
        for _ in 0..max_ticks {
            if let TickOutcome::Terminated { final_score, cause } = tick(&mut state, &input) {
                result = Some((final_score, cause));
                break;
            }
        }

        for event in state.drain_events() {
            if let GameEvent::RoundOver {
                new_high_score: true,
                final_score,
                ..
            } = event
            {
                log::info!("New high score: {}", final_score);
            }
        }

        match result {
            Some((final_score, cause)) => {
                println!("Round {round}: {final_score} ({cause:?})");
                if let Err(e) = ledger.append(&player, final_score) {
                    log::warn!("Score not recorded: {e}");
                }
            }
            None => {
                state.quit_round();
                println!("Round {round}: still flying after {MAX_ROUND_SECS}s, not recorded");
            }
        }
    }

    let board = ledger.load_all();
    println!("\nTop {LEADERBOARD_SIZE}:");
    for (i, record) in board.top(LEADERBOARD_SIZE).iter().enumerate() {
        println!("{:>2}. {:<16} {}", i + 1, record.name, record.score);
    }
    println!("Average: {}", board.average_score());
    println!("{player} best: {:?}", board.query(&player).first().map(|r| r.score));
}
