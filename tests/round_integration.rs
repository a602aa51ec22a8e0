use tempfile::tempdir;

use flappy_core::sim::{DeathCause, GameEvent, GameState, TickInput, TickOutcome, tick};
use flappy_core::{ScoreLedger, Settings};

/// Play a round to the end, returning the final score
fn play_round(state: &mut GameState, input: &TickInput, max_ticks: u32) -> Option<f32> {
    state.start_round();
    for _ in 0..max_ticks {
        if let TickOutcome::Terminated { final_score, .. } = tick(state, input) {
            return Some(final_score);
        }
    }
    None
}

#[test]
fn round_result_flows_into_ledger_and_high_score() {
    let dir = tempdir().unwrap();
    let ledger = ScoreLedger::new(dir.path().join("scores.json"));
    ledger.append("veteran", 2.0).unwrap();

    let board = ledger.load_all();
    let mut state = GameState::new(&Settings::default(), 7, board.high_score);
    assert_eq!(state.high_score, 2.0);

    // Play a round by hand: one scored pair, then crash into the floor
    state.start_round();
    state
        .pipes
        .spawn_at(400.0, state.screen_width, state.screen_height);
    let mut outcome = TickOutcome::Idle;
    for _ in 0..120 {
        state.bird.y = 320.0;
        state.bird.velocity = 0.0;
        outcome = tick(&mut state, &TickInput::default());
    }
    assert_eq!(outcome, TickOutcome::Continue { score: 1.0 });

    state.bird.y = 590.0;
    let outcome = tick(&mut state, &TickInput::default());
    let TickOutcome::Terminated { final_score, cause } = outcome else {
        panic!("expected the round to end, got {outcome:?}");
    };
    assert_eq!(final_score, 1.0);
    assert_eq!(cause, DeathCause::Floor);
    // Below the ledger's best, so the session high score stays put
    assert_eq!(state.high_score, 2.0);

    ledger.append("rookie", final_score).unwrap();
    let board = ledger.load_all();
    assert_eq!(board.players.len(), 2);
    assert_eq!(board.high_score, 2.0);
    assert_eq!(ledger.query("ROOK")[0].score, 1.0);
}

#[test]
fn autopilot_sessions_replay_identically() {
    let settings = Settings::default();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut a = GameState::new(&settings, 2024, 0.0);
    let mut b = GameState::new(&settings, 2024, 0.0);
    for _ in 0..3 {
        let ra = play_round(&mut a, &input, 5000);
        let rb = play_round(&mut b, &input, 5000);
        assert_eq!(ra, rb);
        if ra.is_none() {
            a.quit_round();
            b.quit_round();
        }
        // Idle between rounds
        for _ in 0..45 {
            assert_eq!(tick(&mut a, &input), TickOutcome::Idle);
            assert_eq!(tick(&mut b, &input), TickOutcome::Idle);
        }
    }
    assert_eq!(a.drain_events(), b.drain_events());
    assert_eq!(a.time_ticks, b.time_ticks);
}

#[test]
fn every_spawn_event_matches_a_valid_pair() {
    let mut state = GameState::new(&Settings::default(), 31337, 0.0);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    play_round(&mut state, &input, 2000);

    let gaps: Vec<f32> = state
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::PipesSpawned { gap_top } => Some(gap_top),
            _ => None,
        })
        .collect();
    assert!(!gaps.is_empty());
    assert!(gaps.iter().all(|g| (200.0..=400.0).contains(g)));
}

#[test]
fn settings_change_the_simulation() {
    let settings = Settings {
        height: 800,
        gravity: 0.5,
        jump_force: 9.0,
        ..Default::default()
    };
    let mut state = GameState::new(&settings, 1, 0.0);
    assert_eq!(state.bird.y, 400.0);

    state.start_round();
    tick(&mut state, &TickInput::default());
    assert_eq!(state.bird.velocity, 0.5);
    assert_eq!(state.bird.y, 400.5);

    tick(
        &mut state,
        &TickInput {
            jump: true,
            ..Default::default()
        },
    );
    assert_eq!(state.bird.velocity, -8.5);
}
