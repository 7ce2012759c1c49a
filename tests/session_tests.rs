use std::time::Duration;

use plinko_core::consts::*;
use plinko_core::settings::{PayoutRounding, Settings};
use plinko_core::sim::{
    GameError, GameEvent, ManualClock, Outcome, RiskLevel, Simulation, peg_count, resolve_prize,
};

fn session(seed: u64) -> (Simulation<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let sim = Simulation::with_clock(Settings::with_seed(seed), clock.clone());
    (sim, clock)
}

#[test]
fn drop_with_insufficient_balance_is_rejected() {
    let (mut sim, _) = session(1);
    sim.set_bet(301.0).expect("positive bet");

    assert_eq!(
        sim.try_drop_ball(RiskLevel::High),
        Err(GameError::InsufficientBalance)
    );
    assert_eq!(sim.balance(), STARTING_BALANCE);
    assert!(!sim.is_running());
    assert!(sim.on_frame().is_none());
}

#[test]
fn double_drop_inside_cooldown_yields_one_ball() {
    let (mut sim, clock) = session(2);
    sim.set_bet(10.0).expect("positive bet");

    assert!(sim.drop_ball(RiskLevel::Low));
    clock.advance(Duration::from_millis(DROP_COOLDOWN_MS / 2));
    assert!(!sim.drop_ball(RiskLevel::Low));

    let report = sim.on_frame().expect("loop running");
    assert_eq!(report.balls.len(), 1);
    assert_eq!(sim.balance(), STARTING_BALANCE - 10.0);
}

#[test]
fn invalid_bet_keeps_previous_amount() {
    let (mut sim, _) = session(3);
    sim.set_bet(40.0).expect("positive bet");
    assert_eq!(sim.set_bet(-1.0), Err(GameError::InvalidBetAmount));
    assert_eq!(sim.set_bet(f64::NAN), Err(GameError::InvalidBetAmount));
    assert_eq!(sim.bet_amount(), 40.0);
}

#[test]
fn end_to_end_high_risk_edge_slot() {
    let s = resolve_prize(700.0, 720.0, RiskLevel::High, 10.0, PayoutRounding::Fractional);
    assert_eq!((s.slot, s.multiplier, s.payout), (14, 353.0, 3530.0));
}

#[test]
fn end_to_end_low_risk_center_slot() {
    let s = resolve_prize(360.0, 720.0, RiskLevel::Low, 10.0, PayoutRounding::Fractional);
    assert_eq!((s.slot, s.multiplier), (7, 0.5));
    assert_eq!(s.outcome, Outcome::PartialReturn);
}

#[test]
fn resize_regenerates_pegs_and_discards_flight() {
    let (mut sim, clock) = session(4);
    sim.set_bet(25.0).expect("positive bet");
    for _ in 0..3 {
        assert!(sim.drop_ball(RiskLevel::Medium));
        sim.on_frame();
        clock.advance(Duration::from_millis(DROP_COOLDOWN_MS));
    }
    let before = sim.balance();

    sim.on_resize(960.0, 800.0).expect("playable size");

    assert_eq!(sim.pegs().len(), peg_count(PEG_ROWS));
    assert_eq!(sim.pegs().len(), PEG_ROWS * (PEG_ROWS + 3) / 2);
    assert_eq!(sim.board().width, 960.0);
    assert!(sim.snapshots().is_empty());
    assert!(sim.on_frame().is_none());
    assert_eq!(sim.balance(), before);

    // The board is usable straight away on the new size
    assert!(sim.drop_ball(RiskLevel::Medium));
    let reports = sim.run_until_idle(5000);
    assert_eq!(reports.iter().flat_map(|r| r.exits()).count(), 1);
}

#[test]
fn non_finite_resize_keeps_board() {
    let (mut sim, _) = session(5);
    assert!(sim.drop_ball(RiskLevel::Low));

    assert_eq!(
        sim.on_resize(f32::NAN, 640.0),
        Err(GameError::InvalidBoardSize)
    );
    assert_eq!(sim.on_resize(-50.0, 640.0), Err(GameError::InvalidBoardSize));
    assert_eq!(sim.board().width, DEFAULT_BOARD_WIDTH);
    assert!(sim.is_running());

    let reports = sim.run_until_idle(STUCK_BALL_FRAMES as usize);
    assert_eq!(reports.iter().flat_map(|r| r.exits()).count(), 1);
}

#[test]
fn wedged_edge_balls_do_not_hold_the_loop() {
    // Single drops that used to bounce between a wall and the outermost
    // bottom-row peg forever
    for seed in [60, 104, 221, 452, 1472, 1668, 1910, 2023, 2549] {
        let (mut sim, _) = session(seed);
        sim.set_bet(1.0).expect("positive bet");
        assert!(sim.drop_ball(RiskLevel::Medium));

        let reports = sim.run_until_idle(20_000);
        assert!(!sim.is_running(), "seed {seed}");
        let exits: Vec<_> = reports.iter().flat_map(|r| r.exits()).collect();
        assert_eq!(exits.len(), 1);
        assert!((sim.balance() - (STARTING_BALANCE - 1.0 + exits[0].payout)).abs() < 1e-9);
    }
}

#[test]
fn batch_settles_every_ball_and_conserves_money() {
    let (mut sim, clock) = session(2024);
    sim.set_bet(1.0).expect("positive bet");

    let mut reports = Vec::new();
    for _ in 0..20 {
        assert!(sim.drop_ball(RiskLevel::High));
        // Interleave a few frames so several balls share the board
        for _ in 0..6 {
            reports.extend(sim.on_frame());
        }
        clock.advance(Duration::from_millis(DROP_COOLDOWN_MS));
    }
    reports.extend(sim.run_until_idle(10_000));
    assert!(!sim.is_running());

    let exits: Vec<_> = reports.iter().flat_map(|r| r.exits()).collect();
    assert_eq!(exits.len(), 20);
    let paid: f64 = exits.iter().map(|e| e.payout).sum();
    assert!((sim.balance() - (STARTING_BALANCE - 20.0 + paid)).abs() < 1e-9);

    let settled = reports
        .iter()
        .flat_map(|r| r.events.iter())
        .filter(|e| matches!(e, GameEvent::AllSettled { .. }))
        .count();
    assert_eq!(settled, 1);
}
