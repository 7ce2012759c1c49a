//! Per-frame simulation tick
//!
//! Advances every active ball once, settles balls that fell out of the
//! board, and stops the ticker when nothing is left in flight.

use serde::{Deserialize, Serialize};

use super::physics::advance;
use super::prize::{Outcome, RiskLevel, resolve_prize};
use super::state::{BallSnapshot, GameState};

/// Things the UI may want to react to (sounds, messages)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    BallDropped {
        ball_id: u32,
        risk: RiskLevel,
        bet: f64,
        balance: f64,
    },
    PegHit {
        ball_id: u32,
        peg: usize,
    },
    BallExited(BallExit),
    /// Last ball settled; the loop is idle again
    AllSettled {
        balance: f64,
    },
}

/// Settlement of one ball leaving the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallExit {
    pub ball_id: u32,
    pub final_x: f32,
    pub slot: usize,
    pub multiplier: f64,
    pub payout: f64,
    pub new_balance: f64,
    pub outcome: Outcome,
    /// Settled in place after the stuck-ball frame limit
    pub stuck: bool,
}

/// Everything produced by one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Balls still in flight after this tick
    pub balls: Vec<BallSnapshot>,
    pub events: Vec<GameEvent>,
    /// Whether another frame should be scheduled
    pub running: bool,
}

impl TickReport {
    pub fn exits(&self) -> impl Iterator<Item = &BallExit> {
        self.events.iter().filter_map(|e| match e {
            GameEvent::BallExited(exit) => Some(exit),
            _ => None,
        })
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState) -> TickReport {
    let mut events = std::mem::take(&mut state.pending_events);

    state.normalize_order();
    state.time_ticks += 1;

    let layout = &state.layout;
    let params = &state.settings.physics;
    let rounding = state.settings.payout_rounding;
    let stuck_limit = state.settings.stuck_ball_frames;
    let rng = &mut state.rng;
    let wallet = &mut state.wallet;

    state.balls.retain_mut(|ball| {
        let step = advance(ball, layout, params, &mut *rng);
        ball.frames += 1;

        if let Some(peg) = step.collided_peg {
            log::trace!("Ball {} hit peg {}", ball.id, peg);
            events.push(GameEvent::PegHit {
                ball_id: ball.id,
                peg,
            });
        }

        let stuck = !step.exited && stuck_limit.is_some_and(|limit| ball.frames >= limit);
        if !step.exited && !stuck {
            return true;
        }
        if stuck {
            log::warn!(
                "Ball {} still in flight after {} frames at ({:.1}, {:.1}), settling in place",
                ball.id,
                ball.frames,
                ball.pos.x,
                ball.pos.y
            );
        }

        let settlement = resolve_prize(
            ball.pos.x,
            layout.board().width,
            ball.risk,
            ball.bet,
            rounding,
        );
        wallet.credit(settlement.payout);
        log::debug!(
            "Ball {} settled in slot {} (x{}): payout {} after {} peg hits",
            ball.id,
            settlement.slot,
            settlement.multiplier,
            settlement.payout,
            ball.peg_hits
        );

        events.push(GameEvent::BallExited(BallExit {
            ball_id: ball.id,
            final_x: ball.pos.x,
            slot: settlement.slot,
            multiplier: settlement.multiplier,
            payout: settlement.payout,
            new_balance: wallet.balance(),
            outcome: settlement.outcome,
            stuck,
        }));
        false
    });

    if state.balls.is_empty() && state.ticker.stop() {
        log::debug!("Loop idle, balance {}", state.wallet.balance());
        events.push(GameEvent::AllSettled {
            balance: state.wallet.balance(),
        });
    }

    TickReport {
        tick: state.time_ticks,
        balls: state.snapshots(),
        events,
        running: state.ticker.is_running(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::time::Duration;

    /// Tick until idle, collecting every report
    fn run_to_idle(state: &mut GameState, max_ticks: usize) -> Vec<TickReport> {
        let mut reports = Vec::new();
        while state.is_running() && reports.len() < max_ticks {
            reports.push(tick(state));
        }
        reports
    }

    #[test]
    fn test_single_ball_settles_and_goes_idle() {
        let mut state = GameState::new(Settings::with_seed(12345));
        state.set_bet(10.0).unwrap();
        state.try_drop_ball(RiskLevel::Low, Duration::ZERO).unwrap();
        let balance_after_debit = state.balance();

        let reports = run_to_idle(&mut state, 5000);
        assert!(!state.is_running(), "ball never left the board");

        let first = &reports[0];
        assert!(matches!(first.events[0], GameEvent::BallDropped { ball_id: 1, .. }));

        let exits: Vec<_> = reports.iter().flat_map(|r| r.exits()).collect();
        assert_eq!(exits.len(), 1);
        let exit = exits[0];
        assert!(exit.slot < 15);
        assert!((exit.payout - 10.0 * exit.multiplier).abs() < 1e-9);
        assert!((state.balance() - (balance_after_debit + exit.payout)).abs() < 1e-9);
        assert_eq!(exit.new_balance, state.balance());

        let last = reports.last().unwrap();
        assert!(!last.running);
        assert!(last.balls.is_empty());
        assert!(matches!(last.events.last(), Some(GameEvent::AllSettled { .. })));
    }

    #[test]
    fn test_multi_ball_each_settles_once() {
        let mut state = GameState::new(Settings::with_seed(7));
        state.set_bet(5.0).unwrap();
        for i in 0..5u64 {
            state
                .try_drop_ball(RiskLevel::Medium, Duration::from_millis(i * 100))
                .unwrap();
            tick(&mut state);
        }

        let reports = run_to_idle(&mut state, 5000);
        let mut exited: Vec<u32> = reports
            .iter()
            .flat_map(|r| r.exits().map(|e| e.ball_id))
            .collect();
        exited.sort();
        // Balls 1..=5; a ball can't exit within its first 5 ticks
        assert_eq!(exited, vec![1, 2, 3, 4, 5]);

        let settled = reports
            .iter()
            .flat_map(|r| r.events.iter())
            .filter(|e| matches!(e, GameEvent::AllSettled { .. }))
            .count();
        assert_eq!(settled, 1);
    }

    #[test]
    fn test_balls_hit_pegs_on_the_way_down() {
        let mut state = GameState::new(Settings::with_seed(99));
        state.set_bet(1.0).unwrap();
        state.try_drop_ball(RiskLevel::High, Duration::ZERO).unwrap();

        let reports = run_to_idle(&mut state, 5000);
        let hits = reports
            .iter()
            .flat_map(|r| r.events.iter())
            .filter(|e| matches!(e, GameEvent::PegHit { ball_id: 1, .. }))
            .count();
        // Dropped over the apex pair, it has to touch the grid
        assert!(hits > 0);
    }

    #[test]
    fn test_determinism() {
        let run = |seed: u64| {
            let mut state = GameState::new(Settings::with_seed(seed));
            state.set_bet(10.0).unwrap();
            for i in 0..3u64 {
                state
                    .try_drop_ball(RiskLevel::High, Duration::from_millis(i * 150))
                    .unwrap();
                for _ in 0..10 {
                    tick(&mut state);
                }
            }
            run_to_idle(&mut state, 5000);
            state.balance()
        };

        assert_eq!(run(2024), run(2024));
    }

    /// Gravity-free ball that drifts down at 1 px per frame, far from any peg
    /// for the first few dozen frames
    fn floating_state(stuck_ball_frames: Option<u32>) -> GameState {
        let mut settings = Settings::with_seed(3);
        settings.physics.gravity = 0.0;
        settings.stuck_ball_frames = stuck_ball_frames;
        let mut state = GameState::new(settings);
        state.set_bet(10.0).unwrap();
        state.try_drop_ball(RiskLevel::Low, Duration::ZERO).unwrap();
        state
    }

    #[test]
    fn test_stuck_limit_settles_ball_in_place() {
        let mut state = floating_state(Some(20));

        let reports = run_to_idle(&mut state, 100);
        assert_eq!(reports.len(), 20);
        let before_last = &reports[18].balls[0];

        let exits: Vec<_> = reports.iter().flat_map(|r| r.exits()).collect();
        assert_eq!(exits.len(), 1);
        let exit = exits[0];
        assert!(exit.stuck);
        assert!((exit.final_x - before_last.x).abs() < 1.5);
        assert!((state.balance() - (290.0 + exit.payout)).abs() < 1e-9);
        assert!(matches!(
            reports.last().unwrap().events.last(),
            Some(GameEvent::AllSettled { .. })
        ));
    }

    #[test]
    fn test_stuck_limit_disabled_keeps_ball() {
        let mut state = floating_state(None);
        for _ in 0..40 {
            tick(&mut state);
        }
        assert!(state.is_running());
        assert_eq!(state.balls()[0].frames, 40);
    }

    #[test]
    fn test_report_serializes_for_host() {
        let mut state = GameState::new(Settings::with_seed(5));
        state.try_drop_ball(RiskLevel::High, Duration::ZERO).unwrap();
        let report = tick(&mut state);
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(json.contains("\"type\":\"ball_dropped\""));
        assert!(json.contains("\"risk\":\"high\""));
    }
}
