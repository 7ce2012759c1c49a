//! Host-facing simulation driver
//!
//! Wraps a `GameState` with a clock so the UI can call `drop_ball` without
//! passing timestamps, and `on_frame` from its refresh callback. A frame
//! that arrives while the ticker is stopped (stale callback after a resize,
//! or a host that keeps polling) is a no-op.

use super::GameError;
use super::layout::{Board, Peg};
use super::prize::RiskLevel;
use super::scheduler::{Clock, SystemClock};
use super::state::{BallSnapshot, GameState};
use super::tick::{TickReport, tick};
use crate::settings::Settings;

pub struct Simulation<C: Clock = SystemClock> {
    state: GameState,
    clock: C,
}

impl Simulation<SystemClock> {
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, SystemClock::new())
    }
}

impl<C: Clock> Simulation<C> {
    pub fn with_clock(settings: Settings, clock: C) -> Self {
        Self {
            state: GameState::new(settings),
            clock,
        }
    }

    /// Start a ball under `risk`; false if throttled or unaffordable
    pub fn drop_ball(&mut self, risk: RiskLevel) -> bool {
        self.try_drop_ball(risk).is_ok()
    }

    /// Start a ball under `risk`, returning its id or why it was refused
    pub fn try_drop_ball(&mut self, risk: RiskLevel) -> Result<u32, GameError> {
        let now = self.clock.now();
        self.state.try_drop_ball(risk, now)
    }

    /// Drop under the currently selected risk level
    pub fn drop_ball_current_risk(&mut self) -> bool {
        self.drop_ball(self.state.risk())
    }

    /// Advance one frame if the loop is running
    ///
    /// Returns `None` when idle; the host should stop requesting frames once
    /// a report comes back with `running == false`.
    pub fn on_frame(&mut self) -> Option<TickReport> {
        if !self.state.is_running() {
            return None;
        }
        Some(tick(&mut self.state))
    }

    /// Tick until idle or `max_frames` have run, returning every report
    pub fn run_until_idle(&mut self, max_frames: usize) -> Vec<TickReport> {
        let mut reports = Vec::new();
        while reports.len() < max_frames {
            match self.on_frame() {
                Some(report) => reports.push(report),
                None => break,
            }
        }
        if self.state.is_running() {
            log::warn!(
                "Still {} balls in flight after {} frames",
                self.state.balls().len(),
                max_frames
            );
        }
        reports
    }

    /// New board size from the host; regenerates pegs and drops in-flight balls
    pub fn on_resize(&mut self, width: f32, height: f32) -> Result<(), GameError> {
        self.state.resize(width, height)
    }

    pub fn set_bet(&mut self, amount: f64) -> Result<(), GameError> {
        self.state.set_bet(amount)
    }

    pub fn set_risk(&mut self, risk: RiskLevel) {
        self.state.set_risk(risk);
    }

    pub fn risk(&self) -> RiskLevel {
        self.state.risk()
    }

    pub fn balance(&self) -> f64 {
        self.state.balance()
    }

    pub fn bet_amount(&self) -> f64 {
        self.state.bet_amount()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn pegs(&self) -> &[Peg] {
        self.state.pegs()
    }

    pub fn snapshots(&self) -> Vec<BallSnapshot> {
        self.state.snapshots()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }
}
