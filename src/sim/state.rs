//! Game state and core simulation types
//!
//! One `GameState` is one independent board session: layout, wallet, active
//! balls and the seeded RNG all live here, nothing is global.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::GameError;
use super::layout::{Board, Layout, Peg};
use super::prize::RiskLevel;
use super::scheduler::{Cooldown, Ticker};
use super::tick::GameEvent;
use super::wallet::Wallet;
use crate::centered_jitter;
use crate::consts::*;
use crate::settings::Settings;

/// A falling ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Multiplier row this ball settles against
    pub risk: RiskLevel,
    /// Stake debited when this ball was dropped
    pub bet: f64,
    /// Pegs bounced off so far
    pub peg_hits: u32,
    /// Frames spent in flight
    pub frames: u32,
}

impl Ball {
    pub fn new(id: u32, risk: RiskLevel, bet: f64) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_SIZE / 2.0,
            risk,
            bet,
            peg_hits: 0,
            frames: 0,
        }
    }

    /// Place a fresh ball at the drop point with a little random spread
    pub fn spawn(&mut self, board: &Board, rng: &mut Pcg32) {
        self.pos = Vec2::new(
            board.center_x() + centered_jitter(rng, BALL_START_JITTER_X),
            BALL_START_OFFSET_Y,
        );
        self.vel = Vec2::new(centered_jitter(rng, BALL_START_JITTER_VX), BALL_START_VY);
    }
}

/// What the renderer needs to draw one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl From<&Ball> for BallSnapshot {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.radius,
        }
    }
}

/// Complete session state (deterministic for a given seed and input timing)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) settings: Settings,
    pub(crate) layout: Layout,
    pub(crate) wallet: Wallet,
    /// Risk used by drops that do not name one
    pub(crate) risk: RiskLevel,
    /// Active balls (sorted by id for determinism)
    pub(crate) balls: Vec<Ball>,
    pub(crate) ticker: Ticker,
    pub(crate) cooldown: Cooldown,
    pub(crate) rng: Pcg32,
    /// Events produced outside a tick, reported with the next one
    pub(crate) pending_events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// New session on the default board size
    pub fn new(settings: Settings) -> Self {
        Self::with_board(settings, Board::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT))
    }

    pub fn with_board(settings: Settings, board: Board) -> Self {
        let layout = Layout::new(board, &settings.layout);
        Self {
            layout,
            wallet: Wallet::new(settings.starting_balance, settings.starting_bet),
            risk: settings.default_risk,
            balls: Vec::new(),
            ticker: Ticker::default(),
            cooldown: Cooldown::new(Duration::from_millis(settings.drop_cooldown_ms)),
            rng: Pcg32::seed_from_u64(settings.seed),
            pending_events: Vec::new(),
            time_ticks: 0,
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new ball ID
    fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Try to start a ball under `risk` at time `now`
    ///
    /// The cooldown is checked before the wallet. On success the bet is
    /// debited immediately and the loop is started if it was idle.
    pub fn try_drop_ball(&mut self, risk: RiskLevel, now: Duration) -> Result<u32, GameError> {
        if !self.cooldown.is_ready(now) {
            log::debug!("Drop throttled");
            return Err(GameError::DropThrottled);
        }
        let bet = self.wallet.debit_bet().inspect_err(|_| {
            log::debug!(
                "Drop rejected: balance {} < bet {}",
                self.wallet.balance(),
                self.wallet.bet()
            );
        })?;
        self.cooldown.trigger(now);
        self.risk = risk;

        let id = self.next_ball_id();
        let mut ball = Ball::new(id, risk, bet);
        ball.radius = self.settings.physics.ball_radius;
        ball.spawn(self.layout.board(), &mut self.rng);
        self.balls.push(ball);

        self.pending_events.push(GameEvent::BallDropped {
            ball_id: id,
            risk,
            bet,
            balance: self.wallet.balance(),
        });
        if self.ticker.start() {
            log::debug!("Loop started");
        }
        log::debug!("Dropped ball {} ({}, bet {})", id, risk, bet);

        Ok(id)
    }

    /// Regenerate the peg layout for a new board size
    ///
    /// In-flight balls are discarded without settling: their bets stay spent
    /// and nothing is credited. A size that is not positive and finite is
    /// refused and the current board kept.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), GameError> {
        if !Board::is_playable(width, height) {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return Err(GameError::InvalidBoardSize);
        }
        let discarded = self.balls.len();
        self.balls.clear();
        self.pending_events.clear();
        self.ticker.stop();
        self.layout = Layout::new(Board::new(width, height), &self.settings.layout);
        if discarded > 0 {
            log::info!("Resize discarded {} in-flight balls", discarded);
        }
        Ok(())
    }

    pub fn set_bet(&mut self, amount: f64) -> Result<(), GameError> {
        self.wallet.set_bet(amount)
    }

    pub fn set_risk(&mut self, risk: RiskLevel) {
        self.risk = risk;
    }

    #[inline]
    pub fn risk(&self) -> RiskLevel {
        self.risk
    }

    #[inline]
    pub fn balance(&self) -> f64 {
        self.wallet.balance()
    }

    #[inline]
    pub fn bet_amount(&self) -> f64 {
        self.wallet.bet()
    }

    /// Settings this session was built from
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.layout.board()
    }

    #[inline]
    pub fn pegs(&self) -> &[Peg] {
        self.layout.pegs()
    }

    #[inline]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Per-ball render data in id order
    pub fn snapshots(&self) -> Vec<BallSnapshot> {
        self.balls.iter().map(BallSnapshot::from).collect()
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}
