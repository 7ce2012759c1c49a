//! Deterministic simulation module
//!
//! All board logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no delta-time scaling
//! - Seeded RNG only
//! - Stable iteration order (by ball ID, pegs in layout order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod driver;
pub mod error;
pub mod layout;
pub mod physics;
pub mod prize;
pub mod scheduler;
pub mod state;
pub mod tick;
pub mod wallet;

pub use collision::{CollisionResult, WallHit, ball_peg_collision, first_peg_collision};
pub use driver::Simulation;
pub use error::GameError;
pub use layout::{Board, Layout, Peg, generate_layout, peg_count};
pub use physics::{StepOutcome, advance};
pub use prize::{Outcome, PrizeTable, RiskLevel, Settlement, resolve_prize, slot_index};
pub use scheduler::{Clock, Cooldown, ManualClock, SystemClock, Ticker};
pub use state::{Ball, BallSnapshot, GameState};
pub use tick::{BallExit, GameEvent, TickReport, tick};
pub use wallet::{Wallet, parse_bet};
