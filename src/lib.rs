//! Plinko Core - simulation core for a casino-style Plinko board
//!
//! Core modules:
//! - `sim`: Deterministic simulation (peg layout, ball physics, prizes, wallet, loop driver)
//! - `settings`: Data-driven tuning (physics constants, wallet defaults, payout policy)
//! - `web`: wasm-bindgen surface for the browser presentation layer

pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{PayoutRounding, PhysicsParams, Settings};

/// Game configuration constants
pub mod consts {
    /// Peg grid
    pub const PEG_ROWS: usize = 14;
    pub const PEG_SIZE: f32 = 10.0;
    pub const PEG_SPACING_HORIZONTAL: f32 = 48.0;
    pub const PEG_SPACING_VERTICAL: f32 = 38.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 16.0;
    /// Spawn height of a freshly dropped ball (pixels from board top)
    pub const BALL_START_OFFSET_Y: f32 = 15.0;
    pub const BALL_START_VY: f32 = 1.0;
    /// Full width of the uniform spawn x jitter
    pub const BALL_START_JITTER_X: f32 = 10.0;
    /// Full width of the uniform spawn vx jitter
    pub const BALL_START_JITTER_VX: f32 = 2.0;

    /// Per-tick physics (one tick per display frame, no dt scaling)
    pub const GRAVITY: f32 = 0.30;
    pub const HORIZONTAL_FRICTION: f32 = 0.99;
    pub const WALL_RESTITUTION: f32 = 0.8;
    pub const PEG_BOUNCE_HORIZONTAL_SPEED: f32 = 2.0;
    pub const PEG_BOUNCE_VERTICAL_DAMPING: f32 = 0.7;
    /// Fraction of peg penetration removed per collision
    pub const PEG_CORRECTION_FACTOR: f32 = 0.6;
    /// Full width of the uniform vx jitter added on every peg bounce
    pub const PEG_BOUNCE_JITTER: f32 = 0.5;
    /// Below this |vy| a ball sitting on top of a peg gets kicked upward
    pub const STALL_SPEED_THRESHOLD: f32 = 1.0;
    pub const STALL_KICK_VY: f32 = -1.5;
    /// Frames after which a ball still in flight is settled where it is.
    /// An edge ball can wedge between the wall and the outermost bottom-row
    /// peg (19 px gap for a 16 px ball on a 720 wide board); free balls
    /// leave in well under 800 frames.
    pub const STUCK_BALL_FRAMES: u32 = 1500;

    /// Prize slots along the board bottom
    pub const PRIZE_SLOT_COUNT: usize = 15;

    /// Wallet defaults
    pub const STARTING_BALANCE: f64 = 300.0;
    pub const STARTING_BET: f64 = 300.0;

    /// Minimum time between accepted drops (milliseconds)
    pub const DROP_COOLDOWN_MS: u64 = 100;

    /// Board size used before the host reports its first resize
    pub const DEFAULT_BOARD_WIDTH: f32 = 720.0;
    pub const DEFAULT_BOARD_HEIGHT: f32 = 640.0;
}

/// Symmetric uniform sample in `[-width/2, width/2)`
#[inline]
pub fn centered_jitter<R: rand::Rng>(rng: &mut R, width: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * width
}
