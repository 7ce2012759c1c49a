//! Game tuning and session defaults
//!
//! Everything here is plain data with serde defaults, so a host can ship a
//! partial JSON override and inherit the rest from `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::RiskLevel;

/// How a payout is rounded before it is credited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayoutRounding {
    /// Keep fractional currency (`bet * multiplier` as-is)
    #[default]
    Fractional,
    /// Round to the nearest whole currency unit
    WholeUnits,
}

impl PayoutRounding {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutRounding::Fractional => "fractional",
            PayoutRounding::WholeUnits => "whole_units",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fractional" | "frac" => Some(PayoutRounding::Fractional),
            "whole_units" | "whole" | "integer" => Some(PayoutRounding::WholeUnits),
            _ => None,
        }
    }

    /// Apply the policy to a raw payout
    #[inline]
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            PayoutRounding::Fractional => raw,
            PayoutRounding::WholeUnits => raw.round(),
        }
    }
}

/// Per-tick physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub gravity: f32,
    pub horizontal_friction: f32,
    pub wall_restitution: f32,
    pub peg_bounce_horizontal_speed: f32,
    pub peg_bounce_vertical_damping: f32,
    pub peg_correction_factor: f32,
    pub peg_bounce_jitter: f32,
    pub stall_speed_threshold: f32,
    pub stall_kick_vy: f32,
    pub ball_radius: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            horizontal_friction: HORIZONTAL_FRICTION,
            wall_restitution: WALL_RESTITUTION,
            peg_bounce_horizontal_speed: PEG_BOUNCE_HORIZONTAL_SPEED,
            peg_bounce_vertical_damping: PEG_BOUNCE_VERTICAL_DAMPING,
            peg_correction_factor: PEG_CORRECTION_FACTOR,
            peg_bounce_jitter: PEG_BOUNCE_JITTER,
            stall_speed_threshold: STALL_SPEED_THRESHOLD,
            stall_kick_vy: STALL_KICK_VY,
            ball_radius: BALL_SIZE / 2.0,
        }
    }
}

/// Peg grid shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    pub rows: usize,
    pub peg_radius: f32,
    pub spacing_horizontal: f32,
    pub spacing_vertical: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            rows: PEG_ROWS,
            peg_radius: PEG_SIZE / 2.0,
            spacing_horizontal: PEG_SPACING_HORIZONTAL,
            spacing_vertical: PEG_SPACING_VERTICAL,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for drop and bounce jitter
    pub seed: u64,

    // === Simulation ===
    pub physics: PhysicsParams,
    pub layout: LayoutParams,
    /// Settle a ball at its current x after this many frames in flight
    /// (`null` lets a wedged ball bounce forever)
    pub stuck_ball_frames: Option<u32>,

    // === Wallet ===
    pub starting_balance: f64,
    pub starting_bet: f64,
    pub default_risk: RiskLevel,
    pub payout_rounding: PayoutRounding,

    // === Admission ===
    /// Minimum time between accepted drops
    pub drop_cooldown_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            physics: PhysicsParams::default(),
            layout: LayoutParams::default(),
            stuck_ball_frames: Some(STUCK_BALL_FRAMES),

            starting_balance: STARTING_BALANCE,
            starting_bet: STARTING_BET,
            default_risk: RiskLevel::High,
            payout_rounding: PayoutRounding::Fractional,

            drop_cooldown_ms: DROP_COOLDOWN_MS,
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        log::info!(
            "Loaded settings (seed {}, {} rows, payout {})",
            settings.seed,
            settings.layout.rows,
            settings.payout_rounding.as_str()
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
