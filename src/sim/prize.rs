//! Prize slots and payout resolution
//!
//! The board bottom is split into `PRIZE_SLOT_COUNT` equal slots. Each risk
//! level has its own multiplier row, symmetric about the center slot, which
//! always holds the row's lowest multiplier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GameError;
use crate::consts::PRIZE_SLOT_COUNT;
use crate::settings::PayoutRounding;

/// Risk level selecting a multiplier row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    #[default]
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "med" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(GameError::UnknownRiskLevel),
        }
    }
}

/// Multiplier rows, one per risk level
pub struct PrizeTable;

impl PrizeTable {
    const LOW: [f64; PRIZE_SLOT_COUNT] = [
        18.0, 3.2, 1.6, 1.3, 1.2, 1.1, 1.0, 0.5, 1.0, 1.1, 1.2, 1.3, 1.6, 3.2, 18.0,
    ];
    const MEDIUM: [f64; PRIZE_SLOT_COUNT] = [
        55.0, 12.0, 5.6, 3.2, 1.6, 1.0, 0.7, 0.2, 0.7, 1.0, 1.6, 3.2, 5.6, 12.0, 55.0,
    ];
    const HIGH: [f64; PRIZE_SLOT_COUNT] = [
        353.0, 49.0, 14.0, 5.3, 2.1, 0.5, 0.2, 0.0, 0.2, 0.5, 2.1, 5.3, 14.0, 49.0, 353.0,
    ];

    /// Full multiplier row for a risk level (left to right)
    pub fn multipliers(risk: RiskLevel) -> &'static [f64; PRIZE_SLOT_COUNT] {
        match risk {
            RiskLevel::Low => &Self::LOW,
            RiskLevel::Medium => &Self::MEDIUM,
            RiskLevel::High => &Self::HIGH,
        }
    }

    #[inline]
    pub fn multiplier(risk: RiskLevel, slot: usize) -> f64 {
        Self::multipliers(risk)[slot.min(PRIZE_SLOT_COUNT - 1)]
    }
}

/// How a settlement compares to the stake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Paid more than the bet
    Win,
    /// Paid something back, at most the bet
    PartialReturn,
    /// Paid nothing
    Loss,
}

impl Outcome {
    pub fn classify(payout: f64, bet: f64) -> Self {
        if payout > bet {
            Outcome::Win
        } else if payout > 0.0 {
            Outcome::PartialReturn
        } else {
            Outcome::Loss
        }
    }
}

/// Result of resolving a ball's landing position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub slot: usize,
    pub multiplier: f64,
    pub payout: f64,
    pub outcome: Outcome,
}

/// Slot under a horizontal position, clamped into `[0, PRIZE_SLOT_COUNT)`
///
/// Positions left of the board (and NaN) land in slot 0, positions at or past
/// the right edge land in the last slot.
pub fn slot_index(final_x: f32, board_width: f32) -> usize {
    let slot_width = board_width / PRIZE_SLOT_COUNT as f32;
    let raw = (final_x / slot_width).floor();
    // `as usize` saturates: negatives and NaN become 0
    (raw as usize).min(PRIZE_SLOT_COUNT - 1)
}

/// Map a landing position to a multiplier and payout
pub fn resolve_prize(
    final_x: f32,
    board_width: f32,
    risk: RiskLevel,
    bet: f64,
    rounding: PayoutRounding,
) -> Settlement {
    let slot = slot_index(final_x, board_width);
    let multiplier = PrizeTable::multiplier(risk, slot);
    let payout = rounding.apply(bet * multiplier);

    Settlement {
        slot,
        multiplier,
        payout,
        outcome: Outcome::classify(payout, bet),
    }
}
