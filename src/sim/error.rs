//! Rejections reported back to the UI
//!
//! None of these are fatal: the rejected operation leaves state untouched and
//! can simply be retried.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameError {
    /// Balance does not cover the current bet
    InsufficientBalance,
    /// Bet change was non-numeric or not positive
    InvalidBetAmount,
    /// Drop arrived inside the cooldown window
    DropThrottled,
    /// Risk label is not one of low/medium/high
    UnknownRiskLevel,
    /// Resize to a width or height that is not a positive finite number
    InvalidBoardSize,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InsufficientBalance => write!(f, "insufficient balance for current bet"),
            GameError::InvalidBetAmount => write!(f, "bet amount must be a positive number"),
            GameError::DropThrottled => write!(f, "drop rejected during cooldown"),
            GameError::UnknownRiskLevel => write!(f, "risk level must be low, medium or high"),
            GameError::InvalidBoardSize => {
                write!(f, "board width and height must be positive numbers")
            }
        }
    }
}

impl std::error::Error for GameError {}
