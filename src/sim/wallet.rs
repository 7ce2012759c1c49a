//! Player balance and stake
//!
//! Balance only moves through `debit_bet` (on drop) and `credit` (on
//! settlement); the bet only changes through `set_bet`.

use serde::{Deserialize, Serialize};

use super::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    balance: f64,
    bet: f64,
}

impl Wallet {
    pub fn new(balance: f64, bet: f64) -> Self {
        Self { balance, bet }
    }

    #[inline]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    #[inline]
    pub fn bet(&self) -> f64 {
        self.bet
    }

    /// Whether the current bet is covered by the balance
    #[inline]
    pub fn can_afford(&self) -> bool {
        self.balance >= self.bet
    }

    /// Change the stake; non-finite or non-positive amounts keep the old bet
    pub fn set_bet(&mut self, amount: f64) -> Result<(), GameError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(GameError::InvalidBetAmount);
        }
        self.bet = amount;
        Ok(())
    }

    /// Take the current bet out of the balance, returning the amount staked
    pub fn debit_bet(&mut self) -> Result<f64, GameError> {
        if !self.can_afford() {
            return Err(GameError::InsufficientBalance);
        }
        self.balance -= self.bet;
        Ok(self.bet)
    }

    pub fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }
}

/// Parse a bet typed by the player
///
/// Accepts a leading positive integer (`"250"`, `" 40 "`, `"12abc"`), the way
/// the bet dialog's custom field has always behaved. The digit run is read as
/// an `f64`, so integers past `u64::MAX` still parse (with float precision);
/// only a run too long to be finite is refused.
pub fn parse_bet(input: &str) -> Result<f64, GameError> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix(['+', '-']) {
        Some(rest) => (&trimmed[..1], rest),
        None => ("", trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || sign == "-" {
        return Err(GameError::InvalidBetAmount);
    }

    let amount: f64 = digits[..end]
        .parse()
        .map_err(|_| GameError::InvalidBetAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(GameError::InvalidBetAmount);
    }
    Ok(amount)
}
