//! The coin balance.

use crate::error::{Error, Result};

/// How many coins a single click is worth.
pub const COINS_PER_CLICK: u64 = 100;

/// The player's coin balance.
///
/// The balance is unsigned, and [`Self::spend`] refuses to go below zero, so it can never be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    coins: u64,
}

impl Wallet {
    pub fn with_coins(coins: u64) -> Self {
        Self { coins }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Add coins to the balance, returning the new balance.
    pub fn earn(&mut self, amount: u64) -> u64 {
        self.coins = self.coins.saturating_add(amount);
        self.coins
    }

    /// Take coins out of the balance, returning the new balance.
    ///
    /// If there aren't enough coins, nothing is taken.
    pub fn spend(&mut self, amount: u64) -> Result<u64> {
        if self.coins < amount {
            return Err(Error::InsufficientCoins {
                needed: amount,
                available: self.coins,
            });
        }
        self.coins -= amount;
        Ok(self.coins)
    }

    /// How many more coins are needed before `amount` can be spent. Zero if it already can.
    pub fn shortfall(&self, amount: u64) -> u64 {
        amount.saturating_sub(self.coins)
    }
}
