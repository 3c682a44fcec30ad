//! Contains the storage backends and the [`Store`] which keeps the game state mirrored into them.
//!
//! Storage is deliberately dumb: a handful of string keys, each holding a string value. The game state is spread
//! across two of them:
//!
//! - [`COINS_KEY`] holds the balance as a decimal integer
//! - [`REDEMPTIONS_KEY`] holds the redemption history as a JSON array, newest first
//!
//! Every change to the state is written through immediately, so there's no "save" step to forget.

pub mod fs;
pub mod memory;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    redemption::{History, Redemption},
    state::GameState,
    tiers::Tier,
    wallet::{Wallet, COINS_PER_CLICK},
};

pub const COINS_KEY: &str = "coins";
pub const REDEMPTIONS_KEY: &str = "redemptions";

/// A persistent string-keyed, string-valued store.
pub trait Storage: Send {
    /// Read a key, returning `None` if it's never been set.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Overwrite a key.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Delete a key. Deleting one that doesn't exist isn't an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

fn corrupt(key: &str, reason: impl ToString) -> Error {
    Error::Corrupt {
        key: key.into(),
        reason: reason.to_string(),
    }
}

/// The game state, plus where it's being saved to.
pub struct Store<S: Storage> {
    state: GameState,
    storage: S,
}

impl<S: Storage> Store<S> {
    /// Load the game state out of `storage`. Missing keys mean a fresh game.
    pub fn load(storage: S) -> Result<Self> {
        let coins = match storage.get(COINS_KEY)? {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| corrupt(COINS_KEY, e))?,
            None => 0,
        };
        let history = match storage.get(REDEMPTIONS_KEY)? {
            Some(raw) => serde_json::from_str::<History>(&raw).map_err(|e| corrupt(REDEMPTIONS_KEY, e))?,
            None => History::default(),
        };
        debug!(coins, redemptions = history.len(), "loaded save");
        Ok(Self {
            state: GameState {
                wallet: Wallet::with_coins(coins),
                history,
            },
            storage,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn write_coins(&mut self) -> Result<()> {
        let raw = self.state.wallet.coins().to_string();
        self.storage.set(COINS_KEY, &raw)
    }

    fn write_history(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.state.history).map_err(|e| corrupt(REDEMPTIONS_KEY, e))?;
        self.storage.set(REDEMPTIONS_KEY, &raw)
    }

    /// Earn the coins for one click. Returns the new balance.
    ///
    /// If the balance can't be saved, the click doesn't count.
    pub fn click(&mut self) -> Result<u64> {
        let before = self.state.wallet;
        let coins = self.state.wallet.earn(COINS_PER_CLICK);
        if let Err(e) = self.write_coins() {
            warn!(error = %e, "failed to save balance");
            self.state.wallet = before;
            return Err(e);
        }
        Ok(coins)
    }

    /// Cash in `tier`, paying out to `email`.
    ///
    /// Fails without changing anything if the wallet can't cover the tier, or if the result can't be saved.
    /// Otherwise the coins are spent and the redemption recorded, newest first.
    pub fn redeem(&mut self, tier: &Tier, email: &str, at: DateTime<Utc>) -> Result<Redemption> {
        let before = self.state.clone();
        self.state.wallet.spend(tier.coins)?;
        self.state.history.record(Redemption::completed(tier, email, at));
        if let Err(e) = self.write_coins().and_then(|()| self.write_history()) {
            warn!(error = %e, tier = tier.id, "failed to save redemption, rolling back");
            self.state = before;
            // best effort: the balance may already have been written
            if let Err(e) = self.write_coins() {
                warn!(error = %e, "failed to restore saved balance after rollback");
            }
            return Err(e);
        }
        let newest = self.state.history.entries()[0].clone();
        info!(id = %newest.id, tier = tier.id, cash = tier.cash, "redeemed");
        Ok(newest)
    }

    /// Start a fresh game in `storage` without reading what's there first, so even a corrupt save can be
    /// thrown away.
    pub fn wipe(mut storage: S) -> Result<Self> {
        Self::clear(&mut storage)?;
        info!("save wiped");
        Ok(Self {
            state: GameState::default(),
            storage,
        })
    }

    fn clear(storage: &mut S) -> Result<()> {
        storage.remove(COINS_KEY)?;
        storage.remove(REDEMPTIONS_KEY)
    }
}
