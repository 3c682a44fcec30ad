//! A console coin clicker: click for coins, cash them in at fixed tiers for a (simulated) PayPal payout, and look
//! back over what you've redeemed. Everything is saved locally as you go.

pub mod agents;
pub mod app;
pub mod config;
pub mod email;
pub mod error;
pub mod event;
pub mod frontend;
pub mod game;
pub mod io;
pub mod logging;
pub mod redemption;
pub mod runner;
pub mod saves;
pub mod state;
pub mod tiers;
mod timing;
mod util;
pub mod wallet;

pub use error::{Error, Result};
pub use state::GameState;
