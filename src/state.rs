use crate::{redemption::History, wallet::Wallet};

/// The current state of the game: everything the views read and the saves persist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    /// The player's coins
    pub wallet: Wallet,
    /// Everything they've cashed in so far, newest first
    pub history: History,
}
