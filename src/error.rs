//! The one error type shared by the whole crate.

use std::io;

/// Everything that can go wrong while playing, saving or loading.
///
/// The `Display` impls are user-facing: they're shown as-is in the status line, so keep them short and friendly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tried to spend more coins than the wallet holds.
    #[error("Insufficient coins!")]
    InsufficientCoins { needed: u64, available: u64 },
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("no redemption tier named {0:?}")]
    UnknownTier(String),
    /// The underlying storage couldn't be read or written.
    #[error("storage error: {0}")]
    Io(#[from] io::Error),
    /// A stored value exists but couldn't be parsed. Loading stops rather than overwriting it.
    #[error("saved {key:?} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
