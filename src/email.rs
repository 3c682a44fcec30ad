//! Checking payout addresses before anything gets spent.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    // something@something.something, no spaces, exactly one @
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Validate a payout email address.
///
/// Whitespace alone counts as missing, but padding around an address makes it invalid rather than being trimmed.
pub fn validate(input: &str) -> Result<String> {
    if input.trim().is_empty() {
        return Err(Error::EmailRequired);
    }
    if !EMAIL.is_match(input) {
        return Err(Error::InvalidEmail);
    }
    Ok(input.to_owned())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_is_required() {
        assert!(matches!(validate(""), Err(Error::EmailRequired)));
        assert!(matches!(validate("   "), Err(Error::EmailRequired)));
    }

    #[test]
    fn accepts_plain_addresses() {
        assert_eq!(validate("someone@example.com").unwrap(), "someone@example.com");
        assert_eq!(validate("a.b+c@sub.domain.org").unwrap(), "a.b+c@sub.domain.org");
    }

    #[test]
    fn padding_is_invalid() {
        for padded in ["  me@example.com ", " me@example.com", "me@example.com\t"] {
            assert!(matches!(validate(padded), Err(Error::InvalidEmail)), "{:?} accepted", padded);
        }
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["plainaddress", "@example.com", "me@", "me@example", "me@@example.com", "me @example.com"] {
            assert!(matches!(validate(bad), Err(Error::InvalidEmail)), "{:?} accepted", bad);
        }
    }
}
