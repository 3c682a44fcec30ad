//! The fixed exchange rates from coins to cash.

use crate::{
    error::{Error, Result},
    wallet::Wallet,
};

/// A single way to cash coins in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    pub id: &'static str,
    /// What it costs, in coins
    pub coins: u64,
    /// What it pays, in whole dollars
    pub cash: u64,
    /// Whether to highlight it as the most popular choice
    pub popular: bool,
}

/// Every tier, cheapest first.
pub static TIERS: [Tier; 6] = [
    Tier { id: "tier1", coins: 5_000, cash: 1, popular: false },
    Tier { id: "tier2", coins: 10_000, cash: 5, popular: true },
    Tier { id: "tier3", coins: 20_000, cash: 10, popular: false },
    Tier { id: "tier4", coins: 50_000, cash: 20, popular: false },
    Tier { id: "tier5", coins: 100_000, cash: 50, popular: false },
    Tier { id: "tier6", coins: 250_000, cash: 100, popular: false },
];

/// How close a balance is to being able to pay for a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordability {
    /// Enough coins right now.
    Affordable,
    /// At least 80% of the way there.
    Close,
    Far,
}

impl Tier {
    pub fn by_id(id: &str) -> Option<&'static Tier> {
        TIERS.iter().find(|t| t.id == id)
    }

    /// [`Self::by_id`], but failing with [`Error::UnknownTier`].
    pub fn lookup(id: &str) -> Result<&'static Tier> {
        Self::by_id(id).ok_or_else(|| Error::UnknownTier(id.into()))
    }

    pub fn affordability(&self, wallet: &Wallet) -> Affordability {
        let have = wallet.coins() as u128;
        let cost = self.coins as u128;
        if have >= cost {
            Affordability::Affordable
        } else if have * 5 >= cost * 4 {
            Affordability::Close
        } else {
            Affordability::Far
        }
    }

    /// Only affordable tiers can be picked for redemption.
    pub fn selectable(&self, wallet: &Wallet) -> bool {
        self.affordability(wallet) == Affordability::Affordable
    }

    /// How far along the wallet is to this tier, as a rounded percentage capped at 100.
    pub fn progress(&self, wallet: &Wallet) -> u8 {
        if self.coins == 0 {
            return 100;
        }
        let have = wallet.coins() as u128;
        let cost = self.coins as u128;
        // round half up, in integers
        let pct = (have * 200 + cost) / (cost * 2);
        pct.min(100) as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_is_sorted_by_cost() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].coins < pair[1].coins);
            assert!(pair[0].cash < pair[1].cash);
        }
    }

    #[test]
    fn exactly_one_popular() {
        let popular: Vec<_> = TIERS.iter().filter(|t| t.popular).collect();
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].id, "tier2");
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(Tier::by_id("tier4").map(|t| t.cash), Some(20));
        assert!(Tier::by_id("tier9").is_none());
        assert!(matches!(Tier::lookup("nope"), Err(Error::UnknownTier(id)) if id == "nope"));
    }

    #[test]
    fn affordability_bands() {
        let tier = Tier::by_id("tier2").unwrap();
        assert_eq!(tier.affordability(&Wallet::with_coins(10_000)), Affordability::Affordable);
        assert_eq!(tier.affordability(&Wallet::with_coins(12_000)), Affordability::Affordable);
        assert_eq!(tier.affordability(&Wallet::with_coins(8_000)), Affordability::Close);
        assert_eq!(tier.affordability(&Wallet::with_coins(9_999)), Affordability::Close);
        assert_eq!(tier.affordability(&Wallet::with_coins(7_999)), Affordability::Far);
        assert_eq!(tier.affordability(&Wallet::default()), Affordability::Far);
    }

    #[test]
    fn selectable_only_when_affordable() {
        let wallet = Wallet::with_coins(20_000);
        let selectable: Vec<_> = TIERS.iter().filter(|t| t.selectable(&wallet)).map(|t| t.id).collect();
        assert_eq!(selectable, ["tier1", "tier2", "tier3"]);
    }

    #[test]
    fn progress_rounds_and_caps() {
        let tier = Tier::by_id("tier1").unwrap();
        assert_eq!(tier.progress(&Wallet::default()), 0);
        assert_eq!(tier.progress(&Wallet::with_coins(2_500)), 50);
        // 0.5% rounds up
        assert_eq!(tier.progress(&Wallet::with_coins(25)), 1);
        assert_eq!(tier.progress(&Wallet::with_coins(24)), 0);
        assert_eq!(tier.progress(&Wallet::with_coins(4_999)), 100);
        assert_eq!(tier.progress(&Wallet::with_coins(1_000_000)), 100);
    }
}
