//! The (pretend) PayPal transfer behind every redemption.

use std::time::Duration;

use tracing::debug;

use crate::{
    event::Event,
    game::Replies,
    tiers::Tier,
};

use super::{Agent, ControlFlow};

/// How long a payout takes unless configured otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

/// Processes a single payout.
///
/// There's no real payment provider behind this: it waits out a fixed delay, then reports the payout settled with
/// [`Event::PayoutSettled`] and dies. It can't fail and can't be cancelled. Spending the coins is left to whoever
/// receives the settlement, so the balance is checked at the moment of spending, not the moment of asking.
pub struct Payout {
    tier: &'static Tier,
    email: String,
    delay: Duration,
}

impl Payout {
    pub fn new(tier: &'static Tier, email: impl Into<String>, delay: Duration) -> Self {
        Self {
            tier,
            email: email.into(),
            delay,
        }
    }
}

impl Agent<Event> for Payout {
    fn start(&mut self, _replies: &mut Replies<Event>) -> ControlFlow {
        debug!(tier = self.tier.id, delay_ms = self.delay.as_millis() as u64, "payout started");
        ControlFlow::sleep_for(self.delay)
    }

    fn react(&mut self, _msg: &Event, replies: &mut Replies<Event>) -> ControlFlow {
        debug!(tier = self.tier.id, "payout settled");
        replies.queue(Event::PayoutSettled {
            tier: self.tier.id,
            email: std::mem::take(&mut self.email),
        });
        ControlFlow::Kill
    }
}

#[cfg(test)]
mod test {
    use mock_instant::MockClock;

    use super::*;

    #[test]
    fn settles_after_delay() {
        let tier = Tier::by_id("tier3").unwrap();
        let mut payout = Payout::new(tier, "x@y.zz", Duration::from_millis(2000));
        let mut replies = Replies::default();

        let cf = payout.start(&mut replies);
        assert!(replies.messages().is_empty());
        assert!(!cf.is_ready());
        MockClock::advance(Duration::from_millis(1500));
        assert!(!cf.is_ready());
        MockClock::advance(Duration::from_millis(600));
        assert!(cf.is_ready());

        let cf = payout.react(&Event::Tick, &mut replies);
        assert_eq!(cf, ControlFlow::Kill);
        assert_eq!(
            replies.messages(),
            [Event::PayoutSettled {
                tier: "tier3",
                email: "x@y.zz".into()
            }]
        );
    }
}
