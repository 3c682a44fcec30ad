/// How a [`Notice`] should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// A short message for the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Info }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Success }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Error }
    }
}

/// Everything that happens in the game, passed around between the views, the frontend and the agents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Event {
    /// Nothing in particular happened this round.
    #[default]
    Tick,
    /// The player clicked the coin.
    Clicked,
    /// The player confirmed a redemption; the payout is being processed.
    RedeemRequested {
        tier: &'static str,
        email: String,
    },
    /// The payout for a redemption went through, so the coins can be spent.
    PayoutSettled {
        tier: &'static str,
        email: String,
    },
    /// Something worth telling the player about.
    Notice(Notice),
}
