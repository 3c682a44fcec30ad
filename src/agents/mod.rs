//! Agents do the game's work away from the render loop. Right now that's only the payout processor.

mod cf;
pub use cf::{ControlFlow, WaitHandle};

pub mod payout;
pub use payout::Payout;

use crate::game::{Message, Replies};

/// An agent in the system, which can react to messages.
///
/// Messages are processed in 'rounds'. There's a list of 'current' messages, which are fed into every awake agent
/// one at a time. Then all of the replies are collected, and those are the 'current' messages for the next round.
///
/// As that implies, messages are inherently ephemeral -- none persist more than one round.
pub trait Agent<M: Message>: Send + Sync {
    /// Called once when the agent is spawned, to queue any starting messages. This will always be called before
    /// `react`.
    ///
    /// By default, does nothing and returns [`ControlFlow::Continue`] so `react` gets called next round.
    fn start(&mut self, _replies: &mut Replies<M>) -> ControlFlow {
        ControlFlow::Continue
    }

    /// React to one message of a round, indicating when the agent should be called next and optionally queueing
    /// more messages.
    ///
    /// By default, does nothing and returns [`ControlFlow::Kill`].
    fn react(&mut self, _msg: &M, _replies: &mut Replies<M>) -> ControlFlow {
        ControlFlow::Kill
    }
}
