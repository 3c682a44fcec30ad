//! The engine half of the game: how messages get passed around and what a [`Game`] has to implement.
//!
//! Everything that happens is a message of a single type `M: Message`. The [`Game`] handles the player: it takes
//! input, renders, and reacts to messages by updating what it'll render next. [`Agent`]s do the rest, reacting to
//! messages away from the render loop. Both can queue messages and spawn agents through [`Replies`], which are
//! applied once the current round ends.

use std::fmt;

use crate::{
    agents::Agent,
    io::{input::Action, output::Screen},
};

pub trait Message: Clone + Send + Sync {
    /// The message to send agents when there aren't any other messages queued for processing, to ensure every awake
    /// agent processes at least one message per round. Will **not** be sent if there are any other messages.
    ///
    /// This method should be as simple and fast as possible, ideally just returning a constant value.
    fn tick() -> Self;
}

impl<T: Clone + Send + Sync + Default> Message for T {
    fn tick() -> Self {
        Self::default()
    }
}

/// Allows a [`Game`] or [`Agent`] to make things happen in the engine in response to messages or input.
///
/// None of these are acted on immediately, only once the round ends.
pub struct Replies<M: Message> {
    pub(crate) agents: Vec<Box<dyn Agent<M>>>,
    pub(crate) messages: Vec<M>,
}

impl<M: Message> Default for Replies<M> {
    fn default() -> Self {
        Self {
            agents: Default::default(),
            messages: Default::default(),
        }
    }
}

impl<M: Message> fmt::Debug for Replies<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(std::any::type_name::<Self>())
            .field("agents", &self.agents.len())
            .field("messages", &self.messages.len())
            .finish()
    }
}

impl<M: Message> Replies<M> {
    /// Have an agent spawned into the next round.
    pub fn spawn(&mut self, agent: impl Agent<M> + 'static) -> &mut Self {
        self.agents.push(Box::new(agent));
        self
    }

    /// Queue up a message to be sent out in the next round.
    pub fn queue(&mut self, msg: M) -> &mut Self {
        self.messages.push(msg);
        self
    }

    /// The messages queued so far, so tests can check the right things were sent.
    #[cfg(test)]
    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    #[cfg(test)]
    pub fn spawned(&self) -> usize {
        self.agents.len()
    }
}

/// Allows a [`Game`] to control the engine in response to messages or input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Response {
    /// Nothing in particular needs to be done.
    Nothing,
    /// The visual state has updated, and the screen needs to be redrawn.
    Redraw,
    /// The game should be exited, e.g. because the player pressed `q`.
    Quit,
}

impl Response {
    /// Combine two responses, keeping the most drastic.
    pub fn and(self, other: Response) -> Response {
        match (self, other) {
            (Response::Quit, _) | (_, Response::Quit) => Response::Quit,
            (Response::Redraw, _) | (_, Response::Redraw) => Response::Redraw,
            _ => Response::Nothing,
        }
    }

    pub fn redraw_if(cond: bool) -> Response {
        if cond {
            Response::Redraw
        } else {
            Response::Nothing
        }
    }
}

/// Represents a game which can be run in the main loop.
///
/// `Game`s don't run the slow parts of the game logic; that's the `Agent`'s job. The `Game` is where user input and
/// rendering happen:
///
/// - When there's user input, you can queue messages or spawn agents, and/or update state for rendering
/// - When a message arrives (including one you queued!), update state for rendering
/// - You *don't* react to messages with more messages -- that's an `Agent`'s job
/// - Come time to render, you already have everything you need from previous inputs and messages
pub trait Game: Send {
    type Message: Message;

    /// The player has done some input; update the UI and inform [`Agent`]s accordingly.
    fn input(&mut self, input: Action, replies: &mut Replies<Self::Message>) -> Response;

    /// A message has been sent; update the UI accordingly.
    fn event(&mut self, event: &Self::Message) -> Response;

    /// Render the game onto the provided `Screen`.
    fn render(&mut self, onto: &mut Screen);
}

#[cfg(test)]
mod test {
    use super::Response::*;

    #[test]
    fn responses_combine_to_the_strongest() {
        assert_eq!(Nothing.and(Nothing), Nothing);
        assert_eq!(Nothing.and(Redraw), Redraw);
        assert_eq!(Redraw.and(Nothing), Redraw);
        assert_eq!(Redraw.and(Quit), Quit);
        assert_eq!(Quit.and(Nothing), Quit);
    }
}
