use crate::{
    event::Event,
    game::Replies,
    io::{input::Action, output::Screen},
    state::GameState,
};

/// Rows at the top of the screen taken by the tab header.
pub const HEADER_HEIGHT: usize = 1;
/// Rows at the bottom of the screen taken by the status line and the rule above it.
pub const FOOTER_HEIGHT: usize = 2;

/// Each app is a single tab in the game's window view, e.g. the clicker. They exclusively handle IO: processing
/// user input and rendering (part of) game state. The coins and history themselves belong to the
/// [`Frontend`](crate::frontend::Frontend), which changes them in response to the events the apps queue.
///
/// Apps are only given input and rendered when they're on-screen, but they receive all events, after the
/// frontend has applied them to the state.
#[enum_dispatch::enum_dispatch]
pub trait App {
    /// The name of this app's tab in the header. (should be constant, hence &'static)
    fn name(&self) -> &'static str;

    /// Take a single input action, queueing events or spawning agents as a result.
    ///
    /// Returns `true` if it will need to be redrawn, or `false` otherwise.
    fn input(&mut self, a: Action, state: &GameState, replies: &mut Replies<Event>) -> bool;
    /// Receive an event, in case the app needs to care to render it.
    ///
    /// Returns `true` if it will need to be redrawn, or `false` otherwise.
    fn on_event(&mut self, ev: &Event, state: &GameState) -> bool;

    /// The number of notifications this app has.
    fn notifs(&self) -> usize;
    /// Whether the app is taking typed text right now, so keys like `q` belong to it rather than the frontend.
    fn captures_text(&self) -> bool {
        false
    }
    /// Display the game state on screen.
    fn render(&mut self, state: &GameState, screen: &mut Screen);
}

/// Applies an input to an app and checks the taint and what got queued, e.g.:
///
/// ```ignore
/// assert_input!(app.input(ENTER, &state) taints, == &[Event::Clicked]);
/// assert_input!(app.input(UP, &state) clean, .is_empty());
/// ```
///
/// Evaluates to the [`Replies`] so spawned agents can be checked too.
#[cfg(test)]
macro_rules! assert_input {
    (
        $app:ident .input ( $action:expr, $state:expr )
        $( clean $( @ $clean:ident )? )? $( taints $( @ $taint:ident )? )?,
        $( $test:tt )*
    ) => {
        {
            let mut replies = $crate::game::Replies::default();
            let taint = $crate::app::App::input(&mut $app, $action, $state, &mut replies);
            $( assert!(!taint, "app tainted unexpectedly"); $( $clean )? )?
            $( assert!(taint, "app didn't taint when expected"); $( $taint )? )?
            assert_input!(@cmp replies $( $test )*);
            replies
        }
    };
    (@cmp $replies:ident == $other:expr) => { assert_eq!($replies.messages(), $other) };
    (@cmp $replies:ident $( $test:tt )+) => { assert!($replies.messages() $( $test )+) };
}

#[cfg(test)]
pub(crate) use assert_input;

mod clicker;
pub use clicker::ClickerApp;

mod redeem;
pub use redeem::RedeemApp;

mod history;
pub use history::HistoryApp;

#[enum_dispatch::enum_dispatch(App)]
#[derive(Clone, Debug)]
pub enum Apps {
    ClickerApp,
    RedeemApp,
    HistoryApp,
}
