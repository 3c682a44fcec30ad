//! The main loop: the [`Game`] and its agents run on one thread, the [`IoRunner`] keeps the main thread.

use std::{mem, thread, time::Duration};

use tracing::{debug, warn};

use crate::{
    agents::{Agent, ControlFlow},
    game::{Game, Message, Replies, Response},
    io::{
        input::Action,
        output::Screen,
        sys::{IoRunner, IoSystem},
    },
    timing::Timer,
};

#[cfg(feature = "__sys")]
use crate::io::sys;

struct AgentRunner<M: Message> {
    agents: Vec<(ControlFlow, Box<dyn Agent<M>>)>,
    replies: Replies<M>,
}

impl<M: Message> AgentRunner<M> {
    fn new() -> Self {
        Self {
            agents: Default::default(),
            replies: Default::default(),
        }
    }

    /// Perform one round of message processing.
    ///
    /// `agents` and `events` are both input and output:
    ///
    /// - `agents` and `events` passed in are the agents/events for this runner to run
    /// - `agents` and `events` coming out are the agents that this round spawned
    ///
    /// Notably the vecs *will be cleared* and old events *will not be available*!
    fn step(&mut self, events: &mut Vec<M>, agents: &mut Vec<Box<dyn Agent<M>>>) {
        self.agents
            .extend(agents.drain(..).map(|mut a| (a.start(&mut self.replies), a)));

        if events.is_empty() {
            events.push(M::tick());
        }

        for (cf, agent) in self.agents.iter_mut() {
            if !cf.is_ready() {
                continue;
            }
            for event in events.iter() {
                *cf = agent.react(event, &mut self.replies);
                if !cf.is_ready() {
                    break;
                }
            }
        }

        self.agents.retain(|(cf, _)| !cf.is_dead());

        events.clear();
        // hands self.replies.messages out and clears it, but reuses the allocations
        mem::swap(&mut self.replies.messages, events);
        mem::swap(&mut self.replies.agents, agents);
    }

    fn alive(&self) -> usize {
        self.agents.len()
    }
}

struct GameRunner<G: Game, IO: IoSystem> {
    game: G,
    iosys: IO,
    screen: Screen,
    tainted: bool,
    render_timer: Timer,
}

impl<G: Game, IO: IoSystem> GameRunner<G, IO> {
    fn new(game: G, iosys: IO) -> Self {
        let screen = Screen::new(iosys.size());
        Self {
            game,
            iosys,
            screen,
            tainted: true,
            // at most ~60fps
            render_timer: Timer::new(1.0 / 60.0),
        }
    }

    /// Feed a list of events to the associated `Game`.
    ///
    /// Returns whether a stop was requested.
    fn feed(&mut self, events: &[G::Message]) -> bool {
        if events.is_empty() {
            return self.feed(&[G::Message::tick()]);
        }

        for event in events {
            match self.game.event(event) {
                Response::Nothing => (),
                Response::Redraw => self.tainted = true,
                Response::Quit => return true,
            }
        }
        false
    }

    /// Do a step of IO with the associated `IoSystem` and `Game`.
    ///
    /// Returns whether a stop was requested.
    fn io(&mut self, events: &mut Vec<G::Message>, agents: &mut Vec<Box<dyn Agent<G::Message>>>) -> bool {
        let mut replies = Replies {
            agents: mem::take(agents),
            messages: mem::take(events),
        };
        let mut stop = false;
        loop {
            let action = match self.iosys.poll_input() {
                Ok(Some(action)) => action,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "failed to read input");
                    break;
                }
            };
            match action {
                Action::Closed => {
                    stop = true;
                    break;
                }
                Action::Redraw => self.tainted = true,
                Action::Error(e) => warn!(error = %e, "input error"),
                other => match self.game.input(other, &mut replies) {
                    Response::Nothing => (),
                    Response::Redraw => self.tainted = true,
                    Response::Quit => {
                        stop = true;
                        break;
                    }
                },
            }
        }
        *agents = replies.agents;
        *events = replies.messages;
        stop
    }

    /// Render to the screen, but only if something changed and it's been long enough since the last frame.
    fn render(&mut self) {
        let new_size = self.iosys.size();
        if self.tainted || new_size != self.screen.size() {
            if !self.render_timer.tick_ready() {
                return;
            }
            self.screen.resize(new_size);
            self.game.render(&mut self.screen);
            if let Err(e) = self.iosys.draw(&self.screen) {
                warn!(error = %e, "failed to draw");
            }
            self.tainted = false;
        }
    }
}

/// Handles starting up and running a `Game`.
#[must_use]
pub struct Runner<G: Game + 'static> {
    events: Vec<G::Message>,
    agents: Vec<Box<dyn Agent<G::Message>>>,
    game: G,
    input_tick: f32,
}

impl<G: Game + 'static> Runner<G> {
    /// Prepare a game to be run
    pub fn new(game: G) -> Self {
        Self {
            game,
            events: vec![],
            agents: vec![],
            input_tick: 0.1,
        }
    }

    /// Set an agent to be running at game startup, to process the first round of messages
    pub fn spawn(mut self, agent: impl Agent<G::Message> + 'static) -> Self {
        self.agents.push(Box::new(agent));
        self
    }

    /// Add a message to be handled in the first round.
    pub fn queue(mut self, event: G::Message) -> Self {
        self.events.push(event);
        self
    }

    /// Set the target time between rounds of messages, in seconds.
    ///
    /// Rounds may take longer, if it just takes longer to handle all the messages in a round.
    pub fn input_tick(mut self, tick: f32) -> Self {
        self.input_tick = tick;
        self
    }

    /// Run the game until [`Game::event`] or [`Game::input`] returns [`Response::Quit`], or the player closes it.
    ///
    /// The game gets its own thread and the `iorun` takes over the calling one, so call this from the main thread.
    /// Returns the [`Game`] once it's done, primarily for testing purposes.
    pub fn run(self, iosys: impl IoSystem + 'static, mut iorun: impl IoRunner) -> G {
        let Self {
            game,
            mut events,
            mut agents,
            input_tick,
        } = self;

        let thread = thread::spawn(move || {
            let mut ar = AgentRunner::new();
            let mut gr = GameRunner::new(game, iosys);
            let mut input_timer = Timer::new(input_tick);

            'mainloop: loop {
                loop {
                    gr.render();
                    if gr.io(&mut events, &mut agents) {
                        break 'mainloop;
                    }
                    if input_timer.tick_ready() {
                        break;
                    }
                    thread::sleep(input_timer.remaining().min(Duration::from_millis(2)));
                }
                gr.render();
                if gr.feed(&events) {
                    break 'mainloop;
                }
                ar.step(&mut events, &mut agents);
            }
            debug!(agents = ar.alive(), "main loop exited");
            gr.iosys.stop();
            gr.game
        });
        iorun.run();
        thread.join().unwrap_or_else(|e| std::panic::resume_unwind(e))
    }

    /// Use [`sys::load`] to pick an IO system, load it, and [`Self::run`].
    ///
    /// This **must** be run on the main thread. Ideally, you'd run it from `main` directly.
    #[cfg(feature = "__sys")]
    pub fn load_run(self) -> Result<G, Vec<(&'static str, std::io::Error)>> {
        let (iosys, iorun) = sys::load()?;
        Ok(self.run(iosys, iorun))
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::{
        io::{
            input::{Action, Key},
            sys::scripted::Scripted,
        },
        text,
    };

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    enum Msg {
        #[default]
        Tick,
        Pressed(char),
        Echo(char),
    }

    /// Repeats every `Pressed` back as an `Echo`, once.
    struct Echoer;

    impl Agent<Msg> for Echoer {
        fn react(&mut self, msg: &Msg, replies: &mut Replies<Msg>) -> ControlFlow {
            if let Msg::Pressed(c) = msg {
                replies.queue(Msg::Echo(*c));
            }
            ControlFlow::Continue
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Msg>,
    }

    impl Game for Recorder {
        type Message = Msg;

        fn input(&mut self, input: Action, replies: &mut Replies<Msg>) -> Response {
            match input {
                Action::KeyPress { key: Key::Char('q') } => Response::Quit,
                Action::KeyPress { key: Key::Char(c) } => {
                    replies.queue(Msg::Pressed(c));
                    Response::Nothing
                }
                _ => Response::Nothing,
            }
        }

        fn event(&mut self, event: &Msg) -> Response {
            if *event != Msg::Tick {
                self.seen.push(event.clone());
            }
            Response::Redraw
        }

        fn render(&mut self, onto: &mut Screen) {
            onto.write(crate::io::XY(0, 0), text!("{} seen"(self.seen.len())));
        }
    }

    fn press(c: char) -> Action {
        Action::KeyPress { key: Key::Char(c) }
    }

    #[test]
    fn agents_see_what_the_game_queues() {
        let (sys, run) = Scripted::new([press('a'), press('b')], Duration::from_millis(300));
        let frames = sys.frames();
        let game = Runner::new(Recorder::default())
            .spawn(Echoer)
            .input_tick(0.01)
            .run(sys, run);
        assert_eq!(
            game.seen,
            [Msg::Pressed('a'), Msg::Pressed('b'), Msg::Echo('a'), Msg::Echo('b')]
        );
        let frames = frames.lock().unwrap();
        assert!(frames.iter().any(|f| f.starts_with("4 seen")), "{:?}", frames.last());
    }

    #[test]
    fn quit_response_stops_the_loop() {
        let (sys, run) = Scripted::new([press('a'), press('q'), press('b')], Duration::from_secs(60));
        let game = Runner::new(Recorder::default()).run(sys, run);
        // 'a' was queued in the same batch of input as the quit, so it never got delivered
        assert!(game.seen.is_empty());
    }

    #[test]
    fn queued_messages_arrive_first() {
        let (sys, run) = Scripted::new([], Duration::from_millis(100));
        let game = Runner::new(Recorder::default())
            .queue(Msg::Echo('z'))
            .input_tick(0.01)
            .run(sys, run);
        assert_eq!(game.seen, [Msg::Echo('z')]);
    }
}
