//! An IO system that plays back a fixed list of inputs, for driving a whole game in tests.

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use crate::io::{input::Action, output::Screen, XY};

use super::{IoSystem, NopIoRunner};

/// Hands out one scripted action per poll. Once the script runs out it stays quiet until `linger` has passed, so
/// agents get a chance to run, and then reports [`Action::Closed`].
pub struct Scripted {
    script: VecDeque<Action>,
    linger: Duration,
    done_at: Option<Instant>,
    size: XY,
    frames: Arc<Mutex<Vec<String>>>,
    runner: NopIoRunner,
}

impl Scripted {
    pub fn new(script: impl IntoIterator<Item = Action>, linger: Duration) -> (Self, NopIoRunner) {
        let runner = NopIoRunner::new();
        let sys = Self {
            script: script.into_iter().collect(),
            linger,
            done_at: None,
            size: XY(80, 24),
            frames: Default::default(),
            runner: runner.clone(),
        };
        (sys, runner)
    }

    /// Every frame drawn so far, as plain text.
    pub fn frames(&self) -> Arc<Mutex<Vec<String>>> {
        self.frames.clone()
    }
}

impl IoSystem for Scripted {
    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(screen.plain_text());
        }
        Ok(())
    }

    fn size(&self) -> XY {
        self.size
    }

    fn poll_input(&mut self) -> io::Result<Option<Action>> {
        if let Some(next) = self.script.pop_front() {
            return Ok(Some(next));
        }
        let done_at = *self.done_at.get_or_insert_with(|| Instant::now() + self.linger);
        if Instant::now() >= done_at {
            Ok(Some(Action::Closed))
        } else {
            Ok(None)
        }
    }

    fn stop(&mut self) {
        self.runner.stop();
    }
}
