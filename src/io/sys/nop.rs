//! A headless IO system: nothing is drawn and no input ever arrives. The game runs until something inside it quits.

use std::io;

use crate::io::{input::Action, output::Screen, XY};

use super::{IoSystem, NopIoRunner};

pub struct NopSystem(NopIoRunner);

impl NopSystem {
    pub fn new() -> io::Result<(Self, NopIoRunner)> {
        let run = NopIoRunner::new();
        Ok((Self(run.clone()), run))
    }
}

impl IoSystem for NopSystem {
    fn draw(&mut self, _screen: &Screen) -> io::Result<()> {
        Ok(())
    }
    fn size(&self) -> XY {
        XY(80, 24)
    }
    fn poll_input(&mut self) -> io::Result<Option<Action>> {
        Ok(None)
    }
    fn stop(&mut self) {
        self.0.stop()
    }
}
