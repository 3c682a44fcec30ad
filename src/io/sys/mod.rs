//! The IO systems: each one takes [`Action`]s from the player and puts [`Screen`]s in front of them. Each one is
//! controlled by a similarly-named feature and exports a struct implementing [`IoSystem`].

use std::{
    io,
    sync::{Arc, Barrier},
};

use super::{input::Action, output::Screen, XY};

#[cfg(feature = "sys_cli")]
pub mod ansi_cli;

#[cfg(feature = "sys_nop")]
pub mod nop;

#[cfg(test)]
pub mod scripted;

/// An input/output system.
///
/// The output is called a "display" to distinguish it from the [`Screen`].
///
/// This object is meant to be paired with an [`IoRunner`], which runs on the main thread while this is driven from
/// the game's thread.
pub trait IoSystem: Send {
    /// Actually render a [`Screen`] to the display.
    fn draw(&mut self, screen: &Screen) -> io::Result<()>;
    /// Get the size of the display, in characters.
    fn size(&self) -> XY;

    /// If the next user input is available, return it.
    fn poll_input(&mut self) -> io::Result<Option<Action>>;

    /// Tell the associated [`IoRunner`] to stop and return control of the main thread, and dispose of any resources
    /// this system is holding.
    ///
    /// This will always be the last method called on this object.
    fn stop(&mut self);
}

/// The other half of an [`IoSystem`], for anything that has to happen on the main thread.
pub trait IoRunner {
    /// Run until the paired [`IoSystem`] tells you to stop.
    fn run(&mut self);
}

/// An [`IoRunner`] for backends which don't actually need the main thread for anything. It just waits.
///
/// Create one, give a clone to the [`IoSystem`], and have it call [`Self::stop`] when it's stopped.
#[derive(Clone)]
pub struct NopIoRunner(Arc<Barrier>);

impl NopIoRunner {
    pub fn new() -> Self {
        Self(Arc::new(Barrier::new(2)))
    }

    /// Release the thread blocked in [`IoRunner::run`]. Blocks until it's been released.
    pub fn stop(&mut self) {
        self.0.wait();
    }
}

impl Default for NopIoRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl IoRunner for NopIoRunner {
    fn run(&mut self) {
        self.0.wait();
    }
}

/// Based on the IO system features enabled, attempt to initialize an IO system; in order:
///
/// - crossterm CLI (`sys_cli`)
/// - headless (`sys_nop`)
///
/// The Err type is a list of each system tried and the error it hit.
#[cfg(feature = "__sys")]
pub fn load() -> Result<(Box<dyn IoSystem>, Box<dyn IoRunner>), Vec<(&'static str, io::Error)>> {
    #[allow(unused_mut)]
    let mut errors = vec![];
    macro_rules! try_init {
        ( $name:literal: $init:expr ) => {
            match $init {
                Ok((iosys, run)) => {
                    let iosys: Box<dyn IoSystem> = Box::new(iosys);
                    let run: Box<dyn IoRunner> = Box::new(run);
                    return Ok((iosys, run));
                }
                Err(e) => errors.push(($name, e)),
            }
        };
    }
    #[cfg(feature = "sys_cli")]
    try_init! { "ansi_cli": ansi_cli::AnsiCli::get() }
    #[cfg(feature = "sys_nop")]
    try_init! { "nop": nop::NopSystem::new() }
    Err(errors)
}

impl IoSystem for Box<dyn IoSystem> {
    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        (**self).draw(screen)
    }
    fn size(&self) -> XY {
        (**self).size()
    }
    fn poll_input(&mut self) -> io::Result<Option<Action>> {
        (**self).poll_input()
    }
    fn stop(&mut self) {
        (**self).stop()
    }
}

impl IoRunner for Box<dyn IoRunner> {
    fn run(&mut self) {
        (**self).run()
    }
}
