//! Terminal IO through crossterm: raw mode, the alternate screen, and mouse capture.

use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread,
    time::Duration,
};

use crossterm::{
    cursor::{Hide, MoveDown, MoveTo, MoveToColumn, Show},
    event::{self as ct, DisableMouseCapture, EnableMouseCapture},
    execute,
    style::{Attribute, Color as CtColor, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use tracing::{debug, warn};

use crate::io::{
    clifmt::{Color, Formatted},
    input::{Action, Key, MouseButton},
    output::{Cell, Screen},
    XY,
};

use super::{IoSystem, NopIoRunner};

fn io_err(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

fn io4ct_btn(ct: ct::MouseButton) -> MouseButton {
    match ct {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Middle => MouseButton::Middle,
        ct::MouseButton::Right => MouseButton::Right,
    }
}

fn io4ct_key(code: ct::KeyCode) -> Option<Key> {
    Some(match code {
        ct::KeyCode::Char(c) => Key::Char(c),
        ct::KeyCode::F(n) => Key::F(n),
        ct::KeyCode::Backspace => Key::Backspace,
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        ct::KeyCode::Tab => Key::Tab,
        ct::KeyCode::BackTab => Key::BackTab,
        ct::KeyCode::Delete => Key::Delete,
        ct::KeyCode::Insert => Key::Insert,
        ct::KeyCode::Esc => Key::Escape,
        ct::KeyCode::Null => return None,
    })
}

/// Translate one crossterm event into the action it represents, if any.
fn action4ct(ev: ct::Event) -> Option<Action> {
    match ev {
        ct::Event::Key(ct::KeyEvent { code, modifiers }) => {
            if modifiers.contains(ct::KeyModifiers::CONTROL) && code == ct::KeyCode::Char('c') {
                return Some(Action::Closed);
            }
            match io4ct_key(code) {
                Some(key) => Some(Action::KeyPress { key }),
                None => Some(Action::Unknown("null character".into())),
            }
        }
        ct::Event::Mouse(ct::MouseEvent { row, column, kind, .. }) => {
            let pos = XY(column as usize, row as usize);
            match kind {
                ct::MouseEventKind::Down(btn) => Some(Action::MousePress { button: io4ct_btn(btn), pos }),
                ct::MouseEventKind::Up(btn) => Some(Action::MouseRelease { button: io4ct_btn(btn), pos }),
                ct::MouseEventKind::ScrollUp => Some(Action::MousePress { button: MouseButton::ScrollUp, pos }),
                ct::MouseEventKind::ScrollDown => Some(Action::MousePress { button: MouseButton::ScrollDown, pos }),
                ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => None,
            }
        }
        ct::Event::Resize(..) => Some(Action::Redraw),
    }
}

fn process_input(actions: mpsc::Sender<Action>, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::Acquire) {
        match ct::poll(Duration::from_millis(100)) {
            Ok(false) => continue,
            Ok(true) => (),
            Err(e) => {
                let _ = actions.send(Action::Error(format!("polling: {}", e)));
                return;
            }
        }
        let ev = match ct::read() {
            Ok(ev) => ev,
            Err(e) => {
                let _ = actions.send(Action::Error(format!("reading: {}", e)));
                return;
            }
        };
        if let Some(action) = action4ct(ev) {
            if actions.send(action).is_err() {
                return;
            }
        }
    }
}

fn ct4io_color(c: Color) -> CtColor {
    match c {
        Color::BrightBlack => CtColor::DarkGrey,
        Color::Black => CtColor::Black,
        Color::BrightRed => CtColor::Red,
        Color::Red => CtColor::DarkRed,
        Color::BrightGreen => CtColor::Green,
        Color::Green => CtColor::DarkGreen,
        Color::BrightYellow => CtColor::Yellow,
        Color::Yellow => CtColor::DarkYellow,
        Color::BrightBlue => CtColor::Blue,
        Color::Blue => CtColor::DarkBlue,
        Color::BrightMagenta => CtColor::Magenta,
        Color::Magenta => CtColor::DarkMagenta,
        Color::BrightCyan => CtColor::Cyan,
        Color::Cyan => CtColor::DarkCyan,
        Color::BrightWhite => CtColor::White,
        Color::White => CtColor::Grey,
        Color::Default => CtColor::Reset,
    }
}

fn bold_attr(on: bool) -> Attribute {
    if on {
        Attribute::Bold
    } else {
        Attribute::NormalIntensity
    }
}

fn underline_attr(on: bool) -> Attribute {
    if on {
        Attribute::Underlined
    } else {
        Attribute::NoUnderline
    }
}

fn invert_attr(on: bool) -> Attribute {
    if on {
        Attribute::Reverse
    } else {
        Attribute::NoReverse
    }
}

/// Render one row of cells, only emitting formatting changes where they actually change.
fn render_row(out: &mut Vec<u8>, row: &[Cell]) -> crossterm::Result<()> {
    let first = match row.first() {
        Some(c) => c.get_fmt().clone(),
        None => return Ok(()),
    };
    crossterm::queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(ct4io_color(first.fg)),
        SetBackgroundColor(ct4io_color(first.bg)),
        SetAttribute(bold_attr(first.bold)),
        SetAttribute(underline_attr(first.underline)),
        SetAttribute(invert_attr(first.invert)),
    )?;
    let mut cur = first;
    let mut ch_b = [0u8; 4];
    for cell in row {
        let fmt = cell.get_fmt();
        if fmt.fg != cur.fg {
            crossterm::queue!(out, SetForegroundColor(ct4io_color(fmt.fg)))?;
        }
        if fmt.bg != cur.bg {
            crossterm::queue!(out, SetBackgroundColor(ct4io_color(fmt.bg)))?;
        }
        if fmt.bold != cur.bold {
            crossterm::queue!(out, SetAttribute(bold_attr(fmt.bold)))?;
        }
        if fmt.underline != cur.underline {
            crossterm::queue!(out, SetAttribute(underline_attr(fmt.underline)))?;
        }
        if fmt.invert != cur.invert {
            crossterm::queue!(out, SetAttribute(invert_attr(fmt.invert)))?;
        }
        cur = fmt.clone();
        out.extend_from_slice(cell.ch.encode_utf8(&mut ch_b).as_bytes());
    }
    crossterm::queue!(out, MoveDown(1), MoveToColumn(0))?;
    Ok(())
}

/// The terminal, in raw mode with the alternate screen up. Input is read on a background thread and handed over
/// through a channel, so [`IoSystem::poll_input`] never blocks.
pub struct AnsiCli {
    queue: mpsc::Receiver<Action>,
    stop: Arc<AtomicBool>,
    input_thread: Option<thread::JoinHandle<()>>,
    runner: NopIoRunner,
}

impl AnsiCli {
    fn init_term() -> crossterm::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    fn clean_term() -> crossterm::Result<()> {
        execute!(
            io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn get() -> io::Result<(Self, NopIoRunner)> {
        // refuse up front, rather than scribbling escape codes into a pipe
        terminal::size().map_err(io_err)?;
        Self::init_term().map_err(io_err)?;
        let prev_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = Self::clean_term();
            prev_hook(info);
        }));

        let (queue_s, queue_r) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = stop.clone();
        let input_thread = thread::Builder::new()
            .name("terminal input".into())
            .spawn(move || process_input(queue_s, thread_stop))?;
        debug!("terminal initialized");

        let runner = NopIoRunner::new();
        let sys = Self {
            queue: queue_r,
            stop,
            input_thread: Some(input_thread),
            runner: runner.clone(),
        };
        Ok((sys, runner))
    }

    fn shutdown(&mut self) {
        let thread = match self.input_thread.take() {
            Some(t) => t,
            None => return,
        };
        self.stop.store(true, Ordering::Release);
        if thread.join().is_err() {
            warn!("terminal input thread panicked");
        }
        if let Err(e) = Self::clean_term() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

impl Drop for AnsiCli {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl IoSystem for AnsiCli {
    fn draw(&mut self, screen: &Screen) -> io::Result<()> {
        let mut out = vec![];
        crossterm::queue!(&mut out, MoveTo(0, 0)).map_err(io_err)?;
        for row in screen.rows() {
            render_row(&mut out, row).map_err(io_err)?;
        }
        let mut stdout = io::stdout();
        stdout.write_all(&out)?;
        stdout.flush()
    }

    fn size(&self) -> XY {
        match terminal::size() {
            Ok((x, y)) => XY(x as usize, y as usize),
            Err(_) => XY(80, 24),
        }
    }

    fn poll_input(&mut self) -> io::Result<Option<Action>> {
        match self.queue.try_recv() {
            Ok(action) => Ok(Some(action)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            // the input thread only hangs up after sending whatever went wrong
            Err(mpsc::TryRecvError::Disconnected) => Ok(Some(Action::Closed)),
        }
    }

    fn stop(&mut self) {
        self.shutdown();
        self.runner.stop();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ctrl_c_closes() {
        let ev = ct::Event::Key(ct::KeyEvent {
            code: ct::KeyCode::Char('c'),
            modifiers: ct::KeyModifiers::CONTROL,
        });
        assert_eq!(action4ct(ev), Some(Action::Closed));
    }

    #[test]
    fn keys_and_clicks_translate() {
        let ev = ct::Event::Key(ct::KeyEvent {
            code: ct::KeyCode::BackTab,
            modifiers: ct::KeyModifiers::SHIFT,
        });
        assert_eq!(action4ct(ev), Some(Action::KeyPress { key: Key::BackTab }));

        let ev = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 4,
            row: 7,
            modifiers: ct::KeyModifiers::NONE,
        });
        assert_eq!(
            action4ct(ev),
            Some(Action::MousePress {
                button: MouseButton::Left,
                pos: XY(4, 7)
            })
        );
    }

    #[test]
    fn row_rendering_only_changes_what_changes() {
        let mut screen = Screen::new(XY(4, 1));
        screen.write(XY(0, 0), crate::text!("ab", red "cd"));
        let mut out = vec![];
        render_row(&mut out, &screen[0]).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("ab"));
        assert!(out.contains("cd"));
    }
}
