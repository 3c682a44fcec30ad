use crate::io::XY;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Key {
    Char(char),
    F(u8),
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    Insert,
    Tab,
    BackTab,
    Enter,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    /// A key was pressed. Modifiers aren't reported; the only ones the game cares about are baked into the key,
    /// e.g. shift+tab is [`Key::BackTab`].
    KeyPress { key: Key },
    /// A mouse button was pressed at the given location.
    MousePress { button: MouseButton, pos: XY },
    /// A mouse button was released at the given location.
    MouseRelease { button: MouseButton, pos: XY },
    /// The display needs to be redrawn, e.g. because the window was resized.
    Redraw,
    /// User requested the program end externally, e.g. ctrl+C or closing the window
    Closed,
    /// Some unknown input was received, with a description of what it was
    Unknown(String),
    /// Trying to read input led to some kind of error, with a description
    Error(String),
}
