//! The text formatting shared by every view and IO system:
//!
//! - [`Format`], the common ANSI-ish formatting options
//! - [`Text`] and [`Cell`], which apply a `Format` to a string or a single `char` respectively
//! - [`text!`](crate::text), which builds a `Vec<Text>` in one go
//!
//! `Text` and `Cell` share their formatting methods through [`FormattedExt`].

/// The color of a piece of formatted text. The numeric values are the ANSI color codes for each color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Color {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    #[default]
    Default = 9,
    BrightBlack = 60,
    BrightRed = 61,
    BrightGreen = 62,
    BrightYellow = 63,
    BrightBlue = 64,
    BrightMagenta = 65,
    BrightCyan = 66,
    BrightWhite = 67,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Format {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub underline: bool,
    pub invert: bool,
}

impl Format {
    pub const NONE: Self = Format {
        fg: Color::Default,
        bg: Color::Default,
        bold: false,
        underline: false,
        invert: false,
    };
}

macro_rules! fmt_fn {
    ( $(
        $name:ident
        $(( $( $arg:ident: $type:ty ),* $(,)? ))?
        =>
        $field:ident = $val:expr
    ),* $(,)? ) => { $(
        #[must_use]
        fn $name(mut self $($(, $arg: $type )*)? ) -> Self {
            self.get_fmt_mut().$field = $val;
            self
        }
    )* };
}

pub trait Formatted {
    fn get_fmt(&self) -> &Format;
    fn get_fmt_mut(&mut self) -> &mut Format;
}

pub trait FormattedExt: Formatted + Sized {
    #[must_use]
    fn fmt_of(mut self, rhs: &dyn Formatted) -> Self {
        *self.get_fmt_mut() = rhs.get_fmt().clone();
        self
    }
    fmt_fn! {
        fg(c: Color) => fg = c,                         bg(c: Color) => bg = c,
        black => fg = Color::Black,                     bright_black => fg = Color::BrightBlack,
        red => fg = Color::Red,                         bright_red => fg = Color::BrightRed,
        green => fg = Color::Green,                     bright_green => fg = Color::BrightGreen,
        yellow => fg = Color::Yellow,                   bright_yellow => fg = Color::BrightYellow,
        cyan => fg = Color::Cyan,                       bright_cyan => fg = Color::BrightCyan,
        bright_white => fg = Color::BrightWhite,
        on_yellow => bg = Color::Yellow,
        underline => underline = true,
        bold => bold = true,
        invert => invert = true,
    }
}

impl<F: Formatted> FormattedExt for F {}

macro_rules! fmt_type {
    (
        $( #[$($attr:meta),* $(,)?] )*
        $svis:vis struct $name:ident { $( $fvis:vis $field:ident: $type:ty ),* $(,)? }
    ) => {
        $( #[$($attr),*] )*
        $svis struct $name {
            $( $fvis $field: $type, )*
            _fmt: $crate::io::clifmt::Format,
        }
        impl $crate::io::clifmt::Formatted for $name {
            fn get_fmt(&self) -> &$crate::io::clifmt::Format {
                &self._fmt
            }
            fn get_fmt_mut(&mut self) -> &mut $crate::io::clifmt::Format {
                &mut self._fmt
            }
        }
        impl $name {
            pub const fn of( $($field: $type),* ) -> Self {
                Self {
                    $( $field, )*
                    _fmt: $crate::io::clifmt::Format::NONE,
                }
            }
        }
    };
}

fmt_type!(
    /// A single run of formatted text. Meant to be built through [`text!`](crate::text).
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Text {
        pub text: String,
    }
);

impl Text {
    pub fn plain(s: &str) -> Text {
        Text::of(s.into())
    }

    /// The same formatting, different text.
    pub fn with_text(&self, new_text: String) -> Text {
        let mut res = self.clone();
        res.text = new_text;
        res
    }

    /// How many cells this takes up on screen.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Build a `Vec<Text>` from a sequence of formatted pieces, e.g.:
///
/// ```ignore
/// text!("balance: ", bright_yellow bold "{}"(coins), " coins")
/// ```
#[macro_export]
macro_rules! text {
    ( $(
        $( $name:ident )*
        $text:literal
        $( ( $( $arg:expr ),* $(,)? ) )?
    ),* $(,)? ) => {
        {
            #[allow(unused_imports)]
            use $crate::io::clifmt::{FormattedExt as _};
            vec![
                $(
                    $crate::io::clifmt::Text::of(
                        format!( $text $(, $( $arg ),* )? )
                    ) $( . $name () )*
                ),*
            ]
        }
    };
}

fmt_type! {
    /// A single character that's been formatted. This is really only meant to be used in `Screen`.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Cell { pub ch: char }
}

impl Cell {
    pub const BLANK: Cell = Cell::of(' ');
}

/// Write a number with thousands separators, e.g. `12,345`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            res.push(',');
        }
        res.push(ch);
    }
    res
}
