//! Input, output, and the terminal-ish character grid they share.

use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

pub mod clifmt;
pub mod input;
pub mod output;
pub mod sys;
pub mod widgets;

/// A position or size on the character grid, with an X and a Y component.
///
/// Arithmetic works elementwise with other `XY`s (`XY(2, 3) + XY(4, 5) == XY(6, 8)`) and with `(usize, usize)`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct XY(pub usize, pub usize);

impl XY {
    pub const fn x(&self) -> usize {
        self.0
    }

    pub const fn y(&self) -> usize {
        self.1
    }
}

macro_rules! xy_op {
    ( $(
        $trait:ident($fn:ident) => $op:tt $assn_op:tt
    ),* $(,)? ) => {
        $(
            impl $trait for XY {
                type Output = XY;
                fn $fn(self, rhs: XY) -> XY {
                    XY(self.0 $op rhs.0, self.1 $op rhs.1)
                }
            }

            impl $trait<(usize, usize)> for XY {
                type Output = XY;
                fn $fn(self, rhs: (usize, usize)) -> XY {
                    XY(self.0 $op rhs.0, self.1 $op rhs.1)
                }
            }

            paste::paste! {
                impl [< $trait Assign >] for XY {
                    fn [< $fn _assign >] (&mut self, rhs: XY) {
                        self.0 $assn_op rhs.0;
                        self.1 $assn_op rhs.1;
                    }
                }
            }
        )*
    };
}

xy_op! {
    Add(add) => + +=,
    Sub(sub) => - -=,
}

impl fmt::Debug for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XY({}, {})", self.0, self.1)
    }
}

impl From<(usize, usize)> for XY {
    fn from(f: (usize, usize)) -> XY {
        XY(f.0, f.1)
    }
}

#[cfg(test)]
mod test {
    use super::XY;

    #[test]
    fn elementwise_math() {
        assert_eq!(XY(2, 3) + XY(4, 5), XY(6, 8));
        assert_eq!(XY(6, 8) - (1, 2), XY(5, 6));
        let mut xy = XY(1, 1);
        xy += XY(2, 3);
        assert_eq!(xy, XY(3, 4));
    }
}
