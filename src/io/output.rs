//! The [`Screen`] every view renders onto, and the [`IoSystem`](super::sys::IoSystem)s then display.

use std::ops;

pub use super::clifmt::*;
pub use super::widgets::*;

use super::XY;

/// A render target: a grid of formatted cells.
pub struct Screen {
    cells: Vec<Cell>,
    size: XY,
}

impl Screen {
    pub fn new(size: XY) -> Self {
        let mut res = Self {
            cells: vec![],
            size: XY(0, 0),
        };
        res.resize(size);
        res
    }

    pub fn size(&self) -> XY {
        self.size
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `chunks` panics on 0, and a zero-width screen has no rows anyway
        self.cells.chunks(self.size.x().max(1)).take(self.size.y())
    }

    /// Resize the screen, which also clears it.
    pub fn resize(&mut self, size: XY) {
        self.cells.truncate(0);
        self.cells.resize(size.x() * size.y(), Cell::BLANK);
        self.size = size;
    }

    /// Write some text starting at `pos`, without wrapping. Anything past the right edge is cut off.
    ///
    /// Returns how many cells were written.
    pub fn write(&mut self, pos: XY, text: Vec<Text>) -> usize {
        let XY(start, y) = pos;
        if y >= self.size.y() {
            return 0;
        }
        let mut x = start;
        for chunk in text {
            for ch in chunk.text.chars() {
                if x >= self.size.x() {
                    return x - start;
                }
                self[y][x] = Cell::of(ch).fmt_of(&chunk);
                x += 1;
            }
        }
        x - start
    }

    /// Write the header to the screen.
    pub fn header(&mut self) -> Header<'_> {
        Header::new(self)
    }

    /// Write a text-box to the screen.
    pub fn textbox(&mut self, text: Vec<Text>) -> Textbox<'_> {
        Textbox::new(self, text)
    }

    /// Draw a horizontal line across the screen.
    pub fn horizontal(&mut self, row: usize) -> Horizontal<'_> {
        Horizontal::new(self, row)
    }

    /// The plain characters of one row, for tests and debugging.
    pub fn row_text(&self, row: usize) -> String {
        self[row].iter().map(|c| c.ch).collect()
    }

    /// The whole screen as plain text, one line per row, trailing spaces trimmed.
    pub fn plain_text(&self) -> String {
        (0..self.size.y())
            .map(|y| self.row_text(y).trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ops::Index<usize> for Screen {
    type Output = [Cell];
    fn index(&self, row: usize) -> &Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &self.cells[start..end]
    }
}

impl ops::IndexMut<usize> for Screen {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        let start = row * self.size.x();
        let end = start + self.size.x();
        &mut self.cells[start..end]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::text;

    #[test]
    fn write_clips_at_edge() {
        let mut s = Screen::new(XY(5, 2));
        assert_eq!(s.write(XY(2, 1), text!("hello")), 3);
        assert_eq!(s.row_text(1), "  hel");
        assert_eq!(s.row_text(0), "     ");
    }

    #[test]
    fn write_off_screen_is_ignored() {
        let mut s = Screen::new(XY(5, 2));
        assert_eq!(s.write(XY(0, 7), text!("hello")), 0);
    }

    #[test]
    fn write_keeps_formatting() {
        let mut s = Screen::new(XY(4, 1));
        s.write(XY(0, 0), text!(red "ab", "cd"));
        assert_eq!(s[0][1].get_fmt().fg, Color::Red);
        assert_eq!(s[0][2].get_fmt().fg, Color::Default);
    }
}
