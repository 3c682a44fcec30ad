use crate::io::output::{Cell, Color, FormattedExt, Screen};

/// A horizontal rule across (part of) one row.
pub struct Horizontal<'a> {
    screen: &'a mut Screen,
    row: usize,
    start: Option<usize>,
    end: Option<usize>,
    fill: Cell,
}

impl<'a> Horizontal<'a> {
    pub fn new(screen: &'a mut Screen, row: usize) -> Self {
        Horizontal {
            screen,
            row,
            start: None,
            end: None,
            fill: Cell::of('─').fg(Color::BrightBlack),
        }
    }

    crate::util::setters! {
        start(x: usize) => start = Some(x),
        end(x: usize) => end = Some(x),
    }
}

impl<'a> Drop for Horizontal<'a> {
    fn drop(&mut self) {
        if self.row >= self.screen.size().y() {
            return;
        }
        let width = self.screen.size().x();
        let start_x = self.start.unwrap_or(0).min(width);
        let end_x = self.end.unwrap_or(width).min(width);
        for x in start_x..end_x {
            self.screen[self.row][x] = self.fill.clone();
        }
    }
}
