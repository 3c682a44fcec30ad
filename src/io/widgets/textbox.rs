use crate::io::{
    output::{Screen, Text},
    XY,
};

/// Ancillary data about what a [`Textbox`] drew.
#[derive(Debug, PartialEq, Eq)]
pub struct TextboxData {
    /// How many total lines there were, after word wrapping.
    pub lines: usize,
    /// How many of those made it onto the screen.
    pub height: usize,
}

/// A word-wrapped box of text. Like the other widgets, these are built on the fly every frame and do the actual
/// writing when dropped (or when you call [`Self::render`] to get the [`TextboxData`]).
pub struct Textbox<'a> {
    screen: Option<&'a mut Screen>,
    chunks: Vec<Text>,
    pos: XY,
    width: Option<usize>,
    height: Option<usize>,
    scroll: usize,
    indent: usize,
}

/// Split one paragraph (no newlines) into lines of at most `width` cells, breaking on spaces where possible.
fn wrap(para: Vec<Text>, width: usize, indent: usize) -> Vec<Vec<Text>> {
    let mut lines = vec![];
    let mut line: Vec<Text> = vec![];
    let mut pos = 0;
    for chunk in para {
        let mut rest: Vec<char> = chunk.text.chars().collect();
        while pos + rest.len() > width {
            let space_left = width - pos;
            // break at the last space that fits, or hard-break a word too long for any line
            let split = match rest[..=space_left.min(rest.len() - 1)].iter().rposition(|c| *c == ' ') {
                Some(idx) => Some((idx, idx + 1)),
                None if pos == 0 || pos == indent => Some((space_left, space_left)),
                None => None,
            };
            if let Some((end, resume)) = split {
                let head: String = rest[..end].iter().collect();
                if !head.is_empty() {
                    line.push(chunk.with_text(head));
                }
                rest.drain(..resume);
            }
            lines.push(std::mem::take(&mut line));
            if indent > 0 {
                line.push(Text::plain(&" ".repeat(indent)));
            }
            pos = indent;
        }
        pos += rest.len();
        if !rest.is_empty() {
            line.push(chunk.with_text(rest.into_iter().collect()));
        }
    }
    lines.push(line);
    lines
}

impl<'a> Textbox<'a> {
    pub fn new(screen: &'a mut Screen, text: Vec<Text>) -> Self {
        Self {
            screen: Some(screen),
            chunks: text,
            pos: XY(0, 0),
            width: None,
            height: None,
            scroll: 0,
            indent: 0,
        }
    }

    crate::util::setters! {
        pos(x: usize, y: usize) => pos = XY(x, y),
        width(w: usize) => width = Some(w),
        height(h: usize) => height = Some(h),
        scroll(amt: usize) => scroll = amt,
        indent(amt: usize) => indent = amt,
    }

    pub fn render(mut self) -> TextboxData {
        self.render_mut()
    }

    fn render_mut(&mut self) -> TextboxData {
        let screen = match self.screen.take() {
            Some(s) => s,
            None => return TextboxData { lines: 0, height: 0 },
        };
        let XY(x, mut y) = self.pos;
        let size = screen.size();
        let width = self.width.unwrap_or(size.x().saturating_sub(x));
        let height = self.height.unwrap_or(size.y().saturating_sub(y));
        if width == 0 || height == 0 || self.indent >= width {
            return TextboxData { lines: 0, height: 0 };
        }

        // break the chunks into paragraphs on newlines
        let mut paragraphs = vec![];
        let mut cur_para = vec![];
        for mut chunk in std::mem::take(&mut self.chunks) {
            while let Some((line, rest)) = chunk.text.split_once('\n') {
                cur_para.push(chunk.with_text(line.into()));
                paragraphs.push(std::mem::take(&mut cur_para));
                chunk.text = rest.into();
            }
            if !chunk.text.is_empty() {
                cur_para.push(chunk);
            }
        }
        paragraphs.push(cur_para);

        let lines: Vec<_> = paragraphs
            .into_iter()
            .flat_map(|p| wrap(p, width, self.indent))
            .collect();

        let mut data = TextboxData { lines: lines.len(), height: 0 };
        for line in lines.into_iter().skip(self.scroll).take(height) {
            screen.write(XY(x, y), line);
            y += 1;
            data.height += 1;
        }
        data
    }
}

impl<'a> Drop for Textbox<'a> {
    fn drop(&mut self) {
        self.render_mut();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::text;

    fn screen() -> Screen {
        Screen::new(XY(12, 5))
    }

    #[test]
    fn wraps_on_spaces() {
        let mut s = screen();
        let data = s.textbox(text!("the quick brown fox jumps")).render();
        assert_eq!(data.lines, 3);
        assert_eq!(s.row_text(0).trim_end(), "the quick");
        assert_eq!(s.row_text(1).trim_end(), "brown fox");
        assert_eq!(s.row_text(2).trim_end(), "jumps");
    }

    #[test]
    fn hard_breaks_long_words() {
        let mut s = screen();
        s.textbox(text!("abcdefghijklmnop")).render();
        assert_eq!(s.row_text(0), "abcdefghijkl");
        assert_eq!(s.row_text(1).trim_end(), "mnop");
    }

    #[test]
    fn newlines_start_paragraphs() {
        let mut s = screen();
        let data = s.textbox(text!("one\ntwo\n\nfour")).render();
        assert_eq!(data.lines, 4);
        assert_eq!(s.row_text(3).trim_end(), "four");
    }

    #[test]
    fn scroll_and_height_window() {
        let mut s = screen();
        let data = s.textbox(text!("a\nb\nc\nd")).pos(1, 1).height(2).scroll(1).render();
        assert_eq!(data, TextboxData { lines: 4, height: 2 });
        assert_eq!(s.row_text(1).trim_end(), " b");
        assert_eq!(s.row_text(2).trim_end(), " c");
        assert_eq!(s.row_text(3).trim_end(), "");
    }

    #[test]
    fn renders_on_drop() {
        let mut s = screen();
        s.textbox(text!("dropped"));
        assert_eq!(s.row_text(0).trim_end(), "dropped");
    }
}
