use crate::{
    io::{
        clifmt::{FormattedExt, Text},
        output::Screen,
        XY,
    },
    text,
};

/// The header at the top of the window, which lists the tabs and the balance.
///
/// e.g.:
/// ```text
///  F1 clicker | F2 redeem | F3 history 2 |                    12,300 coins
/// ```
pub struct Header<'a> {
    screen: &'a mut Screen,
    tabs: Vec<(&'static str, usize)>,
    selected: Option<usize>,
    balance: String,
}

impl<'a> Header<'a> {
    pub fn new(screen: &'a mut Screen) -> Self {
        Self {
            screen,
            tabs: Vec::with_capacity(3),
            selected: None,
            balance: String::new(),
        }
    }

    pub fn tab(mut self, name: &'static str, notifs: usize) -> Self {
        self.tabs.push((name, notifs));
        self
    }

    /// Which of `tabs` (name and notification count, as passed to [`Self::tab`]) is drawn at column `x`.
    pub fn tab_at<'t>(tabs: impl IntoIterator<Item = (&'t str, usize)>, x: usize) -> Option<usize> {
        let mut end = 0;
        for (i, (name, notifs)) in tabs.into_iter().enumerate() {
            let notif_width = if notifs == 0 { 0 } else { 2 };
            end += format!(" F{} ", i + 1).len() + name.chars().count() + notif_width + 2;
            if x < end {
                return Some(i);
            }
        }
        None
    }

    crate::util::setters! {
        selected(tab: usize) => selected = Some(tab),
        balance(text: &str) => balance = text.into(),
    }
}

impl<'a> Drop for Header<'a> {
    fn drop(&mut self) {
        let mut line = Vec::with_capacity(self.tabs.len() * 3);
        for (i, (name, notifs)) in self.tabs.iter().enumerate() {
            line.extend(text!(bright_black " F{} "(i + 1)));
            match self.selected {
                Some(n) if n == i => line.push(Text::plain(name).bright_white().bold().underline()),
                _ => line.push(Text::plain(name)),
            }
            match notifs {
                0 => line.extend(text!(" |")),
                1..=9 => line.extend(text!(red " {}"(notifs), " |")),
                _ => line.extend(text!(red " +", " |")),
            }
        }
        self.screen.write(XY(0, 0), line);

        let balance = text!(bright_yellow bold "{} coins "(self.balance));
        let width: usize = balance.iter().map(Text::width).sum();
        let right_align = self.screen.size().x().saturating_sub(width);
        self.screen.write(XY(right_align, 0), balance);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lists_tabs_and_balance() {
        let mut s = Screen::new(XY(60, 2));
        s.header().tab("clicker", 0).tab("history", 3).selected(0).balance("1,200");
        let row = s.row_text(0);
        assert!(row.starts_with(" F1 clicker | F2 history 3 |"), "{:?}", row);
        assert!(row.trim_end().ends_with("1,200 coins"), "{:?}", row);
    }

    #[test]
    fn finds_tab_under_column() {
        let tabs = [("clicker", 0), ("history", 3)];
        // " F1 clicker |" is 13 wide, " F2 history 3 |" the next 15
        assert_eq!(Header::tab_at(tabs, 0), Some(0));
        assert_eq!(Header::tab_at(tabs, 12), Some(0));
        assert_eq!(Header::tab_at(tabs, 13), Some(1));
        assert_eq!(Header::tab_at(tabs, 27), Some(1));
        assert_eq!(Header::tab_at(tabs, 28), None);
    }

    #[test]
    fn many_notifs_collapse() {
        let mut s = Screen::new(XY(60, 1));
        s.header().tab("history", 12);
        assert!(s.row_text(0).starts_with(" F1 history + |"));
    }
}
