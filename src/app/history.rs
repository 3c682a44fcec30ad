use crate::{
    event::Event,
    game::Replies,
    io::{
        clifmt::{thousands, Text},
        input::{Action, Key, MouseButton},
        output::Screen,
        XY,
    },
    redemption::{Redemption, Status},
    state::GameState,
    text,
};

use super::{App, FOOTER_HEIGHT, HEADER_HEIGHT};

/// Column widths of the table, left to right: date, amount, coins, status. The email gets whatever's left.
const COLUMNS: [usize; 4] = [24, 9, 13, 11];

/// The tab listing every redemption so far, newest first.
#[derive(Clone, Debug)]
pub struct HistoryApp {
    /// How many rows of the table are scrolled past
    scroll: usize,
    /// How many redemptions there were the last time this was looked at
    seen: usize,
    unread: usize,
}

impl HistoryApp {
    /// Start with everything already in `state` counted as seen.
    pub fn new(state: &GameState) -> Self {
        Self {
            scroll: 0,
            seen: state.history.len(),
            unread: 0,
        }
    }

    fn row(r: &Redemption) -> Vec<Text> {
        let [date, cash, coins, status] = COLUMNS;
        let mut line = text!(
            "{:<1$}"(r.local_date(), date),
            bright_green bold "{:<1$}"(format!("${}", r.cash), cash),
            bright_yellow "{:<1$}"(thousands(r.coins), coins),
        );
        let status_text = format!("{:<1$}", r.status.to_string(), status);
        line.extend(match r.status {
            Status::Completed => text!(green "{}"(status_text)),
            Status::Pending => text!(yellow "{}"(status_text)),
            Status::Failed => text!(red "{}"(status_text)),
            Status::Other(_) => text!("{}"(status_text)),
        });
        line.extend(text!(bright_black "{}"(r.paypal_email)));
        line
    }
}

impl App for HistoryApp {
    fn name(&self) -> &'static str {
        "history"
    }

    fn input(&mut self, a: Action, state: &GameState, _replies: &mut Replies<Event>) -> bool {
        let up = matches!(
            a,
            Action::KeyPress { key: Key::Up }
                | Action::MousePress {
                    button: MouseButton::ScrollUp,
                    ..
                }
        );
        let down = matches!(
            a,
            Action::KeyPress { key: Key::Down }
                | Action::MousePress {
                    button: MouseButton::ScrollDown,
                    ..
                }
        );
        if up && self.scroll > 0 {
            self.scroll -= 1;
            true
        } else if down && self.scroll + 1 < state.history.len() {
            self.scroll += 1;
            true
        } else {
            false
        }
    }

    fn on_event(&mut self, _ev: &Event, state: &GameState) -> bool {
        let len = state.history.len();
        if len > self.seen {
            self.unread += len - self.seen;
            self.seen = len;
            true
        } else {
            false
        }
    }

    fn notifs(&self) -> usize {
        self.unread
    }

    fn render(&mut self, state: &GameState, screen: &mut Screen) {
        self.unread = 0;
        self.seen = state.history.len();

        let history = &state.history;
        let size = screen.size();
        let width = size.x().saturating_sub(4);
        let top = HEADER_HEIGHT + 1;
        screen
            .textbox(text!(
                bold "Redemption History\n",
                "Total Redeemed: ", bright_green bold "${}"(thousands(history.total_cash())),
                "   Coins Spent: ", bright_yellow "{}"(thousands(history.total_coins())),
                "   Transactions: ", bright_white "{}"(history.len()),
            ))
            .pos(2, top)
            .width(width);

        let table_top = top + 3;
        if history.is_empty() {
            screen
                .textbox(text!(
                    bold "No Redemptions Yet\n",
                    "Start clicking to earn coins, then redeem them for PayPal cash on the redeem tab (F2)!",
                ))
                .pos(2, table_top)
                .width(width);
            return;
        }

        let [date, cash, coins, status] = COLUMNS;
        screen.write(
            XY(2, table_top),
            text!(
                bold "{:<1$}"("Date", date),
                bold "{:<1$}"("Amount", cash),
                bold "{:<1$}"("Coins Spent", coins),
                bold "{:<1$}"("Status", status),
                bold "PayPal Email",
            ),
        );
        screen.horizontal(table_top + 1).start(2).end(size.x().saturating_sub(2));

        let rows_top = table_top + 2;
        let room = size.y().saturating_sub(rows_top + FOOTER_HEIGHT);
        for (i, r) in history.entries().iter().skip(self.scroll).take(room).enumerate() {
            screen.write(XY(2, rows_top + i), Self::row(r));
        }
        let remaining = history.len().saturating_sub(self.scroll);
        let shown = remaining.min(room);
        if self.scroll > 0 || shown < remaining {
            let hint = format!(
                "{}-{} of {}, Up/Down to scroll",
                self.scroll + 1,
                self.scroll + shown,
                history.len()
            );
            screen.write(
                XY(size.x().saturating_sub(hint.len() + 2), table_top),
                text!(bright_black "{}"(hint)),
            );
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};

    use crate::{app::assert_input, redemption::History, tiers::Tier};

    use super::*;

    const UP: Action = Action::KeyPress { key: Key::Up };
    const DOWN: Action = Action::KeyPress { key: Key::Down };

    fn state_with(n: usize) -> GameState {
        let mut history = History::default();
        let tier = Tier::by_id("tier2").unwrap();
        for i in 0..n {
            let at = Utc.with_ymd_and_hms(2024, 3, 1 + i as u32, 12, 0, 0).unwrap();
            history.record(Redemption::completed(tier, &format!("p{}@example.com", i), at));
        }
        GameState {
            history,
            ..Default::default()
        }
    }

    #[test]
    fn empty_history_hints() {
        let mut app = HistoryApp::new(&GameState::default());
        let mut screen = Screen::new(XY(100, 24));
        app.render(&GameState::default(), &mut screen);
        let text = screen.plain_text();
        assert!(text.contains("No Redemptions Yet"), "{}", text);
        assert!(text.contains("Transactions: 0"), "{}", text);
    }

    #[test]
    fn table_is_newest_first_with_totals() {
        let state = state_with(3);
        let mut app = HistoryApp::new(&state);
        let mut screen = Screen::new(XY(100, 24));
        app.render(&state, &mut screen);
        let text = screen.plain_text();
        assert!(text.contains("Total Redeemed: $15"), "{}", text);
        assert!(text.contains("Coins Spent: 30,000"), "{}", text);
        assert!(text.contains("Transactions: 3"), "{}", text);
        let first = text.find("p2@example.com").unwrap();
        let last = text.find("p0@example.com").unwrap();
        assert!(first < last);
        assert!(text.contains("Completed"));
    }

    #[test]
    fn unknown_status_shows_as_written() {
        let mut state = state_with(1);
        let mut odd = state.history.entries()[0].clone();
        odd.status = Status::Other("processing".into());
        state.history = History::default();
        state.history.record(odd);
        let mut app = HistoryApp::new(&state);
        let mut screen = Screen::new(XY(100, 24));
        app.render(&state, &mut screen);
        let text = screen.plain_text();
        assert!(text.contains("processing"), "{}", text);
        assert!(text.contains("Total Redeemed: $0"), "{}", text);
    }

    #[test]
    fn counts_unseen_redemptions() {
        let before = state_with(1);
        let mut app = HistoryApp::new(&before);
        assert_eq!(app.notifs(), 0);

        let after = state_with(3);
        assert!(app.on_event(&Event::Tick, &after));
        assert_eq!(app.notifs(), 2);
        assert!(!app.on_event(&Event::Tick, &after));

        app.render(&after, &mut Screen::new(XY(80, 24)));
        assert_eq!(app.notifs(), 0);
    }

    #[test]
    fn scrolls_within_the_list() {
        let state = state_with(2);
        let mut app = HistoryApp::new(&state);
        assert_input!(app.input(UP, &state) clean, .is_empty());
        assert_input!(app.input(DOWN, &state) taints, .is_empty());
        assert_input!(app.input(DOWN, &state) clean, .is_empty());
        assert_input!(app.input(UP, &state) taints, .is_empty());
    }
}
