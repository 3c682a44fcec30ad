//! The clicker itself: the coin, the balance, and the session's click count.

use crate::{
    event::{Event, Notice},
    game::Replies,
    io::{
        clifmt::thousands,
        input::{Action, Key, MouseButton},
        output::Screen,
        XY,
    },
    state::GameState,
    text,
    wallet::COINS_PER_CLICK,
};

use super::{App, HEADER_HEIGHT};

/// Every this-many clicks in a session, the player gets a bit of encouragement.
pub const MILESTONE: u64 = 50;

const COIN: [&str; 5] = [
    r"   .-----.   ",
    r"  /  ___  \  ",
    r" |  | $ |  | ",
    r"  \  ---  /  ",
    r"   '-----'   ",
];

/// The tab where coins get earned.
#[derive(Clone, Debug, Default)]
pub struct ClickerApp {
    /// Clicks since the game started; not saved
    clicks: u64,
    /// Briefly highlights the coin after a click
    pressed: bool,
}

impl ClickerApp {
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    fn click(&mut self, replies: &mut Replies<Event>) {
        self.clicks += 1;
        self.pressed = true;
        replies.queue(Event::Clicked);
        if self.clicks % MILESTONE == 0 {
            replies.queue(Event::Notice(Notice::success(format!(
                "{} clicks! You're on fire!",
                thousands(self.clicks)
            ))));
        }
    }
}

impl App for ClickerApp {
    fn name(&self) -> &'static str {
        "clicker"
    }

    fn input(&mut self, a: Action, _state: &GameState, replies: &mut Replies<Event>) -> bool {
        match a {
            Action::KeyPress {
                key: Key::Char(' ') | Key::Enter,
            }
            | Action::MousePress {
                button: MouseButton::Left,
                ..
            } => {
                self.click(replies);
                true
            }
            Action::MouseRelease { .. } if self.pressed => {
                self.pressed = false;
                true
            }
            _ => false,
        }
    }

    fn on_event(&mut self, ev: &Event, _state: &GameState) -> bool {
        // balance changes come through the state; this just makes sure they get drawn
        matches!(ev, Event::Clicked)
    }

    fn notifs(&self) -> usize {
        0
    }

    fn render(&mut self, state: &GameState, screen: &mut Screen) {
        let top = HEADER_HEIGHT + 1;
        let width = screen.size().x().saturating_sub(4);
        screen
            .textbox(text!(
                bold "Coin Clicker\n",
                "Click the golden coin to earn rewards!\n\n",
                "Total Coins: ", bright_yellow bold "{}"(thousands(state.wallet.coins())), "\n",
                "Clicks this session: ", bright_white "{}"(thousands(self.clicks)), "\n",
                "Coins earned this session: ", bright_white "{}"(thousands(self.clicks * COINS_PER_CLICK)), "\n",
            ))
            .pos(2, top)
            .width(width);

        let coin = XY(screen.size().x().saturating_sub(COIN[0].len()) / 2, top + 7);
        for (i, line) in COIN.iter().enumerate() {
            let line = if self.pressed {
                text!(yellow invert "{}"(line))
            } else {
                text!(bright_yellow bold "{}"(line))
            };
            screen.write(coin + (0, i), line);
        }
        let reward = format!("+{} coins per click", COINS_PER_CLICK);
        let reward_left = screen.size().x().saturating_sub(reward.len()) / 2;
        screen.write(
            XY(reward_left, coin.y() + COIN.len() + 1),
            text!(green "{}"(reward)),
        );

        screen
            .textbox(text!(
                bright_cyan bold "Tip: ",
                "Press Space or Enter, or click anywhere, to earn coins. ",
                "Keep clicking, then visit the redeem tab (F2) to exchange them for PayPal cash!",
            ))
            .pos(2, coin.y() + COIN.len() + 3)
            .width(width);
        self.pressed = false;
    }
}
