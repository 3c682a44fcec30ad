//! The [`Game`] that owns the save and switches between the apps.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::{
    app::{App, Apps, ClickerApp, HistoryApp, RedeemApp},
    error::Error,
    event::{Event, Notice, Tone},
    game::{Game, Replies, Response},
    io::{
        clifmt::thousands,
        input::{Action, Key, MouseButton},
        output::{Header, Screen},
        XY,
    },
    saves::{Storage, Store},
    state::GameState,
    text,
    tiers::Tier,
};

/// How long a notice stays in the status line.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

const HINT: &str = "F1-F3 or Tab to switch tabs, q to quit";

/// The game as the player sees it: a header of tabs, the current app, and a status line.
///
/// All changes to the coins and history happen here, in response to the events the apps queue, so they go through
/// the [`Store`] and get saved.
pub struct Frontend<S: Storage> {
    store: Store<S>,
    apps: Vec<Apps>,
    sel: usize,
    status: Option<(Notice, Instant)>,
}

impl<S: Storage> Frontend<S> {
    pub fn new(store: Store<S>, payout_delay: Duration) -> Self {
        let apps = vec![
            ClickerApp::default().into(),
            RedeemApp::new(payout_delay).into(),
            HistoryApp::new(store.state()).into(),
        ];
        Self {
            store,
            apps,
            sel: 0,
            status: None,
        }
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// The name of the app currently on screen.
    pub fn current(&self) -> &'static str {
        self.apps[self.sel].name()
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status.as_ref().map(|(n, _)| n)
    }

    fn notify(&mut self, notice: Notice) -> Response {
        self.status = Some((notice, Instant::now()));
        Response::Redraw
    }

    fn select(&mut self, tab: usize) -> Response {
        if tab >= self.apps.len() || tab == self.sel {
            return Response::Nothing;
        }
        self.sel = tab;
        Response::Redraw
    }

    fn settle(&mut self, tier: &str, email: &str) -> Response {
        let tier = match Tier::lookup(tier) {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "payout settled for a tier that doesn't exist");
                return self.notify(Notice::error("Redemption failed. Please try again."));
            }
        };
        match self.store.redeem(tier, email, Utc::now()) {
            Ok(r) => self.notify(Notice::success(format!(
                "Successfully redeemed ${}! PayPal payment will be sent to {} within 24 hours.",
                r.cash, r.paypal_email
            ))),
            Err(e @ Error::InsufficientCoins { .. }) => {
                warn!(tier = tier.id, "balance dropped below the tier before the payout settled");
                self.notify(Notice::error(e.to_string()))
            }
            Err(e) => {
                error!(error = %e, tier = tier.id, "redemption failed");
                self.notify(Notice::error("Redemption failed. Please try again."))
            }
        }
    }
}

impl<S: Storage> Game for Frontend<S> {
    type Message = Event;

    fn input(&mut self, input: Action, replies: &mut Replies<Event>) -> Response {
        let captures = self.apps[self.sel].captures_text();
        match input {
            Action::KeyPress { key: Key::F(n) } if n >= 1 => self.select(n as usize - 1),
            Action::KeyPress { key: Key::Tab } => self.select((self.sel + 1) % self.apps.len()),
            Action::KeyPress { key: Key::BackTab } => {
                self.select((self.sel + self.apps.len() - 1) % self.apps.len())
            }
            Action::KeyPress {
                key: Key::Char('q') | Key::Escape,
            } if !captures => Response::Quit,
            Action::MousePress {
                button: MouseButton::Left,
                pos: XY(x, 0),
            } => {
                let tabs = self.apps.iter().map(|a| (a.name(), a.notifs()));
                match Header::tab_at(tabs, x) {
                    Some(tab) => self.select(tab),
                    None => Response::Nothing,
                }
            }
            Action::Unknown(what) => {
                debug!(what = %what, "unknown input");
                Response::Nothing
            }
            other => Response::redraw_if(self.apps[self.sel].input(other, self.store.state(), replies)),
        }
    }

    fn event(&mut self, event: &Event) -> Response {
        let res = match event {
            Event::Tick => {
                let expired = matches!(&self.status, Some((_, at)) if at.elapsed() >= NOTICE_TTL);
                if expired {
                    self.status = None;
                }
                Response::redraw_if(expired)
            }
            Event::Clicked => match self.store.click() {
                Ok(coins) => {
                    debug!(coins, "clicked");
                    Response::Redraw
                }
                Err(e) => {
                    error!(error = %e, "click wasn't saved");
                    self.notify(Notice::error(e.to_string()))
                }
            },
            Event::RedeemRequested { tier, email } => {
                info!(tier = %tier, "payout requested");
                let cash = Tier::by_id(tier).map(|t| t.cash).unwrap_or_default();
                self.notify(Notice::info(format!("Processing ${} to {}...", cash, email)))
            }
            Event::PayoutSettled { tier, email } => self.settle(tier, email),
            Event::Notice(notice) => self.notify(notice.clone()),
        };

        let state = self.store.state();
        self.apps
            .iter_mut()
            .fold(res, |res, app| res.and(Response::redraw_if(app.on_event(event, state))))
    }

    fn render(&mut self, onto: &mut Screen) {
        let size = onto.size();
        let state = self.store.state();
        self.apps[self.sel].render(state, onto);

        let balance = thousands(state.wallet.coins());
        let mut header = onto.header();
        for app in &self.apps {
            header = header.tab(app.name(), app.notifs());
        }
        header.selected(self.sel).balance(&balance);

        let last = size.y().saturating_sub(1);
        onto.horizontal(last.saturating_sub(1));
        let status = match &self.status {
            Some((notice, _)) => match notice.tone {
                Tone::Info => text!(bright_cyan " {}"(notice.text)),
                Tone::Success => text!(bright_green bold " {}"(notice.text)),
                Tone::Error => text!(bright_red bold " {}"(notice.text)),
            },
            None => text!(bright_black " {}"(HINT)),
        };
        onto.write(XY(0, last), status);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use crate::{
        io::sys::scripted::Scripted,
        redemption::Status,
        runner::Runner,
        saves::{memory::Memory, COINS_KEY},
    };

    use super::*;

    fn key(key: Key) -> Action {
        Action::KeyPress { key }
    }

    fn frontend(coins: u64) -> Frontend<Memory> {
        let mut mem = Memory::new();
        mem.set(COINS_KEY, &coins.to_string()).unwrap();
        Frontend::new(Store::load(mem).unwrap(), Duration::ZERO)
    }

    /// Feed an input, then every event it queued, like a round of the main loop would.
    fn round(fe: &mut Frontend<Memory>, action: Action) -> (Response, Replies<Event>) {
        let mut replies = Replies::default();
        let res = fe.input(action, &mut replies);
        for ev in replies.messages().to_vec() {
            fe.event(&ev);
        }
        (res, replies)
    }

    #[test]
    fn clicking_earns_and_saves() {
        let mut fe = frontend(0);
        round(&mut fe, key(Key::Char(' ')));
        round(&mut fe, key(Key::Enter));
        assert_eq!(fe.state().wallet.coins(), 200);
        assert_eq!(fe.store().storage().get(COINS_KEY).unwrap().as_deref(), Some("200"));
    }

    #[test]
    fn tabs_switch() {
        let mut fe = frontend(0);
        assert_eq!(fe.current(), "clicker");
        assert_eq!(round(&mut fe, key(Key::F(3))).0, Response::Redraw);
        assert_eq!(fe.current(), "history");
        round(&mut fe, key(Key::Tab));
        assert_eq!(fe.current(), "clicker");
        round(&mut fe, key(Key::BackTab));
        assert_eq!(fe.current(), "history");
        assert_eq!(round(&mut fe, key(Key::F(9))).0, Response::Nothing);
        round(
            &mut fe,
            Action::MousePress {
                button: MouseButton::Left,
                pos: XY(15, 0),
            },
        );
        assert_eq!(fe.current(), "redeem");
    }

    #[test]
    fn q_quits_unless_typing() {
        let mut fe = frontend(5_000);
        assert_eq!(round(&mut fe, key(Key::Char('q'))).0, Response::Quit);
        round(&mut fe, key(Key::F(2)));
        round(&mut fe, key(Key::Enter));
        assert_eq!(round(&mut fe, key(Key::Char('q'))).0, Response::Redraw);
        assert_eq!(round(&mut fe, key(Key::Escape)).0, Response::Redraw);
        assert_eq!(round(&mut fe, key(Key::Escape)).0, Response::Quit);
    }

    #[test]
    fn settling_spends_and_records() {
        let mut fe = frontend(12_000);
        fe.event(&Event::PayoutSettled {
            tier: "tier2",
            email: "me@example.com".into(),
        });
        assert_eq!(fe.state().wallet.coins(), 2_000);
        let newest = &fe.state().history.entries()[0];
        assert_eq!((newest.cash, newest.coins, newest.status.clone()), (5, 10_000, Status::Completed));
        assert_eq!(
            fe.status(),
            Some(&Notice::success(
                "Successfully redeemed $5! PayPal payment will be sent to me@example.com within 24 hours."
            ))
        );
    }

    #[test]
    fn settling_without_funds_fails_cleanly() {
        let mut fe = frontend(4_000);
        fe.event(&Event::PayoutSettled {
            tier: "tier1",
            email: "me@example.com".into(),
        });
        assert_eq!(fe.state().wallet.coins(), 4_000);
        assert!(fe.state().history.is_empty());
        assert_eq!(fe.status(), Some(&Notice::error("Insufficient coins!")));
    }

    #[test]
    fn renders_header_and_status() {
        let mut fe = frontend(12_300);
        fe.event(&Event::Notice(Notice::info("hello there")));
        let mut screen = Screen::new(XY(80, 24));
        fe.render(&mut screen);
        let top = screen.row_text(0);
        assert!(top.starts_with(" F1 clicker | F2 redeem | F3 history |"), "{:?}", top);
        assert!(top.trim_end().ends_with("12,300 coins"), "{:?}", top);
        assert_eq!(screen.row_text(23).trim_end(), " hello there");
    }

    #[test]
    fn whole_redemption_through_the_main_loop() {
        let mut script = vec![key(Key::Char(' ')); 3];
        script.extend([key(Key::F(2)), key(Key::Enter)]);
        script.extend("me@example.com".chars().map(|c| key(Key::Char(c))));
        script.push(key(Key::Enter));
        let (sys, run) = Scripted::new(script, Duration::from_millis(500));

        let fe = Runner::new(frontend(5_000)).input_tick(0.01).run(sys, run);

        assert_eq!(fe.state().wallet.coins(), 300);
        assert_eq!(fe.state().history.len(), 1);
        assert_eq!(fe.state().history.entries()[0].paypal_email, "me@example.com");
        assert_eq!(fe.store().storage().get(COINS_KEY).unwrap().as_deref(), Some("300"));
        assert!(fe.status().unwrap().text.starts_with("Successfully redeemed $1!"));
    }
}
