//! Cashing coins in: the tier list, and the PayPal email prompt for the chosen tier.

use std::time::Duration;

use tracing::debug;

use crate::{
    agents::{payout::DEFAULT_DELAY, Payout},
    email,
    event::{Event, Notice},
    game::Replies,
    io::{
        clifmt::{thousands, Text},
        input::{Action, Key},
        output::Screen,
    },
    state::GameState,
    text,
    tiers::{Affordability, Tier, TIERS},
};

use super::{App, HEADER_HEIGHT};

const BAR_WIDTH: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
struct EmailPrompt {
    tier: &'static Tier,
    email: String,
    /// Why the last attempt to confirm was rejected; cleared on any edit
    error: Option<String>,
}

/// The tab where coins get traded for (pretend) cash.
#[derive(Clone, Debug)]
pub struct RedeemApp {
    /// Which tier the cursor is on
    sel: usize,
    prompt: Option<EmailPrompt>,
    /// Tiers with a payout in flight
    processing: Vec<&'static str>,
    /// How long each payout takes to go through
    delay: Duration,
}

impl Default for RedeemApp {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl RedeemApp {
    pub fn new(delay: Duration) -> Self {
        Self {
            sel: 0,
            prompt: None,
            processing: vec![],
            delay,
        }
    }

    pub fn is_processing(&self, tier: &str) -> bool {
        self.processing.iter().any(|t| *t == tier)
    }

    fn choose(&mut self, state: &GameState, replies: &mut Replies<Event>) {
        let tier = &TIERS[self.sel];
        if self.is_processing(tier.id) {
            return;
        }
        if !tier.selectable(&state.wallet) {
            let short = state.wallet.shortfall(tier.coins);
            replies.queue(Event::Notice(Notice::error(format!(
                "You need {} more coins to redeem this tier!",
                thousands(short)
            ))));
            return;
        }
        self.prompt = Some(EmailPrompt {
            tier,
            email: String::new(),
            error: None,
        });
    }

    fn prompt_input(&mut self, key: Key, replies: &mut Replies<Event>) -> bool {
        let prompt = match self.prompt.as_mut() {
            Some(p) => p,
            None => return false,
        };
        match key {
            Key::Char(c) => {
                prompt.email.push(c);
                prompt.error = None;
            }
            Key::Backspace => {
                prompt.email.pop();
                prompt.error = None;
            }
            Key::Escape => self.prompt = None,
            Key::Enter => match email::validate(&prompt.email) {
                Ok(address) => {
                    let tier = prompt.tier;
                    debug!(tier = tier.id, "redemption confirmed");
                    self.prompt = None;
                    self.processing.push(tier.id);
                    replies
                        .spawn(Payout::new(tier, address.clone(), self.delay))
                        .queue(Event::RedeemRequested {
                            tier: tier.id,
                            email: address,
                        });
                }
                Err(e) => prompt.error = Some(e.to_string()),
            },
            _ => return false,
        }
        true
    }

    fn tier_line(&self, i: usize, tier: &Tier, state: &GameState) -> Vec<Text> {
        let mut line = Vec::with_capacity(8);
        if i == self.sel {
            line.extend(text!(bright_white bold "> "));
        } else {
            line.extend(text!("  "));
        }
        line.extend(text!(bright_green bold "{:>5}"(format!("${}", tier.cash))));
        line.extend(text!("  for ", bright_yellow "{:>7}"(thousands(tier.coins)), " coins  "));

        let pct = tier.progress(&state.wallet) as usize;
        let filled = pct * BAR_WIDTH / 100;
        let afford = tier.affordability(&state.wallet);
        let bar = "#".repeat(filled) + &".".repeat(BAR_WIDTH - filled);
        line.extend(match afford {
            Affordability::Affordable => text!(green "[{}]"(bar)),
            Affordability::Close => text!(yellow "[{}]"(bar)),
            Affordability::Far => text!(bright_black "[{}]"(bar)),
        });
        line.extend(text!(" {:>3}%  "(pct)));

        if self.is_processing(tier.id) {
            line.extend(text!(cyan "Processing..."));
        } else if afford == Affordability::Affordable {
            line.extend(text!(green bold "Redeem Now"));
        } else {
            let short = thousands(state.wallet.shortfall(tier.coins));
            match afford {
                Affordability::Close => line.extend(text!(yellow "Need {} more coins"(short))),
                _ => line.extend(text!(bright_black "Need {} more coins"(short))),
            }
        }
        if tier.popular {
            line.extend(text!("  ", black on_yellow bold " POPULAR "));
        }
        line
    }
}

impl App for RedeemApp {
    fn name(&self) -> &'static str {
        "redeem"
    }

    fn input(&mut self, a: Action, state: &GameState, replies: &mut Replies<Event>) -> bool {
        let key = match a {
            Action::KeyPress { key } => key,
            _ => return false,
        };
        if self.prompt.is_some() {
            return self.prompt_input(key, replies);
        }
        match key {
            Key::Up if self.sel > 0 => self.sel -= 1,
            Key::Down if self.sel < TIERS.len() - 1 => self.sel += 1,
            Key::Enter => {
                self.choose(state, replies);
                return self.prompt.is_some();
            }
            _ => return false,
        }
        true
    }

    fn on_event(&mut self, ev: &Event, _state: &GameState) -> bool {
        match ev {
            Event::PayoutSettled { tier, .. } => {
                self.processing.retain(|t| t != tier);
                true
            }
            // affordability changes with the balance
            Event::Clicked => true,
            _ => false,
        }
    }

    fn notifs(&self) -> usize {
        self.processing.len()
    }

    fn captures_text(&self) -> bool {
        self.prompt.is_some()
    }

    fn render(&mut self, state: &GameState, screen: &mut Screen) {
        let top = HEADER_HEIGHT + 1;
        let width = screen.size().x().saturating_sub(4);
        screen
            .textbox(text!(
                bold "Redeem Your Coins\n",
                "Balance: ", bright_yellow bold "{}"(thousands(state.wallet.coins())), " coins",
            ))
            .pos(2, top)
            .width(width);

        let list_top = top + 3;
        for (i, tier) in TIERS.iter().enumerate() {
            let line = self.tier_line(i, tier, state);
            screen.write(crate::io::XY(2, list_top + i), line);
        }

        let below = list_top + TIERS.len() + 1;
        let body = match &self.prompt {
            Some(prompt) => {
                let mut body = text!(
                    bold "Enter PayPal Email\n",
                    "Redeem ", bright_green bold "${}"(prompt.tier.cash),
                    " for ", bright_yellow "{}"(thousands(prompt.tier.coins)), " coins\n\n",
                    "PayPal Email Address: ", underline "{}_"(prompt.email), "\n",
                );
                if let Some(error) = &prompt.error {
                    body.extend(text!(bright_red "{}\n"(error)));
                }
                body.extend(text!(bright_black "\nEnter to confirm, Esc to cancel"));
                body
            }
            None => text!(
                bold "How Redemption Works\n",
                "Up/Down to pick a tier, Enter to redeem it.\n",
                "- Minimum redemption is $1 (5,000 coins)\n",
                "- PayPal payments are processed within 24 hours\n",
                "- You'll receive an email confirmation once payment is sent\n",
                "- All transactions are tracked in your history (F3)",
            ),
        };
        screen.textbox(body).pos(2, below).width(width);
    }
}
