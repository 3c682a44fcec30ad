//! Records of coins cashed in, and the history they're kept in.

use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::tiers::Tier;

/// Where a payout is at.
///
/// Payouts are simulated and always succeed, so everything this game records itself is `Completed`. The rest are
/// still understood so history written by other tools loads and displays properly; anything unrecognized is kept
/// as written in [`Status::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Completed,
    Pending,
    Failed,
    Other(String),
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "completed" => Status::Completed,
            "pending" => Status::Pending,
            "failed" => Status::Failed,
            _ => Status::Other(raw),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Completed => "completed".into(),
            Status::Pending => "pending".into(),
            Status::Failed => "failed".into(),
            Status::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Completed => "Completed",
            Status::Pending => "Pending",
            Status::Failed => "Failed",
            Status::Other(raw) => raw.as_str(),
        })
    }
}

/// One exchange of coins for cash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub id: String,
    pub date: DateTime<Utc>,
    pub coins: u64,
    pub cash: u64,
    pub status: Status,
    pub paypal_email: String,
}

impl Redemption {
    /// A finished redemption of `tier`, paid out to `email` at time `at`.
    pub fn completed(tier: &Tier, email: &str, at: DateTime<Utc>) -> Self {
        Self {
            id: at.timestamp_millis().to_string(),
            date: at,
            coins: tier.coins,
            cash: tier.cash,
            status: Status::Completed,
            paypal_email: email.into(),
        }
    }

    /// The date, in local time, formatted for people, e.g. `Oct 19, 2026, 03:04 PM`.
    pub fn local_date(&self) -> String {
        self.date.with_timezone(&Local).format("%b %-d, %Y, %I:%M %p").to_string()
    }
}

/// Every redemption ever made, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<Redemption>);

impl History {
    /// Add a new redemption to the front of the history.
    ///
    /// If the id would collide with the newest record (two redemptions in the same millisecond), it gets a
    /// suffix so ids stay unique.
    pub fn record(&mut self, mut r: Redemption) {
        if let Some(newest) = self.0.first() {
            if newest.id == r.id || newest.id.starts_with(&format!("{}-", r.id)) {
                r.id = format!("{}-{}", r.id, self.0.len());
            }
        }
        self.0.insert(0, r);
    }

    pub fn entries(&self) -> &[Redemption] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn completed(&self) -> impl Iterator<Item = &Redemption> {
        self.0.iter().filter(|r| r.status == Status::Completed)
    }

    /// Total dollars paid out, counting only completed redemptions.
    pub fn total_cash(&self) -> u64 {
        self.completed().map(|r| r.cash).sum()
    }

    /// Total coins spent, counting only completed redemptions.
    pub fn total_coins(&self) -> u64 {
        self.completed().map(|r| r.coins).sum()
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn completed_copies_the_tier() {
        let tier = Tier::by_id("tier3").unwrap();
        let r = Redemption::completed(tier, "a@b.co", at(0));
        assert_eq!(r.coins, 20_000);
        assert_eq!(r.cash, 10);
        assert_eq!(r.status, Status::Completed);
        assert_eq!(r.paypal_email, "a@b.co");
        assert_eq!(r.id, "1700000000000");
    }

    #[test]
    fn newest_first() {
        let tier = Tier::by_id("tier1").unwrap();
        let mut h = History::default();
        h.record(Redemption::completed(tier, "first@x.io", at(0)));
        h.record(Redemption::completed(tier, "second@x.io", at(5)));
        assert_eq!(h.len(), 2);
        assert_eq!(h.entries()[0].paypal_email, "second@x.io");
        assert_eq!(h.entries()[1].paypal_email, "first@x.io");
    }

    #[test]
    fn same_millisecond_ids_stay_unique() {
        let tier = Tier::by_id("tier1").unwrap();
        let mut h = History::default();
        h.record(Redemption::completed(tier, "a@x.io", at(0)));
        h.record(Redemption::completed(tier, "b@x.io", at(0)));
        h.record(Redemption::completed(tier, "c@x.io", at(0)));
        let mut ids: Vec<_> = h.entries().iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn totals_skip_unfinished() {
        let mut h = History::default();
        h.record(Redemption::completed(Tier::by_id("tier1").unwrap(), "a@x.io", at(0)));
        h.record(Redemption::completed(Tier::by_id("tier4").unwrap(), "a@x.io", at(1)));
        let mut failed = Redemption::completed(Tier::by_id("tier6").unwrap(), "a@x.io", at(2));
        failed.status = Status::Failed;
        h.record(failed);
        assert_eq!(h.total_cash(), 21);
        assert_eq!(h.total_coins(), 55_000);
    }

    #[test]
    fn json_uses_camel_case_field_names() {
        let r = Redemption::completed(Tier::by_id("tier2").unwrap(), "pay@pal.me", at(0));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["paypalEmail"], "pay@pal.me");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["coins"], 10_000);
        assert_eq!(json["date"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn reads_foreign_history() {
        let raw = r#"[
            {"id":"2","date":"2024-01-02T03:04:05.678Z","coins":5000,"cash":1,"status":"pending","paypalEmail":"x@y.zz"},
            {"id":"1","date":"2024-01-01T00:00:00Z","coins":10000,"cash":5,"status":"completed","paypalEmail":"x@y.zz"}
        ]"#;
        let h: History = serde_json::from_str(raw).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(h.entries()[0].status, Status::Pending);
        assert_eq!(h.total_cash(), 5);
    }

    #[test]
    fn unknown_status_is_kept_as_written() {
        let raw = r#"[{"id":"1","date":"2024-01-01T00:00:00Z","coins":5000,"cash":1,"status":"processing","paypalEmail":"x@y.zz"}]"#;
        let h: History = serde_json::from_str(raw).unwrap();
        let status = &h.entries()[0].status;
        assert_eq!(status, &Status::Other("processing".into()));
        assert_eq!(status.to_string(), "processing");
        assert_eq!(h.total_cash(), 0);
        assert_eq!(serde_json::to_value(&h).unwrap()[0]["status"], "processing");
    }
}
