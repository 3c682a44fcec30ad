//! Command-line configuration, shared by the game and the save tool.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{agents::payout::DEFAULT_DELAY, saves::fs::Directory};

pub const LOG_FILE: &str = "coinclicker.log";

#[derive(Parser, Debug, Clone)]
#[command(name = "coinclicker")]
#[command(version, about = "Click for coins, cash them in at fixed tiers, review your payouts.")]
pub struct Args {
    /// Where the save lives. Defaults to a `coinclicker` folder in the platform's data directory.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// How long a payout takes to go through, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    pub payout_delay_ms: u64,

    /// Where to write logs. Defaults to `coinclicker.log` in the data directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// [`Args`] with every default filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub payout_delay: Duration,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let data_dir = args.data_dir.unwrap_or_else(Directory::default_path);
        let log_file = args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE));
        Self {
            payout_delay: Duration::from_millis(args.payout_delay_ms),
            data_dir,
            log_file,
        }
    }
}
