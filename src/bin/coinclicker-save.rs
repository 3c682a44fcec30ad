//! Inspect or wipe a coinclicker save without starting the game.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use serde::Serialize;

use coinclicker::{
    redemption::History,
    saves::{fs::Directory, Store},
    Result,
};

#[derive(Parser, Debug)]
#[command(name = "coinclicker-save", version, about = "Inspect or reset a coinclicker save")]
struct Cli {
    /// Where the save lives. Defaults to the same place the game uses.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the balance and the redemption history as JSON
    Show,
    /// Throw the save away and start from zero
    Reset,
}

#[derive(Serialize)]
struct Dump<'a> {
    coins: u64,
    redemptions: &'a History,
}

fn show(store: &Store<Directory>) -> Result<()> {
    let state = store.state();
    let dump = Dump {
        coins: state.wallet.coins(),
        redemptions: &state.history,
    };
    let json = serde_json::to_string_pretty(&dump).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let path = cli.data_dir.unwrap_or_else(Directory::default_path);
    let dir = Directory::open(&path)?;
    match cli.command {
        Command::Show => show(&Store::load(dir)?),
        Command::Reset => {
            Store::wipe(dir)?;
            println!("save in {} reset", path.display());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
