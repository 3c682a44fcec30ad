use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use coinclicker::{
    config::{Args, Config},
    frontend::Frontend,
    logging,
    runner::Runner,
    saves::{fs::Directory, Store},
};

fn main() -> ExitCode {
    let config = Config::from_args(Args::parse());
    if let Err(e) = logging::init(&config.log_file) {
        eprintln!("can't log to {}: {}", config.log_file.display(), e);
        return ExitCode::FAILURE;
    }
    info!(data_dir = %config.data_dir.display(), "starting");

    let store = match Directory::open(&config.data_dir).and_then(Store::load) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to load save");
            eprintln!("failed to load the save in {}: {}", config.data_dir.display(), e);
            eprintln!("(`coinclicker-save reset` starts over)");
            return ExitCode::FAILURE;
        }
    };

    let game = Frontend::new(store, config.payout_delay);
    match Runner::new(game).load_run() {
        Ok(game) => {
            info!(coins = game.state().wallet.coins(), "exited");
            ExitCode::SUCCESS
        }
        Err(errors) => {
            for (name, e) in errors {
                error!(system = name, error = %e, "io system failed to start");
                eprintln!("{}: {}", name, e);
            }
            ExitCode::FAILURE
        }
    }
}
