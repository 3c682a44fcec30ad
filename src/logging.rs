//! Logging setup. The terminal belongs to the game, so logs go to a file instead.

use std::{fs::OpenOptions, io, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber appending to `path`, filtered by `RUST_LOG` (default `info`).
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let sub = fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(sub).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
