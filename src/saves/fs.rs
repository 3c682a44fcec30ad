//! Saving and loading to files, specifically.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use rand::prelude::*;
use tracing::warn;

use crate::error::Result;

use super::Storage;

const EXT: &str = "txt";
const TMP_EXT: &str = "tmp";

/// Handle saves out of a directory, one file per key.
///
/// Writes are crash-resistant: the new value goes into a temporary file next to the real one, which is then renamed
/// over it. A crash halfway through leaves either the old value or the new one, never half of each.
#[derive(Clone, Debug)]
pub struct Directory(PathBuf);

impl Directory {
    /// Read saves from the default location for this platform, e.g. `~/.local/share/coinclicker` on Linux.
    ///
    /// Falls back to the current directory if the platform doesn't have a notion of a data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coinclicker")
    }

    /// Read saves from a specific location, creating it if need be.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        fs::create_dir_all(path.as_ref())?;
        Ok(Self(path.as_ref().into()))
    }

    fn key_path(&self, key: &str) -> io::Result<PathBuf> {
        // keys are ours, not the player's, but better safe than writing to `../../whatever`
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("bad storage key {:?}", key)));
        }
        Ok(self.0.join(format!("{}.{}", key, EXT)))
    }
}

impl Storage for Directory {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)?) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let dest = self.key_path(key)?;
        let (tmp_path, mut tmp) = loop {
            let name = format!("{}.{:08x}.{}", key, thread_rng().gen::<u32>(), TMP_EXT);
            let path = self.0.join(name);
            match File::options().create_new(true).write(true).open(&path) {
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                other => break (path, other?),
            }
        };
        let written = tmp
            .write_all(value.as_bytes())
            .and_then(|_| tmp.sync_all())
            .and_then(|_| fs::rename(&tmp_path, &dest));
        if let Err(e) = written {
            warn!(key, error = %e, "failed to write save");
            // don't litter the directory with half-written temporaries
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)?) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
