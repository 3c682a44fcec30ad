//! Storage that only lives as long as the process.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::Result;

use super::Storage;

/// An in-memory [`Storage`]. Clones share the same contents, so you can hand one to a
/// [`Store`](super::Store) and keep another to peek at what got written.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<DashMap<String, String>>);

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for Memory {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.0.get(key).map(|v| v.value().clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.insert(key.into(), value.into());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.0.remove(key);
        Ok(())
    }
}
