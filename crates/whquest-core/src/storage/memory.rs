//! In-process key-value backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StorageError;

/// `HashMap`-backed storage. Contents vanish with the process.
///
/// Also serves as the fallback when the on-disk database cannot be opened,
/// and as a test double: [`set_failing`](Self::set_failing) makes every
/// operation return [`StorageError::Unavailable`], and
/// [`set_reads_failing`](Self::set_reads_failing) does so for reads only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
    reads_failing: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated backend failure.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Toggle simulated read failure; writes keep working.
    pub fn set_reads_failing(&self, failing: bool) {
        self.reads_failing.set(failing);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            Err(StorageError::Unavailable("memory storage set to fail".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        if self.reads_failing.get() {
            return Err(StorageError::Unavailable("memory storage reads set to fail".into()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
