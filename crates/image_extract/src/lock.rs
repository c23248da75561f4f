//! In-process mutual exclusion per destination directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{lock_api::ArcMutexGuard, Mutex, RawMutex};

/// Registry of one mutex per destination directory.
///
/// Share a single instance (behind an [`Arc`]) between every extractor that
/// writes under the same cache root. Extractions of archives that derive the
/// same destination then run one after another, while different
/// destinations never contend.
#[derive(Debug, Default)]
pub struct DestinationLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

/// Held for the duration of one extraction into a destination
#[must_use = "the destination is only locked while the guard is alive"]
pub struct DestinationGuard<'a> {
    locks: &'a DestinationLocks,
    destination: PathBuf,
    guard: Option<ArcMutexGuard<RawMutex, ()>>,
}

impl DestinationLocks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the destination is free and lock it
    pub fn lock(&self, destination: &Path) -> DestinationGuard<'_> {
        let mutex = self
            .locks
            .lock()
            .entry(destination.to_path_buf())
            .or_default()
            .clone();

        DestinationGuard {
            locks: self,
            destination: destination.to_path_buf(),
            guard: Some(mutex.lock_arc()),
        }
    }

    /// Number of destinations currently locked or waited on
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    /// Whether no destination is locked or waited on
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for DestinationGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Waiters hold a clone of the mutex, so only an unused entry is removed
        let mut locks = self.locks.locks.lock();
        if locks
            .get(&self.destination)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
        {
            locks.remove(&self.destination);
        }
    }
}
