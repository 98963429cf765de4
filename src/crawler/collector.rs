//! Append-only result collection shared by the crawl tasks
//!
//! Any number of tasks append batches; the coordinator drains once, after the
//! join barrier has confirmed every producer finished.

use std::sync::{Arc, Mutex, MutexGuard};

/// A concurrent-safe, append-only sink
#[derive(Debug)]
pub struct Collector<T> {
    items: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Collector<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Collector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Collector<T> {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends a single item
    pub fn push(&self, item: T) {
        self.lock().push(item);
    }

    /// Appends a batch, keeping its internal order
    pub fn extend<I: IntoIterator<Item = T>>(&self, batch: I) {
        self.lock().extend(batch);
    }

    /// Number of items collected so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes every collected item, leaving the collector empty
    ///
    /// Items appear in append order, which is task completion order.
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.lock())
    }

    // Poisoned locks still hold whole batches
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
