//! Store — append-only, lock-guarded history of drop events for one category.
//!
//! The store is the single source of truth; the UI reads from it, never from
//! the feed directly. There is exactly one writer (the ingestion task) and any
//! number of readers (render ticks, navigation keys). Every read returns an
//! owned copy, so nothing handed out by the store is affected by later pushes.
//!
//! The store never evicts. Memory grows with the lifetime of the process.
//!
//! # Windowing
//!
//! [`EventStore::get_range`] answers "skip the newest `offset` elements, then
//! give me a page of `window_size`". With [`WindowMode::ExcludeNewest`] (the
//! default) the newest unskipped element is left out of the page as well:
//!
//! | len | offset | window | ExcludeNewest | Inclusive |
//! |-----|--------|--------|---------------|-----------|
//! | 5   | 0      | 3      | `[2, 3]`      | `[2, 3, 4]` |
//! | 5   | 0      | 10     | `[0, 1, 2, 3]`| `[0, 1, 2, 3, 4]` |
//! | 5   | 2      | 2      | `[1]`         | `[1, 2]` |
//! | 1   | 0      | 1      | `[]`          | `[0]` |

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{Category, DropEvent};

/// Errors from single-element access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Nothing has been pushed yet.
    #[error("store is empty")]
    Empty,

    /// `index` is not smaller than the number of stored elements.
    #[error("index {index} out of range for store of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// How [`EventStore::get_range`] treats the newest element of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Leave out the newest unskipped element (historical viewer behaviour).
    #[default]
    ExcludeNewest,
    /// Conventional page: the newest `window_size` elements after the offset.
    Inclusive,
}

/// Append-only sequence guarded by a reader-writer lock.
///
/// Generic so the application can keep structured [`DropEvent`]s while tests
/// and benchmarks push plain summary strings.
///
/// [`DropEvent`]: crate::DropEvent
#[derive(Debug, Default)]
pub struct EventStore<T> {
    items: RwLock<Vec<T>>,
    mode: WindowMode,
}

impl<T: Clone> EventStore<T> {
    pub fn new() -> Self {
        Self::with_window_mode(WindowMode::default())
    }

    pub fn with_window_mode(mode: WindowMode) -> Self {
        Self { items: RwLock::new(Vec::new()), mode }
    }

    pub fn window_mode(&self) -> WindowMode {
        self.mode
    }

    /// Append `item`. Visible to every read that starts after this returns.
    pub fn push(&self, item: T) {
        self.write().push(item);
    }

    /// Element `index_from_end` positions back from the newest (0 = newest).
    pub fn get(&self, index_from_end: usize) -> Result<T, StoreError> {
        let items = self.read();
        let len = items.len();
        if len == 0 {
            return Err(StoreError::Empty);
        }
        if index_from_end >= len {
            return Err(StoreError::IndexOutOfRange { index: index_from_end, len });
        }
        Ok(items[len - 1 - index_from_end].clone())
    }

    /// Up to `window_size` elements ending `offset` positions back from the
    /// newest, ordered oldest to newest.
    ///
    /// Never fails: an empty store, a zero window or an offset past the
    /// oldest element all produce an empty vector.
    pub fn get_range(&self, offset: usize, window_size: usize) -> Vec<T> {
        let items = self.read();
        let (start, end) = window_bounds(items.len(), offset, window_size, self.mode);
        items[start..end].to_vec()
    }

    /// Current element count. Advisory: a concurrent push may change it the
    /// moment this returns.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A push is a single `Vec::push`, so a panic elsewhere while the lock was
    // held cannot leave the vector half-written. Recover from poisoning.
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The pair of stores the application runs with, one per [`Category`].
///
/// Cloning is cheap and shares the underlying stores; the ingestion task
/// writes through one clone while the display reads through another.
#[derive(Debug, Clone)]
pub struct Stores {
    pub internal: Arc<EventStore<DropEvent>>,
    pub external: Arc<EventStore<DropEvent>>,
}

impl Stores {
    pub fn new(mode: WindowMode) -> Self {
        Self {
            internal: Arc::new(EventStore::with_window_mode(mode)),
            external: Arc::new(EventStore::with_window_mode(mode)),
        }
    }

    pub fn for_category(&self, category: Category) -> &EventStore<DropEvent> {
        match category {
            Category::Internal => &self.internal,
            Category::External => &self.external,
        }
    }
}

/// `[start, end)` slice bounds for a page request against `len` elements.
fn window_bounds(
    len: usize,
    offset: usize,
    window_size: usize,
    mode: WindowMode,
) -> (usize, usize) {
    if len == 0 || window_size == 0 || offset >= len {
        return (0, 0);
    }
    let available = len - offset;
    let window = window_size.min(available);
    let start = available - window;
    let end = match mode {
        WindowMode::ExcludeNewest => available - 1,
        WindowMode::Inclusive => available,
    };
    (start, end.max(start))
}
