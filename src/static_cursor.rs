use alloc::boxed::Box;
use alloc::vec::Vec;
use core::future;

use crate::{Cursor, CursorError, LoadFuture};

/// A cursor over items that are all available up front.
///
/// It starts exhausted; every load fails with [`CursorError::Exhausted`]. Wrap it in a
/// [`crate::FixedPageCursor`] to hand an in-memory list out page by page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticCursor<T> {
    items: Vec<T>,
}

impl<T> StaticCursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> From<Vec<T>> for StaticCursor<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for StaticCursor<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Clone> Cursor for StaticCursor<T> {
    type Item = T;
    type Error = CursorError;

    fn count(&self) -> usize {
        self.items.len()
    }

    fn exhausted(&self) -> bool {
        true
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).cloned()
    }

    fn load_next_batch(&self) -> LoadFuture<CursorError> {
        Box::pin(future::ready(Err(CursorError::Exhausted)))
    }
}
