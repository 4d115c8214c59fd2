use alloc::boxed::Box;
use core::future::Future;
use core::num::NonZeroUsize;
use core::ops::Range;
use core::pin::Pin;

use crate::FixedPageCursor;

/// A pending load. Resolves with the half-open range of indexes that became available.
///
/// Load futures never borrow the cursor that produced them, so a consumer may release the
/// cursor while a load is still in flight. Dropping the future cancels the load.
pub type LoadFuture<E> = Pin<Box<dyn Future<Output = Result<Range<usize>, E>>>>;

/// An incrementally loading, index-addressable sequence of items.
///
/// Contract:
/// - `count()` never decreases.
/// - `exhausted()` goes from `false` to `true` at most once and never back.
/// - `get(i)` returns the same item for the same `i` once `i < count()`.
/// - At most one load may be outstanding per cursor. Cursors are single-threaded and do no
///   internal locking; overlapping loads on the same cursor are a caller error.
pub trait Cursor {
    type Item;
    type Error;

    /// Number of items currently available.
    fn count(&self) -> usize;

    /// Whether no further items will ever become available.
    fn exhausted(&self) -> bool;

    /// Returns the item at `index`, or `None` when `index >= count()`.
    fn get(&self, index: usize) -> Option<Self::Item>;

    /// Loads the next batch of items.
    fn load_next_batch(&self) -> LoadFuture<Self::Error>;
}

pub trait CursorExt: Cursor + Sized {
    /// Wraps this cursor so each load reveals at most `page_size` items.
    fn paged(self, page_size: NonZeroUsize) -> FixedPageCursor<Self> {
        FixedPageCursor::new(self, page_size)
    }
}

impl<C: Cursor> CursorExt for C {}
