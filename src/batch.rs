use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::future::{self, Future};
use core::num::NonZeroUsize;
use core::pin::Pin;

use crate::{BatchOptions, Cursor, CursorError, LoadFuture};

/// A pending fetch. Resolves with the fetched items in order.
pub type BatchFuture<T, E> = Pin<Box<dyn Future<Output = Result<Vec<T>, E>>>>;

/// An offset/limit data source, e.g. a paged HTTP endpoint or a database query.
pub trait BatchSource {
    type Item;
    type Error;

    /// Fetches up to `limit` items starting at `offset`.
    ///
    /// Returning fewer than `limit` items means the source has nothing after them.
    fn fetch(&self, offset: usize, limit: usize) -> BatchFuture<Self::Item, Self::Error>;
}

/// A [`BatchSource`] backed by a closure `(offset, limit) -> impl Future`.
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<T, E, F, Fut> BatchSource for FnSource<F>
where
    F: Fn(usize, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>> + 'static,
{
    type Item = T;
    type Error = E;

    fn fetch(&self, offset: usize, limit: usize) -> BatchFuture<T, E> {
        Box::pin((self.fetch)(offset, limit))
    }
}

impl<F> core::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnSource(..)")
    }
}

struct BatchState<T> {
    items: Vec<T>,
    exhausted: bool,
}

/// A cursor that pulls fixed-size batches from a [`BatchSource`] and keeps everything it loaded.
///
/// A short batch (including an empty one) marks the cursor exhausted. A failed fetch leaves the
/// cursor untouched, so the load can simply be retried.
pub struct BatchCursor<S: BatchSource> {
    source: S,
    state: Rc<RefCell<BatchState<S::Item>>>,
    batch_size: NonZeroUsize,
}

impl<S: BatchSource> BatchCursor<S> {
    pub fn new(source: S, batch_size: NonZeroUsize) -> Self {
        pdebug!(batch_size = batch_size.get(), "BatchCursor::new");
        Self {
            source,
            state: Rc::new(RefCell::new(BatchState {
                items: Vec::new(),
                exhausted: false,
            })),
            batch_size,
        }
    }

    pub fn with_options(source: S, options: BatchOptions) -> Self {
        Self::new(source, options.batch_size)
    }

    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> Cursor for BatchCursor<S>
where
    S: BatchSource + 'static,
    S::Item: Clone + 'static,
    S::Error: 'static,
{
    type Item = S::Item;
    type Error = CursorError<S::Error>;

    fn count(&self) -> usize {
        self.state.borrow().items.len()
    }

    fn exhausted(&self) -> bool {
        self.state.borrow().exhausted
    }

    fn get(&self, index: usize) -> Option<S::Item> {
        self.state.borrow().items.get(index).cloned()
    }

    fn load_next_batch(&self) -> LoadFuture<Self::Error> {
        if self.exhausted() {
            return Box::pin(future::ready(Err(CursorError::Exhausted)));
        }

        let offset = self.count();
        let limit = self.batch_size.get();
        ptrace!(offset, limit, "BatchCursor: fetching");
        let fetch = self.source.fetch(offset, limit);
        let state = Rc::downgrade(&self.state);

        Box::pin(async move {
            let fetched = fetch.await;
            let Some(shared) = state.upgrade() else {
                pdebug!(offset, "BatchCursor: released during fetch");
                return Err(CursorError::Deallocated);
            };
            let items = match fetched {
                Ok(items) => items,
                Err(err) => return Err(CursorError::Inner(err)),
            };

            let mut state = shared.borrow_mut();
            debug_assert_eq!(
                state.items.len(),
                offset,
                "BatchCursor: overlapping loads on one cursor"
            );
            let start = state.items.len();
            if items.len() < limit {
                pdebug!(offset, fetched = items.len(), "BatchCursor: source exhausted");
                state.exhausted = true;
            }
            state.items.extend(items);
            Ok(start..state.items.len())
        })
    }
}

impl<S: BatchSource> core::fmt::Debug for BatchCursor<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("BatchCursor")
            .field("batch_size", &self.batch_size)
            .field("count", &state.items.len())
            .field("exhausted", &state.exhausted)
            .finish_non_exhaustive()
    }
}
