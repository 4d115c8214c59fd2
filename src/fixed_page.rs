use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::Cell;
use core::num::NonZeroUsize;
use core::ops::Range;

use crate::{Cursor, CursorError, LoadFuture, PageOptions, PageState};

/// A cursor that reveals the items of an inner cursor in pages of at most `page_size`.
///
/// The inner cursor may load in batches of any size. Surplus items from an over-large batch stay
/// buffered and are handed out page by page before the inner cursor is asked for more. When the
/// inner cursor runs dry, whatever is left is revealed as one final (possibly short) page.
///
/// Load futures hold only a weak handle to the cursor state: dropping the `FixedPageCursor` while
/// a load is pending makes that load fail with [`CursorError::Deallocated`].
pub struct FixedPageCursor<C> {
    shared: Rc<Shared<C>>,
}

struct Shared<C> {
    cursor: C,
    page_size: NonZeroUsize,
    revealed: Cell<usize>,
}

enum Step {
    Revealed(Range<usize>),
    Exhausted,
    LoadInner,
}

impl<C: Cursor> Shared<C> {
    fn exhausted(&self) -> bool {
        self.cursor.exhausted() && self.cursor.count() == self.revealed.get()
    }

    /// Reveals the next page from buffered items, or reports that the inner cursor must load.
    fn step(&self) -> Step {
        if self.exhausted() {
            pdebug!(revealed = self.revealed.get(), "FixedPageCursor: exhausted");
            return Step::Exhausted;
        }

        let start = self.revealed.get();
        let loaded = self.cursor.count();
        if loaded < start {
            pwarn!(loaded, revealed = start, "FixedPageCursor: inner count went backwards");
            debug_assert!(
                loaded >= start,
                "inner cursor count went backwards (loaded={loaded}, revealed={start})"
            );
        }

        let rest_of_loaded = loaded.saturating_sub(start);
        let page_size = self.page_size.get();
        if rest_of_loaded >= page_size || self.cursor.exhausted() {
            let end = start + rest_of_loaded.min(page_size);
            self.revealed.set(end);
            ptrace!(start, end, rest_of_loaded, "FixedPageCursor: revealed page");
            return Step::Revealed(start..end);
        }

        ptrace!(rest_of_loaded, page_size, "FixedPageCursor: loading inner batch");
        Step::LoadInner
    }
}

impl<C: Cursor> FixedPageCursor<C> {
    pub fn new(cursor: C, page_size: NonZeroUsize) -> Self {
        pdebug!(page_size = page_size.get(), "FixedPageCursor::new");
        Self {
            shared: Rc::new(Shared {
                cursor,
                page_size,
                revealed: Cell::new(0),
            }),
        }
    }

    pub fn with_options(cursor: C, options: PageOptions) -> Self {
        Self::new(cursor, options.page_size)
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.shared.page_size
    }

    /// Number of revealed items.
    pub fn count(&self) -> usize {
        self.shared.revealed.get()
    }

    /// True once the inner cursor is exhausted and every item it loaded has been revealed.
    pub fn exhausted(&self) -> bool {
        self.shared.exhausted()
    }

    /// Number of items the inner cursor has loaded, revealed or not.
    pub fn loaded_count(&self) -> usize {
        self.shared.cursor.count()
    }

    /// Loaded items waiting to be revealed by the next page loads.
    pub fn buffered_count(&self) -> usize {
        self.loaded_count().saturating_sub(self.count())
    }

    /// Returns the revealed item at `index`.
    ///
    /// Items the inner cursor has loaded but this cursor has not revealed yet are not visible.
    pub fn get(&self, index: usize) -> Option<C::Item> {
        if index >= self.count() {
            return None;
        }
        self.shared.cursor.get(index)
    }

    pub fn inner(&self) -> &C {
        &self.shared.cursor
    }

    pub fn state(&self) -> PageState {
        PageState {
            revealed: self.count(),
            loaded: self.loaded_count(),
            page_size: self.shared.page_size.get(),
            exhausted: self.exhausted(),
        }
    }
}

impl<C> FixedPageCursor<C>
where
    C: Cursor + 'static,
    C::Error: 'static,
{
    /// Reveals the next page.
    ///
    /// Resolves immediately when enough items are already buffered (or the inner cursor has
    /// nothing more to give). Otherwise loads inner batches until a full page is buffered or the
    /// inner cursor is exhausted.
    ///
    /// On failure no items are revealed, so the call may be retried. `Exhausted` is permanent.
    pub fn load_next_page(&self) -> LoadFuture<CursorError<C::Error>> {
        let weak = Rc::downgrade(&self.shared);
        Box::pin(async move {
            loop {
                let pending = {
                    let Some(shared) = weak.upgrade() else {
                        pdebug!("FixedPageCursor: released before page load");
                        return Err(CursorError::Deallocated);
                    };
                    match shared.step() {
                        Step::Revealed(range) => return Ok(range),
                        Step::Exhausted => return Err(CursorError::Exhausted),
                        Step::LoadInner => shared.cursor.load_next_batch(),
                    }
                };

                let loaded = pending.await;
                if weak.strong_count() == 0 {
                    pdebug!("FixedPageCursor: released during inner load");
                    return Err(CursorError::Deallocated);
                }
                let range = match loaded {
                    Ok(range) => range,
                    Err(err) => return Err(CursorError::Inner(err)),
                };

                if range.is_empty() {
                    if let Some(shared) = weak.upgrade() {
                        if !shared.cursor.exhausted() {
                            pwarn!(
                                loaded = shared.cursor.count(),
                                "FixedPageCursor: inner load made no progress"
                            );
                        }
                    }
                }
            }
        })
    }
}

impl<C> Cursor for FixedPageCursor<C>
where
    C: Cursor + 'static,
    C::Error: 'static,
{
    type Item = C::Item;
    type Error = CursorError<C::Error>;

    fn count(&self) -> usize {
        FixedPageCursor::count(self)
    }

    fn exhausted(&self) -> bool {
        FixedPageCursor::exhausted(self)
    }

    fn get(&self, index: usize) -> Option<Self::Item> {
        FixedPageCursor::get(self, index)
    }

    fn load_next_batch(&self) -> LoadFuture<Self::Error> {
        self.load_next_page()
    }
}

impl<C> core::fmt::Debug for FixedPageCursor<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FixedPageCursor")
            .field("page_size", &self.shared.page_size)
            .field("revealed", &self.shared.revealed.get())
            .finish_non_exhaustive()
    }
}
