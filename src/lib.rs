//! Fixed-size paging over incrementally loading data cursors.
//!
//! A list UI usually wants to grow in even steps ("show 20 more") while the data behind it loads
//! in whatever chunks the backend prefers. This crate separates the two:
//!
//! - [`Cursor`] is the capability every data source exposes: a growing item count, an exhausted
//!   flag, indexed reads and an async "load the next batch" operation.
//! - [`FixedPageCursor`] wraps any cursor and reveals its items at most `page_size` at a time,
//!   drawing down buffered surplus before asking the inner cursor for more.
//! - [`StaticCursor`] and [`BatchCursor`] are ready-made inner cursors for in-memory lists and
//!   offset/limit backends.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to:
//! - call [`FixedPageCursor::load_next_page`] when the user nears the end of the list
//! - display the index range the load resolves with
//!
//! Cursors are single-threaded (`Rc`-based) and expect at most one outstanding load at a time.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod batch;
mod cursor;
mod error;
mod fixed_page;
mod options;
mod state;
mod static_cursor;


pub use batch::{BatchCursor, BatchFuture, BatchSource, FnSource};
pub use cursor::{Cursor, CursorExt, LoadFuture};
pub use error::CursorError;
pub use fixed_page::FixedPageCursor;
pub use options::{BatchOptions, PageOptions};
pub use state::PageState;
pub use static_cursor::StaticCursor;
