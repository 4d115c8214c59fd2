use std::future;
use std::num::NonZeroUsize;

use page_cursor::{BatchCursor, CursorError, CursorExt, FnSource};

fn main() {
    // A backend that serves 57 posts, 25 per request.
    let source = FnSource::new(|offset: usize, limit: usize| {
        let end = (offset + limit).min(57);
        println!("fetch offset={offset} limit={limit} -> {} items", end.saturating_sub(offset));
        future::ready(Ok::<_, std::io::Error>(
            (offset..end).map(|i| format!("post #{i}")).collect::<Vec<_>>(),
        ))
    });

    let feed = BatchCursor::new(source, NonZeroUsize::new(25).unwrap())
        .paged(NonZeroUsize::new(10).unwrap());

    loop {
        match pollster::block_on(feed.load_next_page()) {
            Ok(range) => {
                println!(
                    "page {range:?}: first={:?} buffered={}",
                    feed.get(range.start),
                    feed.buffered_count()
                );
            }
            Err(CursorError::Exhausted) => {
                println!("end of feed after {} posts", feed.count());
                break;
            }
            Err(err) => {
                println!("load failed: {err}");
                break;
            }
        }
    }
}
