/// A lightweight, serializable snapshot of a paged cursor.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageState {
    /// Items exposed to the consumer.
    pub revealed: usize,
    /// Items physically loaded by the inner cursor.
    pub loaded: usize,
    pub page_size: usize,
    pub exhausted: bool,
}

impl PageState {
    /// Loaded items that have not been revealed yet.
    pub fn buffered(&self) -> usize {
        self.loaded.saturating_sub(self.revealed)
    }
}
