use core::convert::Infallible;
use core::fmt;

/// Failure of a cursor load.
///
/// `Exhausted` and `Deallocated` are raised by the cursor itself. Anything the wrapped source
/// reports is carried through untouched in `Inner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorError<E = Infallible> {
    /// Everything the source will ever produce has already been loaded (or revealed).
    Exhausted,
    /// The cursor was released while a load was still pending.
    Deallocated,
    /// Error reported by the wrapped source.
    Inner(E),
}

impl<E> CursorError<E> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    pub fn is_deallocated(&self) -> bool {
        matches!(self, Self::Deallocated)
    }

    /// Returns the source error, if this is one.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }

    pub fn map_inner<F>(self, f: impl FnOnce(E) -> F) -> CursorError<F> {
        match self {
            Self::Exhausted => CursorError::Exhausted,
            Self::Deallocated => CursorError::Deallocated,
            Self::Inner(e) => CursorError::Inner(f(e)),
        }
    }
}

impl<E: fmt::Display> fmt::Display for CursorError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => f.write_str("cursor is exhausted"),
            Self::Deallocated => f.write_str("cursor was released while loading"),
            Self::Inner(e) => write!(f, "inner cursor failed: {e}"),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for CursorError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Inner(e) => Some(e),
            _ => None,
        }
    }
}
