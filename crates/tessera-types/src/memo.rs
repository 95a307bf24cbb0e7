//! Lock-free memoization slots for values derived from immutable data.

use once_cell::race::OnceBox;
use std::fmt;

/// Single-assignment cache slot.
///
/// The first caller to finish computing publishes its result with an
/// atomic compare-and-swap; nobody waits on anybody else. Racing callers
/// may each run the computation. Only store pure functions of immutable
/// state here: the losers' results are dropped.
pub struct Memo<T> {
    slot: OnceBox<T>,
}

impl<T> Memo<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceBox::new(),
        }
    }

    /// The published value, if any.
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    pub fn get_or_compute<F>(&self, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.slot.get_or_init(|| {
            tracing::trace!(value = std::any::type_name::<T>(), "memo miss");
            Box::new(compute())
        })
    }

    /// Like [`Memo::get_or_compute`], but failures are returned and nothing
    /// is published.
    pub fn get_or_try_compute<F, E>(&self, compute: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.slot.get_or_try_init(|| {
            tracing::trace!(value = std::any::type_name::<T>(), "memo miss");
            compute().map(Box::new)
        })
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones start empty.
impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Memo").field(value).finish(),
            None => f.write_str("Memo(<unset>)"),
        }
    }
}
