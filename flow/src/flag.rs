//! Busy-flag guard.

use std::cell::Cell;

/// Clears a busy flag when dropped, including when the owning future is
/// cancelled mid-request.
pub(crate) struct ClearOnDrop<'a>(&'a Cell<bool>);

impl<'a> ClearOnDrop<'a> {
    /// Set `flag`, or return `None` if it was already set.
    pub(crate) fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }

    /// Take responsibility for a flag the caller has already set.
    pub(crate) fn adopt(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
