use tracing::error;

use crate::{Envelope, Result, Reusable};

/// Supplies clean instances of any [`Reusable`] type and takes them back for reuse.
///
/// Borrowing moves an instance out of the pool and releasing moves it back in, so a
/// released instance can never be reached through a stale reference.
///
/// # Contract
///
/// * An instance returned by [`get()`][Self::get] carries no state attributable to a
///   previous borrower. Pools rely on releasers to [`reset()`][Reusable::reset] instances
///   before releasing them.
/// * If the pool is shared between threads, two concurrent borrows never return the same
///   instance.
pub trait Pool {
    /// Borrows a clean instance of `T`, creating one if none is available.
    fn get<T: Reusable>(&self) -> T;

    /// Returns an instance of `T` for future reuse.
    ///
    /// The pool may drop the instance instead of retaining it.
    fn release<T: Reusable>(&self, instance: T);
}

/// Borrows an envelope from the pool and verifies that it is clean before handing it out.
///
/// A dirty envelope is discarded: it is neither returned to the caller nor released back
/// into the pool.
///
/// # Errors
///
/// Returns [`Error::DirtyContainer`][crate::Error::DirtyContainer] if the pool supplied an
/// envelope that still carries a message.
pub fn acquire_clean<E: Envelope, P: Pool>(pool: &P) -> Result<E> {
    let envelope = pool.get::<E>();

    if let Err(dirty) = envelope.ensure_clean() {
        error!(%dirty, "pool supplied a dirty envelope; discarding it");
        return Err(dirty);
    }

    Ok(envelope)
}
