//! Serialization boundary for an [`Erc721A`] ledger shared between threads.
//!
//! Writers hold the lock exclusively, so every reader observes a stable
//! ownership chain while it scans.
//!
//! A poisoned lock is recovered rather than propagated. Every [`Erc721A`]
//! operation validates before it writes, and its writes are bounded counter
//! updates and single-record inserts that cannot panic. A panic inside a
//! closure can therefore only happen between two operations, which leaves a
//! ledger where each operation either fully happened or did not happen.
use std::sync::{Arc, PoisonError, RwLock};

use crate::token::erc721a::Erc721A;

/// Cloneable handle to a ledger guarded by a single read-write lock.
#[derive(Clone, Debug, Default)]
pub struct SharedErc721A {
    inner: Arc<RwLock<Erc721A>>,
}

impl From<Erc721A> for SharedErc721A {
    fn from(ledger: Erc721A) -> Self {
        Self::new(ledger)
    }
}

impl SharedErc721A {
    /// Wraps `ledger` for shared access.
    #[must_use]
    pub fn new(ledger: Erc721A) -> Self {
        Self { inner: Arc::new(RwLock::new(ledger)) }
    }

    /// Runs `f` with read access to the ledger.
    pub fn read<R>(&self, f: impl FnOnce(&Erc721A) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Runs `f` with exclusive write access to the ledger.
    ///
    /// Each ledger operation is atomic on its own, even if `f` panics
    /// afterwards. When `f` performs several of them and must be
    /// all-or-nothing, use [`Self::transact`].
    pub fn write<R>(&self, f: impl FnOnce(&mut Erc721A) -> R) -> R {
        let mut guard =
            self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Runs `f` against a copy of the ledger and publishes the copy only if
    /// `f` succeeds.
    ///
    /// # Errors
    ///
    /// Returns the error of `f`, in which case the ledger is unchanged.
    pub fn transact<R, E>(
        &self,
        f: impl FnOnce(&mut Erc721A) -> Result<R, E>,
    ) -> Result<R, E> {
        self.write(|ledger| {
            let mut draft = ledger.clone();
            let result = f(&mut draft)?;
            *ledger = draft;
            Ok(result)
        })
    }

    /// Consumes the handle and returns the ledger if no other handle is
    /// alive.
    ///
    /// # Errors
    ///
    /// Returns `self` back if the ledger is still shared.
    pub fn try_unwrap(self) -> Result<Erc721A, Self> {
        Arc::try_unwrap(self.inner)
            .map(|lock| {
                lock.into_inner().unwrap_or_else(PoisonError::into_inner)
            })
            .map_err(|inner| Self { inner })
    }
}
