use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "std")]
use std::sync::{self as impl_, LazyLock as Lazy};

#[cfg(not(feature = "std"))]
use spin::{self as impl_, Lazy};

use super::CodeMap;
use crate::reserved;

pub(crate) type TableReadGuard = impl_::RwLockReadGuard<'static, CodeMap>;
pub(crate) type TableWriteGuard = impl_::RwLockWriteGuard<'static, CodeMap>;

fn seeded() -> impl_::RwLock<CodeMap> {
    impl_::RwLock::new(reserved::table())
}

/// The code table and its sealed flag.
///
/// The table is built on first access and already holds the reserved codes
/// when any caller sees it.
pub(crate) struct RegistryLock {
    table: Lazy<impl_::RwLock<CodeMap>>,
    sealed: AtomicBool,
}

impl RegistryLock {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            table: Lazy::new(seeded),
            sealed: AtomicBool::new(false),
        }
    }

    #[inline]
    pub(crate) fn read(&'static self) -> TableReadGuard {
        #[cfg(not(feature = "std"))]
        let guard = self.table.read();

        // A poisoned table is still consistent: every write is a single
        // insert performed after all checks.
        #[cfg(feature = "std")]
        let guard = self
            .table
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        guard
    }

    #[inline]
    pub(crate) fn write(&'static self) -> TableWriteGuard {
        #[cfg(not(feature = "std"))]
        let guard = self.table.write();

        #[cfg(feature = "std")]
        let guard = self
            .table
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        guard
    }

    /// Whether the table is sealed. Inserts check it while holding the write
    /// guard, which [`seal`](Self::seal) also takes.
    #[inline]
    pub(crate) fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    pub(crate) fn seal(&'static self) {
        let _guard = self.write();
        self.sealed.store(true, Ordering::Release);
    }
}
