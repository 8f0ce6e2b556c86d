//! Type-erased ring elements.
//!
//! An [`Elem`] owns the payload of one element of some context. It does
//! not know its context: every operation receives the context alongside,
//! and passing an element to a context that did not create it is a
//! contract violation that panics on first access.

use core::any::{type_name, Any};
use core::fmt;
use core::mem;

/// Owned element of a ring context.
pub struct Elem {
    data: Box<dyn Any + Send + Sync>,
}

#[cold]
#[inline(never)]
fn wrong_context<T>() -> ! {
    panic!(
        "element used with a context it does not belong to (expected payload {})",
        type_name::<T>()
    )
}

impl Elem {
    /// Wraps a domain payload. Only context `init` hooks create elements.
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            data: Box::new(value),
        }
    }

    pub(crate) fn get<T: Any>(&self) -> &T {
        match self.data.downcast_ref::<T>() {
            Some(v) => v,
            None => wrong_context::<T>(),
        }
    }

    pub(crate) fn get_mut<T: Any>(&mut self) -> &mut T {
        match self.data.downcast_mut::<T>() {
            Some(v) => v,
            None => wrong_context::<T>(),
        }
    }

    /// Borrows the payload when it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Exchanges the payloads of two elements in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.data, &mut other.data);
    }
}

impl fmt::Debug for Elem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elem").finish_non_exhaustive()
    }
}
