//! Dense method tables.
//!
//! A table maps every [`Method`] to a [`Slot`] in O(1). Domains list the
//! operations they implement natively; [`MethodTable::build`] fills every
//! other slot with the generic fallback, so dispatch never meets an empty
//! slot. Each domain builds its table once, behind a `OnceLock`, and
//! shares it between all of its contexts.

use tracing::debug;

use super::ctx::RingTag;
use super::generic;
use super::method::Method;
use super::slot::Slot;

/// Fixed-slot table of method implementations for one domain.
pub struct MethodTable {
    ring: RingTag,
    slots: [Slot; Method::COUNT],
    native: [bool; Method::COUNT],
}

impl MethodTable {
    /// Builds a table from a domain's native entries.
    ///
    /// # Panics
    ///
    /// Panics if an entry's slot kind does not match its method, which
    /// is a bug in the domain's table.
    #[must_use]
    pub fn build(ring: RingTag, entries: &[(Method, Slot)]) -> Self {
        let mut given: [Option<Slot>; Method::COUNT] = [None; Method::COUNT];
        for &(method, slot) in entries {
            assert_eq!(
                slot.kind(),
                method.kind(),
                "{ring}: slot registered for {} has the wrong signature",
                method.name()
            );
            given[method.index()] = Some(slot);
        }
        let native: [bool; Method::COUNT] = core::array::from_fn(|i| given[i].is_some());
        let slots = core::array::from_fn(|i| {
            given[i].unwrap_or_else(|| generic::default_slot(Method::ALL[i]))
        });
        debug!(
            %ring,
            native = native.iter().filter(|&&n| n).count(),
            total = Method::COUNT,
            "built method table"
        );
        Self {
            ring,
            slots,
            native,
        }
    }

    #[inline]
    #[must_use]
    pub fn ring(&self) -> RingTag {
        self.ring
    }

    #[inline]
    #[must_use]
    pub fn slot(&self, method: Method) -> Slot {
        self.slots[method.index()]
    }

    /// True when the domain supplied its own implementation.
    #[inline]
    #[must_use]
    pub fn is_native(&self, method: Method) -> bool {
        self.native[method.index()]
    }
}

impl core::fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MethodTable")
            .field("ring", &self.ring)
            .field(
                "native",
                &Method::ALL
                    .iter()
                    .filter(|m| self.is_native(**m))
                    .map(|m| m.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gr::slot::SlotKind;

    #[test]
    fn test_every_slot_filled_with_matching_kind() {
        let table = MethodTable::build(RingTag::Fmpz, &[]);
        for &m in Method::ALL {
            assert_eq!(table.slot(m).kind(), m.kind(), "{}", m.name());
            assert!(!table.is_native(m));
        }
    }

    #[test]
    #[should_panic(expected = "wrong signature")]
    fn test_kind_mismatch_rejected() {
        fn noop(_: &mut crate::gr::Elem, _: &crate::gr::GrCtx) -> crate::core::Status {
            crate::core::Status::SUCCESS
        }
        let _ = MethodTable::build(RingTag::Fmpz, &[(Method::Add, Slot::Constant(noop))]);
    }

    #[test]
    fn test_native_entries_recorded() {
        fn zero(_: &mut crate::gr::Elem, _: &crate::gr::GrCtx) -> crate::core::Status {
            crate::core::Status::SUCCESS
        }
        let table = MethodTable::build(RingTag::Fmpz, &[(Method::Zero, Slot::Constant(zero))]);
        assert!(table.is_native(Method::Zero));
        assert!(!table.is_native(Method::One));
        assert_eq!(table.slot(Method::Zero).kind(), SlotKind::Constant);
    }
}
