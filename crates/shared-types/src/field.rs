//! # Field Value Slots
//!
//! Every synced field owns exactly one [`FieldValue`]: the last
//! server-confirmed value (`initial`, the rollback target), the live editor
//! value (`pending`), and the mirror of the confirmed value (`committed`).
//!
//! `committed == initial` always holds; the slot is kept separate for
//! clarity that "confirmed" and "rollback target" are the same thing.
//! Only [`FieldValue::confirm`] writes those two slots, so the invariant
//! cannot be broken from outside.

/// A scalar value a property sync controller can own.
///
/// Implemented for `String` (text fields) and `bool` (flag fields such as
/// profile visibility).
pub trait PropertyScalar: Clone + PartialEq + Send + Sync + 'static {
    /// Wire representation used in save requests.
    fn to_wire(&self) -> String;

    /// Whether this value is the "empty" sentinel. Empty text signals a
    /// delete for optional fields; flags are never empty.
    fn is_empty_value(&self) -> bool;
}

impl PropertyScalar for String {
    fn to_wire(&self) -> String {
        self.clone()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl PropertyScalar for bool {
    fn to_wire(&self) -> String {
        if *self { "1".into() } else { "0".into() }
    }

    fn is_empty_value(&self) -> bool {
        false
    }
}

/// The three value slots of one editable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue<T: PropertyScalar> {
    initial: T,
    pending: T,
    committed: T,
}

impl<T: PropertyScalar> FieldValue<T> {
    /// Create from the server-seeded value; all three slots start equal.
    pub fn new(server_value: T) -> Self {
        Self {
            initial: server_value.clone(),
            pending: server_value.clone(),
            committed: server_value,
        }
    }

    /// The last server-confirmed value (rollback target).
    pub fn initial(&self) -> &T {
        &self.initial
    }

    /// The live editor value.
    pub fn pending(&self) -> &T {
        &self.pending
    }

    /// Mirror of `initial` after the last successful save.
    pub fn committed(&self) -> &T {
        &self.committed
    }

    /// Store a new live editor value.
    pub fn edit(&mut self, pending: T) {
        self.pending = pending;
    }

    /// A save succeeded: `value` becomes the new baseline for all slots.
    pub fn confirm(&mut self, value: T) {
        self.initial = value.clone();
        self.committed = value.clone();
        self.pending = value;
    }

    /// A save failed: revert the live value to the rollback target.
    pub fn rollback(&mut self) {
        self.pending = self.initial.clone();
    }

    /// Whether the live value differs from the confirmed one.
    pub fn is_dirty(&self) -> bool {
        self.pending != self.initial
    }
}
