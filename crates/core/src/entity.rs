//! Entity traits: identity + continuity across state changes.

use crate::id::CodeSequence;

/// Entity marker + minimal interface.
///
/// Equality of two entities is decided by `id()` alone; the remaining fields
/// may differ between two snapshots of the same entity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + AsRef<str>;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity that can live in an in-memory repository.
pub trait Record: Entity + Clone {
    /// Code generator for this kind of record (`AGR001`, `F003`, ...).
    const SEQUENCE: CodeSequence;

    /// Overwrite the key.
    ///
    /// Only a repository calls this, when a replacement record is stored under
    /// the key it replaces.
    fn rekey(&mut self, id: Self::Id);
}
