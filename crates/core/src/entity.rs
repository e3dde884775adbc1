//! Entity trait: a record with a stable identity.

/// Entity marker + minimal interface.
///
/// Keyed collections store entities under `entity.id()`, so a record can never
/// sit under a key other than its own identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Ord + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
