//! Entity trait: identity that survives state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Whether this entity is the one identified by `id`.
    fn is(&self, id: Self::Id) -> bool {
        self.id() == id
    }
}
