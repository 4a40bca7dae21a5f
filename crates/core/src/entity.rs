//! Entity trait: identity that survives state changes.

/// Something with a stable identity.
///
/// An account stays the same account while its balance moves, so equality of
/// state and sameness of entity are different questions.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// `true` when both refer to the same entity, whatever their current state.
    fn is_same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
