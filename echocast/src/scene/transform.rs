//! Entity handles and the scene transform interface.

use crate::math::Vec3;

/// Lightweight, opaque handle for anything the receiver needs to identify:
/// the listener itself, tracked sound sources, and the colliders a ray hits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// World-space transforms of the listener and the tracked sources.
pub trait TransformProvider: Send + Sync {
    /// World-space position of `entity`, or `None` if the entity is unknown to the scene.
    fn position(&self, entity: EntityId) -> Option<Vec3>;

    /// Returns true if `entity` sits somewhere below `ancestor` in the transform hierarchy.
    ///
    /// Used so that hitting a child collider of a source (a speaker mesh parented to an
    /// emitter, for example) still counts as reaching the source.
    fn is_descendant_of(&self, _entity: EntityId, _ancestor: EntityId) -> bool {
        false
    }
}
