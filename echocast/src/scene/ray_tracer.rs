//! Collision query interface used by the occlusion and echo probes.
//!
//! Hosts implement [`RayTracer`] on top of whatever physics or scene representation
//! they already have. echocast never owns geometry; it only asks questions about it.

use super::layer::LayerMask;
use super::transform::EntityId;
use crate::math::Vec3;

/// Result of a ray intersection test.
///
/// Returned by `RayTracer::cast_ray()`. A miss is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Whether the ray hit any geometry
    pub hit: bool,

    /// Distance from ray origin to hit point
    ///
    /// Only meaningful if `hit` is true
    pub distance: f32,

    /// World-space hit point
    ///
    /// Only meaningful if `hit` is true
    pub point: Vec3,

    /// Surface normal at the hit point (normalized, pointing away from the surface)
    ///
    /// Only meaningful if `hit` is true
    pub normal: Vec3,

    /// Entity that owns the collider that was hit
    ///
    /// Only meaningful if `hit` is true
    pub entity: EntityId,

    /// Collision layer of the collider that was hit
    ///
    /// Only meaningful if `hit` is true
    pub layer: u8,
}

impl RayHit {
    /// Creates a miss result (no hit)
    pub fn miss() -> Self {
        Self {
            hit: false,
            distance: 0.0,
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            entity: EntityId::default(),
            layer: 0,
        }
    }

    /// Creates a hit result
    pub fn new(distance: f32, point: Vec3, normal: Vec3, entity: EntityId, layer: u8) -> Self {
        Self {
            hit: true,
            distance,
            point,
            normal,
            entity,
            layer,
        }
    }
}

impl Default for RayHit {
    fn default() -> Self {
        Self::miss()
    }
}

/// Trait for providing collision queries to the receiver.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a scene can be shared with other systems,
/// although a tick itself only ever calls into the tracer from one thread.
///
/// # Performance
///
/// One tick performs at most `ray_count * (max_bounces + 1)` bounce queries plus one
/// line-of-sight query per probe. With default settings that is several thousand calls
/// per tick, so keep `cast_ray()` cheap.
pub trait RayTracer: Send + Sync {
    /// Returns the closest hit along the ray, considering only colliders whose layer is in `layers`.
    ///
    /// # Parameters
    ///
    /// * `origin` - Ray starting position in world space
    /// * `direction` - Ray direction (normalized)
    /// * `max_distance` - Maximum ray distance to test
    /// * `layers` - Layer filter; colliders outside the mask are ignored
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask)
    -> RayHit;

    /// Returns true if any collider in `layers` intersects the sphere at `center`.
    fn overlaps_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hit_miss() {
        let miss = RayHit::miss();
        assert!(!miss.hit);
        assert_eq!(miss.distance, 0.0);
        assert_eq!(miss, RayHit::default());
    }

    #[test]
    fn test_ray_hit_new() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let point = Vec3::new(1.0, 0.0, 4.0);
        let hit = RayHit::new(5.0, point, normal, EntityId::new(7), 3);
        assert!(hit.hit);
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.point, point);
        assert_eq!(hit.normal, normal);
        assert_eq!(hit.entity, EntityId::new(7));
        assert_eq!(hit.layer, 3);
    }

    // Simple test ray tracer that never hits anything
    struct NoopTracer;

    impl RayTracer for NoopTracer {
        fn cast_ray(
            &self,
            _origin: Vec3,
            _direction: Vec3,
            _max_distance: f32,
            _layers: LayerMask,
        ) -> RayHit {
            RayHit::miss()
        }

        fn overlaps_sphere(&self, _center: Vec3, _radius: f32, _layers: LayerMask) -> bool {
            false
        }
    }

    #[test]
    fn test_noop_tracer() {
        let tracer = NoopTracer;
        let result = tracer.cast_ray(Vec3::ZERO, Vec3::Z, 100.0, LayerMask::ALL);
        assert!(!result.hit);
        assert!(!tracer.overlaps_sphere(Vec3::ZERO, 1.0, LayerMask::ALL));
    }
}
