//! In-memory reference scene built from boxes and spheres.
//!
//! `StaticScene` implements both [`RayTracer`] and [`TransformProvider`], which makes it
//! enough to drive an [`AudioReceiver`](crate::AudioReceiver) without a physics engine.
//! Rays that start inside a collider do not report that collider, matching the behaviour
//! of most game physics raycasts.

use super::layer::LayerMask;
use super::ray_tracer::{RayHit, RayTracer};
use super::transform::{EntityId, TransformProvider};
use crate::math::Vec3;
use std::collections::HashMap;

const PARALLEL_EPSILON: f32 = 1e-8;

/// Collision shape of a static collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box
    Aabb { min: Vec3, max: Vec3 },
    /// Sphere
    Sphere { center: Vec3, radius: f32 },
}

/// A collider owned by an entity and assigned to one collision layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub entity: EntityId,
    pub layer: u8,
    pub shape: Shape,
}

impl Collider {
    /// Distance along the ray to the entry point and the surface normal there.
    fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<(f32, Vec3)> {
        match self.shape {
            Shape::Aabb { min, max } => intersect_aabb(origin, direction, min, max),
            Shape::Sphere { center, radius } => intersect_sphere(origin, direction, center, radius),
        }
    }

    fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        match self.shape {
            Shape::Aabb { min, max } => {
                let closest = center.clamp(min, max);
                closest.distance_squared(center) <= radius * radius
            }
            Shape::Sphere {
                center: c,
                radius: r,
            } => c.distance(center) <= r + radius,
        }
    }
}

fn intersect_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < PARALLEL_EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let mut t0 = (min[axis] - o) / d;
        let mut t1 = (max[axis] - o) / d;
        // The face we enter through faces against the ray direction.
        let mut normal = Vec3::ZERO;
        normal[axis] = -d.signum();
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            enter_normal = normal;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    // Origin inside the box, or the box is behind the ray.
    if t_enter < 0.0 {
        return None;
    }
    Some((t_enter, enter_normal))
}

fn intersect_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<(f32, Vec3)> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c < 0.0 {
        return None;
    }
    let b = oc.dot(direction);
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    if t < 0.0 {
        return None;
    }
    let normal = (origin + direction * t - center) / radius;
    Some((t, normal))
}

/// Static collision world with an entity transform table and parent hierarchy.
///
/// # Example
///
/// ```
/// use echocast::math::Vec3;
/// use echocast::scene::{EntityId, LayerMask, RayTracer, StaticScene};
///
/// let wall = EntityId::new(1);
/// let mut scene = StaticScene::new();
/// scene.add_box(wall, 0, Vec3::new(4.0, -5.0, -5.0), Vec3::new(5.0, 5.0, 5.0));
///
/// let hit = scene.cast_ray(Vec3::ZERO, Vec3::X, 10.0, LayerMask::ALL);
/// assert!(hit.hit);
/// assert_eq!(hit.entity, wall);
/// assert_eq!(hit.normal, -Vec3::X);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    colliders: Vec<Collider>,
    positions: HashMap<EntityId, Vec3>,
    parents: HashMap<EntityId, EntityId>,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collider(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    /// Adds an axis-aligned box spanning `min..max`.
    pub fn add_box(&mut self, entity: EntityId, layer: u8, min: Vec3, max: Vec3) {
        self.add_collider(Collider {
            entity,
            layer,
            shape: Shape::Aabb {
                min: min.min(max),
                max: min.max(max),
            },
        });
    }

    pub fn add_sphere(&mut self, entity: EntityId, layer: u8, center: Vec3, radius: f32) {
        self.add_collider(Collider {
            entity,
            layer,
            shape: Shape::Sphere {
                center,
                radius: radius.abs(),
            },
        });
    }

    /// Sets the world-space position reported for `entity`.
    pub fn set_position(&mut self, entity: EntityId, position: Vec3) {
        self.positions.insert(entity, position);
    }

    pub fn set_parent(&mut self, child: EntityId, parent: EntityId) {
        self.parents.insert(child, parent);
    }

    /// Removes every collider owned by `entity` and forgets its transform.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.colliders.retain(|c| c.entity != entity);
        self.positions.remove(&entity);
        self.parents.remove(&entity);
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }
}

impl RayTracer for StaticScene {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> RayHit {
        let mut closest = RayHit::miss();
        if !(max_distance > 0.0) {
            return closest;
        }

        for collider in self.colliders.iter().filter(|c| layers.contains(c.layer)) {
            let Some((distance, normal)) = collider.intersect(origin, direction) else {
                continue;
            };
            if distance > max_distance || (closest.hit && distance >= closest.distance) {
                continue;
            }
            closest = RayHit::new(
                distance,
                origin + direction * distance,
                normal,
                collider.entity,
                collider.layer,
            );
        }

        closest
    }

    fn overlaps_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> bool {
        self.colliders
            .iter()
            .filter(|c| layers.contains(c.layer))
            .any(|c| c.overlaps_sphere(center, radius))
    }
}

impl TransformProvider for StaticScene {
    fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.positions.get(&entity).copied()
    }

    fn is_descendant_of(&self, entity: EntityId, ancestor: EntityId) -> bool {
        let mut current = entity;
        // A well-formed hierarchy is never deeper than the number of parent links.
        for _ in 0..=self.parents.len() {
            match self.parents.get(&current) {
                Some(&parent) if parent == ancestor => return true,
                Some(&parent) => current = parent,
                None => return false,
            }
        }
        log::warn!("Parent cycle detected while walking up from {}", entity);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: EntityId = EntityId::new(1);
    const BALL: EntityId = EntityId::new(2);

    fn scene() -> StaticScene {
        let mut scene = StaticScene::new();
        scene.add_box(WALL, 0, Vec3::new(4.0, -5.0, -5.0), Vec3::new(5.0, 5.0, 5.0));
        scene.add_sphere(BALL, 1, Vec3::new(0.0, 0.0, 3.0), 1.0);
        scene
    }

    #[test]
    fn test_box_hit_distance_and_normal() {
        let hit = scene().cast_ray(Vec3::ZERO, Vec3::X, 10.0, LayerMask::ALL);
        assert!(hit.hit);
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, -Vec3::X);
        assert!((hit.point - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_hit() {
        let hit = scene().cast_ray(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::ALL);
        assert!(hit.hit);
        assert_eq!(hit.entity, BALL);
        assert_eq!(hit.layer, 1);
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((hit.normal + Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_layer_filter_skips_colliders() {
        let hit = scene().cast_ray(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::layer(0));
        assert!(!hit.hit);
    }

    #[test]
    fn test_max_distance_limits_hits() {
        let scene = scene();
        assert!(!scene.cast_ray(Vec3::ZERO, Vec3::X, 3.9, LayerMask::ALL).hit);
        assert!(!scene.cast_ray(Vec3::ZERO, Vec3::X, 0.0, LayerMask::ALL).hit);
    }

    #[test]
    fn test_ray_starting_inside_collider_misses_it() {
        let hit = scene().cast_ray(Vec3::new(4.5, 0.0, 0.0), Vec3::X, 10.0, LayerMask::ALL);
        assert!(!hit.hit);
    }

    #[test]
    fn test_closest_hit_wins() {
        let mut scene = scene();
        let near = EntityId::new(3);
        scene.add_box(near, 0, Vec3::new(2.0, -1.0, -1.0), Vec3::new(2.5, 1.0, 1.0));
        let hit = scene.cast_ray(Vec3::ZERO, Vec3::X, 10.0, LayerMask::ALL);
        assert_eq!(hit.entity, near);
    }

    #[test]
    fn test_overlap_sphere() {
        let scene = scene();
        assert!(scene.overlaps_sphere(Vec3::new(4.0, 0.0, 0.0), 0.01, LayerMask::ALL));
        assert!(!scene.overlaps_sphere(Vec3::new(3.9, 0.0, 0.0), 0.01, LayerMask::ALL));
        assert!(!scene.overlaps_sphere(Vec3::new(4.0, 0.0, 0.0), 0.01, LayerMask::layer(1)));
    }

    #[test]
    fn test_hierarchy() {
        let mut scene = scene();
        let root = EntityId::new(10);
        let child = EntityId::new(11);
        let grandchild = EntityId::new(12);
        scene.set_parent(child, root);
        scene.set_parent(grandchild, child);
        assert!(scene.is_descendant_of(grandchild, root));
        assert!(!scene.is_descendant_of(root, grandchild));
        assert!(!scene.is_descendant_of(root, root));
    }

    #[test]
    fn test_parent_cycle_terminates() {
        let mut scene = StaticScene::new();
        let a = EntityId::new(1);
        let b = EntityId::new(2);
        scene.set_parent(a, b);
        scene.set_parent(b, a);
        assert!(!scene.is_descendant_of(a, EntityId::new(3)));
    }

    #[test]
    fn test_remove_entity() {
        let mut scene = scene();
        scene.set_position(WALL, Vec3::new(4.5, 0.0, 0.0));
        scene.remove_entity(WALL);
        assert_eq!(scene.position(WALL), None);
        assert_eq!(scene.colliders().len(), 1);
    }
}
