//! Line-of-sight probes run at the listener and at every bounce point.
//!
//! Both probes share the same test: cast a single ray from the probe point toward a
//! target, masked to bounce geometry plus the target's own layers, and accept the hit
//! only if it lands on the target entity or one of its descendants. Bounce points lie
//! on the surface they were found on, so a probe origin that overlaps bounce geometry
//! is first pulled back away from the target.

use crate::math::Vec3;
use crate::scene::{EntityId, LayerMask};
use crate::tick::{SceneQuery, TickContext};

/// Radius of the overlap test that detects a probe point resting on geometry.
pub const OVERLAP_RADIUS: f32 = 0.01;
/// How far an overlapping probe origin is pulled back along the direction to its target.
pub const NUDGE_DISTANCE: f32 = 0.1;

impl SceneQuery<'_> {
    /// Tests straight-line visibility from `point` to `target`.
    ///
    /// Returns the length of the tested path (measured from the possibly nudged origin)
    /// when the target is the first thing the ray hits.
    pub(crate) fn line_of_sight(
        &self,
        point: Vec3,
        target: EntityId,
        target_position: Vec3,
        target_layers: LayerMask,
    ) -> Option<f32> {
        let direction = (target_position - point).normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut origin = point;
        if self
            .tracer
            .overlaps_sphere(point, OVERLAP_RADIUS, self.bounce_layers)
        {
            origin -= direction * NUDGE_DISTANCE;
        }
        let distance = origin.distance(target_position);

        let hit = self.tracer.cast_ray(
            origin,
            direction,
            distance,
            self.bounce_layers | target_layers,
        );
        if !hit.hit || !target_layers.contains(hit.layer) {
            // Missed entirely, or a wall was hit first.
            return None;
        }

        (hit.entity == target || self.transforms.is_descendant_of(hit.entity, target))
            .then_some(distance)
    }
}

impl TickContext<'_> {
    /// Checks line-of-sight from `point` to the tracked sources, in insertion order.
    ///
    /// Stops at the first visible source and bumps its counter, so a single probe credits
    /// at most one source.
    pub(crate) fn probe_visibility(&mut self, point: Vec3) -> bool {
        for source in self.sources.iter_mut() {
            let Some(position) = source.position else {
                continue;
            };
            if self
                .scene
                .line_of_sight(point, source.id, position, self.source_layers)
                .is_some()
            {
                source.visible_rays += 1;
                log::trace!("{} visible from {:?}", source.id, point);
                return true;
            }
        }
        false
    }

    /// Checks line-of-sight from `point` back to the listener and records an echo ray if found.
    pub(crate) fn probe_echo(&mut self, point: Vec3) -> bool {
        match self.scene.line_of_sight(
            point,
            self.listener,
            self.listener_position,
            self.receiver_layers,
        ) {
            Some(distance) => {
                self.stats.record_echo(distance);
                true
            }
            None => false,
        }
    }
}
