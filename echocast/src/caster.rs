//! Bounded specular reflection of sampling rays.

use crate::math::{Vec3, reflect};
use crate::tick::TickContext;

/// Distance a reflected ray starts in front of the surface it bounced off.
pub const REFLECTION_OFFSET: f32 = 0.01;

impl TickContext<'_> {
    /// Follows one sampling ray through at most `max_bounces` reflections.
    ///
    /// Every surface the ray reaches is a bounce point: it counts toward the tick's bounce
    /// total and runs both the visibility and the echo probe, including the last one. The
    /// chain ends when the ray escapes, runs out of travel distance, or exhausts its bounce
    /// budget, so at most `max_bounces + 1` bounce queries are issued.
    ///
    /// Returns the number of bounce points reached.
    pub(crate) fn cast(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        max_bounces: u32,
        max_distance: f32,
    ) -> u32 {
        let initial_direction = direction;
        let mut origin = origin;
        let mut direction = direction;
        let mut bounces_remaining = max_bounces;
        let mut distance_remaining = max_distance;
        let mut bounce_points = 0;

        loop {
            // Also rejects NaN budgets.
            if !(distance_remaining > 0.0) {
                break;
            }

            let hit = self.scene.tracer.cast_ray(
                origin,
                direction,
                distance_remaining,
                self.scene.bounce_layers,
            );
            if !hit.hit {
                break;
            }

            bounce_points += 1;
            self.stats.record_bounce();
            distance_remaining -= origin.distance(hit.point);

            self.probe_visibility(hit.point);
            self.probe_echo(hit.point);

            if bounces_remaining == 0 || distance_remaining <= 0.0 {
                break;
            }

            direction = reflect(direction, hit.normal).normalize_or(direction);
            origin = hit.point + direction * REFLECTION_OFFSET;
            bounces_remaining -= 1;
        }

        log::trace!(
            "Ray {:?} reached {} bounce points",
            initial_direction,
            bounce_points
        );
        bounce_points
    }
}
