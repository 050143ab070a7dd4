//! Deterministic direction sampling on the unit sphere.
//!
//! Directions come from a spherical Fibonacci (golden-angle) lattice: point `i` of `n`
//! sits at height `y = i * 2/n - 1 + 1/n` and is rotated by `i` times the golden angle
//! around the Y axis. The set depends only on `n`, so consecutive ticks sample the
//! scene along exactly the same directions.

use crate::math::Vec3;
use std::f32::consts::PI;

/// Generates `count` approximately uniform unit directions. `count == 0` yields an empty set.
pub fn fibonacci_sphere(count: usize) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }

    let offset = 2.0 / count as f32;
    let increment = PI * (3.0 - 5.0_f32.sqrt());

    (0..count)
        .map(|i| {
            let i = i as f32;
            let y = i * offset - 1.0 + offset / 2.0;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = i * increment;
            Vec3::new(phi.cos() * r, y, phi.sin() * r)
        })
        .collect()
}

/// Caches the lattice for the most recently requested count.
#[derive(Debug, Clone, Default)]
pub(crate) struct DirectionCache {
    directions: Vec<Vec3>,
}

impl DirectionCache {
    pub(crate) fn get(&mut self, count: usize) -> &[Vec3] {
        if self.directions.len() != count {
            log::debug!("Regenerating {} sample directions", count);
            self.directions = fibonacci_sphere(count);
        }
        &self.directions
    }
}
