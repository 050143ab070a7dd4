//! Math types for echocast

pub use glam::Vec3;

/// Reflects `direction` about a surface with the given `normal`.
///
/// `normal` is expected to be normalized. The result has the same length as `direction`.
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}

/// Linear interpolation between `a` and `b` with `t` clamped to `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    a + (b - a) * t
}
