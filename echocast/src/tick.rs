//! Per-tick working state and the report a tick produces.

use crate::mapper::{EchoParams, TickStats};
use crate::math::Vec3;
use crate::scene::{EntityId, LayerMask, RayTracer, TransformProvider};
use std::fmt;

/// A tracked sound source and its visibility counter for the current tick.
#[derive(Debug, Clone)]
pub(crate) struct TrackedSource {
    pub(crate) id: EntityId,
    pub(crate) visible_rays: u32,
    /// Resolved at the start of each tick; `None` skips the source for that tick
    pub(crate) position: Option<Vec3>,
}

impl TrackedSource {
    pub(crate) fn new(id: EntityId) -> Self {
        Self {
            id,
            visible_rays: 0,
            position: None,
        }
    }
}

/// Scene access shared by the caster and both probes.
#[derive(Clone, Copy)]
pub(crate) struct SceneQuery<'a> {
    pub(crate) tracer: &'a dyn RayTracer,
    pub(crate) transforms: &'a dyn TransformProvider,
    pub(crate) bounce_layers: LayerMask,
}

/// Everything one sampling pass reads and mutates.
///
/// Owns the tick statistics and exclusively borrows the source counters for the
/// duration of the pass.
pub(crate) struct TickContext<'a> {
    pub(crate) scene: SceneQuery<'a>,
    pub(crate) listener: EntityId,
    pub(crate) listener_position: Vec3,
    pub(crate) receiver_layers: LayerMask,
    pub(crate) source_layers: LayerMask,
    pub(crate) sources: &'a mut [TrackedSource],
    pub(crate) stats: TickStats,
}

/// Result of one tick for a single source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceReport {
    pub source: EntityId,
    /// Probe points (including the listener itself) that had line-of-sight to the source
    pub visible_rays: u32,
    /// `visible_rays / rays_cast`, clamped to `[0, 1]`
    pub muffle_percent: f32,
    /// Low-pass cutoff written for the source, in Hz
    pub cutoff_frequency: f32,
}

/// Diagnostic summary of a completed tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    /// Number of sampling directions cast this tick
    pub rays_cast: usize,
    pub stats: TickStats,
    /// Echo settings written to echo-capable sinks; `None` if the tick wrote nothing
    pub echo: Option<EchoParams>,
    pub sources: Vec<SourceReport>,
}

impl TickReport {
    pub fn echo_ratio(&self) -> Option<f32> {
        self.stats.echo_ratio()
    }

    pub fn average_echo_length(&self) -> Option<f64> {
        self.stats.average_echo_length()
    }

    pub fn source(&self, id: EntityId) -> Option<&SourceReport> {
        self.sources.iter().find(|s| s.source == id)
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bounces = self.stats.bounce_count;
        write!(
            f,
            "{} bounces, {}/{} were echo rays (",
            bounces, self.stats.echo_ray_count, bounces
        )?;
        match self.echo_ratio() {
            Some(ratio) => write!(f, "{:.1}%", ratio * 100.0)?,
            None => write!(f, "n/a")?,
        }
        write!(f, "). The average ray length was ")?;
        match self.average_echo_length() {
            Some(length) => write!(f, "{:.2}", length),
            None => write!(f, "n/a"),
        }
    }
}
