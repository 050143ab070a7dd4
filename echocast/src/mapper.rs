//! Conversion from per-tick ray statistics to audio filter parameters.

use crate::math::lerp;

/// Echo delay reached once the average echo path is this long or longer.
pub const MAX_ECHO_DELAY: f32 = 50.0;
/// Decay ratio range the echo wet mix is mapped onto.
pub const MIN_DECAY_RATIO: f32 = 0.3;
pub const MAX_DECAY_RATIO: f32 = 0.7;

/// Global ray statistics gathered during a single tick.
///
/// Rebuilt from zero at the start of every tick and consumed at its end.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    /// Number of times a cast ray hit bounce geometry
    pub bounce_count: u32,
    /// Number of bounce points with line-of-sight back to the listener
    pub echo_ray_count: u32,
    /// Summed length of the return paths of all echo rays
    pub echo_distance: f64,
}

impl TickStats {
    pub(crate) fn record_bounce(&mut self) {
        self.bounce_count += 1;
    }

    pub(crate) fn record_echo(&mut self, distance: f32) {
        self.echo_ray_count += 1;
        self.echo_distance += f64::from(distance);
    }

    /// Fraction of bounces that produced an echo, or `None` when nothing bounced.
    pub fn echo_ratio(&self) -> Option<f32> {
        (self.bounce_count > 0).then(|| self.echo_ray_count as f32 / self.bounce_count as f32)
    }

    /// Mean return-path length of echo rays, or `None` when there were none.
    pub fn average_echo_length(&self) -> Option<f64> {
        (self.echo_ray_count > 0).then(|| self.echo_distance / f64::from(self.echo_ray_count))
    }
}

/// Echo filter settings derived from one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EchoParams {
    /// Echo level in the output, `0.0..=1.0`
    pub wet_mix: f32,
    /// Echo delay in milliseconds
    pub delay: f32,
    /// Per-repeat attenuation of the echo, `0.0..=1.0`
    pub decay_ratio: f32,
}

impl EchoParams {
    /// Parameters used when a tick produced no echo rays: no wet signal, no delay.
    pub const NEUTRAL: Self = Self {
        wet_mix: 0.0,
        delay: 0.0,
        decay_ratio: MIN_DECAY_RATIO,
    };

    /// Maps tick statistics onto echo settings.
    ///
    /// Falls back to [`EchoParams::NEUTRAL`] when the ratio or the average length is undefined,
    /// so no NaN ever reaches a sink.
    pub fn from_stats(stats: &TickStats) -> Self {
        let (Some(wet_mix), Some(average_length)) = (stats.echo_ratio(), stats.average_echo_length())
        else {
            return Self::NEUTRAL;
        };

        let wet_mix = wet_mix.clamp(0.0, 1.0);
        Self {
            wet_mix,
            delay: lerp(0.0, MAX_ECHO_DELAY, average_length as f32 / MAX_ECHO_DELAY),
            decay_ratio: lerp(MIN_DECAY_RATIO, MAX_DECAY_RATIO, wet_mix),
        }
    }
}

impl Default for EchoParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Fraction of cast rays that reached a source, clamped to `[0, 1]`.
///
/// `None` when no rays were cast.
pub fn muffle_percent(visible_rays: u32, rays_cast: usize) -> Option<f32> {
    (rays_cast > 0).then(|| (visible_rays as f32 / rays_cast as f32).clamp(0.0, 1.0))
}

/// Low-pass cutoff for a given visibility fraction. Fully visible sources are left unmuffled.
pub fn cutoff_frequency(min_cutoff: f32, max_cutoff: f32, muffle_percent: f32) -> f32 {
    lerp(min_cutoff, max_cutoff, muffle_percent)
}
