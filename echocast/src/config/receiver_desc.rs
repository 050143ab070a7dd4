use crate::error::{EchoCastError, Result};
use crate::scene::LayerMask;
use std::time::Duration;

/// Configuration descriptor for an audio receiver.
///
/// Immutable for the duration of a tick. A descriptor that fails [`validate`](Self::validate)
/// is still accepted by the receiver, which then runs empty ticks instead of panicking.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverDesc {
    /// Number of sampling directions cast per tick
    pub ray_count: usize,
    /// Initial travel budget of each sampling ray, shared across all of its bounces
    pub max_ray_distance: f32,
    /// Number of reflections a sampling ray may take after its first hit
    pub max_bounces: u32,
    /// Time between sampling ticks
    pub sample_interval: Duration,
    /// Low-pass cutoff (Hz) applied to a source no sampled ray can see
    pub min_cutoff_frequency: f32,
    /// Low-pass cutoff (Hz) applied to a fully visible source
    pub max_cutoff_frequency: f32,
    /// Layers that reflect sampling rays and block line-of-sight
    pub bounce_layers: LayerMask,
    /// Layers sound source colliders live on
    pub source_layers: LayerMask,
    /// Layers the listener's own collider lives on
    pub receiver_layers: LayerMask,
    /// Sources farther than this from the listener are not probed
    pub max_audio_distance: f32,
}

impl Default for ReceiverDesc {
    fn default() -> Self {
        Self {
            ray_count: 360,
            max_ray_distance: 10.0,
            max_bounces: 1,
            sample_interval: Duration::from_millis(100),
            min_cutoff_frequency: 500.0,
            max_cutoff_frequency: 22000.0,
            bounce_layers: LayerMask::layer(0),
            source_layers: LayerMask::layer(8),
            receiver_layers: LayerMask::layer(9),
            max_audio_distance: 200.0,
        }
    }
}

impl ReceiverDesc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ray_count(mut self, count: usize) -> Self {
        self.ray_count = count;
        self
    }

    pub fn max_ray_distance(mut self, distance: f32) -> Self {
        self.max_ray_distance = distance;
        self
    }

    pub fn max_bounces(mut self, bounces: u32) -> Self {
        self.max_bounces = bounces;
        self
    }

    pub fn sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    pub fn cutoff_range(mut self, min_hz: f32, max_hz: f32) -> Self {
        self.min_cutoff_frequency = min_hz;
        self.max_cutoff_frequency = max_hz;
        self
    }

    pub fn bounce_layers(mut self, layers: LayerMask) -> Self {
        self.bounce_layers = layers;
        self
    }

    pub fn source_layers(mut self, layers: LayerMask) -> Self {
        self.source_layers = layers;
        self
    }

    pub fn receiver_layers(mut self, layers: LayerMask) -> Self {
        self.receiver_layers = layers;
        self
    }

    pub fn max_audio_distance(mut self, distance: f32) -> Self {
        self.max_audio_distance = distance;
        self
    }

    /// Reason a tick with this descriptor would sample nothing, if any.
    pub(crate) fn degenerate_reason(&self) -> Option<&'static str> {
        if self.ray_count == 0 {
            Some("ray count is zero")
        } else if !(self.max_ray_distance > 0.0) || !self.max_ray_distance.is_finite() {
            Some("max ray distance is not a positive finite number")
        } else {
            None
        }
    }

    /// Checks the descriptor for values the receiver can only degrade around.
    pub fn validate(&self) -> Result<()> {
        if let Some(reason) = self.degenerate_reason() {
            return Err(EchoCastError::Configuration(reason.to_string()));
        }
        if self.sample_interval.is_zero() {
            return Err(EchoCastError::Configuration(
                "sample interval must be greater than zero".to_string(),
            ));
        }
        if !(self.min_cutoff_frequency >= 0.0)
            || !(self.min_cutoff_frequency <= self.max_cutoff_frequency)
            || !self.max_cutoff_frequency.is_finite()
        {
            return Err(EchoCastError::Configuration(format!(
                "invalid cutoff range {}..{} Hz",
                self.min_cutoff_frequency, self.max_cutoff_frequency
            )));
        }
        if !(self.max_audio_distance > 0.0) {
            return Err(EchoCastError::Configuration(
                "max audio distance must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ReceiverDesc::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let desc = ReceiverDesc::new()
            .ray_count(64)
            .max_bounces(3)
            .cutoff_range(200.0, 8000.0)
            .sample_interval(Duration::from_millis(50));
        assert_eq!(desc.ray_count, 64);
        assert_eq!(desc.max_bounces, 3);
        assert_eq!(desc.min_cutoff_frequency, 200.0);
        assert_eq!(desc.max_cutoff_frequency, 8000.0);
        assert_eq!(desc.sample_interval, Duration::from_millis(50));
        assert_eq!(desc.max_ray_distance, 10.0);
    }

    #[test]
    fn test_degenerate_values_are_rejected() {
        let cases = [
            ReceiverDesc::new().ray_count(0),
            ReceiverDesc::new().max_ray_distance(0.0),
            ReceiverDesc::new().max_ray_distance(-3.0),
            ReceiverDesc::new().max_ray_distance(f32::NAN),
            ReceiverDesc::new().sample_interval(Duration::ZERO),
            ReceiverDesc::new().cutoff_range(9000.0, 100.0),
            ReceiverDesc::new().max_audio_distance(0.0),
        ];
        for desc in cases {
            assert!(
                matches!(desc.validate(), Err(EchoCastError::Configuration(_))),
                "{desc:?} should be rejected"
            );
        }
    }
}
