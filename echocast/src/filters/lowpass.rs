use std::f32::consts::TAU;

/// Lowest cutoff the filter will accept, in Hz.
const MIN_CUTOFF: f32 = 10.0;

/// One-pole low-pass filter used to muffle occluded sources.
///
/// `y[n] = y[n-1] + a * (x[n] - y[n-1])` with `a = 1 - exp(-2π fc / fs)`.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    sample_rate: u32,
    cutoff_frequency: f32,
    coefficient: f32,
    state: f32,
}

impl LowPassFilter {
    pub fn new(sample_rate: u32, cutoff_frequency: f32) -> Self {
        let mut filter = Self {
            sample_rate: sample_rate.max(1),
            cutoff_frequency: 0.0,
            coefficient: 1.0,
            state: 0.0,
        };
        filter.set_cutoff_frequency(cutoff_frequency);
        filter
    }

    /// Sets the cutoff, clamped between 10 Hz and Nyquist. NaN is ignored.
    pub fn set_cutoff_frequency(&mut self, cutoff_hz: f32) {
        if cutoff_hz.is_nan() {
            return;
        }
        let nyquist = self.sample_rate as f32 / 2.0;
        self.cutoff_frequency = cutoff_hz.clamp(MIN_CUTOFF, nyquist.max(MIN_CUTOFF));
        self.coefficient = 1.0 - (-TAU * self.cutoff_frequency / self.sample_rate as f32).exp();
    }

    pub fn cutoff_frequency(&self) -> f32 {
        self.cutoff_frequency
    }

    pub fn process_sample(&mut self, input: f32) -> f32 {
        self.state += self.coefficient * (input - self.state);
        self.state
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (TAU * frequency * n as f32 / sample_rate as f32).sin())
            .collect()
    }

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    #[test]
    fn test_cutoff_is_clamped() {
        let mut filter = LowPassFilter::new(48000, 500.0);
        filter.set_cutoff_frequency(96000.0);
        assert_eq!(filter.cutoff_frequency(), 24000.0);
        filter.set_cutoff_frequency(1.0);
        assert_eq!(filter.cutoff_frequency(), MIN_CUTOFF);
        filter.set_cutoff_frequency(f32::NAN);
        assert_eq!(filter.cutoff_frequency(), MIN_CUTOFF);
    }

    #[test]
    fn test_dc_passes() {
        let mut filter = LowPassFilter::new(48000, 500.0);
        let mut buffer = vec![1.0; 4800];
        filter.process(&mut buffer);
        assert!((buffer[4799] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_lower_cutoff_attenuates_more() {
        let input = sine(5000.0, 48000, 4800);

        let mut open = input.clone();
        LowPassFilter::new(48000, 22000.0).process(&mut open);
        let mut muffled = input.clone();
        LowPassFilter::new(48000, 500.0).process(&mut muffled);

        assert!(rms(&muffled) < rms(&open) * 0.5);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut filter = LowPassFilter::new(48000, 500.0);
        filter.process(&mut [1.0; 480]);
        assert!(filter.process_sample(0.0) > 0.0);
        filter.reset();
        assert_eq!(filter.process_sample(0.0), 0.0);
    }
}
