use super::EchoParams;

/// Longest echo delay the filter can hold, in milliseconds.
pub const MAX_DELAY_MS: f32 = 5000.0;

/// Feedback delay line producing a decaying echo.
///
/// Each repeat is `decay_ratio` times quieter than the previous one; `wet_mix` scales the
/// echo against the unchanged dry signal. The buffer is allocated once, up front.
#[derive(Debug, Clone)]
pub struct EchoFilter {
    sample_rate: u32,
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
    params: EchoParams,
}

impl EchoFilter {
    pub fn new(sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        let capacity = (sample_rate as f32 * MAX_DELAY_MS / 1000.0) as usize + 1;
        let mut filter = Self {
            sample_rate,
            buffer: vec![0.0; capacity],
            write_pos: 0,
            delay_samples: 1,
            params: EchoParams::NEUTRAL,
        };
        filter.set_params(EchoParams::NEUTRAL);
        filter
    }

    /// Applies new echo settings. Out-of-range values are clamped, NaN fields fall back to neutral.
    pub fn set_params(&mut self, params: EchoParams) {
        let sanitize = |value: f32, fallback: f32, max: f32| {
            if value.is_nan() { fallback } else { value.clamp(0.0, max) }
        };
        self.params = EchoParams {
            wet_mix: sanitize(params.wet_mix, EchoParams::NEUTRAL.wet_mix, 1.0),
            delay: sanitize(params.delay, EchoParams::NEUTRAL.delay, MAX_DELAY_MS),
            decay_ratio: sanitize(params.decay_ratio, EchoParams::NEUTRAL.decay_ratio, 1.0),
        };

        let samples = (self.params.delay / 1000.0 * self.sample_rate as f32).round() as usize;
        self.delay_samples = samples.clamp(1, self.buffer.len() - 1);
    }

    pub fn params(&self) -> EchoParams {
        self.params
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    pub fn process_sample(&mut self, input: f32) -> f32 {
        let len = self.buffer.len();
        let read_pos = (self.write_pos + len - self.delay_samples) % len;
        let delayed = self.buffer[read_pos];

        self.buffer[self.write_pos] = input + delayed * self.params.decay_ratio;
        self.write_pos = (self.write_pos + 1) % len;

        input + delayed * self.params.wet_mix
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_dry() {
        let mut filter = EchoFilter::new(48000);
        let mut buffer = vec![0.0; 100];
        buffer[0] = 1.0;
        filter.process(&mut buffer);
        assert_eq!(buffer[0], 1.0);
        assert!(buffer[1..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_impulse_echoes_after_delay() {
        let mut filter = EchoFilter::new(1000);
        filter.set_params(EchoParams {
            wet_mix: 0.5,
            delay: 10.0,
            decay_ratio: 0.5,
        });
        assert_eq!(filter.delay_samples(), 10);

        let mut buffer = vec![0.0; 40];
        buffer[0] = 1.0;
        filter.process(&mut buffer);

        assert_eq!(buffer[0], 1.0);
        assert_eq!(buffer[10], 0.5);
        assert_eq!(buffer[20], 0.25);
        assert_eq!(buffer[30], 0.125);
        assert_eq!(buffer[5], 0.0);
    }

    #[test]
    fn test_params_are_sanitized() {
        let mut filter = EchoFilter::new(48000);
        filter.set_params(EchoParams {
            wet_mix: f32::NAN,
            delay: 1.0e9,
            decay_ratio: -2.0,
        });
        let params = filter.params();
        assert_eq!(params.wet_mix, 0.0);
        assert_eq!(params.delay, MAX_DELAY_MS);
        assert_eq!(params.decay_ratio, 0.0);
    }

    #[test]
    fn test_reset_drops_pending_echoes() {
        let mut filter = EchoFilter::new(1000);
        filter.set_params(EchoParams {
            wet_mix: 1.0,
            delay: 10.0,
            decay_ratio: 0.5,
        });
        let mut buffer = vec![0.0; 5];
        buffer[0] = 1.0;
        filter.process(&mut buffer);

        filter.reset();
        let mut tail = vec![0.0; 40];
        filter.process(&mut tail);
        assert!(tail.iter().all(|&s| s == 0.0));
        assert_eq!(filter.delay_samples(), 10);
    }
}
