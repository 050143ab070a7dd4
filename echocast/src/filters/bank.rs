use super::{AudioFilterSink, EchoFilter, EchoParams, LowPassFilter};
use crate::error::{EchoCastError, Result};
use crate::scene::EntityId;
use std::collections::HashMap;

/// Optional filters attached to one source.
#[derive(Debug, Clone, Default)]
pub struct SourceFilters {
    pub lowpass: Option<LowPassFilter>,
    pub echo: Option<EchoFilter>,
}

impl SourceFilters {
    /// Runs the buffer through the low-pass filter, then the echo, skipping whichever is absent.
    pub fn process(&mut self, buffer: &mut [f32]) {
        if let Some(lowpass) = &mut self.lowpass {
            lowpass.process(buffer);
        }
        if let Some(echo) = &mut self.echo {
            echo.process(buffer);
        }
    }

    /// Clears filter state so the next block starts from silence.
    pub fn reset(&mut self) {
        if let Some(lowpass) = &mut self.lowpass {
            lowpass.reset();
        }
        if let Some(echo) = &mut self.echo {
            echo.reset();
        }
    }
}

/// Manages muffling and echo filters for every source that has them.
pub struct FilterBank {
    sample_rate: u32,
    filters: HashMap<EntityId, SourceFilters>,
}

impl FilterBank {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            filters: HashMap::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Attach a low-pass filter to a source, starting fully open at `initial_cutoff`
    pub fn attach_lowpass(&mut self, source: EntityId, initial_cutoff: f32) {
        let entry = self.filters.entry(source).or_default();
        if entry.lowpass.is_some() {
            log::warn!("Low-pass filter for {} already exists, replacing", source);
        }
        entry.lowpass = Some(LowPassFilter::new(self.sample_rate, initial_cutoff));
        log::debug!("Attached low-pass filter to {}", source);
    }

    /// Attach an echo filter to a source
    pub fn attach_echo(&mut self, source: EntityId) {
        let entry = self.filters.entry(source).or_default();
        if entry.echo.is_some() {
            log::warn!("Echo filter for {} already exists, replacing", source);
        }
        entry.echo = Some(EchoFilter::new(self.sample_rate));
        log::debug!("Attached echo filter to {}", source);
    }

    /// Remove all filters of a source
    pub fn detach(&mut self, source: EntityId) -> Result<SourceFilters> {
        let removed = self
            .filters
            .remove(&source)
            .ok_or(EchoCastError::UnknownSource(source))?;
        log::debug!("Removed filters for {}", source);
        Ok(removed)
    }

    pub fn lowpass(&self, source: EntityId) -> Option<&LowPassFilter> {
        self.filters.get(&source)?.lowpass.as_ref()
    }

    pub fn echo(&self, source: EntityId) -> Option<&EchoFilter> {
        self.filters.get(&source)?.echo.as_ref()
    }

    pub fn filters_mut(&mut self, source: EntityId) -> Option<&mut SourceFilters> {
        self.filters.get_mut(&source)
    }

    /// Filter a block of mono samples belonging to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`EchoCastError::UnknownSource`] if no filters were attached for `source`.
    pub fn process(&mut self, source: EntityId, buffer: &mut [f32]) -> Result<()> {
        self.filters
            .get_mut(&source)
            .ok_or(EchoCastError::UnknownSource(source))?
            .process(buffer);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.filters.clear();
        log::debug!("Cleared all source filters");
    }
}

impl AudioFilterSink for FilterBank {
    fn set_cutoff_frequency(&mut self, source: EntityId, cutoff_hz: f32) -> bool {
        match self.filters.get_mut(&source).and_then(|f| f.lowpass.as_mut()) {
            Some(lowpass) => {
                lowpass.set_cutoff_frequency(cutoff_hz);
                true
            }
            None => false,
        }
    }

    fn set_echo(&mut self, source: EntityId, params: EchoParams) -> bool {
        match self.filters.get_mut(&source).and_then(|f| f.echo.as_mut()) {
            Some(echo) => {
                echo.set_params(params);
                true
            }
            None => false,
        }
    }
}
