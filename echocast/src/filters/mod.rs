//! Audio filter sinks driven by the receiver.
//!
//! After every tick the receiver writes a low-pass cutoff per source and one set of
//! [`EchoParams`] to every source through [`AudioFilterSink`]. Hosts that already run their
//! own DSP implement the trait themselves; [`FilterBank`] is a ready-made sink backed by
//! [`LowPassFilter`] and [`EchoFilter`].

pub mod bank;
pub mod echo;
pub mod lowpass;

pub use crate::mapper::EchoParams;
pub use bank::{FilterBank, SourceFilters};
pub use echo::EchoFilter;
pub use lowpass::LowPassFilter;

use crate::scene::EntityId;

/// Target for the filter parameters derived each tick.
///
/// Each method returns `false` when `source` has no filter with that capability, in which
/// case the write is skipped. A missing filter is not an error.
pub trait AudioFilterSink {
    fn set_cutoff_frequency(&mut self, source: EntityId, cutoff_hz: f32) -> bool;

    fn set_echo(&mut self, source: EntityId, params: EchoParams) -> bool;
}

/// Sink that discards every write; handy when only the [`TickReport`](crate::TickReport) matters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioFilterSink for NullSink {
    fn set_cutoff_frequency(&mut self, _source: EntityId, _cutoff_hz: f32) -> bool {
        false
    }

    fn set_echo(&mut self, _source: EntityId, _params: EchoParams) -> bool {
        false
    }
}
