use crate::config::ReceiverDesc;
use crate::error::{EchoCastError, Result};
use crate::events::ReceiverEvent;
use crate::filters::AudioFilterSink;
use crate::mapper::{EchoParams, cutoff_frequency, muffle_percent};
use crate::sampling::DirectionCache;
use crate::scene::{EntityId, RayTracer, TransformProvider};
use crate::tick::{SceneQuery, SourceReport, TickContext, TickReport, TrackedSource};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::time::Duration;

/// Undrained events beyond this count evict the oldest ones.
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Ray-sampling listener that estimates occlusion and echo for a set of sound sources.
///
/// Every `sample_interval` the receiver casts `ray_count` directions from the listener,
/// bounces each one off the scene, and at every bounce point checks which source (if any)
/// is in view and whether the listener itself is in view. Visibility counts become per-source
/// low-pass cutoffs; echo returns become one set of echo parameters for the whole tick.
///
/// # Threading
///
/// A tick runs to completion inside [`update`](Self::update) or [`run_tick`](Self::run_tick).
/// Both borrow the receiver mutably, so sources can only be added or removed between ticks.
///
/// # Example
///
/// ```
/// use echocast::math::Vec3;
/// use echocast::scene::{EntityId, LayerMask, StaticScene};
/// use echocast::{AudioReceiver, FilterBank, ReceiverDesc};
/// use std::time::Duration;
///
/// let listener = EntityId::new(1);
/// let radio = EntityId::new(2);
/// let desc = ReceiverDesc::default();
///
/// let mut scene = StaticScene::new();
/// scene.set_position(listener, Vec3::ZERO);
/// scene.set_position(radio, Vec3::new(0.0, 0.0, 4.0));
/// scene.add_sphere(radio, 8, Vec3::new(0.0, 0.0, 4.0), 0.5);
///
/// let mut filters = FilterBank::new(48000);
/// filters.attach_lowpass(radio, desc.max_cutoff_frequency);
///
/// let mut receiver = AudioReceiver::new(listener, desc);
/// receiver.add_source(radio);
///
/// let report = receiver
///     .update(Duration::from_millis(100), &scene, &scene, &mut filters)
///     .expect("interval elapsed");
/// assert_eq!(report.source(radio).unwrap().muffle_percent, 1.0);
/// ```
pub struct AudioReceiver {
    listener: EntityId,
    desc: ReceiverDesc,
    sources: Vec<TrackedSource>,
    directions: DirectionCache,
    pulse_timer: Duration,
    event_sender: Sender<ReceiverEvent>,
    event_receiver: Receiver<ReceiverEvent>,
}

impl AudioReceiver {
    /// Creates a receiver for the listener entity `listener`.
    ///
    /// An invalid descriptor is accepted with a warning; ticks then degrade to no-ops.
    pub fn new(listener: EntityId, desc: ReceiverDesc) -> Self {
        if let Err(e) = desc.validate() {
            log::warn!("Audio receiver {} created with {}", listener, e);
        }
        log::info!(
            "Audio receiver {} ready ({} rays, {} bounces, {:?} interval)",
            listener,
            desc.ray_count,
            desc.max_bounces,
            desc.sample_interval
        );

        let (event_sender, event_receiver) = crossbeam_channel::bounded(EVENT_QUEUE_CAPACITY);
        Self {
            listener,
            desc,
            sources: Vec::new(),
            directions: DirectionCache::default(),
            pulse_timer: Duration::ZERO,
            event_sender,
            event_receiver,
        }
    }

    pub fn listener(&self) -> EntityId {
        self.listener
    }

    pub fn desc(&self) -> &ReceiverDesc {
        &self.desc
    }

    /// Replaces the configuration; takes effect from the next tick.
    pub fn set_desc(&mut self, desc: ReceiverDesc) {
        if let Err(e) = desc.validate() {
            log::warn!("Audio receiver {} reconfigured with {}", self.listener, e);
        }
        self.desc = desc;
    }

    /// Starts tracking `source` with a zeroed visibility counter.
    ///
    /// Returns `false` and leaves the source set unchanged if it is already tracked.
    pub fn add_source(&mut self, source: EntityId) -> bool {
        if self.contains_source(source) {
            return false;
        }
        self.sources.push(TrackedSource::new(source));
        log::debug!("Tracking audio source {}", source);
        self.emit(ReceiverEvent::SourceAdded { source_id: source });
        true
    }

    /// Like [`add_source`](Self::add_source), but reports a duplicate as an error.
    pub fn try_add_source(&mut self, source: EntityId) -> Result<()> {
        if self.add_source(source) {
            Ok(())
        } else {
            Err(EchoCastError::DuplicateSource(source))
        }
    }

    /// Stops tracking `source`. Returns `false` if it was never tracked.
    pub fn remove_source(&mut self, source: EntityId) -> bool {
        let Some(index) = self.sources.iter().position(|s| s.id == source) else {
            return false;
        };
        self.sources.remove(index);
        log::debug!("Stopped tracking audio source {}", source);
        self.emit(ReceiverEvent::SourceRemoved { source_id: source });
        true
    }

    pub fn contains_source(&self, source: EntityId) -> bool {
        self.sources.iter().any(|s| s.id == source)
    }

    /// Tracked sources in the order they were added, which is also the order they are probed in.
    pub fn sources(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.sources.iter().map(|s| s.id)
    }

    /// Visible-ray count for `source` from the most recent tick.
    pub fn visible_rays(&self, source: EntityId) -> Option<u32> {
        self.sources
            .iter()
            .find(|s| s.id == source)
            .map(|s| s.visible_rays)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Advances the frame clock by `dt` and runs a tick once `sample_interval` has elapsed.
    pub fn update(
        &mut self,
        dt: Duration,
        tracer: &dyn RayTracer,
        transforms: &dyn TransformProvider,
        sink: &mut dyn AudioFilterSink,
    ) -> Option<TickReport> {
        self.pulse_timer = self.pulse_timer.saturating_add(dt);
        if self.pulse_timer < self.desc.sample_interval {
            return None;
        }
        self.pulse_timer = Duration::ZERO;
        Some(self.run_tick(tracer, transforms, sink))
    }

    /// Runs one full sampling pass and writes the resulting filter parameters to `sink`.
    ///
    /// Degenerate configurations and an unknown listener position produce an empty report
    /// and no sink writes.
    pub fn run_tick(
        &mut self,
        tracer: &dyn RayTracer,
        transforms: &dyn TransformProvider,
        sink: &mut dyn AudioFilterSink,
    ) -> TickReport {
        for source in &mut self.sources {
            source.visible_rays = 0;
            source.position = None;
        }

        if let Some(reason) = self.desc.degenerate_reason() {
            log::warn!("Skipping tick for receiver {}: {}", self.listener, reason);
            self.emit(ReceiverEvent::DegenerateTick { reason });
            return TickReport::default();
        }
        let Some(listener_position) = transforms.position(self.listener) else {
            log::warn!("No transform for receiver {}, skipping tick", self.listener);
            self.emit(ReceiverEvent::ListenerMissing {
                listener: self.listener,
            });
            return TickReport::default();
        };

        let max_audio_distance = self.desc.max_audio_distance;
        for source in &mut self.sources {
            source.position = transforms
                .position(source.id)
                .filter(|p| p.distance(listener_position) <= max_audio_distance);
        }

        let directions = self.directions.get(self.desc.ray_count);
        let rays_cast = directions.len();
        let mut ctx = TickContext {
            scene: SceneQuery {
                tracer,
                transforms,
                bounce_layers: self.desc.bounce_layers,
            },
            listener: self.listener,
            listener_position,
            receiver_layers: self.desc.receiver_layers,
            source_layers: self.desc.source_layers,
            sources: self.sources.as_mut_slice(),
            stats: Default::default(),
        };
        for &direction in directions {
            // Direct, zero-bounce line of sight from the listener itself.
            ctx.probe_visibility(listener_position);
            ctx.cast(
                listener_position,
                direction,
                self.desc.max_bounces,
                self.desc.max_ray_distance,
            );
        }
        let stats = ctx.stats;

        let echo = EchoParams::from_stats(&stats);
        let mut report = TickReport {
            rays_cast,
            stats,
            echo: Some(echo),
            sources: Vec::with_capacity(self.sources.len()),
        };
        log::debug!("{}", report);

        for source in &mut self.sources {
            let muffle = muffle_percent(source.visible_rays, rays_cast).unwrap_or(0.0);
            let cutoff = cutoff_frequency(
                self.desc.min_cutoff_frequency,
                self.desc.max_cutoff_frequency,
                muffle,
            );
            if sink.set_cutoff_frequency(source.id, cutoff) {
                log::debug!("Set {} cutoff to: {}", source.id, cutoff);
            }
            sink.set_echo(source.id, echo);

            report.sources.push(SourceReport {
                source: source.id,
                visible_rays: source.visible_rays,
                muffle_percent: muffle,
                cutoff_frequency: cutoff,
            });
        }

        self.emit(ReceiverEvent::TickCompleted(report.clone()));
        report
    }

    /// Drains all events published since the last call.
    pub fn poll_events(&self) -> Vec<ReceiverEvent> {
        self.event_receiver.try_iter().collect()
    }

    /// Queues `event`, evicting the oldest undrained event if the queue is full.
    fn emit(&self, event: ReceiverEvent) {
        let Err(TrySendError::Full(event)) = self.event_sender.try_send(event) else {
            return;
        };
        if let Ok(dropped) = self.event_receiver.try_recv() {
            log::warn!("Event queue full, dropping oldest event {:?}", dropped);
        }
        if let Err(e) = self.event_sender.try_send(event) {
            log::warn!("Event queue full, dropping {:?}", e.into_inner());
        }
    }
}
