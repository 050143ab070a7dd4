//! # echocast
//!
//! Ray-sampled occlusion, muffling and echo estimation for positional audio.
//!
//! An [`AudioReceiver`] sits at the listener. At a fixed interval it casts a deterministic
//! set of directions into the scene, follows each ray through a bounded number of specular
//! reflections, and at every surface it reaches asks two questions: which tracked source can
//! be seen from here, and can the listener itself be seen from here. The first answer
//! becomes a per-source low-pass cutoff (occluded sources sound muffled); the second becomes
//! one set of echo parameters for the tick.
//!
//! ## Quick Start
//!
//! ```no_run
//! use echocast::*;
//! use echocast::scene::{EntityId, LayerMask, StaticScene};
//! use std::time::Duration;
//!
//! let listener = EntityId::new(1);
//! let source = EntityId::new(2);
//!
//! // Geometry and transforms; any RayTracer + TransformProvider works.
//! let scene = StaticScene::new();
//!
//! let desc = ReceiverDesc::default()
//!     .ray_count(256)
//!     .max_bounces(2)
//!     .bounce_layers(LayerMask::layer(0));
//! let mut receiver = AudioReceiver::new(listener, desc);
//! receiver.add_source(source);
//!
//! let mut filters = FilterBank::new(48000);
//! filters.attach_lowpass(source, 22000.0);
//! filters.attach_echo(source);
//!
//! // Once per frame:
//! if let Some(report) = receiver.update(Duration::from_millis(16), &scene, &scene, &mut filters) {
//!     println!("{report}");
//! }
//! ```
//!
//! ## Key Components
//!
//! - **[`AudioReceiver`]**: Owns the tracked sources and runs ticks from the frame clock
//! - **[`ReceiverDesc`]**: Ray count, bounce and distance budgets, cutoff range, layer filters
//! - **[`RayTracer`](scene::RayTracer)** / **[`TransformProvider`](scene::TransformProvider)**: What the receiver needs from the host scene
//! - **[`AudioFilterSink`]**: Where cutoffs and [`EchoParams`] are written; [`FilterBank`] is a built-in one
//! - **[`TickReport`]**: Per-tick statistics and results, also published as a [`ReceiverEvent`]
//!
//! ## Per-tick work
//!
//! A tick issues at most `ray_count * (max_bounces + 1)` bounce queries, plus one
//! line-of-sight query per source per probe. Nothing is carried over between ticks except
//! the filter parameters written to the sink.

pub(crate) mod caster;
pub mod config;
pub mod error;
pub mod events;
pub mod filters;
pub mod mapper;
pub mod math;
pub(crate) mod probe;
pub mod receiver;
pub mod sampling;
pub mod scene;
pub mod tick;

pub use caster::REFLECTION_OFFSET;
pub use config::ReceiverDesc;
pub use error::EchoCastError;
pub use events::ReceiverEvent;
pub use filters::{AudioFilterSink, EchoFilter, FilterBank, LowPassFilter, NullSink};
pub use mapper::{EchoParams, TickStats};
pub use probe::{NUDGE_DISTANCE, OVERLAP_RADIUS};
pub use receiver::AudioReceiver;
pub use sampling::fibonacci_sphere;
pub use tick::{SourceReport, TickReport};
