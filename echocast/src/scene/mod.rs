//! Scene interfaces for occlusion and echo sampling.
//!
//! The receiver consumes the scene through two traits and never owns geometry itself:
//!
//! 1. **RayTracer** - nearest-hit ray queries and sphere overlap tests, filtered by [`LayerMask`]
//! 2. **TransformProvider** - world positions of the listener and sources, plus the parent hierarchy
//!
//! [`StaticScene`] is a small in-memory implementation of both, made of boxes and spheres.
//!
//! # Workflow
//!
//! 1. Put walls and other reflecting geometry on the layers named by `bounce_layers`
//! 2. Give every sound source a collider on a layer in `source_layers`
//! 3. Give the listener a collider on a layer in `receiver_layers` so echoes can find their way back
//! 4. Pass the tracer and transform provider to `AudioReceiver::update()` every frame

pub mod layer;
pub mod ray_tracer;
pub mod static_scene;
pub mod transform;

pub use layer::LayerMask;
pub use ray_tracer::{RayHit, RayTracer};
pub use static_scene::{Collider, Shape, StaticScene};
pub use transform::{EntityId, TransformProvider};
