//! # Hearts Core
//!
//! A decorative emitter of floating shapes. Each shape rises through its
//! container over a fixed timeline while popping in, swaying sideways, wobbling
//! and fading out, then is discarded.
//!
//! The crate owns timing, interpolation and bookkeeping only. The host supplies
//! layout measurements and frame ticks and draws the [`ShapeFrame`]s it gets
//! back with whatever renderer it has.
//!
//! ```rust
//! use hearts_core::{Emitter, EmitterConfig};
//!
//! let mut emitter = Emitter::new(EmitterConfig::default().with_seed(7)).unwrap();
//! emitter.on_layout(300.0);
//!
//! let ids = emitter.set_count(0);
//! emitter.on_shape_layout(ids[0], 30.0);
//! emitter.tick(1.0 / 60.0);
//!
//! for frame in emitter.frames() {
//!     assert!(frame.transform.is_some());
//! }
//! ```

/// Easing functions and the one-shot `Timeline`.
pub mod animation;

/// Emitter configuration and validation.
pub mod config;

/// The emitter owning all active shapes.
pub mod emitter;

pub mod errors;

/// Default heart geometry.
pub mod heart;

/// Piecewise-linear interpolation curves.
pub mod interpolate;

/// A single animated shape and its derived curves.
pub mod shape;

/// Shared data structures.
pub mod types;

pub use animation::{EasingType, Timeline, TimelineState, TimelineStatus};
pub use config::{EmitterConfig, SpawnPolicy};
pub use emitter::{
    Emitter, HeartFactory, RenderItem, ShapeDescriptor, ShapeFactory, SpawnOptions, INITIAL_COUNT,
    MAX_BURST,
};
pub use errors::HeartsError;
pub use heart::HeartShape;
pub use interpolate::{Curve, CurveError, Extrapolate};
pub use shape::{AnimatedShape, DerivedCurves, MeasureState, ShapeFrame, ShapeTransform};
pub use types::{Color, ShapeId};
