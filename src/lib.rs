//! # Floating Hearts
//!
//! `floating-hearts` is a decorative emitter of shapes that rise through a
//! container, pop in, sway, wobble and fade out over a fixed timeline.
//!
//! This crate re-exports [`hearts_core`]. See [`Emitter`] for the entry point.
//!
//! ```rust
//! use floating_hearts::{Emitter, EmitterConfig};
//!
//! let mut emitter = Emitter::new(EmitterConfig::default()).unwrap();
//! emitter.on_layout(240.0);
//! assert!(emitter.spawn().is_some());
//! assert_eq!(emitter.frames().len(), 1);
//! ```

pub use hearts_core::*;
