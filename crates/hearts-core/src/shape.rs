//! A single animated shape.
//!
//! An [`AnimatedShape`] starts a one-shot timeline the moment it is created.
//! The timeline drives a progress value from `0` to `-height`. The visual
//! curves (opacity, scale, drift, rotation) hang off that value, but they are
//! only built once the host reports the shape's own measured height. Until then
//! the shape renders fully transparent.

use crate::animation::{EasingType, Timeline, TimelineStatus};
use crate::interpolate::{Curve, Extrapolate};
use crate::types::ShapeId;
use kurbo::{Affine, Point, Vec2};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Scale overshoot keyframes: pop to 1.2x within 15 units, settle by 30.
const POP_DISTANCE: f64 = 15.0;
const SETTLE_DISTANCE: f64 = 30.0;
const POP_SCALE: f64 = 1.2;
/// Sideways sway at the midpoint of travel.
const DRIFT: f64 = 15.0;
/// Peak wobble angle in degrees.
const WOBBLE_DEG: f64 = 2.0;

/// The four visual curves of a measured shape, keyed by travel distance.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedCurves {
    /// Progress (`-height..0`) to travel distance (`height..0`).
    pub travel: Curve,
    pub opacity: Curve,
    pub scale: Curve,
    pub drift: Curve,
    pub rotation: Curve,
}

impl DerivedCurves {
    /// Builds the curves for a container of `height` and a shape of `own_height`.
    ///
    /// Returns `None` when `height` is not a positive finite number.
    pub fn new(height: f64, own_height: f64, shrink_to: f64) -> Option<Self> {
        if !height.is_finite() || height <= 0.0 {
            return None;
        }
        let h = height.ceil();
        // A shape taller than its container starts fading immediately.
        let fade_end = (h - own_height.max(0.0)).max(0.0);

        Some(Self {
            travel: Curve::new(&[-h, 0.0], &[h, 0.0]).ok()?,
            opacity: Curve::new(&[0.0, fade_end], &[1.0, 0.0])
                .ok()?
                .with_extrapolate(Extrapolate::Clamp),
            scale: Curve::new(
                &[0.0, POP_DISTANCE, SETTLE_DISTANCE, h.max(SETTLE_DISTANCE)],
                &[0.0, POP_SCALE, 1.0, shrink_to],
            )
            .ok()?,
            drift: Curve::new(&[0.0, h / 2.0, h], &[0.0, DRIFT, 0.0]).ok()?,
            rotation: Curve::new(
                &[0.0, h / 4.0, h / 3.0, h / 2.0, h],
                &[0.0, -WOBBLE_DEG, 0.0, WOBBLE_DEG, 0.0],
            )
            .ok()?,
        })
    }

    /// Samples every curve at a raw progress value.
    pub fn sample(&self, progress: f64) -> (f64, ShapeTransform) {
        let distance = self.travel.eval(progress);
        let transform = ShapeTransform {
            translate_y: progress,
            translate_x: self.drift.eval(distance),
            scale: self.scale.eval(distance),
            rotation_deg: self.rotation.eval(distance),
        };
        (self.opacity.eval(distance), transform)
    }
}

/// Measurement state of a shape.
#[derive(Clone, Debug, PartialEq)]
pub enum MeasureState {
    Unmeasured,
    Measured {
        own_height: f64,
        curves: DerivedCurves,
    },
}

/// Transform applied to a shape, in the order translate, scale, rotate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ShapeTransform {
    pub translate_x: f64,
    /// Negative values move the shape up.
    pub translate_y: f64,
    pub scale: f64,
    pub rotation_deg: f64,
}

impl ShapeTransform {
    pub const IDENTITY: ShapeTransform = ShapeTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        rotation_deg: 0.0,
    };

    /// The transform as an affine matrix, scaling and rotating around `pivot`
    /// (in the shape's local coordinates).
    pub fn to_affine(&self, pivot: Point) -> Affine {
        let about_pivot = Affine::translate(pivot.to_vec2())
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-pivot.to_vec2());
        Affine::translate(Vec2::new(self.translate_x, self.translate_y)) * about_pivot
    }
}

/// What a renderer needs to draw one shape for the current frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ShapeFrame {
    pub id: ShapeId,
    /// Horizontal offset from the right edge of the container.
    pub right: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// `None` until the shape has been measured.
    pub transform: Option<ShapeTransform>,
}

/// One shape's timeline, measurement state and content.
pub struct AnimatedShape<C> {
    id: ShapeId,
    content: C,
    right: f64,
    height: f64,
    shrink_to: f64,
    timeline: Timeline,
    measure: MeasureState,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl<C> AnimatedShape<C> {
    /// Creates the shape and starts its timeline.
    ///
    /// * `height` - Container height; the shape rises this far.
    /// * `right` - Horizontal offset from the container's right edge.
    /// * `duration` - Timeline length in seconds.
    pub fn new(
        id: ShapeId,
        content: C,
        height: f64,
        right: f64,
        duration: f64,
        easing: EasingType,
    ) -> Self {
        let timeline = Timeline::start(0.0, -height, duration, easing);
        debug!(%id, height, right, duration, "Shape timeline started");

        Self {
            id,
            content,
            right,
            height,
            shrink_to: 1.0,
            timeline,
            measure: MeasureState::Unmeasured,
            on_complete: None,
        }
    }

    /// Sets the scale the shape shrinks to by the top of its travel.
    ///
    /// Only affects curves built after this call.
    pub fn with_shrink_to(mut self, shrink_to: f64) -> Self {
        self.shrink_to = shrink_to;
        self
    }

    /// Registers a callback fired once, when the timeline ends naturally.
    pub fn with_on_complete(mut self, on_complete: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    /// Reports the shape's own layout height. Only the first call counts.
    ///
    /// Returns `true` if this call measured the shape.
    pub fn on_layout(&mut self, own_height: f64) -> bool {
        if matches!(self.measure, MeasureState::Measured { .. }) {
            return false;
        }
        if !own_height.is_finite() {
            warn!(id = %self.id, own_height, "Ignoring non-finite shape height");
            return false;
        }

        match DerivedCurves::new(self.height, own_height, self.shrink_to) {
            Some(curves) => {
                debug!(id = %self.id, own_height, "Shape measured");
                self.measure = MeasureState::Measured { own_height, curves };
                true
            }
            None => {
                warn!(id = %self.id, height = self.height, "Container height unusable for curves");
                false
            }
        }
    }

    /// Advances the timeline by `dt` seconds.
    ///
    /// Fires the completion callback on the step the timeline finishes.
    pub fn advance(&mut self, dt: f64) -> TimelineStatus {
        let status = self.timeline.advance(dt);
        if status == TimelineStatus::JustFinished {
            debug!(id = %self.id, "Shape timeline finished");
            if let Some(callback) = self.on_complete.take() {
                callback();
            }
        }
        status
    }

    /// Stops the timeline and drops the completion callback without calling it.
    pub fn cancel(&mut self) {
        self.timeline.cancel();
        self.on_complete = None;
    }

    /// Samples the shape for the current frame.
    pub fn frame(&self) -> ShapeFrame {
        match &self.measure {
            MeasureState::Unmeasured => ShapeFrame {
                id: self.id,
                right: self.right,
                opacity: 0.0,
                transform: None,
            },
            MeasureState::Measured { curves, .. } => {
                let (opacity, transform) = curves.sample(self.timeline.value());
                ShapeFrame {
                    id: self.id,
                    right: self.right,
                    opacity,
                    transform: Some(transform),
                }
            }
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Current raw progress value, from `0` down to `-height`.
    pub fn progress(&self) -> f64 {
        self.timeline.value()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn measure_state(&self) -> &MeasureState {
        &self.measure
    }

    pub fn is_measured(&self) -> bool {
        matches!(self.measure, MeasureState::Measured { .. })
    }

    pub fn is_finished(&self) -> bool {
        !self.timeline.is_running()
    }
}

impl<C> Drop for AnimatedShape<C> {
    fn drop(&mut self) {
        // Teardown must never run the completion callback.
        self.cancel();
    }
}

impl<C: fmt::Debug> fmt::Debug for AnimatedShape<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedShape")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("right", &self.right)
            .field("height", &self.height)
            .field("timeline", &self.timeline)
            .field("measured", &self.is_measured())
            .finish()
    }
}
