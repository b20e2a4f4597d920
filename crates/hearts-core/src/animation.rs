use keyframe::{AnimationSequence, EasingFunction, Keyframe};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported easing functions for the shape timeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Default for EasingType {
    fn default() -> Self {
        EasingType::EaseInOut
    }
}

impl EasingFunction for EasingType {
    fn y(&self, x: f64) -> f64 {
        match self {
            EasingType::Linear => keyframe::functions::Linear.y(x),
            EasingType::EaseIn => keyframe::functions::EaseIn.y(x),
            EasingType::EaseOut => keyframe::functions::EaseOut.y(x),
            EasingType::EaseInOut => keyframe::functions::EaseInOut.y(x),
        }
    }
}

impl EasingType {
    /// Evaluates the easing curve at a specific point `x` (0.0 to 1.0).
    pub fn eval(&self, x: f64) -> f64 {
        self.y(x.clamp(0.0, 1.0))
    }
}

/// Lifecycle of a one-shot timeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimelineState {
    Running,
    Finished,
    Cancelled,
}

/// What happened during a single `Timeline::advance` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimelineStatus {
    /// Still running after this step.
    Running,
    /// Reached its end during this step. Reported exactly once.
    JustFinished,
    /// Already finished or cancelled before this step; nothing moved.
    Idle,
}

/// A one-shot progress timeline: drives a value from `from` to `to` over a
/// fixed duration and then stops.
#[derive(Clone)]
pub struct Timeline {
    sequence: AnimationSequence<f64>,
    value: f64,
    elapsed: f64,
    duration: f64,
    state: TimelineState,
}

impl Timeline {
    /// Starts a timeline immediately. `duration` is in seconds.
    pub fn start(from: f64, to: f64, duration: f64, easing: EasingType) -> Self {
        // Both ends carry the easing so the segment is eased whichever
        // keyframe the sequence reads it from.
        let sequence = AnimationSequence::from(vec![
            Keyframe::new(from, 0.0, easing),
            Keyframe::new(to, duration, easing),
        ]);

        Self {
            sequence,
            value: from,
            elapsed: 0.0,
            duration,
            state: TimelineState::Running,
        }
    }

    /// Moves the timeline forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> TimelineStatus {
        if self.state != TimelineState::Running {
            return TimelineStatus::Idle;
        }

        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.sequence.advance_to(self.elapsed);
        self.value = self.sequence.now();

        if self.elapsed >= self.duration {
            self.state = TimelineState::Finished;
            TimelineStatus::JustFinished
        } else {
            TimelineStatus::Running
        }
    }

    /// Stops the timeline where it is. A cancelled timeline never finishes.
    pub fn cancel(&mut self) {
        if self.state == TimelineState::Running {
            self.state = TimelineState::Cancelled;
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimelineState::Running
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("value", &self.value)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("state", &self.state)
            .finish()
    }
}
