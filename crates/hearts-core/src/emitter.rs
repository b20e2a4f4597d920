//! The shape emitter.
//!
//! The [`Emitter`] owns every active shape. It creates shapes when its trigger
//! count increases (or on an explicit [`Emitter::spawn`]), mounts them once the
//! container height is known, ticks their timelines and removes each shape by
//! id when its timeline completes.

use crate::animation::TimelineStatus;
use crate::config::{validate_offset_range, EmitterConfig, SpawnPolicy};
use crate::errors::HeartsError;
use crate::heart::HeartShape;
use crate::shape::{AnimatedShape, ShapeFrame};
use crate::types::{Color, ShapeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// Count an emitter starts from. The first increase (to 0 or above) spawns.
pub const INITIAL_COUNT: i64 = -1;

/// Most shapes a single `PerIncrement` update may create; larger jumps keep
/// the newest ids.
pub const MAX_BURST: i64 = 64;

/// Builds the visual content of a shape from its id and assigned color.
pub trait ShapeFactory {
    type Output;

    fn create(&self, id: ShapeId, color: &Color) -> Self::Output;
}

impl<F, T> ShapeFactory for F
where
    F: Fn(ShapeId, &Color) -> T,
{
    type Output = T;

    fn create(&self, id: ShapeId, color: &Color) -> T {
        self(id, color)
    }
}

/// The default factory: a [`HeartShape`] in the assigned color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeartFactory {
    pub size: f64,
}

impl ShapeFactory for HeartFactory {
    type Output = HeartShape;

    fn create(&self, _id: ShapeId, color: &Color) -> HeartShape {
        HeartShape::new(*color).with_size(self.size)
    }
}

/// Everything the emitter decides about a shape when creating it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub id: ShapeId,
    pub color: Color,
    /// Horizontal offset from the container's right edge.
    pub right: f64,
}

/// Per-spawn overrides for [`Emitter::spawn_with`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnOptions {
    pub color: Option<Color>,
    /// `(min, max)` replacing the configured offset range.
    pub right_range: Option<(f64, f64)>,
}

/// A descriptor plus, once the container is measured, its running shape.
struct Slot<C> {
    descriptor: ShapeDescriptor,
    shape: Option<AnimatedShape<C>>,
}

/// A mounted shape ready to draw this frame.
pub struct RenderItem<'a, C> {
    pub frame: ShapeFrame,
    pub color: Color,
    pub content: &'a C,
}

pub struct Emitter<F: ShapeFactory = HeartFactory> {
    config: EmitterConfig,
    factory: F,
    rng: StdRng,
    count: i64,
    container_height: Option<f64>,
    /// Ordered by id, which is creation order.
    active: BTreeMap<ShapeId, Slot<F::Output>>,
    created: u64,
    completed: u64,
}

impl Emitter<HeartFactory> {
    /// Creates an emitter that draws the default heart.
    pub fn new(config: EmitterConfig) -> Result<Self, HeartsError> {
        let factory = HeartFactory {
            size: config.heart_size,
        };
        Self::with_factory(config, factory)
    }
}

impl<F: ShapeFactory> Emitter<F> {
    /// Creates an emitter whose shapes are built by `factory`.
    pub fn with_factory(config: EmitterConfig, factory: F) -> Result<Self, HeartsError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            factory,
            rng,
            count: INITIAL_COUNT,
            container_height: None,
            active: BTreeMap::new(),
            created: 0,
            completed: 0,
        })
    }

    /// Applies a new trigger count.
    ///
    /// A strictly greater count creates shapes according to the spawn policy.
    /// Equal or lower counts only update the stored value. Returns the ids
    /// created by this call, oldest first.
    pub fn set_count(&mut self, count: i64) -> Vec<ShapeId> {
        let previous = self.count;
        self.count = count;

        if count <= previous {
            trace!(previous, count, "Count did not increase");
            return Vec::new();
        }

        let first = match self.config.spawn_policy {
            SpawnPolicy::Single => count,
            SpawnPolicy::PerIncrement => (previous + 1).max(count.saturating_sub(MAX_BURST - 1)),
        };
        (first..=count)
            .map(|id| self.create(ShapeId(id), &SpawnOptions::default()))
            .collect()
    }

    /// Spawns one shape, advancing the count by one.
    ///
    /// Returns `None` once the count is at `i64::MAX`.
    pub fn spawn(&mut self) -> Option<ShapeId> {
        self.spawn_with(SpawnOptions::default())
    }

    /// Spawns one shape with per-spawn overrides.
    ///
    /// An invalid `right_range` falls back to the configured range.
    pub fn spawn_with(&mut self, options: SpawnOptions) -> Option<ShapeId> {
        let Some(next) = self.count.checked_add(1) else {
            warn!(count = self.count, "Count saturated, no shape spawned");
            return None;
        };
        self.count = next;
        Some(self.create(ShapeId(next), &options))
    }

    fn create(&mut self, id: ShapeId, options: &SpawnOptions) -> ShapeId {
        let color = match options.color {
            Some(color) => color,
            None => {
                let index = self.rng.gen_range(0..self.config.colors.len());
                self.config.colors[index]
            }
        };

        let (min, max) = match options.right_range {
            Some((min, max)) if validate_offset_range(min, max).is_ok() => (min, max),
            Some((min, max)) => {
                warn!(min, max, "Invalid spawn offset range, using configured range");
                (self.config.right_min, self.config.right_max)
            }
            None => (self.config.right_min, self.config.right_max),
        };
        let right = if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        };

        let descriptor = ShapeDescriptor { id, color, right };
        debug!(%id, color = %color, right, "Shape created");

        let shape = self.container_height.map(|height| self.mount(&descriptor, height));
        self.active.insert(id, Slot { descriptor, shape });
        self.created += 1;
        id
    }

    fn mount(&self, descriptor: &ShapeDescriptor, height: f64) -> AnimatedShape<F::Output> {
        let content = self.factory.create(descriptor.id, &descriptor.color);
        AnimatedShape::new(
            descriptor.id,
            content,
            height,
            descriptor.right,
            self.config.duration_secs(),
            self.config.easing,
        )
        .with_shrink_to(self.config.shrink_to)
    }

    /// Reports the container's laid-out height.
    ///
    /// Shapes waiting for a height are mounted immediately. Shapes already
    /// running keep the height they started with. A zero or invalid height
    /// leaves the emitter unable to render.
    pub fn on_layout(&mut self, height: f64) {
        if !height.is_finite() || height <= 0.0 {
            warn!(height, "Container height unusable, rendering suppressed");
            self.container_height = None;
            return;
        }

        debug!(height, "Container measured");
        self.container_height = Some(height);

        let waiting: Vec<ShapeDescriptor> = self
            .active
            .values()
            .filter(|slot| slot.shape.is_none())
            .map(|slot| slot.descriptor)
            .collect();
        for descriptor in waiting {
            let shape = self.mount(&descriptor, height);
            if let Some(slot) = self.active.get_mut(&descriptor.id) {
                slot.shape = Some(shape);
            }
        }
    }

    /// Reports a mounted shape's own layout height.
    ///
    /// Returns `true` if this measured the shape. Unknown ids, unmounted
    /// shapes and repeat measurements return `false`.
    pub fn on_shape_layout(&mut self, id: ShapeId, own_height: f64) -> bool {
        self.active
            .get_mut(&id)
            .and_then(|slot| slot.shape.as_mut())
            .map(|shape| shape.on_layout(own_height))
            .unwrap_or(false)
    }

    /// Advances every mounted shape by `dt` seconds and removes the ones
    /// whose timelines finished. Returns the removed ids, oldest first.
    pub fn tick(&mut self, dt: f64) -> Vec<ShapeId> {
        let mut finished = Vec::new();
        for (id, slot) in self.active.iter_mut() {
            if let Some(shape) = slot.shape.as_mut() {
                if shape.advance(dt) == TimelineStatus::JustFinished {
                    finished.push(*id);
                }
            }
        }

        for id in &finished {
            self.remove(*id);
        }
        trace!(dt, active = self.active.len(), removed = finished.len(), "Emitter tick");
        finished
    }

    /// Removes the shape with this id, if present.
    fn remove(&mut self, id: ShapeId) -> Option<ShapeDescriptor> {
        let slot = self.active.remove(&id)?;
        self.completed += 1;
        debug!(%id, active = self.active.len(), "Shape removed");
        Some(slot.descriptor)
    }

    /// Frames for every mounted shape, oldest first.
    ///
    /// Empty until the container height is known.
    pub fn frames(&self) -> Vec<ShapeFrame> {
        self.render_items().map(|item| item.frame).collect()
    }

    /// Mounted shapes with their content, oldest first.
    pub fn render_items(&self) -> impl Iterator<Item = RenderItem<'_, F::Output>> + '_ {
        let ready = self.is_ready();
        self.active
            .values()
            .filter(move |_| ready)
            .filter_map(|slot| {
                slot.shape.as_ref().map(|shape| RenderItem {
                    frame: shape.frame(),
                    color: slot.descriptor.color,
                    content: shape.content(),
                })
            })
    }

    /// Cancels and drops every active shape. No completion is reported.
    pub fn clear(&mut self) {
        for slot in self.active.values_mut() {
            if let Some(shape) = slot.shape.as_mut() {
                shape.cancel();
            }
        }
        let dropped = self.active.len();
        self.active.clear();
        debug!(dropped, "Emitter cleared");
    }

    /// Active descriptors, oldest first.
    pub fn descriptors(&self) -> impl Iterator<Item = &ShapeDescriptor> + '_ {
        self.active.values().map(|slot| &slot.descriptor)
    }

    pub fn active_ids(&self) -> Vec<ShapeId> {
        self.active.keys().copied().collect()
    }

    pub fn shape(&self, id: ShapeId) -> Option<&AnimatedShape<F::Output>> {
        self.active.get(&id).and_then(|slot| slot.shape.as_ref())
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn container_height(&self) -> Option<f64> {
        self.container_height
    }

    /// Whether the container has been measured and shapes can render.
    pub fn is_ready(&self) -> bool {
        self.container_height.is_some()
    }

    /// Total shapes created since construction.
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Total shapes removed after completing.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }
}

impl<F: ShapeFactory> Drop for Emitter<F> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<F: ShapeFactory> fmt::Debug for Emitter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("count", &self.count)
            .field("container_height", &self.container_height)
            .field("active", &self.active_ids())
            .field("created", &self.created)
            .field("completed", &self.completed)
            .finish()
    }
}
