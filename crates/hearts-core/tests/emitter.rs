//! Emitter Tests
//!
//! Tests for the trigger-count protocol, mounting behind the container
//! layout, removal by id and teardown.

use hearts_core::{
    Color, EasingType, Emitter, EmitterConfig, HeartShape, ShapeId, SpawnOptions, SpawnPolicy,
    MAX_BURST,
};

const FRAME: f64 = 1.0 / 60.0;

fn config() -> EmitterConfig {
    EmitterConfig::default()
        .with_seed(42)
        .with_easing(EasingType::Linear)
}

fn ready_emitter(config: EmitterConfig) -> Emitter {
    let mut emitter = Emitter::new(config).unwrap();
    emitter.on_layout(300.0);
    emitter
}

fn ids(values: &[i64]) -> Vec<ShapeId> {
    values.iter().copied().map(ShapeId).collect()
}

#[test]
fn each_increase_creates_one_shape_with_the_new_count() {
    let mut emitter = ready_emitter(config());

    for count in [0, 1, 2, 5, 9] {
        assert_eq!(emitter.set_count(count), ids(&[count]));
    }

    assert_eq!(emitter.created(), 5);
    assert_eq!(emitter.active_ids(), ids(&[0, 1, 2, 5, 9]));
}

#[test]
fn equal_or_lower_counts_create_nothing() {
    let mut emitter = ready_emitter(config());

    assert!(emitter.set_count(-1).is_empty());
    assert_eq!(emitter.set_count(3).len(), 1);
    assert!(emitter.set_count(3).is_empty());
    assert!(emitter.set_count(1).is_empty());
    assert_eq!(emitter.count(), 1);

    // The lowered count is the new baseline.
    assert_eq!(emitter.set_count(2), ids(&[2]));
    assert_eq!(emitter.created(), 2);
}

#[test]
fn red_pink_scenario() {
    let colors = vec![Color::parse("red").unwrap(), Color::parse("pink").unwrap()];
    let mut emitter = Emitter::new(config().with_colors(colors.clone())).unwrap();
    assert_eq!(emitter.count(), -1);
    assert!(emitter.is_empty());

    assert_eq!(emitter.set_count(0), ids(&[0]));
    assert_eq!(emitter.set_count(1), ids(&[1]));
    assert_eq!(emitter.active_ids(), ids(&[0, 1]));

    for descriptor in emitter.descriptors() {
        assert!(colors.contains(&descriptor.color));
    }
}

#[test]
fn nothing_renders_before_container_layout() {
    let mut emitter = Emitter::new(config()).unwrap();
    emitter.set_count(0);
    emitter.tick(1.0);

    assert!(!emitter.is_ready());
    assert!(emitter.frames().is_empty());
    assert!(emitter.shape(ShapeId(0)).is_none());
    // Not mounted, so its timeline has not started.
    assert_eq!(emitter.len(), 1);

    emitter.on_layout(300.0);
    let shape = emitter.shape(ShapeId(0)).expect("mounted after layout");
    assert_eq!(shape.progress(), 0.0);
    assert_eq!(shape.height(), 300.0);
    assert_eq!(emitter.frames().len(), 1);
}

#[test]
fn zero_height_container_suppresses_rendering() {
    let mut emitter = Emitter::new(config()).unwrap();
    emitter.on_layout(0.0);
    emitter.set_count(0);

    assert!(!emitter.is_ready());
    assert!(emitter.frames().is_empty());
}

#[test]
fn shapes_stay_transparent_until_measured() {
    let mut emitter = ready_emitter(config());
    let id = emitter.set_count(0)[0];
    emitter.tick(0.1);

    let frame = emitter.frames()[0];
    assert_eq!(frame.opacity, 0.0);
    assert!(frame.transform.is_none());

    assert!(emitter.on_shape_layout(id, 30.0));
    assert!(!emitter.on_shape_layout(id, 30.0));
    assert!(emitter.frames()[0].transform.is_some());
}

#[test]
fn shape_layout_for_unknown_id_is_ignored() {
    let mut emitter = ready_emitter(config());
    assert!(!emitter.on_shape_layout(ShapeId(7), 30.0));
}

#[test]
fn completed_shape_is_removed_oldest_first() {
    let mut emitter = ready_emitter(config());
    emitter.set_count(0);
    emitter.tick(0.5);
    emitter.set_count(1);

    assert!(emitter.tick(1.25).is_empty());
    assert_eq!(emitter.tick(0.25), ids(&[0]));
    assert_eq!(emitter.active_ids(), ids(&[1]));

    assert_eq!(emitter.tick(0.5), ids(&[1]));
    assert!(emitter.is_empty());
    assert_eq!(emitter.completed(), 2);
}

#[test]
fn same_tick_completions_are_reported_in_creation_order() {
    let mut emitter = ready_emitter(config());
    emitter.set_count(3);
    emitter.set_count(4);
    emitter.set_count(8);

    let mut removed = Vec::new();
    while !emitter.is_empty() {
        removed.extend(emitter.tick(FRAME));
    }
    assert_eq!(removed, ids(&[3, 4, 8]));
}

#[test]
fn unmeasured_shapes_are_still_removed() {
    let mut emitter = ready_emitter(config());
    emitter.set_count(0);
    assert_eq!(emitter.tick(2.0), ids(&[0]));
    assert!(emitter.is_empty());
}

#[test]
fn running_shapes_keep_their_start_height_after_relayout() {
    let mut emitter = ready_emitter(config());
    emitter.set_count(0);
    emitter.on_layout(500.0);
    emitter.set_count(1);

    assert_eq!(emitter.shape(ShapeId(0)).unwrap().height(), 300.0);
    assert_eq!(emitter.shape(ShapeId(1)).unwrap().height(), 500.0);
}

#[test]
fn single_policy_drops_extra_increments() {
    let mut emitter = ready_emitter(config());
    assert_eq!(emitter.set_count(5), ids(&[5]));
    assert_eq!(emitter.len(), 1);
}

#[test]
fn per_increment_policy_creates_one_per_step() {
    let mut emitter = ready_emitter(config().with_spawn_policy(SpawnPolicy::PerIncrement));
    assert_eq!(emitter.set_count(3), ids(&[0, 1, 2, 3]));
    assert_eq!(emitter.set_count(4), ids(&[4]));
}

#[test]
fn per_increment_policy_caps_large_jumps() {
    let mut emitter = ready_emitter(config().with_spawn_policy(SpawnPolicy::PerIncrement));
    let created = emitter.set_count(1_000_000);

    assert_eq!(created.len() as i64, MAX_BURST);
    assert_eq!(created.last(), Some(&ShapeId(1_000_000)));
    assert_eq!(created.first(), Some(&ShapeId(1_000_000 - MAX_BURST + 1)));
}

#[test]
fn spawn_continues_the_count() {
    let mut emitter = ready_emitter(config());
    emitter.set_count(4);

    assert_eq!(emitter.spawn(), Some(ShapeId(5)));
    assert_eq!(emitter.count(), 5);
    assert!(emitter.set_count(5).is_empty());
    assert_eq!(emitter.set_count(6), ids(&[6]));
}

#[test]
fn spawn_with_overrides_color_and_range() {
    let mut emitter = ready_emitter(config());
    let gold = Color::parse("gold").unwrap();
    let id = emitter
        .spawn_with(SpawnOptions {
            color: Some(gold),
            right_range: Some((10.0, 10.0)),
        })
        .unwrap();

    let descriptor = emitter.descriptors().find(|d| d.id == id).unwrap();
    assert_eq!(descriptor.color, gold);
    assert_eq!(descriptor.right, 10.0);

    // Inverted ranges fall back to the configured one.
    let id = emitter
        .spawn_with(SpawnOptions {
            color: None,
            right_range: Some((20.0, 5.0)),
        })
        .unwrap();
    let descriptor = emitter.descriptors().find(|d| d.id == id).unwrap();
    assert!((50.0..150.0).contains(&descriptor.right));

    // So do ranges too wide to sample.
    let id = emitter
        .spawn_with(SpawnOptions {
            color: None,
            right_range: Some((-1e308, 1e308)),
        })
        .unwrap();
    let descriptor = emitter.descriptors().find(|d| d.id == id).unwrap();
    assert!((50.0..150.0).contains(&descriptor.right));
}

#[test]
fn spawn_stops_at_the_largest_count() {
    let mut emitter = ready_emitter(config());
    assert_eq!(emitter.set_count(i64::MAX), ids(&[i64::MAX]));

    assert_eq!(emitter.spawn(), None);
    assert_eq!(emitter.count(), i64::MAX);
    assert_eq!(emitter.active_ids(), ids(&[i64::MAX]));
}

#[test]
fn per_increment_policy_handles_the_smallest_counts() {
    let mut emitter = ready_emitter(config().with_spawn_policy(SpawnPolicy::PerIncrement));
    assert!(emitter.set_count(i64::MIN).is_empty());
    assert_eq!(emitter.set_count(i64::MIN + 1), ids(&[i64::MIN + 1]));
    assert_eq!(emitter.set_count(i64::MIN + 3), ids(&[i64::MIN + 2, i64::MIN + 3]));
}

#[test]
fn offsets_stay_inside_the_configured_range() {
    let mut emitter = ready_emitter(config().with_offset_range(20.0, 40.0));
    for count in 0..200 {
        emitter.set_count(count);
    }
    assert!(emitter
        .descriptors()
        .all(|d| d.right >= 20.0 && d.right < 40.0));
}

#[test]
fn seeded_emitters_are_reproducible() {
    let mut a = ready_emitter(config());
    let mut b = ready_emitter(config());
    for count in 0..10 {
        a.set_count(count);
        b.set_count(count);
    }

    let left: Vec<_> = a.descriptors().copied().collect();
    let right: Vec<_> = b.descriptors().copied().collect();
    assert_eq!(left, right);
}

#[test]
fn default_content_is_a_heart_in_the_assigned_color() {
    let mut emitter = ready_emitter(config());
    emitter.set_count(0);

    let item = emitter.render_items().next().unwrap();
    assert_eq!(
        *item.content,
        HeartShape::new(item.color).with_size(config().heart_size)
    );
}

#[test]
fn custom_factory_replaces_the_heart() {
    let factory = |id: ShapeId, color: &Color| format!("star-{}-{}", id, color);
    let mut emitter = Emitter::with_factory(config(), factory).unwrap();
    emitter.on_layout(200.0);
    emitter.set_count(0);

    let item = emitter.render_items().next().unwrap();
    assert_eq!(*item.content, format!("star-0-{}", item.color));
}

#[test]
fn clear_drops_shapes_without_completing_them() {
    let mut emitter = ready_emitter(config());
    emitter.set_count(0);
    emitter.set_count(1);
    emitter.tick(1.0);

    emitter.clear();
    assert!(emitter.is_empty());
    assert!(emitter.tick(5.0).is_empty());
    assert_eq!(emitter.completed(), 0);
}
