//! Unit tests for bgx-sensor.

use bgx_core::{Facing, TargetId, Vec2};

use crate::{LayerMask, Sensor, SensorConfig, SensorError, StaticWorld, World};

// ── Helpers ───────────────────────────────────────────────────────────────────

const PLAYERS: LayerMask = LayerMask(0b01);
const PROPS:   LayerMask = LayerMask(0b10);

fn world_with(bodies: &[(u32, f32, f32, LayerMask)]) -> StaticWorld {
    let mut world = StaticWorld::new(0.5);
    for &(id, x, y, layers) in bodies {
        world.insert(TargetId(id), Vec2::new(x, y), layers);
    }
    world
}

fn sensor() -> Sensor {
    Sensor::new(SensorConfig {
        sight_distance:      10.0,
        sight_y_offset:      0.0,
        hearing_radius:      3.0,
        hearing_offset:      Vec2::new(1.0, 0.0),
        max_target_distance: 20.0,
        sight_mask:          PLAYERS,
        hearing_mask:        PLAYERS,
    })
    .unwrap()
}

// ── LayerMask ─────────────────────────────────────────────────────────────────

mod mask_tests {
    use super::*;

    #[test]
    fn intersection() {
        assert!(PLAYERS.intersects(LayerMask::ALL));
        assert!(!PLAYERS.intersects(PROPS));
        assert!(!LayerMask::NONE.intersects(LayerMask::ALL));
        assert!(PLAYERS.union(PROPS).intersects(PROPS));
    }

    #[test]
    fn single_bit() {
        assert_eq!(LayerMask::single(3), LayerMask(0b1000));
    }
}

// ── StaticWorld ───────────────────────────────────────────────────────────────

mod world_tests {
    use super::*;

    #[test]
    fn position_lookup_is_weak() {
        let mut world = world_with(&[(1, 5.0, 0.0, PLAYERS)]);
        assert_eq!(world.position_of(TargetId(1)), Some(Vec2::new(5.0, 0.0)));
        world.remove(TargetId(1));
        assert_eq!(world.position_of(TargetId(1)), None);
    }

    #[test]
    fn move_to_updates_queries() {
        let mut world = world_with(&[(1, 5.0, 0.0, PLAYERS)]);
        world.move_to(TargetId(1), Vec2::new(50.0, 0.0));
        assert_eq!(world.position_of(TargetId(1)), Some(Vec2::new(50.0, 0.0)));
        assert!(
            world
                .raycast(Vec2::ZERO, Facing::Right.dir(), 10.0, PLAYERS)
                .is_none()
        );
    }

    #[test]
    fn raycast_hits_nearest_on_ray() {
        let world = world_with(&[(1, 8.0, 0.0, PLAYERS), (2, 4.0, 0.0, PLAYERS)]);
        let hit = world.raycast(Vec2::ZERO, Facing::Right.dir(), 10.0, PLAYERS);
        assert_eq!(hit, Some(TargetId(2)));
    }

    #[test]
    fn raycast_respects_direction_and_range() {
        let world = world_with(&[(1, -4.0, 0.0, PLAYERS), (2, 15.0, 0.0, PLAYERS)]);
        // Behind the ray and beyond its reach.
        assert_eq!(world.raycast(Vec2::ZERO, Facing::Right.dir(), 10.0, PLAYERS), None);
        // Flipping the facing finds the first body.
        assert_eq!(
            world.raycast(Vec2::ZERO, Facing::Left.dir(), 10.0, PLAYERS),
            Some(TargetId(1))
        );
    }

    #[test]
    fn raycast_misses_off_axis_bodies() {
        let world = world_with(&[(1, 5.0, 3.0, PLAYERS)]);
        assert_eq!(world.raycast(Vec2::ZERO, Facing::Right.dir(), 10.0, PLAYERS), None);
    }

    #[test]
    fn raycast_filters_by_mask() {
        let world = world_with(&[(1, 5.0, 0.0, PROPS)]);
        assert_eq!(world.raycast(Vec2::ZERO, Facing::Right.dir(), 10.0, PLAYERS), None);
        assert_eq!(
            world.raycast(Vec2::ZERO, Facing::Right.dir(), 10.0, PROPS),
            Some(TargetId(1))
        );
    }

    #[test]
    fn query_radius_orders_by_distance_then_id() {
        let world = world_with(&[
            (3, 2.0, 0.0, PLAYERS),
            (1, 0.0, 2.0, PLAYERS), // same distance as 3
            (2, 1.0, 0.0, PLAYERS),
        ]);
        let hits = world.query_radius(Vec2::ZERO, 5.0, PLAYERS);
        assert_eq!(hits, vec![TargetId(2), TargetId(1), TargetId(3)]);
    }

    #[test]
    fn query_radius_excludes_far_bodies() {
        let world = world_with(&[(1, 10.0, 0.0, PLAYERS)]);
        assert!(world.query_radius(Vec2::ZERO, 3.0, PLAYERS).is_empty());
    }
}

// ── Sensor ────────────────────────────────────────────────────────────────────

mod sensor_tests {
    use super::*;

    #[test]
    fn rejects_bad_config() {
        let err = Sensor::new(SensorConfig {
            sight_distance: -1.0,
            ..SensorConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, SensorError::Config(_)));
    }

    #[test]
    fn acquires_by_sight() {
        let world = world_with(&[(1, 6.0, 0.0, PLAYERS)]);
        let mut sensor = sensor();
        assert!(sensor.check(Vec2::ZERO, Facing::Right, &world));
        assert_eq!(sensor.target(), Some(TargetId(1)));
    }

    #[test]
    fn sight_respects_facing() {
        let world = world_with(&[(1, 6.0, 0.0, PLAYERS)]);
        let mut sensor = sensor();
        assert!(!sensor.check(Vec2::ZERO, Facing::Left, &world));
        assert_eq!(sensor.target(), None);
    }

    #[test]
    fn acquires_by_hearing_with_mirrored_offset() {
        // Body off the sight ray's axis, just outside the hearing circle for
        // a right-facing actor (ear at x=+1) but inside it when facing left
        // (ear at x=-1).
        let world = world_with(&[(1, -2.0, 2.0, PLAYERS)]);
        let mut sensor = sensor();
        assert!(!sensor.check(Vec2::ZERO, Facing::Right, &world));
        assert!(sensor.check(Vec2::ZERO, Facing::Left, &world));
        assert_eq!(sensor.target(), Some(TargetId(1)));
    }

    #[test]
    fn forget_rule_drops_far_target_without_reacquiring() {
        let mut world = world_with(&[(1, 6.0, 0.0, PLAYERS)]);
        let mut sensor = sensor();
        assert!(sensor.check(Vec2::ZERO, Facing::Right, &world));

        // Target walks beyond max_target_distance; same check drops it and
        // does not re-acquire in the same call.
        world.move_to(TargetId(1), Vec2::new(30.0, 0.0));
        assert!(!sensor.check(Vec2::ZERO, Facing::Right, &world));
        assert_eq!(sensor.target(), None);

        // It walks back in front; the next check re-acquires.
        world.move_to(TargetId(1), Vec2::new(6.0, 0.0));
        assert!(sensor.check(Vec2::ZERO, Facing::Right, &world));
    }

    #[test]
    fn despawned_target_is_dropped() {
        let mut world = world_with(&[(1, 6.0, 0.0, PLAYERS)]);
        let mut sensor = sensor();
        assert!(sensor.check(Vec2::ZERO, Facing::Right, &world));
        world.remove(TargetId(1));
        assert!(!sensor.check(Vec2::ZERO, Facing::Right, &world));
    }

    #[test]
    fn acquired_target_sticks_while_in_range() {
        let world = world_with(&[(1, 6.0, 0.0, PLAYERS), (2, 3.0, 0.0, PLAYERS)]);
        let mut sensor = sensor();
        // Nearest-on-ray acquisition first…
        assert!(sensor.check(Vec2::ZERO, Facing::Right, &world));
        assert_eq!(sensor.target(), Some(TargetId(2)));
        // …and the held target does not churn on later checks.
        assert!(sensor.check(Vec2::ZERO, Facing::Right, &world));
        assert_eq!(sensor.target(), Some(TargetId(2)));
    }
}
