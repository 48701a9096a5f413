//! Unit tests for bgx-core.

use crate::{ActorRng, Dice, Facing, NodeId, SequenceDice, StateTag, TargetId, Vec2};

// ── IDs ───────────────────────────────────────────────────────────────────────

mod id_tests {
    use super::*;

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(StateTag::default(), StateTag::INVALID);
    }

    #[test]
    fn index_round_trip() {
        let id = NodeId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(NodeId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn try_from_overflow_fails() {
        assert!(StateTag::try_from(usize::from(u16::MAX) + 1).is_err());
    }

    #[test]
    fn display_includes_type_name() {
        assert_eq!(NodeId(3).to_string(), "NodeId(3)");
    }
}

// ── Vec2 / Facing ─────────────────────────────────────────────────────────────

mod vec2_tests {
    use super::*;

    #[test]
    fn distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_sq(b), 25.0);
    }

    #[test]
    fn facing_sign_and_dir() {
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Left.dir(), Vec2::new(-1.0, 0.0));
        assert_eq!(Facing::Left.flipped(), Facing::Right);
    }

    #[test]
    fn mirror_flips_x_only() {
        let offset = Vec2::new(2.0, 1.5);
        assert_eq!(offset.mirrored(Facing::Right), offset);
        assert_eq!(offset.mirrored(Facing::Left), Vec2::new(-2.0, 1.5));
    }
}

// ── Dice ──────────────────────────────────────────────────────────────────────

mod dice_tests {
    use super::*;

    #[test]
    fn actor_rng_is_deterministic_per_seed() {
        let mut a = ActorRng::new(42, TargetId(7));
        let mut b = ActorRng::new(42, TargetId(7));
        for _ in 0..32 {
            assert_eq!(a.roll_index(10), b.roll_index(10));
        }
    }

    #[test]
    fn actor_rng_differs_across_actors() {
        let mut a = ActorRng::new(42, TargetId(0));
        let mut b = ActorRng::new(42, TargetId(1));
        let draws_a: Vec<usize> = (0..16).map(|_| a.roll_index(1000)).collect();
        let draws_b: Vec<usize> = (0..16).map(|_| b.roll_index(1000)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn roll_index_stays_in_range() {
        let mut rng = ActorRng::from_seed(1);
        for _ in 0..256 {
            assert!(rng.roll_index(3) < 3);
        }
    }

    #[test]
    fn roll_percent_stays_in_range() {
        let mut rng = ActorRng::from_seed(2);
        for _ in 0..256 {
            let p = rng.roll_percent();
            assert!((0.0..100.0).contains(&p));
        }
    }

    #[test]
    fn sequence_dice_cycles() {
        let mut dice = SequenceDice::indices(vec![1, 0]);
        assert_eq!(dice.roll_index(2), 1);
        assert_eq!(dice.roll_index(2), 0);
        assert_eq!(dice.roll_index(2), 1);
    }

    #[test]
    fn sequence_dice_clamps_out_of_range_script() {
        let mut dice = SequenceDice::indices(vec![9]);
        assert_eq!(dice.roll_index(2), 1);
    }

    #[test]
    fn sequence_dice_empty_defaults() {
        let mut dice = SequenceDice::default();
        assert_eq!(dice.roll_index(4), 0);
        assert_eq!(dice.roll_percent(), 0.0);
    }
}
