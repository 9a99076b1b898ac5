//! Unit tests for bl-spatial.

use bl_core::Position;

use crate::{SpatialError, SpatialIndex};

const PERIOD: f64 = 300.1;

fn index(points: &[(f64, f64)]) -> SpatialIndex {
    let mut idx = SpatialIndex::new(PERIOD).unwrap();
    idx.rebuild(points.iter().map(|&(x, y)| Position::new(x, y))).unwrap();
    idx
}

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn empty_index_returns_nothing() {
        let idx = SpatialIndex::new(PERIOD).unwrap();
        assert!(idx.is_empty());
        assert!(idx.neighbors(Position::new(10.0, 1.0), 50.0).unwrap().is_empty());
    }

    #[test]
    fn radius_is_inclusive_and_includes_self() {
        let idx = index(&[(10.0, 1.0), (13.0, 5.0), (20.0, 1.0)]);
        // (13, 5) is exactly 5 m away.
        let n = idx.neighbors(Position::new(10.0, 1.0), 5.0).unwrap();
        assert_eq!(n, vec![0, 1]);
    }

    #[test]
    fn lateral_distance_counts() {
        let idx = index(&[(50.0, 0.0), (50.0, 2.9)]);
        assert_eq!(idx.neighbors(Position::new(50.0, 0.0), 2.0).unwrap(), vec![0]);
        assert_eq!(idx.neighbors(Position::new(50.0, 0.0), 3.0).unwrap(), vec![0, 1]);
    }

    #[test]
    fn results_sorted_by_slot() {
        let idx = index(&[(30.0, 1.0), (10.0, 1.0), (20.0, 1.0), (25.0, 2.0)]);
        let n = idx.neighbors(Position::new(20.0, 1.0), 15.0).unwrap();
        assert_eq!(n, vec![0, 1, 2, 3]);
    }

    #[test]
    fn negative_radius_rejected() {
        let idx = index(&[(1.0, 1.0)]);
        assert!(matches!(
            idx.neighbors(Position::new(0.0, 0.0), -1.0),
            Err(SpatialError::InvalidRadius(_))
        ));
    }
}

#[cfg(test)]
mod periodic {
    use super::*;

    #[test]
    fn finds_agents_across_the_entrance() {
        let idx = index(&[(299.0, 1.0), (150.0, 1.0)]);
        // Wrapped distance from x = 1 to x = 299 on a 300.1 ring is 2.1.
        let n = idx.neighbors(Position::new(1.0, 1.0), 3.0).unwrap();
        assert_eq!(n, vec![0]);
    }

    #[test]
    fn finds_agents_across_the_far_end() {
        let idx = index(&[(0.5, 1.0)]);
        let n = idx.neighbors(Position::new(299.5, 1.0), 2.0).unwrap();
        assert_eq!(n, vec![0]);
    }

    #[test]
    fn wrap_does_not_duplicate() {
        let idx = index(&[(1.0, 1.0), (299.0, 1.0)]);
        let n = idx.neighbors(Position::new(0.0, 1.0), 200.0).unwrap();
        assert_eq!(n, vec![0, 1]);
    }
}

#[cfg(test)]
mod rebuild {
    use super::*;

    #[test]
    fn rebuild_replaces_contents() {
        let mut idx = index(&[(10.0, 1.0), (20.0, 1.0)]);
        assert_eq!(idx.len(), 2);
        idx.rebuild([Position::new(100.0, 1.0)]).unwrap();
        assert_eq!(idx.len(), 1);
        assert!(idx.neighbors(Position::new(10.0, 1.0), 5.0).unwrap().is_empty());
        assert_eq!(idx.neighbors(Position::new(100.0, 1.0), 0.0).unwrap(), vec![0]);
    }

    #[test]
    fn non_finite_position_keeps_previous_tree() {
        let mut idx = index(&[(10.0, 1.0)]);
        let err = idx
            .rebuild([Position::new(5.0, 1.0), Position::new(f64::NAN, 1.0)])
            .unwrap_err();
        assert!(matches!(err, SpatialError::NonFinitePosition { slot: 1, .. }));
        assert_eq!(idx.neighbors(Position::new(10.0, 1.0), 0.5).unwrap(), vec![0]);
    }

    #[test]
    fn bad_period_rejected() {
        assert!(SpatialIndex::new(0.0).is_err());
        assert!(SpatialIndex::new(f64::INFINITY).is_err());
    }
}
