//! Unit tests for bl-agent.

use bl_core::{AgentId, AgentTag, ObstacleId, Position};

use crate::{AgentStore, Calibration, Kinematics};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn cyclist(store: &mut AgentStore, id: u32, x: f64) -> usize {
    let cal = Calibration::default();
    let params = cal.params(5.0, 1.0, true);
    let kin = Kinematics::moving(&params, Position::new(x, 1.0), 5.0);
    store.push(AgentTag::Cyclist(AgentId(id)), params, kin).unwrap()
}

#[cfg(test)]
mod calibration {
    use super::*;

    #[test]
    fn defaults_validate() {
        Calibration::default().validate().unwrap();
    }

    #[test]
    fn sample_is_deterministic_per_id() {
        let cal = Calibration::default();
        assert_eq!(cal.sample(4, AgentId(10)), cal.sample(4, AgentId(10)));
        assert_ne!(cal.sample(4, AgentId(10)).v0, cal.sample(4, AgentId(11)).v0);
    }

    #[test]
    fn sample_respects_ranges() {
        let cal = Calibration::default();
        for i in 0..500 {
            let p = cal.sample(99, AgentId(i));
            assert!((3.2..=7.2).contains(&p.v0), "v0 {}", p.v0);
            assert!((0.8..=1.2).contains(&p.p), "p {}", p.p);
            assert!(p.look_back, "lookback = 1.0 means everyone looks back");
        }
    }

    #[test]
    fn lookback_zero_disables_flag() {
        let cal = Calibration { lookback: 0.0, ..Calibration::default() };
        assert!((0..100).all(|i| !cal.sample(1, AgentId(i)).look_back));
    }

    #[test]
    fn speed_range_reaching_zero_rejected() {
        let cal = Calibration { v0_mean: 1.0, v0_sd: 0.6, ..Calibration::default() };
        assert!(cal.validate().is_err());
    }

    #[test]
    fn gamma_of_one_rejected() {
        let cal = Calibration { gamma: 1.0, ..Calibration::default() };
        assert!(cal.validate().is_err());
    }
}

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn geometry_grows_with_speed() {
        let p = Calibration::default().params(5.0, 1.0, true);
        assert!((p.sr_length(0.0) - 1.1).abs() < 1e-12);
        assert!((p.sr_length(5.0) - 5.1).abs() < 1e-12);
        assert!((p.sr_width(0.0) - 0.5).abs() < 1e-12);
        assert!((p.sr_width(5.0) - 0.8).abs() < 1e-12);
        assert!((p.cr_length(5.0) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn stopping_speed_matches_braking_distance() {
        let p = Calibration::default().params(5.0, 1.0, true);
        // v² / (2 b_max) = 6 m at 6 m/s.
        assert!((p.stopping_speed(6.0) - 6.0).abs() < 1e-12);
        assert_eq!(p.stopping_speed(0.0), 0.0);
        assert_eq!(p.stopping_speed(-0.5), 0.0);
        assert_eq!(p.stopping_speed(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn lateral_cap_depends_on_speed() {
        let p = Calibration::default().params(5.0, 1.0, true);
        assert!((p.lateral_speed_cap(0.0) - 0.1).abs() < 1e-12);
        assert!((p.lateral_speed_cap(1.0) - 0.2).abs() < 1e-12);
        assert!((p.lateral_speed_cap(5.0) - 0.3).abs() < 1e-12);
    }
}

#[cfg(test)]
mod kinematics {
    use super::*;

    #[test]
    fn advance_constant_acceleration() {
        let p = Calibration::default().params(5.0, 1.0, true);
        let mut k = Kinematics::moving(&p, Position::new(0.0, 1.0), 2.0);
        let applied = k.advance(&p, 1.0, 0.1, 0.5, 3.0);
        assert_eq!(applied, 1.0);
        assert!((k.pos.x - (1.0 + 0.125)).abs() < 1e-12);
        assert!((k.pos.y - 1.05).abs() < 1e-12);
        assert!((k.speed - 2.5).abs() < 1e-12);
        assert_eq!(k.lateral_speed, 0.1);
        assert_eq!(k.prev_lateral_speed, 0.0);
        assert!((k.geometry.cr_length - (4.0 + 4.0 * 2.5)).abs() < 1e-12);
    }

    #[test]
    fn braking_never_reverses() {
        let p = Calibration::default().params(5.0, 1.0, true);
        let mut k = Kinematics::moving(&p, Position::new(10.0, 1.0), 1.0);
        let applied = k.advance(&p, -3.0, 0.0, 0.5, 3.0);
        assert!((applied + 2.0).abs() < 1e-12, "clamped to -speed/dt");
        assert_eq!(k.speed, 0.0);
        assert!(k.pos.x >= 10.0);
    }

    #[test]
    fn entry_speed_leaves_room_to_stop() {
        let p = Calibration::default().params(5.0, 1.0, true);
        let open = Kinematics::entering(&p, Position::new(0.0, 1.0), f64::INFINITY);
        assert_eq!(open.speed, 5.0);
        assert!((open.geometry.cr_length - 24.0).abs() < 1e-12);

        // 1.5 m of room beyond the body length: sqrt(2 · 3 · 1.5) = 3 m/s.
        let behind = Kinematics::entering(&p, Position::new(0.0, 1.0), 3.5);
        assert!((behind.speed - 3.0).abs() < 1e-12);
        assert!((behind.geometry.sr_length - p.sr_length(3.0)).abs() < 1e-12);

        let overlapping = Kinematics::entering(&p, Position::new(0.0, 1.0), 1.2);
        assert_eq!(overlapping.speed, 0.0);
    }

    #[test]
    fn lateral_position_clamped_to_domain() {
        let p = Calibration::default().params(5.0, 1.0, true);
        let mut k = Kinematics::moving(&p, Position::new(0.0, 2.95), 5.0);
        k.advance(&p, 0.0, 0.3, 0.5, 3.0);
        assert_eq!(k.pos.y, 3.0);
    }
}

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn push_and_lookup() {
        let mut store = AgentStore::new();
        let a = cyclist(&mut store, 0, 5.0);
        let b = cyclist(&mut store, 1, 10.0);
        assert_eq!((a, b), (0, 1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.slot_of(AgentTag::Cyclist(AgentId(1))), Some(1));
        assert_eq!(store.get(1).pos().x, 10.0);
    }

    #[test]
    fn duplicate_tag_rejected() {
        let mut store = AgentStore::new();
        cyclist(&mut store, 0, 5.0);
        let cal = Calibration::default();
        let params = cal.params(5.0, 1.0, true);
        let kin = Kinematics::moving(&params, Position::new(0.0, 1.0), 5.0);
        assert!(store.push(AgentTag::Cyclist(AgentId(0)), params, kin).is_err());
    }

    #[test]
    fn remove_preserves_order() {
        let mut store = AgentStore::new();
        for i in 0..5 {
            cyclist(&mut store, i, i as f64);
        }
        let removed = store.remove(&[AgentTag::Cyclist(AgentId(1)), AgentTag::Cyclist(AgentId(3))]);
        assert_eq!(removed, 2);
        let ids: Vec<_> = store.iter().map(|a| a.tag).collect();
        assert_eq!(
            ids,
            [0, 2, 4].map(|i| AgentTag::Cyclist(AgentId(i)))
        );
        assert_eq!(store.slot_of(AgentTag::Cyclist(AgentId(4))), Some(2));
        assert!(!store.contains(AgentTag::Cyclist(AgentId(3))));
        assert_eq!(store.params.len(), 3);
        assert_eq!(store.kinematics.len(), 3);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut store = AgentStore::new();
        cyclist(&mut store, 0, 0.0);
        assert_eq!(store.remove(&[AgentTag::Cyclist(AgentId(9))]), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mobile_count_excludes_obstacles() {
        let mut store = AgentStore::new();
        cyclist(&mut store, 0, 0.0);
        let cal = Calibration::default();
        let params = cal.obstacle_params();
        let kin = Kinematics::stationary(&params, Position::new(250.0, 2.0));
        store.push(AgentTag::Obstacle(ObstacleId(0)), params, kin).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.mobile_count(), 1);
        assert_eq!(store.by_tag(AgentTag::Obstacle(ObstacleId(0))).unwrap().speed(), 0.0);
    }
}
