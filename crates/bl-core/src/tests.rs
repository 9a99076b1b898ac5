//! Unit tests for bl-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, AgentKind, AgentTag, ObstacleId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn tag_kind() {
        assert_eq!(AgentTag::from(AgentId(3)).kind(), AgentKind::Mobile);
        assert_eq!(AgentTag::from(ObstacleId(0)).kind(), AgentKind::Static);
        assert!(AgentTag::Obstacle(ObstacleId(1)).is_static());
        assert_eq!(AgentTag::Cyclist(AgentId(9)).cyclist(), Some(AgentId(9)));
        assert_eq!(AgentTag::Obstacle(ObstacleId(9)).cyclist(), None);
    }

    #[test]
    fn display() {
        assert_eq!(AgentTag::Cyclist(AgentId(7)).to_string(), "7");
        assert_eq!(AgentTag::Obstacle(ObstacleId(2)).to_string(), "virtual_bn_2");
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn finite_check() {
        assert!(Position::new(10.0, 1.0).is_finite());
        assert!(!Position::new(f64::NAN, 1.0).is_finite());
        assert!(!Position::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn display_rounds_to_millimetres() {
        assert_eq!(Position::new(253.0, 1.25).to_string(), "(253.000, 1.250)");
    }
}

#[cfg(test)]
mod path {
    use crate::{Bottleneck, PathConfig};

    #[test]
    fn default_geometry() {
        let p = PathConfig::default();
        assert_eq!(p.lateral_width(), 3.0);
        assert!((p.gap_left_edge() - 2.8).abs() < 1e-12);
        assert!((p.gap_right_edge() - 0.2).abs() < 1e-12);
        p.validate().unwrap();
    }

    #[test]
    fn bottleneck_widths() {
        let mut p = PathConfig::default();
        assert_eq!(p.bottleneck().unwrap(), None);
        p.bottleneck_width = Some(0.0);
        assert_eq!(p.bottleneck().unwrap(), None);
        p.bottleneck_width = Some(1.5);
        assert_eq!(p.bottleneck().unwrap(), Some(Bottleneck::Width1_5));
        p.bottleneck_width = Some(1.2);
        assert!(p.bottleneck().is_err());
        assert!(p.validate().is_err());
    }

    #[test]
    fn obstacle_positions_shift_with_domain() {
        let pos = Bottleneck::Width2_0.obstacle_positions(3.0);
        assert_eq!(pos.len(), 2);
        assert_eq!(pos[0].x, 252.0);
        assert!((pos[0].y - 2.4).abs() < 1e-12);
        assert!((pos[1].y - 2.8).abs() < 1e-12);
        assert_eq!(Bottleneck::Width1_0.obstacle_positions(3.0).len(), 4);
    }

    #[test]
    fn side_obstacles_too_wide_rejected() {
        let p = PathConfig { width: 0.2, edge_margin: 0.0, side_obstacle: 0.2, ..PathConfig::default() };
        assert!(p.validate().is_err());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_order_and_display() {
        assert!(Tick(9) < Tick(10));
        assert_eq!(Tick::ZERO, Tick::default());
        assert_eq!(Tick(12).to_string(), "T12");
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.elapsed_secs(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 1.0);
    }

    #[test]
    fn total_ticks_default() {
        assert_eq!(SimConfig::default().total_ticks().unwrap(), 7_200);
    }

    #[test]
    fn non_integral_duration_rejected() {
        let cfg = SimConfig { seed: 1, step_secs: 0.7, duration_secs: 10.0 };
        assert!(cfg.total_ticks().is_err());
    }

    #[test]
    fn non_positive_step_rejected() {
        let cfg = SimConfig { seed: 1, step_secs: 0.0, duration_secs: 10.0 };
        assert!(cfg.total_ticks().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn truncated_normal_within_bounds() {
        let mut rng = AgentRng::new(7, AgentId(3));
        for _ in 0..2_000 {
            let v = rng.truncated_normal(5.2, 1.0, 2.0);
            assert!((3.2..=7.2).contains(&v), "got {v}");
        }
    }

    #[test]
    fn truncated_normal_zero_sd_is_mean() {
        let mut rng = AgentRng::new(7, AgentId(3));
        assert_eq!(rng.truncated_normal(5.2, 0.0, 2.0), 5.2);
    }

    #[test]
    fn sim_rng_child_is_deterministic() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        let x: u64 = a.child(1).random();
        let y: u64 = b.child(1).random();
        assert_eq!(x, y);
    }
}
