//! Unit tests for bl-inflow.

use std::io::Cursor;

use bl_core::{SimRng, Tick};

use crate::{
    load_demand_reader, DemandProfile, InflowError, InflowGenerator, InflowPolicy, InflowQueue,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn fixed(counts: &[u32]) -> InflowGenerator {
    InflowGenerator::new(InflowPolicy::Fixed, DemandProfile::new(counts.to_vec()))
}

fn stochastic(counts: &[u32]) -> InflowGenerator {
    InflowGenerator::new(InflowPolicy::Stochastic, DemandProfile::new(counts.to_vec()))
}

// ── Fixed policy ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod fixed_policy {
    use super::*;

    #[test]
    fn counts_match_demand_exactly() {
        let demand = [50, 100, 150, 200, 300, 600];
        let q = fixed(&demand).generate(7_200, &mut SimRng::new(1)).unwrap();
        assert_eq!(q.len(), 1_400);
        let counts = q.counts_per_interval(1_200, demand.len());
        assert_eq!(counts, demand.map(|d| d as u64).to_vec());
    }

    #[test]
    fn evenly_spaced_from_interval_start() {
        let q = fixed(&[2, 4]).generate(8, &mut SimRng::new(1)).unwrap();
        let ticks: Vec<u64> = q.ticks().iter().map(|t| t.0).collect();
        assert_eq!(ticks, vec![0, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn draws_nothing_from_rng() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        fixed(&[2, 4]).generate(8, &mut a).unwrap();
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn steps_not_divisible_by_interval_count() {
        let err = fixed(&[1, 1, 1]).generate(10, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, InflowError::UnevenIntervals { ticks: 10, intervals: 3 }));
    }

    #[test]
    fn interval_not_divisible_by_demand() {
        // The base scenario profile does not fit the fixed policy: 600 % 350 != 0.
        let err = InflowGenerator::new(InflowPolicy::Fixed, DemandProfile::default())
            .generate(7_200, &mut SimRng::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            InflowError::UnevenDemand { interval: 5, demand: 350, interval_ticks: 600 }
        ));
    }

    #[test]
    fn zero_demand_rejected() {
        let err = fixed(&[10, 0]).generate(20, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, InflowError::ZeroDemand { interval: 1 }));
    }

    #[test]
    fn empty_profile_rejected() {
        let err = fixed(&[]).generate(20, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, InflowError::EmptyProfile));
    }
}

// ── Stochastic policy ─────────────────────────────────────────────────────────

#[cfg(test)]
mod stochastic_policy {
    use super::*;

    #[test]
    fn same_seed_same_steps() {
        let g = InflowGenerator::default();
        let a = g.generate(7_200, &mut SimRng::new(4)).unwrap();
        let b = g.generate(7_200, &mut SimRng::new(4)).unwrap();
        assert_eq!(a.ticks(), b.ticks());
        let c = g.generate(7_200, &mut SimRng::new(5)).unwrap();
        assert_ne!(a.ticks(), c.ticks());
    }

    #[test]
    fn steps_stay_inside_run() {
        let q = stochastic(&[3, 3, 3]).generate(10, &mut SimRng::new(2)).unwrap();
        // 10 / 3 → 3 steps per interval; step 9 is never drawn.
        assert!(q.ticks().iter().all(|t| t.0 < 9));
    }

    #[test]
    fn demand_above_interval_admits_every_step() {
        let q = stochastic(&[20]).generate(10, &mut SimRng::new(2)).unwrap();
        assert_eq!(q.len(), 10);
    }

    #[test]
    fn zero_demand_admits_nobody() {
        let q = stochastic(&[0, 0]).generate(100, &mut SimRng::new(2)).unwrap();
        assert!(q.is_empty());
    }

    #[test]
    fn mean_count_converges_to_demand() {
        let demand = DemandProfile::default();
        let g = InflowGenerator::new(InflowPolicy::Stochastic, demand.clone());
        let seeds = 200u64;
        let mut sums = vec![0u64; demand.len()];
        for seed in 0..seeds {
            let q = g.generate(7_200, &mut SimRng::new(seed)).unwrap();
            for (s, c) in sums.iter_mut().zip(q.counts_per_interval(600, demand.len())) {
                *s += c;
            }
        }
        for (i, (&sum, &target)) in sums.iter().zip(demand.counts()).enumerate() {
            let mean = sum as f64 / seeds as f64;
            let tol = 0.05 * target as f64;
            assert!(
                (mean - target as f64).abs() < tol,
                "interval {i}: mean {mean:.2} vs demand {target}"
            );
        }
    }
}

// ── InflowQueue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use super::*;

    #[test]
    fn take_due_walks_in_order() {
        let mut q = InflowQueue::from_ticks(vec![Tick(5), Tick(1), Tick(3), Tick(3)]);
        assert_eq!(q.len(), 3);
        assert!(!q.take_due(Tick(0)));
        assert!(q.take_due(Tick(1)));
        assert!(!q.take_due(Tick(1)));
        assert!(!q.take_due(Tick(2)));
        assert!(q.take_due(Tick(3)));
        assert_eq!(q.next_tick(), Some(Tick(5)));
        assert_eq!(q.remaining(), 1);
        assert!(q.take_due(Tick(5)));
        assert_eq!(q.next_tick(), None);
    }

    #[test]
    fn skipped_steps_are_dropped() {
        let mut q = InflowQueue::from_ticks(vec![Tick(1), Tick(2), Tick(4)]);
        assert!(q.take_due(Tick(4)));
        assert_eq!(q.remaining(), 0);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;

    #[test]
    fn loads_rows_in_any_order() {
        let csv = "interval,demand\n1, 100\n0,50\n2,150\n";
        let p = load_demand_reader(Cursor::new(csv)).unwrap();
        assert_eq!(p.counts(), &[50, 100, 150]);
        assert_eq!(p.total(), 300);
    }

    #[test]
    fn gap_in_intervals_rejected() {
        let csv = "interval,demand\n0,50\n2,150\n";
        assert!(matches!(
            load_demand_reader(Cursor::new(csv)),
            Err(InflowError::Parse(_))
        ));
    }

    #[test]
    fn repeated_interval_rejected() {
        let csv = "interval,demand\n0,50\n0,60\n1,70\n";
        assert!(load_demand_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn negative_demand_rejected() {
        let csv = "interval,demand\n0,-5\n";
        assert!(matches!(
            load_demand_reader(Cursor::new(csv)),
            Err(InflowError::Parse(_))
        ));
    }

    #[test]
    fn empty_file_rejected() {
        let csv = "interval,demand\n";
        assert!(matches!(
            load_demand_reader(Cursor::new(csv)),
            Err(InflowError::EmptyProfile)
        ));
    }
}
