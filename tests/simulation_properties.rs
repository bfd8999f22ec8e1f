use proptest::prelude::*;
use simtop::sim::SimTuning;
use simtop::sim::aggregate::{AggregationPolicy, aggregate};
use simtop::sim::engine::Engine;
use simtop::sim::process::{CPU_MAX, CPU_MIN, MEM_MAX, MEM_MIN};

fn seeded_engine(seed: u64) -> Engine {
    Engine::with_seed(seed, SimTuning::default(), AggregationPolicy::Sum, false)
}

proptest! {
    #[test]
    fn random_walk_never_escapes_process_bounds(seed in 0u64..500, ticks in 1usize..80) {
        let mut engine = seeded_engine(seed);
        engine.start();
        for _ in 0..ticks {
            engine.tick();
        }
        for p in engine.processes() {
            prop_assert!((CPU_MIN..=CPU_MAX).contains(&p.cpu_percent));
            prop_assert!((MEM_MIN..=MEM_MAX).contains(&p.memory_percent));
        }
    }

    #[test]
    fn population_stays_within_tuning_bounds(seed in 0u64..500, ticks in 1usize..120) {
        let mut engine = seeded_engine(seed);
        engine.start();
        for _ in 0..ticks {
            engine.tick();
            let len = engine.processes().len();
            prop_assert!((3..=12).contains(&len), "population {len}");
        }
    }

    #[test]
    fn aggregates_stay_in_percent_range(seed in 0u64..500, ticks in 0usize..40) {
        let mut engine = seeded_engine(seed);
        engine.start();
        for _ in 0..ticks {
            engine.tick();
        }
        for policy in [
            AggregationPolicy::Sum,
            AggregationPolicy::Average,
            AggregationPolicy::Max,
        ] {
            let (cpu, mem) = aggregate(engine.processes(), policy);
            prop_assert!((0.0..=100.0).contains(&cpu));
            prop_assert!((0.0..=100.0).contains(&mem));
        }
    }

    #[test]
    fn snapshot_figures_are_internally_consistent(seed in 0u64..500) {
        let mut engine = seeded_engine(seed);
        engine.trigger_overload_burst();
        for _ in 0..10 {
            engine.tick();
        }

        let snapshot = engine.refresh();
        prop_assert!((0.0..=100.0).contains(&snapshot.system_load));
        prop_assert_eq!(
            snapshot.system_load,
            snapshot.aggregate_cpu.max(snapshot.aggregate_memory)
        );
        prop_assert!((45.0..=95.0).contains(&snapshot.thermal_temp));
        prop_assert_eq!(snapshot.advisory.is_some(), snapshot.overloaded);
    }
}
