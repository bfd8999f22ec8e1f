pub mod aggregate;
pub mod engine;
pub mod generator;
pub mod health;
pub mod history;
pub mod process;
pub mod remediation;
pub mod snapshot;

/// Population tuning for the simulation. Defaults mirror the classic demo
/// parameters: seed 6 processes, spawn up to 12, never reap below 3.
#[derive(Debug, Clone, Copy)]
pub struct SimTuning {
    pub seed_processes: usize,
    pub max_processes: usize,
    pub min_processes: usize,
    pub spawn_probability: f64,
    pub reap_probability: f64,
}

impl Default for SimTuning {
    fn default() -> Self {
        SimTuning {
            seed_processes: 6,
            max_processes: 12,
            min_processes: 3,
            spawn_probability: 0.10,
            reap_probability: 0.05,
        }
    }
}
