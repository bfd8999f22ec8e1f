use rand::Rng;

use super::process::{Priority, ProcessStatus, SimProcess};

/// Display names a freshly spawned process draws from.
pub const PROCESS_NAMES: [&str; 12] = [
    "Chrome Browser",
    "Visual Studio Code",
    "Database Server",
    "Web Server",
    "Python Script",
    "Java Application",
    "Node.js Server",
    "Docker Container",
    "Excel Spreadsheet",
    "Video Encoder",
    "File Indexer",
    "System Monitor",
];

const FIRST_PID: u64 = 1000;

/// Spawn ranges for a fresh process: modest usage so load builds up from
/// the random walk rather than from birth.
const SPAWN_CPU_RANGE: std::ops::Range<f64> = 3.0..15.0;
const SPAWN_MEM_RANGE: std::ops::Range<f64> = 3.0..13.0;

/// Creates synthetic processes with monotonically assigned pids. Pids are
/// never reused within a run; the caller owns insertion into the collection.
#[derive(Debug)]
pub struct ProcessGenerator {
    next_pid: u64,
}

impl Default for ProcessGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessGenerator {
    pub fn new() -> Self {
        ProcessGenerator {
            next_pid: FIRST_PID,
        }
    }

    pub fn create<R: Rng>(&mut self, rng: &mut R) -> SimProcess {
        let pid = self.next_pid;
        self.next_pid += 1;

        SimProcess {
            pid,
            name: PROCESS_NAMES[rng.gen_range(0..PROCESS_NAMES.len())],
            cpu_percent: rng.gen_range(SPAWN_CPU_RANGE),
            memory_percent: rng.gen_range(SPAWN_MEM_RANGE),
            priority: Priority::ALL[rng.gen_range(0..Priority::ALL.len())],
            status: ProcessStatus::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn pids_are_monotonic_and_unique() {
        let mut generator = ProcessGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);

        let pids: Vec<u64> = (0..50).map(|_| generator.create(&mut rng).pid).collect();
        assert_eq!(pids[0], 1000);
        for window in pids.windows(2) {
            assert!(window[1] > window[0]);
        }
    }

    #[test]
    fn spawned_values_fall_in_spawn_ranges() {
        let mut generator = ProcessGenerator::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let p = generator.create(&mut rng);
            assert!(p.cpu_percent >= 3.0 && p.cpu_percent < 15.0);
            assert!(p.memory_percent >= 3.0 && p.memory_percent < 13.0);
            assert!(PROCESS_NAMES.contains(&p.name));
            assert_eq!(p.status, ProcessStatus::Running);
        }
    }
}
