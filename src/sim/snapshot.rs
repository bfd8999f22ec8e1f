use super::aggregate::Breakdown;
use super::health::HealthTier;
use super::process::SimProcess;
use super::remediation::Advisory;

/// Everything the renderer needs from one recompute pass. Recomputed fresh
/// after every mutating operation; never persisted.
#[derive(Debug, Default)]
pub struct SimSnapshot {
    pub processes: Vec<SimProcess>,
    pub aggregate_cpu: f64,
    pub aggregate_memory: f64,
    pub system_load: f64,
    pub cpu_breakdown: Breakdown,
    pub mem_breakdown: Breakdown,
    pub tier: HealthTier,
    pub overloaded: bool,
    pub overload_intensity: f64,
    pub thermal_temp: f64,
    pub uptime_seconds: Option<u64>,
    pub advisory: Option<Advisory>,
}

impl SimSnapshot {
    /// Top `n` processes by CPU, descending. Feeds the breakdown chart and
    /// the suggestion lines.
    pub fn top_by_cpu(&self, n: usize) -> Vec<&SimProcess> {
        let mut sorted: Vec<&SimProcess> = self.processes.iter().collect();
        sorted.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted.truncate(n);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::process::{Priority, ProcessStatus};

    fn proc(pid: u64, cpu: f64) -> SimProcess {
        SimProcess {
            pid,
            name: "stub",
            cpu_percent: cpu,
            memory_percent: 10.0,
            priority: Priority::Medium,
            status: ProcessStatus::Running,
        }
    }

    #[test]
    fn top_by_cpu_orders_descending_and_truncates() {
        let snapshot = SimSnapshot {
            processes: vec![proc(1, 30.0), proc(2, 90.0), proc(3, 50.0), proc(4, 10.0)],
            ..Default::default()
        };
        let top = snapshot.top_by_cpu(3);
        let pids: Vec<u64> = top.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn top_by_cpu_on_empty_snapshot_is_empty() {
        let snapshot = SimSnapshot::default();
        assert!(snapshot.top_by_cpu(5).is_empty());
    }
}
