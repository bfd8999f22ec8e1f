use super::process::SimProcess;

/// How per-process metrics reduce to one system-wide figure.
///
/// `Sum` models saturation: individual contributions may add past 100 and
/// are truncated at the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationPolicy {
    #[default]
    Sum,
    Average,
    Max,
}

impl AggregationPolicy {
    pub fn next(self) -> Self {
        match self {
            AggregationPolicy::Sum => AggregationPolicy::Average,
            AggregationPolicy::Average => AggregationPolicy::Max,
            AggregationPolicy::Max => AggregationPolicy::Sum,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AggregationPolicy::Sum => "Sum",
            AggregationPolicy::Average => "Avg",
            AggregationPolicy::Max => "Max",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "average" | "avg" | "mean" => AggregationPolicy::Average,
            "max" | "peak" => AggregationPolicy::Max,
            _ => AggregationPolicy::Sum,
        }
    }

    /// Picks this policy's figure out of a breakdown, clamped to [0,100]
    /// regardless of policy.
    pub fn apply(self, b: Breakdown) -> f64 {
        let value = match self {
            AggregationPolicy::Sum => b.sum,
            AggregationPolicy::Average => b.avg,
            AggregationPolicy::Max => b.max,
        };
        value.clamp(0.0, 100.0)
    }
}

/// Per-metric display figures, computed independent of the active policy.
/// `sum` is already capped at 100; `avg` is taken over the raw sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Breakdown {
    pub avg: f64,
    pub sum: f64,
    pub max: f64,
}

fn reduce(values: impl Iterator<Item = f64>) -> Breakdown {
    let mut count = 0usize;
    let mut raw_sum = 0.0;
    let mut max = 0.0f64;
    for v in values {
        count += 1;
        raw_sum += v;
        max = max.max(v);
    }
    let avg = if count > 0 {
        raw_sum / count as f64
    } else {
        0.0
    };
    Breakdown {
        avg,
        sum: raw_sum.min(100.0),
        max,
    }
}

/// Computes the CPU and memory breakdowns for the whole collection.
pub fn breakdowns(processes: &[SimProcess]) -> (Breakdown, Breakdown) {
    (
        reduce(processes.iter().map(|p| p.cpu_percent)),
        reduce(processes.iter().map(|p| p.memory_percent)),
    )
}

/// Reduces the collection to one (cpu, memory) pair under the given policy.
/// An empty collection degrades to (0, 0) for every policy.
pub fn aggregate(processes: &[SimProcess], policy: AggregationPolicy) -> (f64, f64) {
    let (cpu, mem) = breakdowns(processes);
    (policy.apply(cpu), policy.apply(mem))
}
