/// Per-process clamp bounds. CPU and memory never leave these ranges no
/// matter which direction the random walk pushes them.
pub const CPU_MIN: f64 = 1.0;
pub const CPU_MAX: f64 = 95.0;
pub const MEM_MIN: f64 = 1.0;
pub const MEM_MAX: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// A simulated process only ever runs; removal is modeled by dropping it
/// from the collection, not by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
}

impl ProcessStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProcessStatus::Running => "Running",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimProcess {
    pub pid: u64,
    pub name: &'static str,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub priority: Priority,
    pub status: ProcessStatus,
}

impl SimProcess {
    /// Applies one tick's random walk step, clamping to the process bounds.
    pub fn apply_delta(&mut self, cpu_delta: f64, mem_delta: f64) {
        self.cpu_percent = (self.cpu_percent + cpu_delta).clamp(CPU_MIN, CPU_MAX);
        self.memory_percent = (self.memory_percent + mem_delta).clamp(MEM_MIN, MEM_MAX);
    }
}
