use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::SimTuning;
use super::aggregate::{AggregationPolicy, breakdowns};
use super::generator::ProcessGenerator;
use super::health::classify;
use super::process::SimProcess;
use super::remediation::{AutoKill, advisory};
use super::snapshot::SimSnapshot;

/// Per-tick random walk step sizes.
const CPU_DELTA: f64 = 5.0;
const MEM_DELTA: f64 = 4.0;

/// Overload burst parameters: 8 hot processes forced into high usage.
const BURST_PROCESSES: usize = 8;
const BURST_CPU_RANGE: std::ops::Range<f64> = 50.0..90.0;
const BURST_MEM_RANGE: std::ops::Range<f64> = 50.0..85.0;

/// The simulation core: owns the synthetic process collection and every
/// mutation of it. All randomness flows through the single seedable rng so
/// tests can pin behavior with `with_seed`.
///
/// The engine does not own a timer. The event loop delivers ticks at a
/// fixed cadence and `tick` ignores them while the running flag is clear,
/// which gives stop its cooperative, eventual semantics.
pub struct Engine {
    processes: Vec<SimProcess>,
    generator: ProcessGenerator,
    rng: StdRng,
    tuning: SimTuning,
    running: bool,
    started_at: Option<Instant>,
    overloaded: bool,
    overload_intensity: f64,
    policy: AggregationPolicy,
    auto_kill: AutoKill,
}

impl Engine {
    pub fn new(tuning: SimTuning, policy: AggregationPolicy, auto_kill_enabled: bool) -> Self {
        Self::from_rng(StdRng::from_entropy(), tuning, policy, auto_kill_enabled)
    }

    pub fn with_seed(
        seed: u64,
        tuning: SimTuning,
        policy: AggregationPolicy,
        auto_kill_enabled: bool,
    ) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), tuning, policy, auto_kill_enabled)
    }

    fn from_rng(
        rng: StdRng,
        tuning: SimTuning,
        policy: AggregationPolicy,
        auto_kill_enabled: bool,
    ) -> Self {
        Engine {
            processes: Vec::new(),
            generator: ProcessGenerator::new(),
            rng,
            tuning,
            running: false,
            started_at: None,
            overloaded: false,
            overload_intensity: 0.0,
            policy,
            auto_kill: AutoKill::new(auto_kill_enabled),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn processes(&self) -> &[SimProcess] {
        &self.processes
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: AggregationPolicy) {
        self.policy = policy;
    }

    pub fn auto_kill_enabled(&self) -> bool {
        self.auto_kill.enabled()
    }

    pub fn set_auto_kill_enabled(&mut self, enabled: bool) {
        self.auto_kill.set_enabled(enabled);
    }

    /// Starts the simulation: records the uptime origin and seeds the
    /// collection if it is empty. No-op while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.started_at = Some(Instant::now());

        if self.processes.is_empty() {
            for _ in 0..self.tuning.seed_processes {
                let p = self.generator.create(&mut self.rng);
                self.processes.push(p);
            }
        }
    }

    /// Clears the running flag. The tick already in flight observes the
    /// flag and mutates nothing; there is no forced interruption.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// One simulation step: perturb every process, then stochastically grow
    /// or shrink the population within its bounds.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        for i in 0..self.processes.len() {
            let cpu_delta = self.rng.gen_range(-CPU_DELTA..CPU_DELTA);
            let mem_delta = self.rng.gen_range(-MEM_DELTA..MEM_DELTA);
            self.processes[i].apply_delta(cpu_delta, mem_delta);
        }

        if self.rng.gen_bool(self.tuning.spawn_probability)
            && self.processes.len() < self.tuning.max_processes
        {
            let p = self.generator.create(&mut self.rng);
            self.processes.push(p);
        }

        if self.rng.gen_bool(self.tuning.reap_probability)
            && self.processes.len() > self.tuning.min_processes
        {
            let victim = self.rng.gen_range(0..self.processes.len());
            self.processes.remove(victim);
        }
    }

    pub fn add_process(&mut self) {
        let p = self.generator.create(&mut self.rng);
        self.processes.push(p);
    }

    /// Removes the process with the given pid. Unknown pids are a silent
    /// no-op; the return value only feeds the status line.
    pub fn kill_process(&mut self, pid: u64) -> bool {
        let before = self.processes.len();
        self.processes.retain(|p| p.pid != pid);
        self.processes.len() != before
    }

    /// Removes the highest-CPU process (first encountered wins ties).
    /// Returns the killed pid, or None when the collection is empty.
    pub fn kill_top_process(&mut self) -> Option<u64> {
        let pid = self.top_pid()?;
        self.kill_process(pid);
        Some(pid)
    }

    fn top_pid(&self) -> Option<u64> {
        let mut best: Option<(u64, f64)> = None;
        for p in &self.processes {
            if best.is_none_or(|(_, cpu)| p.cpu_percent > cpu) {
                best = Some((p.pid, p.cpu_percent));
            }
        }
        best.map(|(pid, _)| pid)
    }

    /// Marks the system maximally overloaded and floods it with hot
    /// processes. Starts the engine first if it is stopped.
    pub fn trigger_overload_burst(&mut self) {
        if !self.running {
            self.start();
        }
        self.overloaded = true;
        self.overload_intensity = 100.0;

        for _ in 0..BURST_PROCESSES {
            let mut p = self.generator.create(&mut self.rng);
            p.cpu_percent = self.rng.gen_range(BURST_CPU_RANGE);
            p.memory_percent = self.rng.gen_range(BURST_MEM_RANGE);
            self.processes.push(p);
        }
    }

    /// Empties the collection and resets overload state and the uptime
    /// origin. Does not touch the running flag.
    pub fn clear_all(&mut self) {
        self.processes.clear();
        self.overloaded = false;
        self.overload_intensity = 0.0;
        self.started_at = None;
    }

    /// Scales back every >60% consumer and demotes its priority. Refused
    /// while the system is overloaded; the caller surfaces the refusal.
    pub fn optimize_resources(&mut self) -> bool {
        if self.overloaded {
            return false;
        }
        for p in &mut self.processes {
            if p.cpu_percent > 60.0 {
                p.cpu_percent *= 0.7;
                p.priority = super::process::Priority::Low;
            }
            if p.memory_percent > 60.0 {
                p.memory_percent *= 0.7;
            }
        }
        true
    }

    /// The recompute pass: aggregate, classify, derive advisory figures and
    /// possibly fire the throttled auto-kill. When a kill fires, every
    /// figure is re-derived once from the reduced collection.
    pub fn refresh(&mut self) -> SimSnapshot {
        let (mut cpu_breakdown, mut mem_breakdown) = breakdowns(&self.processes);
        let mut cpu = self.policy.apply(cpu_breakdown);
        let mut mem = self.policy.apply(mem_breakdown);
        let mut load = cpu.max(mem);
        let mut report = classify(load);

        if self.auto_kill.ready(load) && self.kill_top_process().is_some() {
            self.auto_kill.mark_fired();
            (cpu_breakdown, mem_breakdown) = breakdowns(&self.processes);
            cpu = self.policy.apply(cpu_breakdown);
            mem = self.policy.apply(mem_breakdown);
            load = cpu.max(mem);
            report = classify(load);
        }

        self.overloaded = report.overloaded;
        self.overload_intensity = report.overload_intensity;

        let advisory = report
            .overloaded
            .then(|| advisory(self.processes.len(), report.overload_intensity));

        SimSnapshot {
            processes: self.processes.clone(),
            aggregate_cpu: cpu,
            aggregate_memory: mem,
            system_load: load,
            cpu_breakdown,
            mem_breakdown,
            tier: report.tier,
            overloaded: report.overloaded,
            overload_intensity: report.overload_intensity,
            thermal_temp: report.thermal_temp,
            uptime_seconds: self.started_at.map(|t| t.elapsed().as_secs()),
            advisory,
        }
    }
}
