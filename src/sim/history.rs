use std::collections::VecDeque;

/// Rolling chart window: the most recent 15 samples are kept.
pub const WINDOW: usize = 15;

/// System-wide CPU/memory time series feeding the sparklines. Values are
/// rounded to whole percent since that is all the charts can show.
#[derive(Debug)]
pub struct LoadHistory {
    cpu: VecDeque<u64>,
    memory: VecDeque<u64>,
    capacity: usize,
}

impl LoadHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            cpu: VecDeque::with_capacity(capacity),
            memory: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, cpu_percent: f64, memory_percent: f64) {
        if self.cpu.len() == self.capacity {
            self.cpu.pop_front();
        }
        if self.memory.len() == self.capacity {
            self.memory.pop_front();
        }
        self.cpu.push_back(cpu_percent.round() as u64);
        self.memory.push_back(memory_percent.round() as u64);
    }

    pub fn cpu(&self) -> &VecDeque<u64> {
        &self.cpu
    }

    pub fn memory(&self) -> &VecDeque<u64> {
        &self.memory
    }
}

impl Default for LoadHistory {
    fn default() -> Self {
        Self::new(WINDOW)
    }
}
