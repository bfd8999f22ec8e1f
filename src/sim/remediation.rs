use std::time::{Duration, Instant};

use super::health::CRITICAL_LOAD;

/// Minimum elapsed time between consecutive automatic kills.
pub const AUTO_KILL_THROTTLE: Duration = Duration::from_millis(3000);

/// Baseline response time quoted by the advisory when the system is healthy.
pub const NORMAL_RESPONSE_MS: f64 = 50.0;

/// Informational figures shown while the system is overloaded; nothing else
/// consumes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advisory {
    pub backlog_tasks: usize,
    pub response_time_ms: f64,
}

pub fn advisory(process_count: usize, overload_intensity: f64) -> Advisory {
    Advisory {
        backlog_tasks: process_count * 3 / 2,
        response_time_ms: 100.0 + overload_intensity * 5.0,
    }
}

/// Throttled kill switch for critical overloads. Not a scheduler: it
/// piggybacks on the engine's recompute pass and fires at most once per
/// throttle window no matter how far past the threshold the load is.
#[derive(Debug)]
pub struct AutoKill {
    enabled: bool,
    last_kill: Option<Instant>,
}

impl AutoKill {
    pub fn new(enabled: bool) -> Self {
        AutoKill {
            enabled,
            last_kill: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Toggling has no effect on already-elapsed throttle state.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether a kill may fire for the given load right now.
    pub fn ready(&self, system_load: f64) -> bool {
        self.enabled
            && system_load > CRITICAL_LOAD
            && self
                .last_kill
                .is_none_or(|at| at.elapsed() > AUTO_KILL_THROTTLE)
    }

    /// Records that a kill actually happened, opening a new throttle window.
    pub fn mark_fired(&mut self) {
        self.last_kill = Some(Instant::now());
    }

    #[cfg(test)]
    pub(crate) fn set_last_kill(&mut self, at: Instant) {
        self.last_kill = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_figures() {
        let a = advisory(10, 80.0);
        assert_eq!(a.backlog_tasks, 15);
        assert_eq!(a.response_time_ms, 500.0);

        let calm = advisory(3, 0.0);
        assert_eq!(calm.backlog_tasks, 4);
        assert_eq!(calm.response_time_ms, 100.0);
    }

    #[test]
    fn ready_requires_critical_load_and_enabled() {
        let throttle = AutoKill::new(true);
        assert!(throttle.ready(95.0));
        assert!(!throttle.ready(90.0));
        assert!(!throttle.ready(50.0));

        let disabled = AutoKill::new(false);
        assert!(!disabled.ready(95.0));
    }

    #[test]
    fn throttle_window_blocks_back_to_back_kills() {
        let mut throttle = AutoKill::new(true);
        throttle.mark_fired();
        assert!(!throttle.ready(95.0));

        throttle.set_last_kill(Instant::now() - Duration::from_millis(3100));
        assert!(throttle.ready(95.0));
    }

    #[test]
    fn toggling_preserves_throttle_state() {
        let mut throttle = AutoKill::new(true);
        throttle.set_last_kill(Instant::now() - Duration::from_millis(3100));

        throttle.set_enabled(false);
        assert!(!throttle.ready(95.0));
        throttle.set_enabled(true);
        assert!(throttle.ready(95.0));
    }
}
