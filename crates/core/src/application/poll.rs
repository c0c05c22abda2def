// Poll policy for waiting on remote tasks
use crate::domain::TaskId;
use crate::port::TimeProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Poll decision result
#[derive(Debug, PartialEq, Eq)]
pub enum PollDecision {
    /// Poll again after this many ms
    Wait(i64),
    /// Wait budget exhausted
    GiveUp { waited_ms: i64 },
}

/// Poll timing settings
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    pub initial_interval_ms: i64,
    pub backoff_factor: f64,
    pub max_interval_ms: i64,
    /// `None` waits forever
    pub max_wait_ms: Option<i64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 2_000,
            backoff_factor: 1.5,
            max_interval_ms: 30_000,
            max_wait_ms: Some(3_600_000),
        }
    }
}

/// Poll policy
///
/// Determines how long to wait before the next status check:
/// - Exponential growth from the initial interval, capped at the max interval
/// - Deterministic jitter per task
/// - Give up once the wait budget is spent
pub struct PollPolicy {
    config: PollConfig,
    time_provider: Arc<dyn TimeProvider>,
}

impl PollPolicy {
    pub fn new(config: PollConfig, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            config,
            time_provider,
        }
    }

    pub fn now_millis(&self) -> i64 {
        self.time_provider.now_millis()
    }

    /// Delay before poll number `attempt` (0-based)
    ///
    /// delay = min(initial * factor ^ attempt, max) * (1.0 ± 0.1)
    pub fn delay_ms(&self, task_id: &TaskId, attempt: i32) -> i64 {
        let grown = self.config.initial_interval_ms as f64 * self.config.backoff_factor.powi(attempt);
        let capped = grown.min(self.config.max_interval_ms as f64);

        // Task id as seed keeps jitter stable per task
        let jitter_seed = task_id.as_str().chars().map(|c| c as u32).sum::<u32>();
        let jitter_factor = 0.9 + ((jitter_seed % 21) as f64 / 100.0); // 0.9 to 1.1

        (capped * jitter_factor) as i64
    }

    /// Decide whether to keep polling a task created at `started_at`
    pub fn decide(&self, task_id: &TaskId, attempt: i32, started_at: i64) -> PollDecision {
        let waited_ms = self.time_provider.now_millis() - started_at;

        if let Some(max_wait_ms) = self.config.max_wait_ms {
            if waited_ms >= max_wait_ms {
                warn!(
                    task_id = %task_id,
                    waited_ms = %waited_ms,
                    max_wait_ms = %max_wait_ms,
                    "Task wait budget exhausted"
                );
                return PollDecision::GiveUp { waited_ms };
            }
        }

        let delay_ms = self.delay_ms(task_id, attempt);
        debug!(
            task_id = %task_id,
            attempt = %attempt,
            delay_ms = %delay_ms,
            "Scheduling next status check"
        );
        PollDecision::Wait(delay_ms)
    }
}
