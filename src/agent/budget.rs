use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stop condition for a continuing learner.
///
/// The loop ends after `max_steps` transitions, or earlier once the
/// optional cancel flag is observed set. The flag is checked once per
/// step.
#[derive(Debug, Clone)]
pub struct TrainingBudget {
    max_steps: u64,
    cancel: Option<Arc<AtomicBool>>,
}

impl TrainingBudget {
    pub fn steps(max_steps: u64) -> Self {
        TrainingBudget { max_steps, cancel: None }
    }

    /// Also stop when `flag` becomes true
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    pub fn exhausted(&self, steps_taken: u64) -> bool {
        steps_taken >= self.max_steps
    }
}
