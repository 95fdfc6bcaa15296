//! Greedy execution of a learned (or partially learned) policy.

use serde::{Serialize, Deserialize};
use tracing::info;

use crate::agent::table::ActionValueTable;
use crate::environment::Environment;
use crate::error::Result;
use crate::metrics::Termination;

/// One executed action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RolloutStep {
    /// 1-based step number
    pub step: usize,
    pub action_id: usize,
    pub action_value: f64,
    pub reward: f64,
}

/// The trace of a greedy rollout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rollout {
    pub steps: Vec<RolloutStep>,
    pub outcome: Termination,
}

impl Rollout {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_reward(&self) -> f64 {
        self.steps.iter().map(|s| s.reward).sum()
    }
}

/// Reset `env` and follow the greedy policy of `table` from the start
/// state. Exploration is never applied. Every executed action is logged
/// and recorded.
pub fn follow_policy<E: Environment + ?Sized>(
    table: &ActionValueTable,
    env: &mut E,
    max_steps: Option<usize>,
) -> Result<Rollout> {
    env.reset();
    let mut state = table.discretize(env.start_state())?;
    let mut steps = Vec::new();

    let outcome = loop {
        if env.at_goal_state(&state) {
            break Termination::Goal;
        }
        if env.at_fail_state(&state) {
            break Termination::Fail;
        }
        if max_steps.is_some_and(|cap| steps.len() >= cap) {
            break Termination::StepLimit;
        }

        let choice = table.argmax(&state)?;
        let action = table.action(choice.action_id)?.selected(true);
        let step = steps.len() + 1;
        info!("step {}: executing action {}", step, action.value);

        let (next, reward) = env.apply_action(&state, &action)?;
        steps.push(RolloutStep {
            step,
            action_id: action.id,
            action_value: action.value,
            reward,
        });
        state = table.discretize(next)?;
    };

    Ok(Rollout { steps, outcome })
}
