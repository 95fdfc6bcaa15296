use tracing::info;

use crate::agent::budget::TrainingBudget;
use crate::agent::table::ActionValueTable;
use crate::agent::traits::Learner;
use crate::environment::Environment;
use crate::error::{Result, LatticeError};
use crate::metrics::{ContinuingSummary, TrainingReport};
use crate::types::{Action, State};

/// Epsilon decays by this factor every `EPSILON_DECAY_INTERVAL` steps
pub const EPSILON_DECAY: f64 = 0.95;
pub const EPSILON_DECAY_INTERVAL: u64 = 100;
/// Tolerance for treating the updated action as the greedy one
pub const GREEDY_TOLERANCE: f64 = 1e-8;

const PROGRESS_INTERVAL: u64 = 10_000;

/// Hyperparameters for [`RLearning`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RLearningParams {
    /// Value step size
    pub alpha: f64,
    /// Average-reward step size
    pub beta: f64,
    /// Initial exploration rate
    pub epsilon: f64,
}

impl RLearningParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LatticeError::invalid_parameter(
                    name,
                    format!("must be positive, got {}", value),
                ));
            }
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(LatticeError::invalid_parameter(
                "epsilon",
                format!("must lie in [0, 1], got {}", self.epsilon),
            ));
        }
        Ok(())
    }
}

/// Result of a single R-learning update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RUpdate {
    pub delta: f64,
    /// Whether the average-reward estimate moved
    pub rho_updated: bool,
}

/// Average-reward R-learning for continuing tasks.
///
/// There is no discount, no trace and no episode structure: the learner
/// runs one control loop from the start state until its budget is spent.
/// `rho` only moves when, after the update, the taken action's value
/// sits within [`GREEDY_TOLERANCE`] of the next state's best value.
#[derive(Debug, Clone)]
pub struct RLearning {
    table: ActionValueTable,
    params: RLearningParams,
    budget: TrainingBudget,
    rho: f64,
    epsilon: f64,
    total_steps: u64,
}

impl RLearning {
    pub fn new(table: ActionValueTable, params: RLearningParams, budget: TrainingBudget) -> Result<Self> {
        params.validate()?;
        Ok(RLearning {
            table,
            params,
            budget,
            rho: 0.0,
            epsilon: params.epsilon,
            total_steps: 0,
        })
    }

    pub fn params(&self) -> &RLearningParams {
        &self.params
    }

    /// Running average-reward estimate
    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn budget(&self) -> &TrainingBudget {
        &self.budget
    }

    /// Transitions executed across all runs
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Apply one R-learning update for `(state, action) -> (reward, next)`
    pub fn update(&mut self, state: &State, action: &Action, reward: f64, next: &State) -> Result<RUpdate> {
        let row = self.table.row_index(state)?;
        let current = self.table.value(state, action.id)?;
        let best_next = self.table.argmax(next)?.value;

        let delta = reward - self.rho + best_next - current;

        let q = self.table.q_mut();
        q[[row, action.id]] += self.params.alpha * delta;

        let rho_updated = (q[[row, action.id]] - best_next).abs() < GREEDY_TOLERANCE;
        if rho_updated {
            self.rho += self.params.beta * delta;
        }

        Ok(RUpdate { delta, rho_updated })
    }

    /// Select, apply and learn from one transition out of `state`,
    /// returning the discretized next state, the reward and the update
    pub fn step<E: Environment + ?Sized>(&mut self, env: &mut E, state: &State) -> Result<(State, f64, RUpdate)> {
        let choice = self.table.epsilon_greedy(state, self.epsilon)?;
        let action = self.table.action(choice.action_id)?.selected(choice.was_greedy);

        let (next, reward) = env.apply_action(state, &action)?;
        let next = self.table.discretize(next)?;

        let update = self.update(state, &action, reward, &next)?;

        self.total_steps += 1;
        if self.total_steps % EPSILON_DECAY_INTERVAL == 0 {
            self.epsilon *= EPSILON_DECAY;
        }

        Ok((next, reward, update))
    }

    /// Run the control loop until the budget is spent or cancelled
    pub fn learn_with_budget<E: Environment + ?Sized>(
        &mut self,
        env: &mut E,
        budget: &TrainingBudget,
    ) -> Result<ContinuingSummary> {
        let mut state = self.table.discretize(env.start_state())?;
        let mut summary = ContinuingSummary::default();

        while !budget.exhausted(summary.steps) {
            if budget.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let (next, reward, update) = self.step(env, &state)?;
            summary.steps += 1;
            summary.total_reward += reward;
            if update.rho_updated {
                summary.rho_updates += 1;
            }

            if summary.steps % PROGRESS_INTERVAL == 0 {
                info!(
                    steps = summary.steps,
                    rho = self.rho,
                    epsilon = self.epsilon,
                    "R-learning progress"
                );
            }

            state = next;
        }

        summary.rho = self.rho;
        summary.epsilon = self.epsilon;
        info!(
            steps = summary.steps,
            rho = summary.rho,
            cancelled = summary.cancelled,
            "R-learning finished"
        );
        Ok(summary)
    }
}

impl Learner for RLearning {
    fn table(&self) -> &ActionValueTable {
        &self.table
    }

    fn table_mut(&mut self) -> &mut ActionValueTable {
        &mut self.table
    }

    fn learn<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<TrainingReport> {
        let budget = self.budget.clone();
        Ok(TrainingReport::Continuing(self.learn_with_budget(env, &budget)?))
    }

    fn exploration_rate(&self) -> f64 {
        self.epsilon
    }
}
