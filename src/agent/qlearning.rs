use ndarray::{Array2, Zip};
use tracing::info;

use crate::agent::table::ActionValueTable;
use crate::agent::traits::Learner;
use crate::environment::Environment;
use crate::error::{Result, LatticeError};
use crate::metrics::{EpisodeHistory, Termination, TrainingReport};
use crate::types::{Action, State};

/// Geometric decay applied to epsilon once per epoch
pub const EPSILON_DECAY: f64 = 0.95;

/// Hyperparameters for [`QLearning`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearningParams {
    pub max_epochs: usize,
    /// Step size
    pub alpha: f64,
    /// Discount factor
    pub gamma: f64,
    /// Trace decay
    pub lambda: f64,
    /// Initial exploration rate
    pub epsilon: f64,
    /// Optional cap on the length of one episode
    pub max_episode_steps: Option<usize>,
}

impl QLearningParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(LatticeError::invalid_parameter(
                "alpha",
                format!("must be positive, got {}", self.alpha),
            ));
        }
        for (name, value) in [("gamma", self.gamma), ("lambda", self.lambda), ("epsilon", self.epsilon)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LatticeError::invalid_parameter(
                    name,
                    format!("must lie in [0, 1], got {}", value),
                ));
            }
        }
        Ok(())
    }
}

/// Episodic Q-learning with replacing eligibility traces.
///
/// Each step the TD error of the visited state-action is spread across
/// the whole table in proportion to the trace, then every trace decays by
/// `gamma * lambda`. The visited cell's trace is set to 1 when the action
/// was chosen greedily and cleared to 0 after an exploratory action.
#[derive(Debug, Clone)]
pub struct QLearning {
    table: ActionValueTable,
    trace: Array2<f64>,
    params: QLearningParams,
    epsilon: f64,
}

impl QLearning {
    pub fn new(table: ActionValueTable, params: QLearningParams) -> Result<Self> {
        params.validate()?;
        let trace = Array2::zeros(table.q().raw_dim());
        Ok(QLearning {
            table,
            trace,
            params,
            epsilon: params.epsilon,
        })
    }

    pub fn params(&self) -> &QLearningParams {
        &self.params
    }

    /// Eligibility trace, same shape as the value table
    pub fn trace(&self) -> &Array2<f64> {
        &self.trace
    }

    /// Apply one TD(lambda) update for the transition
    /// `(state, action) -> (reward, next)`, returning the TD error.
    ///
    /// The full table is swept every step; cells with a zero trace are
    /// left unchanged by the sweep.
    pub fn update(&mut self, state: &State, action: &Action, reward: f64, next: &State) -> Result<f64> {
        let row = self.table.row_index(state)?;
        let current = self.table.value(state, action.id)?;
        let best_next = self.table.argmax(next)?.value;

        let delta = reward + self.params.gamma * best_next - current;

        self.trace[[row, action.id]] = if action.is_greedy_choice { 1.0 } else { 0.0 };

        let step = self.params.alpha * delta;
        let decay = self.params.gamma * self.params.lambda;
        Zip::from(self.table.q_mut())
            .and(&mut self.trace)
            .for_each(|q, e| {
                *q += step * *e;
                *e *= decay;
            });

        Ok(delta)
    }

    /// Run a single episode from the environment's start state, returning
    /// its length, accumulated reward and how it ended
    pub fn run_episode<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<(usize, f64, Termination)> {
        env.reset();
        let mut state = self.table.discretize(env.start_state())?;
        let mut steps = 0;
        let mut total_reward = 0.0;

        let termination = loop {
            if env.at_goal_state(&state) {
                break Termination::Goal;
            }
            if env.at_fail_state(&state) {
                break Termination::Fail;
            }
            if self.params.max_episode_steps.is_some_and(|cap| steps >= cap) {
                break Termination::StepLimit;
            }

            let choice = self.table.epsilon_greedy(&state, self.epsilon)?;
            let action = self.table.action(choice.action_id)?.selected(choice.was_greedy);

            let (next, reward) = env.apply_action(&state, &action)?;
            let next = self.table.discretize(next)?;

            self.update(&state, &action, reward, &next)?;

            state = next;
            steps += 1;
            total_reward += reward;
        };

        Ok((steps, total_reward, termination))
    }

    /// Run `max_epochs` episodes, decaying epsilon after each one
    pub fn learn_episodes<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<EpisodeHistory> {
        let mut history = EpisodeHistory::with_capacity(self.params.max_epochs);

        for epoch in 1..=self.params.max_epochs {
            let epsilon = self.epsilon;
            let (steps, reward, termination) = self.run_episode(env)?;
            self.epsilon *= EPSILON_DECAY;

            info!(epoch, steps, epsilon, "Epoch: {} -- survived for {} steps", epoch, steps);
            history.record(steps, epsilon, reward, termination);
        }

        Ok(history)
    }
}

impl Learner for QLearning {
    fn table(&self) -> &ActionValueTable {
        &self.table
    }

    fn table_mut(&mut self) -> &mut ActionValueTable {
        &mut self.table
    }

    fn learn<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<TrainingReport> {
        Ok(TrainingReport::Episodic(self.learn_episodes(env)?))
    }

    fn exploration_rate(&self) -> f64 {
        self.epsilon
    }
}
