use crate::agent::table::ActionValueTable;
use crate::environment::Environment;
use crate::error::Result;
use crate::metrics::TrainingReport;
use crate::rollout::{follow_policy, Rollout};
use crate::types::{Choice, State};

/// Trait for tabular learners built over an [`ActionValueTable`]
pub trait Learner {
    /// The learner's value table
    fn table(&self) -> &ActionValueTable;

    /// Mutable access to the value table
    fn table_mut(&mut self) -> &mut ActionValueTable;

    /// Update the value table from interaction with `env`
    fn learn<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<TrainingReport>;

    /// Current exploration rate
    fn exploration_rate(&self) -> f64;

    /// Map a raw state to its nearest lattice state
    fn discretize(&self, state: State) -> Result<State> {
        self.table().discretize(state)
    }

    /// Best action for a state, ties broken by lowest id
    fn argmax(&self, state: &State) -> Result<Choice> {
        self.table().argmax(state)
    }

    fn random_action(&mut self, state: &State) -> Result<Choice> {
        self.table_mut().random_action(state)
    }

    fn epsilon_greedy(&mut self, state: &State, epsilon: f64) -> Result<Choice> {
        self.table_mut().epsilon_greedy(state, epsilon)
    }

    /// Run the current policy greedily until the environment terminates
    /// or `max_steps` actions have been taken
    fn follow_policy<E: Environment + ?Sized>(
        &self,
        env: &mut E,
        max_steps: Option<usize>,
    ) -> Result<Rollout> {
        follow_policy(self.table(), env, max_steps)
    }
}
