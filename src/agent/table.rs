use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::discretizer::Discretizer;
use crate::environment::Environment;
use crate::error::{Result, LatticeError};
use crate::geometry::range_grid;
use crate::types::{Action, Choice, State};

/// Discretized state and action spaces together with the action-value
/// table over them.
///
/// The lattice, action grid and table are built once from an
/// environment's ranges and never resized. Each table owns its own
/// random number generator, so two learners never share exploration
/// state or values.
#[derive(Clone, Debug)]
pub struct ActionValueTable {
    states: Discretizer,
    actions: Vec<Action>,
    q: Array2<f64>,
    rng: StdRng,
}

impl ActionValueTable {
    /// Build the spaces for `env` and a zeroed `num_states x num_actions`
    /// table. Without a seed the generator is seeded from entropy.
    pub fn new<E: Environment + ?Sized>(
        env: &E,
        state_grid: &[usize],
        action_grid: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        let states = Discretizer::from_features(&env.features(), state_grid)?;

        let actions: Vec<Action> = range_grid(&env.action_range(), action_grid)?
            .into_iter()
            .enumerate()
            .map(|(id, value)| Action::new(id, value))
            .collect();

        let q = Array2::zeros((states.len(), actions.len()));

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            num_states = states.len(),
            num_actions = actions.len(),
            "Built action-value table"
        );

        Ok(ActionValueTable { states, actions, q, rng })
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn num_actions(&self) -> usize {
        self.actions.len()
    }

    pub fn states(&self) -> &[State] {
        self.states.states()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action(&self, id: usize) -> Result<Action> {
        self.actions.get(id).copied().ok_or_else(|| {
            LatticeError::invalid_parameter(
                "action",
                format!("action {} must be less than {}", id, self.actions.len()),
            )
        })
    }

    pub fn q(&self) -> &Array2<f64> {
        &self.q
    }

    pub fn q_mut(&mut self) -> &mut Array2<f64> {
        &mut self.q
    }

    /// Bind a raw state to its nearest lattice id
    pub fn discretize(&self, state: State) -> Result<State> {
        self.states.discretize(state)
    }

    /// Table row for a discretized state
    pub fn row_index(&self, state: &State) -> Result<usize> {
        let id = state.id()?;
        if id >= self.num_states() {
            return Err(LatticeError::InvalidState {
                id,
                num_states: self.num_states(),
            });
        }
        Ok(id)
    }

    pub fn values(&self, state: &State) -> Result<ArrayView1<'_, f64>> {
        Ok(self.q.row(self.row_index(state)?))
    }

    pub fn value(&self, state: &State, action_id: usize) -> Result<f64> {
        let row = self.row_index(state)?;
        self.q.get((row, action_id)).copied().ok_or_else(|| {
            LatticeError::invalid_parameter(
                "action",
                format!("action {} must be less than {}", action_id, self.num_actions()),
            )
        })
    }

    /// Highest-valued action; ties go to the lowest action id
    pub fn argmax(&self, state: &State) -> Result<Choice> {
        let values = self.values(state)?;
        let mut action_id = 0;
        let mut value = values[0];
        for (i, &v) in values.iter().enumerate().skip(1) {
            if v > value {
                action_id = i;
                value = v;
            }
        }
        Ok(Choice { action_id, value, was_greedy: true })
    }

    /// Uniformly random action
    pub fn random_action(&mut self, state: &State) -> Result<Choice> {
        let row = self.row_index(state)?;
        let action_id = self.rng.gen_range(0..self.actions.len());
        Ok(Choice {
            action_id,
            value: self.q[[row, action_id]],
            was_greedy: false,
        })
    }

    /// Random with probability `epsilon`, greedy otherwise
    pub fn epsilon_greedy(&mut self, state: &State, epsilon: f64) -> Result<Choice> {
        if self.rng.gen::<f64>() < epsilon {
            self.random_action(state)
        } else {
            self.argmax(state)
        }
    }
}
