//! # Tabular Learners
//!
//! Two value-learning algorithms over a discretized state lattice and
//! action grid:
//!
//! - **QLearning**: episodic, on-policy Q-learning with replacing
//!   eligibility traces, a discount factor, and epsilon decayed once per
//!   epoch
//! - **RLearning**: continuing, average-reward R-learning with a running
//!   estimate `rho` of the long-run reward, run under a step budget
//!
//! Both share an [`ActionValueTable`] that owns the lattice, the action
//! grid, the `num_states x num_actions` value table and a learner-local
//! random number generator.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use latticerl::agent::Learner;
//! use latticerl::builders::QLearningBuilder;
//! use latticerl::environment::CartPole;
//!
//! let mut env = CartPole::new();
//! let mut learner = QLearningBuilder::new()
//!     .state_grid(&[5, 5, 5, 5])
//!     .action_grid(3)
//!     .epochs(200)
//!     .alpha(0.1)
//!     .gamma(0.9)
//!     .lambda(0.9)
//!     .epsilon(0.1)
//!     .seed(7)
//!     .build(&env)
//!     .unwrap();
//!
//! let report = learner.learn(&mut env).unwrap();
//! let rollout = learner.follow_policy(&mut env, Some(1000)).unwrap();
//! ```

pub mod budget;
pub mod qlearning;
pub mod rlearning;
pub mod table;
pub mod traits;

pub use budget::TrainingBudget;
pub use qlearning::{QLearning, QLearningParams};
pub use rlearning::{RLearning, RLearningParams, RUpdate};
pub use table::ActionValueTable;
pub use traits::Learner;

use crate::builders::{QLearningBuilder, RLearningBuilder};
use crate::config::{AppConfig, LearnerName};
use crate::environment::Environment;
use crate::error::{Result, LatticeError};
use crate::metrics::TrainingReport;

/// The closed set of learners, selected by `learning.learner`
#[derive(Debug, Clone)]
pub enum LearnerKind {
    QLearning(QLearning),
    RLearning(RLearning),
}

impl LearnerKind {
    /// Build the configured learner for `env`, failing before any
    /// learning if a required parameter is absent or unusable
    pub fn from_config<E: Environment + ?Sized>(config: &AppConfig, env: &E) -> Result<Self> {
        match config.learning.learner {
            LearnerName::QLearning => Ok(LearnerKind::QLearning(
                QLearningBuilder::from_config(config).build(env)?,
            )),
            LearnerName::RLearning => Ok(LearnerKind::RLearning(
                RLearningBuilder::from_config(config).build(env)?,
            )),
        }
    }

    /// Resolve a learner name as written in configuration files
    pub fn parse_name(name: &str) -> Result<LearnerName> {
        match name.trim() {
            "qlearning" => Ok(LearnerName::QLearning),
            "rlearning" => Ok(LearnerName::RLearning),
            other => Err(LatticeError::UnknownLearner(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LearnerKind::QLearning(_) => "qlearning",
            LearnerKind::RLearning(_) => "rlearning",
        }
    }
}

impl Learner for LearnerKind {
    fn table(&self) -> &ActionValueTable {
        match self {
            LearnerKind::QLearning(learner) => learner.table(),
            LearnerKind::RLearning(learner) => learner.table(),
        }
    }

    fn table_mut(&mut self) -> &mut ActionValueTable {
        match self {
            LearnerKind::QLearning(learner) => learner.table_mut(),
            LearnerKind::RLearning(learner) => learner.table_mut(),
        }
    }

    fn learn<E: Environment + ?Sized>(&mut self, env: &mut E) -> Result<TrainingReport> {
        match self {
            LearnerKind::QLearning(learner) => learner.learn(env),
            LearnerKind::RLearning(learner) => learner.learn(env),
        }
    }

    fn exploration_rate(&self) -> f64 {
        match self {
            LearnerKind::QLearning(learner) => learner.exploration_rate(),
            LearnerKind::RLearning(learner) => learner.exploration_rate(),
        }
    }
}
