//! # Environments
//!
//! The capability contract learners consume, plus the two reference
//! control problems. Learners never look inside an environment: they
//! read its feature and action ranges once at construction, then drive
//! it through `reset`, `start_state` and `apply_action`, polling the
//! goal and fail predicates after every transition.

pub mod cart_pole;
pub mod mountain_car;

pub use cart_pole::CartPole;
pub use mountain_car::MountainCar;

use crate::error::{Result, LatticeError};
use crate::types::{Action, Range, State};

/// A continuous-state control problem
pub trait Environment {
    /// One range per state dimension
    fn features(&self) -> Vec<Range>;

    /// Bounds of the scalar control signal
    fn action_range(&self) -> Range;

    /// Apply `action` in `state`, returning the resulting raw state and the
    /// immediate reward
    fn apply_action(&mut self, state: &State, action: &Action) -> Result<(State, f64)>;

    fn at_goal_state(&self, state: &State) -> bool;

    fn at_fail_state(&self, state: &State) -> bool;

    fn start_state(&self) -> State;

    /// Clear per-episode counters
    fn reset(&mut self);
}

/// Reject states whose coordinate count differs from `expected`
pub(crate) fn check_dims(state: &State, expected: usize) -> Result<()> {
    if state.dim() != expected {
        return Err(LatticeError::dimension_mismatch(expected, state.dim()));
    }
    Ok(())
}

/// The closed set of known environments, resolved by name at startup
#[derive(Clone, Debug)]
pub enum EnvironmentKind {
    CartPole(CartPole),
    MountainCar(MountainCar),
}

impl EnvironmentKind {
    /// Names accepted by [`EnvironmentKind::from_name`]
    pub const NAMES: [&'static str; 2] = ["cart_pole", "mountain_car"];

    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim() {
            "cart_pole" => Ok(EnvironmentKind::CartPole(CartPole::new())),
            "mountain_car" => Ok(EnvironmentKind::MountainCar(MountainCar::new())),
            other => Err(LatticeError::UnknownEnvironment(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnvironmentKind::CartPole(_) => "cart_pole",
            EnvironmentKind::MountainCar(_) => "mountain_car",
        }
    }

    fn inner(&self) -> &dyn Environment {
        match self {
            EnvironmentKind::CartPole(env) => env,
            EnvironmentKind::MountainCar(env) => env,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Environment {
        match self {
            EnvironmentKind::CartPole(env) => env,
            EnvironmentKind::MountainCar(env) => env,
        }
    }
}

impl Environment for EnvironmentKind {
    fn features(&self) -> Vec<Range> {
        self.inner().features()
    }

    fn action_range(&self) -> Range {
        self.inner().action_range()
    }

    fn apply_action(&mut self, state: &State, action: &Action) -> Result<(State, f64)> {
        self.inner_mut().apply_action(state, action)
    }

    fn at_goal_state(&self, state: &State) -> bool {
        self.inner().at_goal_state(state)
    }

    fn at_fail_state(&self, state: &State) -> bool {
        self.inner().at_fail_state(state)
    }

    fn start_state(&self) -> State {
        self.inner().start_state()
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }
}
