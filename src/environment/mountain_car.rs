//! Under-powered car climbing out of a valley.

use super::{check_dims, Environment};
use crate::error::Result;
use crate::types::{Action, Range, State};

const POSITION: Range = Range { min: -1.4, max: 1.4 };
const VELOCITY: Range = Range { min: -0.7, max: 0.7 };
const GOAL_POSITION: f64 = 0.45;

/// Mountain-car environment. State is `[position, velocity]`.
#[derive(Clone, Debug, Default)]
pub struct MountainCar;

impl MountainCar {
    pub fn new() -> Self {
        MountainCar
    }
}

impl Environment for MountainCar {
    fn features(&self) -> Vec<Range> {
        vec![POSITION, VELOCITY]
    }

    fn action_range(&self) -> Range {
        Range { min: -1.0, max: 1.0 }
    }

    fn apply_action(&mut self, state: &State, action: &Action) -> Result<(State, f64)> {
        check_dims(state, 2)?;
        let position = state.coordinates[0];

        let velocity = VELOCITY.clamp(
            state.coordinates[1] + 0.001 * action.value - 0.0025 * (3.0 * position).cos(),
        );
        let position = POSITION.clamp(position + velocity);

        let next = State::raw(vec![position, velocity]);
        let reward = if self.at_goal_state(&next) { 100.0 } else { -1.0 };
        Ok((next, reward))
    }

    fn at_goal_state(&self, state: &State) -> bool {
        state.coordinates[0] >= GOAL_POSITION
    }

    // no fail state for this problem
    fn at_fail_state(&self, _state: &State) -> bool {
        false
    }

    fn start_state(&self) -> State {
        State::raw(vec![-0.5, 0.0])
    }

    fn reset(&mut self) {}
}
