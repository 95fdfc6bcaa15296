//! Cart-pole balancing with Euler-integrated dynamics.

use std::f64::consts::FRAC_PI_4;

use super::{check_dims, Environment};
use crate::error::Result;
use crate::types::{Action, Range, State};

const FORCE_MAG: f64 = 10.0;
const POLE_HALF_LENGTH: f64 = 0.5;
const POLE_MASS: f64 = 0.1;
const CART_MASS: f64 = 1.0;
const TOTAL_MASS: f64 = POLE_MASS + CART_MASS;
const POLE_MASS_LENGTH: f64 = POLE_MASS * POLE_HALF_LENGTH;
const GRAVITY: f64 = 9.8;
/// Seconds between updates
const TAU: f64 = 0.02;
/// Balancing this many steps counts as success
pub const MAX_STEPS: usize = 1000;

const FEATURES: [Range; 4] = [
    Range { min: -4.5, max: 4.5 },           // cart position
    Range { min: -3.0, max: 3.0 },           // cart velocity
    Range { min: -FRAC_PI_4, max: FRAC_PI_4 }, // pole angle
    Range { min: -FRAC_PI_4, max: FRAC_PI_4 }, // pole angular velocity
];

/// Cart-pole environment.
///
/// State is `[x, x_dot, theta, theta_dot]`; the action value in `[-1, 1]`
/// is scaled into a horizontal force on the cart.
#[derive(Clone, Debug, Default)]
pub struct CartPole {
    steps: usize,
}

impl CartPole {
    pub fn new() -> Self {
        CartPole { steps: 0 }
    }

    /// Actions applied since the last reset
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Environment for CartPole {
    fn features(&self) -> Vec<Range> {
        FEATURES.to_vec()
    }

    fn action_range(&self) -> Range {
        Range { min: -1.0, max: 1.0 }
    }

    fn apply_action(&mut self, state: &State, action: &Action) -> Result<(State, f64)> {
        check_dims(state, FEATURES.len())?;
        let [x, x_dot, theta, theta_dot] = [
            state.coordinates[0],
            state.coordinates[1],
            state.coordinates[2],
            state.coordinates[3],
        ];

        let force = action.value * FORCE_MAG;
        let cos_theta = theta.cos();
        let sin_theta = theta.sin();
        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin_theta) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin_theta - cos_theta * temp)
            / (POLE_HALF_LENGTH * (4.0 / 3.0 - POLE_MASS * cos_theta * cos_theta / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos_theta / TOTAL_MASS;

        let next = State::raw(vec![
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ]);

        let reward = if self.at_fail_state(&next) { -1.0 } else { 0.0 };

        self.steps += 1;
        Ok((next, reward))
    }

    fn at_goal_state(&self, _state: &State) -> bool {
        self.steps >= MAX_STEPS
    }

    fn at_fail_state(&self, state: &State) -> bool {
        state.coordinates[0].abs() > 4.0 || state.coordinates[2].abs() > FRAC_PI_4
    }

    fn start_state(&self) -> State {
        State::raw(vec![0.0; FEATURES.len()])
    }

    fn reset(&mut self) {
        self.steps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_moves_cart_and_counts_steps() {
        let mut env = CartPole::new();
        let start = env.start_state();
        let (next, reward) = env.apply_action(&start, &Action::new(0, 1.0)).unwrap();

        // position only changes after velocity has built up
        assert_eq!(next.coordinates[0], 0.0);
        assert!(next.coordinates[1] > 0.0);
        assert!(next.coordinates[3] < 0.0);
        assert_eq!(reward, 0.0);
        assert_eq!(env.steps(), 1);

        env.reset();
        assert_eq!(env.steps(), 0);
    }

    #[test]
    fn test_fail_reward() {
        let mut env = CartPole::new();
        let tipping = State::raw(vec![0.0, 0.0, FRAC_PI_4, 1.0]);
        let (next, reward) = env.apply_action(&tipping, &Action::new(0, 0.0)).unwrap();
        assert!(env.at_fail_state(&next));
        assert_eq!(reward, -1.0);
    }

    #[test]
    fn test_rejects_wrong_dimensionality() {
        let mut env = CartPole::new();
        let bad = State::raw(vec![0.0, 0.0]);
        assert!(env.apply_action(&bad, &Action::new(0, 0.0)).is_err());
    }
}
