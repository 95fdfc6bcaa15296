use serde::{Serialize, Deserialize};
use std::fmt::Debug;
use crate::error::{Result, LatticeError};

/// Bounds of one continuous feature or of the action dimension
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Create a range, rejecting `min > max` and non-finite bounds
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Range { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Check the bounds of a range built as a literal
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(LatticeError::invalid_parameter(
                "range",
                format!("bounds must be finite, got [{}, {}]", self.min, self.max),
            ));
        }
        if self.min > self.max {
            return Err(LatticeError::invalid_parameter(
                "range",
                format!("min {} is greater than max {}", self.min, self.max),
            ));
        }
        Ok(())
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// A point in state space.
///
/// States produced by an environment are "raw": they carry coordinates
/// only. A lattice id is attached once the state has been discretized,
/// and is a dense index into the value table spanning `[0, num_states)`.
/// Discretization never snaps the coordinates; dynamics keep running on
/// the continuous values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: Option<usize>,
    pub coordinates: Vec<f64>,
}

impl State {
    /// A raw state with no lattice id
    pub fn raw(coordinates: Vec<f64>) -> Self {
        State { id: None, coordinates }
    }

    /// A state already bound to a lattice id
    pub fn with_id(id: usize, coordinates: Vec<f64>) -> Self {
        State { id: Some(id), coordinates }
    }

    /// The lattice id, or an error for a raw state
    pub fn id(&self) -> Result<usize> {
        self.id.ok_or(LatticeError::UndiscretizedState)
    }

    pub fn dim(&self) -> usize {
        self.coordinates.len()
    }
}

/// Euclidean distance over the shared coordinates of two points
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// One point of the discretized action grid.
///
/// `value` is the control signal handed to the environment;
/// `is_greedy_choice` records whether selection was greedy, which gates
/// the eligibility trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: usize,
    pub value: f64,
    pub is_greedy_choice: bool,
}

impl Action {
    pub fn new(id: usize, value: f64) -> Self {
        Action { id, value, is_greedy_choice: false }
    }

    /// Copy of this action tagged with how it was selected
    pub fn selected(&self, greedy: bool) -> Self {
        Action { is_greedy_choice: greedy, ..*self }
    }
}

/// Outcome of an action-selection call: the chosen action id and its
/// current estimated value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Choice {
    pub action_id: usize,
    pub value: f64,
    pub was_greedy: bool,
}
