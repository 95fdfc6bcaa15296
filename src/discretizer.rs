//! Nearest-neighbor mapping from continuous observations to lattice ids.
//!
//! Every transition discretizes twice (current and next state), so the
//! linear scan here is the per-step hot path: O(num_states) per call.

use crate::error::{Result, LatticeError};
use crate::geometry::{build_lattice, feature_grids};
use crate::types::{euclidean_distance, Range, State};

/// Return the id of the lattice state nearest to `point`.
///
/// Ties go to the first state encountered, i.e. the lowest id. A point
/// with a NaN or infinite coordinate has no nearest state and is
/// rejected.
pub fn nearest_state(states: &[State], point: &[f64]) -> Result<usize> {
    let first = states.first().ok_or_else(|| {
        LatticeError::invalid_parameter("states", "cannot discretize against an empty lattice")
    })?;
    if first.dim() != point.len() {
        return Err(LatticeError::dimension_mismatch(first.dim(), point.len()));
    }
    if let Some(axis) = point.iter().position(|x| !x.is_finite()) {
        return Err(LatticeError::invalid_parameter(
            "point",
            format!("coordinate {} is {}", axis, point[axis]),
        ));
    }

    let mut id_of_nearest = 0;
    let mut dist_to_nearest = f64::MAX;
    for (i, state) in states.iter().enumerate() {
        let dist = euclidean_distance(point, &state.coordinates);
        if dist < dist_to_nearest {
            id_of_nearest = i;
            dist_to_nearest = dist;
        }
    }
    Ok(id_of_nearest)
}

/// A fixed lattice of states, built once and never resized
#[derive(Clone, Debug)]
pub struct Discretizer {
    states: Vec<State>,
    dim: usize,
}

impl Discretizer {
    /// Wrap an existing lattice; all states must share one dimensionality
    pub fn new(states: Vec<State>) -> Result<Self> {
        let dim = states
            .first()
            .map(State::dim)
            .ok_or_else(|| LatticeError::invalid_parameter("states", "lattice is empty"))?;
        if let Some(bad) = states.iter().find(|s| s.dim() != dim) {
            return Err(LatticeError::dimension_mismatch(dim, bad.dim()));
        }
        Ok(Discretizer { states, dim })
    }

    /// Lattice over the given feature ranges at the given resolutions
    pub fn from_features(features: &[Range], resolutions: &[usize]) -> Result<Self> {
        let grids = feature_grids(features, resolutions)?;
        Self::new(build_lattice(&grids)?)
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Id of the lattice point nearest to `point`
    pub fn nearest(&self, point: &[f64]) -> Result<usize> {
        nearest_state(&self.states, point)
    }

    /// Bind a raw state to its nearest lattice id, keeping its coordinates
    pub fn discretize(&self, mut state: State) -> Result<State> {
        state.id = Some(self.nearest(&state.coordinates)?);
        Ok(state)
    }
}
