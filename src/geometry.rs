//! Grid construction: evenly spaced points and N-dimensional lattices.

use crate::error::{Result, LatticeError};
use crate::types::{Range, State};

/// Return `n` evenly spaced points over `[min, max]`, both endpoints included.
///
/// Resolutions below 2 have no well-defined spacing and are rejected.
///
/// ```
/// use latticerl::geometry::linspace;
/// let points = linspace(-1.0, 1.0, 5).unwrap();
/// assert_eq!(points, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// ```
pub fn linspace(min: f64, max: f64, n: usize) -> Result<Vec<f64>> {
    if n < 2 {
        return Err(LatticeError::DegenerateGrid { points: n });
    }

    let step = (max - min) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n).map(|i| min + i as f64 * step).collect();
    // pin the far endpoint against rounding drift
    points[n - 1] = max;
    Ok(points)
}

/// `linspace` over the bounds of a range; inverted or non-finite
/// bounds are rejected
pub fn range_grid(range: &Range, n: usize) -> Result<Vec<f64>> {
    range.validate()?;
    linspace(range.min, range.max, n)
}

/// Build a lattice from a set of arbitrarily spaced dimensions.
///
/// Given dimensions `[a, b, c]` and `[x, y]` the lattice is
///
/// ```text
/// [[a, x],
///  [a, y],
///  [b, x],
///  [b, y],
///  [c, x],
///  [c, y]]
/// ```
///
/// Each dimension contributes one coordinate to every state, the first
/// dimension varies slowest, and ids are assigned in enumeration order
/// starting at 0.
pub fn build_lattice(dimensions: &[Vec<f64>]) -> Result<Vec<State>> {
    if dimensions.is_empty() {
        return Err(LatticeError::invalid_parameter(
            "dimensions",
            "a lattice needs at least one dimension",
        ));
    }
    if let Some(index) = dimensions.iter().position(|d| d.is_empty()) {
        return Err(LatticeError::invalid_parameter(
            "dimensions",
            format!("dimension {} has no points", index),
        ));
    }

    let total: usize = dimensions.iter().map(Vec::len).product();
    let mut states = Vec::with_capacity(total);

    // odometer over per-dimension indices, last dimension ticking fastest
    let mut cursor = vec![0usize; dimensions.len()];
    for id in 0..total {
        let coordinates = cursor
            .iter()
            .zip(dimensions)
            .map(|(&i, dim)| dim[i])
            .collect();
        states.push(State::with_id(id, coordinates));

        for axis in (0..dimensions.len()).rev() {
            cursor[axis] += 1;
            if cursor[axis] < dimensions[axis].len() {
                break;
            }
            cursor[axis] = 0;
        }
    }

    Ok(states)
}

/// Build the per-dimension grids for a set of feature ranges.
///
/// `resolutions` must name one point count per feature.
pub fn feature_grids(features: &[Range], resolutions: &[usize]) -> Result<Vec<Vec<f64>>> {
    if features.len() != resolutions.len() {
        return Err(LatticeError::dimension_mismatch(features.len(), resolutions.len()));
    }
    features
        .iter()
        .zip(resolutions)
        .map(|(range, &n)| range_grid(range, n))
        .collect()
}
