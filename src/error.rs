use thiserror::Error;

/// Result type for latticerl operations
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Main error type for the latticerl library
#[derive(Debug, Error)]
pub enum LatticeError {
    /// Coordinate count does not match the lattice or feature dimensionality
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// A grid resolution too small to be evenly spaced
    #[error("Degenerate grid: {points} point(s) requested, at least 2 are required")]
    DegenerateGrid {
        points: usize,
    },

    /// Required configuration key is absent
    #[error("Missing parameter '{section}.{name}'")]
    MissingParameter {
        section: String,
        name: String,
    },

    /// A raw state was used where a lattice id is required
    #[error("State has not been discretized")]
    UndiscretizedState,

    /// State id outside the value table
    #[error("Invalid state {id}: must be less than {num_states}")]
    InvalidState {
        id: usize,
        num_states: usize,
    },

    /// No environment registered under the given name
    #[error(
        "Unknown environment '{0}', expected one of: {}",
        crate::environment::EnvironmentKind::NAMES.join(", ")
    )]
    UnknownEnvironment(String),

    /// No learner registered under the given name
    #[error("Unknown learner '{0}'")]
    UnknownLearner(String),

    /// Configuration file or source errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

// Helper functions for common error patterns
impl LatticeError {
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        LatticeError::DimensionMismatch { expected, actual }
    }

    pub fn invalid_parameter<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        LatticeError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_parameter<S: Into<String>, N: Into<String>>(section: S, name: N) -> Self {
        LatticeError::MissingParameter {
            section: section.into(),
            name: name.into(),
        }
    }
}
