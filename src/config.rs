use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::error::{Result, LatticeError};

/// Top-level run configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: EnvironmentSection,
    pub learning: LearningSection,
    #[serde(default)]
    pub rollout: RolloutSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentSection {
    /// Registered environment name (`cart_pole`, `mountain_car`)
    pub problem: String,
    /// Points per state dimension, e.g. `"5 5 5 5"` or `[5, 5, 5, 5]`
    #[serde(deserialize_with = "deserialize_grid")]
    pub state_grid: Vec<usize>,
    /// Points in the action grid
    pub action_grid: usize,
}

/// Which learning algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnerName {
    QLearning,
    RLearning,
}

/// Hyperparameters.
///
/// Every field is optional at the parsing layer; each learner demands the
/// ones it needs when it is constructed.
#[derive(Debug, Clone, Deserialize)]
pub struct LearningSection {
    pub learner: LearnerName,
    pub epochs: Option<usize>,
    pub alpha: Option<f64>,
    pub gamma: Option<f64>,
    pub lambda: Option<f64>,
    pub epsilon: Option<f64>,
    pub beta: Option<f64>,
    /// R-learning step budget
    pub steps: Option<u64>,
    /// Per-episode step cap for Q-learning
    pub max_episode_steps: Option<usize>,
    /// Seed for the learner's random number generator
    pub seed: Option<u64>,
}

impl LearningSection {
    /// The value of a required parameter, or a `MissingParameter` error
    pub fn require<T: Copy>(value: Option<T>, name: &str) -> Result<T> {
        value.ok_or_else(|| LatticeError::missing_parameter("learning", name))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RolloutSection {
    /// Run the greedy policy after learning
    #[serde(default = "default_rollout_enabled")]
    pub enabled: bool,
    /// Stop a rollout that has not terminated after this many steps
    #[serde(default)]
    pub max_steps: Option<usize>,
}

fn default_rollout_enabled() -> bool {
    true
}

impl Default for RolloutSection {
    fn default() -> Self {
        Self {
            enabled: default_rollout_enabled(),
            max_steps: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GridSpec {
    List(Vec<usize>),
    Single(usize),
    Text(String),
}

fn deserialize_grid<'de, D>(deserializer: D) -> std::result::Result<Vec<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    match GridSpec::deserialize(deserializer)? {
        GridSpec::List(points) => Ok(points),
        GridSpec::Single(points) => Ok(vec![points]),
        GridSpec::Text(text) => parse_grid(&text).map_err(serde::de::Error::custom),
    }
}

/// Parse a whitespace-separated list of point counts
pub fn parse_grid(text: &str) -> std::result::Result<Vec<usize>, String> {
    let points = text
        .split_whitespace()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|e| format!("invalid grid size '{}': {}", token, e))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if points.is_empty() {
        return Err("grid specification is empty".to_string());
    }
    Ok(points)
}

/// File format implied by a path's extension; sectioned key/value files
/// (`.cfg`, `.ini`, or no extension) are read as INI
fn format_for(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Ini,
    }
}

impl AppConfig {
    /// Load configuration from a file, with `LATTICERL__*` environment
    /// variables taking precedence
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path.to_str().ok_or_else(|| {
            LatticeError::invalid_parameter(
                "conf",
                format!("path {} is not valid UTF-8", path.display()),
            )
        })?;

        let config = Config::builder()
            .set_default("rollout.enabled", true)?
            .add_source(File::new(name, format_for(path)).required(true))
            // LATTICERL__LEARNING__ALPHA=0.2, etc.
            .add_source(
                Environment::with_prefix("LATTICERL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from an in-memory document
    pub fn from_document(content: &str, format: FileFormat) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, format))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
