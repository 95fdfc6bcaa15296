use crate::agent::{ActionValueTable, QLearning, QLearningParams, RLearning, RLearningParams, TrainingBudget};
use crate::config::{AppConfig, LearningSection};
use crate::environment::Environment;
use crate::error::{Result, LatticeError};

/// Grid resolutions and seed shared by both learner builders
#[derive(Debug, Clone, Default)]
struct SpaceSpec {
    state_grid: Option<Vec<usize>>,
    action_grid: Option<usize>,
    seed: Option<u64>,
}

impl SpaceSpec {
    fn from_config(config: &AppConfig) -> Self {
        SpaceSpec {
            state_grid: Some(config.environment.state_grid.clone()),
            action_grid: Some(config.environment.action_grid),
            seed: config.learning.seed,
        }
    }

    fn build_table<E: Environment + ?Sized>(&self, env: &E) -> Result<ActionValueTable> {
        let state_grid = self
            .state_grid
            .as_deref()
            .ok_or_else(|| LatticeError::missing_parameter("environment", "state_grid"))?;
        let action_grid = self
            .action_grid
            .ok_or_else(|| LatticeError::missing_parameter("environment", "action_grid"))?;
        ActionValueTable::new(env, state_grid, action_grid, self.seed)
    }
}

/// Builder for [`QLearning`]
#[derive(Debug, Clone, Default)]
pub struct QLearningBuilder {
    space: SpaceSpec,
    epochs: Option<usize>,
    alpha: Option<f64>,
    gamma: Option<f64>,
    lambda: Option<f64>,
    epsilon: Option<f64>,
    max_episode_steps: Option<usize>,
}

impl QLearningBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the grid and learning sections of a configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let learning = &config.learning;
        QLearningBuilder {
            space: SpaceSpec::from_config(config),
            epochs: learning.epochs,
            alpha: learning.alpha,
            gamma: learning.gamma,
            lambda: learning.lambda,
            epsilon: learning.epsilon,
            max_episode_steps: learning.max_episode_steps,
        }
    }

    pub fn state_grid(mut self, points: &[usize]) -> Self {
        self.space.state_grid = Some(points.to_vec());
        self
    }

    pub fn action_grid(mut self, points: usize) -> Self {
        self.space.action_grid = Some(points);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.space.seed = Some(seed);
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.epochs = Some(epochs);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = Some(lambda);
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    pub fn max_episode_steps(mut self, steps: usize) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    /// Validate every required parameter, then build the spaces for `env`
    pub fn build<E: Environment + ?Sized>(self, env: &E) -> Result<QLearning> {
        let params = QLearningParams {
            max_epochs: LearningSection::require(self.epochs, "epochs")?,
            alpha: LearningSection::require(self.alpha, "alpha")?,
            gamma: LearningSection::require(self.gamma, "gamma")?,
            lambda: LearningSection::require(self.lambda, "lambda")?,
            epsilon: LearningSection::require(self.epsilon, "epsilon")?,
            max_episode_steps: self.max_episode_steps,
        };
        params.validate()?;

        QLearning::new(self.space.build_table(env)?, params)
    }
}

/// Builder for [`RLearning`]
#[derive(Debug, Clone, Default)]
pub struct RLearningBuilder {
    space: SpaceSpec,
    alpha: Option<f64>,
    beta: Option<f64>,
    epsilon: Option<f64>,
    steps: Option<u64>,
}

impl RLearningBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let learning = &config.learning;
        RLearningBuilder {
            space: SpaceSpec::from_config(config),
            alpha: learning.alpha,
            beta: learning.beta,
            epsilon: learning.epsilon,
            steps: learning.steps,
        }
    }

    pub fn state_grid(mut self, points: &[usize]) -> Self {
        self.space.state_grid = Some(points.to_vec());
        self
    }

    pub fn action_grid(mut self, points: usize) -> Self {
        self.space.action_grid = Some(points);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.space.seed = Some(seed);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }

    /// Number of transitions one call to `learn` may execute
    pub fn steps(mut self, steps: u64) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn build<E: Environment + ?Sized>(self, env: &E) -> Result<RLearning> {
        let params = RLearningParams {
            alpha: LearningSection::require(self.alpha, "alpha")?,
            beta: LearningSection::require(self.beta, "beta")?,
            epsilon: LearningSection::require(self.epsilon, "epsilon")?,
        };
        params.validate()?;
        let budget = TrainingBudget::steps(LearningSection::require(self.steps, "steps")?);

        RLearning::new(self.space.build_table(env)?, params, budget)
    }
}
