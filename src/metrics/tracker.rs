use serde::{Serialize, Deserialize};

/// How an episode or rollout ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The environment reported a goal state
    Goal,
    /// The environment reported a fail state
    Fail,
    /// A caller-imposed step cap was reached first
    StepLimit,
}

/// Per-epoch record of an episodic learning run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeHistory {
    /// Steps survived in each epoch
    pub episode_lengths: Vec<usize>,

    /// Exploration rate in effect during each epoch
    pub epsilons: Vec<f64>,

    /// Reward accumulated in each epoch
    pub episode_rewards: Vec<f64>,

    pub terminations: Vec<Termination>,
}

impl EpisodeHistory {
    pub fn with_capacity(epochs: usize) -> Self {
        EpisodeHistory {
            episode_lengths: Vec::with_capacity(epochs),
            epsilons: Vec::with_capacity(epochs),
            episode_rewards: Vec::with_capacity(epochs),
            terminations: Vec::with_capacity(epochs),
        }
    }

    /// Record a finished episode
    pub fn record(&mut self, length: usize, epsilon: f64, reward: f64, termination: Termination) {
        self.episode_lengths.push(length);
        self.epsilons.push(epsilon);
        self.episode_rewards.push(reward);
        self.terminations.push(termination);
    }

    pub fn len(&self) -> usize {
        self.episode_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episode_lengths.is_empty()
    }

    pub fn total_steps(&self) -> usize {
        self.episode_lengths.iter().sum()
    }

    pub fn best_length(&self) -> Option<usize> {
        self.episode_lengths.iter().copied().max()
    }

    /// Mean episode length over the last `window` epochs
    pub fn avg_length(&self, window: usize) -> Option<f64> {
        if self.episode_lengths.is_empty() || window == 0 {
            return None;
        }

        let n = window.min(self.episode_lengths.len());
        let sum: usize = self.episode_lengths.iter().rev().take(n).sum();
        Some(sum as f64 / n as f64)
    }

    /// Number of epochs that ended at a goal state
    pub fn goals_reached(&self) -> usize {
        self.terminations
            .iter()
            .filter(|t| **t == Termination::Goal)
            .count()
    }
}

/// End-of-run record of a continuing learning run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuingSummary {
    /// Transitions executed during this run
    pub steps: u64,

    /// Average-reward estimate at the end of the run
    pub rho: f64,

    /// Exploration rate at the end of the run
    pub epsilon: f64,

    /// Transitions on which the average-reward estimate moved
    pub rho_updates: u64,

    /// Total reward collected during this run
    pub total_reward: f64,

    /// Whether the run ended via the cancel flag rather than the step budget
    pub cancelled: bool,
}

impl ContinuingSummary {
    /// Mean reward per executed step
    pub fn avg_reward(&self) -> Option<f64> {
        if self.steps == 0 {
            None
        } else {
            Some(self.total_reward / self.steps as f64)
        }
    }
}

/// What a learner returns from a call to `learn`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrainingReport {
    Episodic(EpisodeHistory),
    Continuing(ContinuingSummary),
}
