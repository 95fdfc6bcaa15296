use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use latticerl::agent::{Learner, LearnerKind};
use latticerl::config::AppConfig;
use latticerl::environment::EnvironmentKind;
use latticerl::metrics::{Termination, TrainingReport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "latticerl")]
#[command(version)]
#[command(about = "Tabular reinforcement learning on discretized control problems", long_about = None)]
struct Cli {
    /// A configuration file defining parameters of the run
    #[arg(short, long)]
    conf: PathBuf,

    /// Override the learner (qlearning, rlearning)
    #[arg(long)]
    learner: Option<String>,

    /// Override the R-learning step budget
    #[arg(long)]
    steps: Option<u64>,

    /// Seed the learner's random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the greedy rollout after learning
    #[arg(long)]
    no_rollout: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.conf)
        .with_context(|| format!("failed to load configuration from {}", cli.conf.display()))?;
    if let Some(name) = &cli.learner {
        config.learning.learner = LearnerKind::parse_name(name)?;
    }
    if cli.steps.is_some() {
        config.learning.steps = cli.steps;
    }
    if cli.seed.is_some() {
        config.learning.seed = cli.seed;
    }

    let mut env = EnvironmentKind::from_name(&config.environment.problem)?;
    let mut learner = LearnerKind::from_config(&config, &env)?;
    info!(
        environment = env.name(),
        learner = learner.name(),
        num_states = learner.table().num_states(),
        num_actions = learner.table().num_actions(),
        "Starting run"
    );

    if let LearnerKind::RLearning(rlearner) = &learner {
        info!(max_steps = rlearner.budget().max_steps(), "Running continuing learner");
    }

    match learner.learn(&mut env)? {
        TrainingReport::Episodic(history) => {
            info!(
                epochs = history.len(),
                best = history.best_length().unwrap_or(0),
                avg_last_10 = history.avg_length(10).unwrap_or(0.0),
                goals = history.goals_reached(),
                "Learning finished"
            );
        }
        TrainingReport::Continuing(summary) => {
            info!(
                steps = summary.steps,
                rho = summary.rho,
                avg_reward = summary.avg_reward().unwrap_or(0.0),
                "Learning finished"
            );
        }
    }

    if cli.no_rollout || !config.rollout.enabled {
        return Ok(());
    }

    let rollout = learner.follow_policy(&mut env, config.rollout.max_steps)?;
    info!(
        steps = rollout.len(),
        outcome = ?rollout.outcome,
        reward = rollout.total_reward(),
        "Rollout finished"
    );
    if rollout.outcome == Termination::StepLimit {
        warn!("Rollout stopped at the step limit before reaching a terminal state");
    }

    Ok(())
}
