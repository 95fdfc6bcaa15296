//! # latticerl - Tabular Reinforcement Learning on Discretized Lattices
//!
//! latticerl learns exact action-value tables for continuous-state
//! control problems. Each continuous feature is cut into an evenly spaced
//! grid, the grids are combined into a lattice of states, and every
//! observation is mapped to its nearest lattice point. Learning then runs
//! over the finite table.
//!
//! ## Key Features
//!
//! - **Geometry**: even spacing and N-dimensional lattice construction
//! - **Discretization**: nearest-neighbor mapping from observations to state ids
//! - **Q-learning**: episodic, with replacing eligibility traces
//! - **R-learning**: continuing, average-reward, under an explicit step budget
//! - **Rollout**: greedy execution of a learned policy with a recorded trace
//! - **Environments**: cart-pole and mountain-car reference problems
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use latticerl::agent::{Learner, LearnerKind};
//! use latticerl::config::AppConfig;
//! use latticerl::environment::EnvironmentKind;
//!
//! let config = AppConfig::load_from("cart_pole.cfg").unwrap();
//! let mut env = EnvironmentKind::from_name(&config.environment.problem).unwrap();
//! let mut learner = LearnerKind::from_config(&config, &env).unwrap();
//!
//! learner.learn(&mut env).unwrap();
//! let rollout = learner.follow_policy(&mut env, config.rollout.max_steps).unwrap();
//! println!("policy ran for {} steps", rollout.len());
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - Q-learning, R-learning and the shared value table
//! - [`builders`] - Builders that validate hyperparameters before construction
//! - [`config`] - Configuration file loading
//! - [`discretizer`] - Nearest-state lookup
//! - [`environment`] - The environment contract and reference problems
//! - [`error`] - Error types and result handling
//! - [`geometry`] - Grid and lattice construction
//! - [`metrics`] - Training reports
//! - [`rollout`] - Greedy policy execution
//! - [`types`] - Ranges, states and actions

pub mod agent;
pub mod builders;
pub mod config;
pub mod discretizer;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod rollout;
pub mod types;

#[cfg(test)]
mod tests;
