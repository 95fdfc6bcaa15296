pub mod tracker;

pub use tracker::{ContinuingSummary, EpisodeHistory, Termination, TrainingReport};
