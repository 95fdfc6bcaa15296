pub mod learners;

pub use learners::{QLearningBuilder, RLearningBuilder};
