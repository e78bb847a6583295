mod episode;
mod q_lambda;
mod q_learning;
mod q_table;
mod trace;

pub use episode::{EpisodeOptions, EpisodeRecord, Learner, Outcome, Recording};
pub use q_lambda::{QLambda, QLambdaConfig};
pub use q_learning::{QLearning, QLearningConfig};
pub use q_table::QTable;
pub use trace::EligibilityTrace;
