use thiserror::Error;

/// Errors raised by environments, policies and learners
///
/// Every failure is fatal to the call that raised it. Validation always runs before any state is
/// mutated, so an `Err` leaves the environment and the Q-table untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid grid, goal, reward vector, action mapping or table shape
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A hyperparameter or call argument outside of its allowed range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A state or action index outside of the grid or table
    #[error("index out of bounds: {0}")]
    OutOfBounds(String),
}

pub type Result<T> = std::result::Result<T, Error>;
