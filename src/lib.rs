/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Crate error type
pub mod error;

/// Exploration policies
pub mod exploration;

/// Transitions recorded while an agent acts
pub mod memory;

/// Testing environments
pub mod gym;

/// Training loop over many episodes
pub mod train;

mod util;

pub use error::{Error, Result};
