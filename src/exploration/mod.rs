use crate::{algo::tabular::QTable, gym::Pos, Result};

/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

/// Chooses which action index to take in a state given the current [`QTable`]
pub trait Policy {
    /// Select an action index for `state`
    ///
    /// Fails with [`Error::OutOfBounds`](crate::Error::OutOfBounds) if `state` lies outside of `table`.
    fn select(&mut self, state: Pos, table: &QTable) -> Result<usize>;

    /// Notify the policy that episode number `episode` is about to start
    fn on_episode(&mut self, _episode: u32) {}

    /// Check the policy's parameters for the current episode without selecting anything
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<P: Policy + ?Sized> Policy for &mut P {
    fn select(&mut self, state: Pos, table: &QTable) -> Result<usize> {
        (**self).select(state, table)
    }

    fn on_episode(&mut self, episode: u32) {
        (**self).on_episode(episode)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn select(&mut self, state: Pos, table: &QTable) -> Result<usize> {
        (**self).select(state, table)
    }

    fn on_episode(&mut self, episode: u32) {
        (**self).on_episode(episode)
    }

    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

mod epsilon_greedy;
mod greedy;
mod random;
mod scripted;

pub use epsilon_greedy::EpsilonGreedy;
pub use greedy::Greedy;
pub use random::Random;
pub use scripted::Scripted;
