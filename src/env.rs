use crate::Result;

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time MDP with one agent
/// and a finite state space and action space.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Get the current state
    fn state(&self) -> Self::State;

    /// Determine if the state is active or terminal
    fn is_active(&self) -> bool;

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Returns** `(reward, done)`
    fn step(&mut self, action: Self::Action) -> (f32, bool);

    /// Reset the environment to an initial state, either the provided one or one chosen by the environment
    ///
    /// **Returns** the state
    fn reset(&mut self, start: Option<Self::State>) -> Result<Self::State>;
}

/// An environment whose states are the cells of a rectangular grid
pub trait GridSpace {
    /// Grid dimensions as `(length, width)`
    fn dims(&self) -> (usize, usize);
}
