use crate::gym::Pos;

/// Represents a single transition in a grid environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exp {
    /// The cell the agent acted from
    pub state: Pos,
    /// Index of the action taken in the given state
    pub action: usize,
    /// The reward received after taking the action
    pub reward: f32,
    /// The cell the agent ended up in
    pub next_state: Pos,
    /// Whether `next_state` is terminal
    pub done: bool,
}
