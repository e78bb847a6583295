pub mod action_set;
pub mod grid_world;

pub use action_set::ActionSet;
pub use grid_world::{Agent, Dir, GridWorld, GridWorldConfig, Pos, Rewards};
