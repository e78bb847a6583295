use std::collections::VecDeque;

use super::Policy;
use crate::{algo::tabular::QTable, gym::Pos, Error, Result};

/// Replays a fixed sequence of action indices, ignoring the table
///
/// Useful to re-run a recorded trajectory through a learner.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    actions: VecDeque<usize>,
}

impl Scripted {
    pub fn new(actions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    /// Actions not replayed yet
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }
}

impl Policy for Scripted {
    fn select(&mut self, state: Pos, table: &QTable) -> Result<usize> {
        table.check_state(state)?;
        let &action = self
            .actions
            .front()
            .ok_or_else(|| Error::InvalidArgument(String::from("scripted actions exhausted")))?;
        table.check_action(action)?;
        self.actions.pop_front();
        Ok(action)
    }
}
