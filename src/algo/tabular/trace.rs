use ndarray::Array3;

use super::QTable;
use crate::gym::Pos;

/// Accumulating eligibility trace over every `(state, action)` pair of a [`QTable`]
///
/// Visiting a pair adds `1` to its trace; every step the whole trace is scaled by `gamma * lambda`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilityTrace {
    traces: Array3<f32>,
}

impl EligibilityTrace {
    /// Zero the trace, resizing it to match `table` if needed
    pub fn reset_for(&mut self, table: &QTable) {
        if self.traces.dim() == table.shape() {
            self.traces.fill(0.0);
        } else {
            self.traces = Array3::zeros(table.shape());
        }
    }

    /// Callers index with a state and action that were already validated against the table
    pub fn increment(&mut self, state: Pos, action: usize) {
        self.traces[[state.0, state.1, action]] += 1.0;
    }

    pub fn decay(&mut self, factor: f32) {
        self.traces *= factor;
    }

    pub fn get(&self, state: Pos, action: usize) -> Option<f32> {
        self.traces.get([state.0, state.1, action]).copied()
    }

    pub fn as_array(&self) -> &Array3<f32> {
        &self.traces
    }
}
