use super::{EligibilityTrace, Learner, QTable};
use crate::{check_interval, memory::Exp, Result};

/// Configuration for [`QLambda`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLambdaConfig {
    /// Learning rate, in `[0,1]`
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// Discount factor, in `[0,1]`
    ///
    /// **Default**: `0.9`
    pub gamma: f32,
    /// Trace decay, in `[0,1]`
    ///
    /// **Default**: `0.9`
    pub lambda: f32,
}

impl Default for QLambdaConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            lambda: 0.9,
        }
    }
}

/// Q-learning with accumulating eligibility traces
///
/// Every step:
/// - δ = r + γ max<sub>a'</sub> Q(s',a') - Q(s,a), without the bootstrap term on the final step
/// - E(s,a) ← E(s,a) + 1
/// - Q ← Q + αδE
/// - E ← γλE
///
/// The whole table is touched on every step, so a step costs O(length · width · actions). Fine for
/// small and medium grids, slow for large ones.
#[derive(Debug, Clone, PartialEq)]
pub struct QLambda {
    alpha: f32,
    gamma: f32,
    lambda: f32,
    trace: EligibilityTrace,
}

impl QLambda {
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `alpha`, `gamma` or
    /// `lambda` is not in `[0,1]`
    pub fn new(config: QLambdaConfig) -> Result<Self> {
        check_interval!(config.alpha, 0.0, 1.0);
        check_interval!(config.gamma, 0.0, 1.0);
        check_interval!(config.lambda, 0.0, 1.0);
        Ok(Self {
            alpha: config.alpha,
            gamma: config.gamma,
            lambda: config.lambda,
            trace: EligibilityTrace::default(),
        })
    }

    pub fn trace(&self) -> &EligibilityTrace {
        &self.trace
    }
}

impl Learner for QLambda {
    fn begin_episode(&mut self, table: &QTable) {
        self.trace.reset_for(table);
    }

    fn update(&mut self, table: &mut QTable, exp: &Exp) -> Result<()> {
        let &Exp {
            state,
            action,
            reward,
            next_state,
            done,
        } = exp;

        let q_value = table.get(state, action)?;
        let max_next_q = table.max_value(next_state)?;
        // nothing follows a terminal state
        let max_next_q = if done { 0.0 } else { max_next_q };
        let delta = reward + self.gamma * max_next_q - q_value;

        if self.trace.as_array().dim() != table.shape() {
            self.trace.reset_for(table);
        }
        self.trace.increment(state, action);
        table
            .as_array_mut()
            .scaled_add(self.alpha * delta, self.trace.as_array());
        self.trace.decay(self.gamma * self.lambda);

        Ok(())
    }
}
