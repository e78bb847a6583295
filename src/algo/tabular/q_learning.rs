use super::{Learner, QTable};
use crate::{check_interval, memory::Exp, Result};

/// Configuration for [`QLearning`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearningConfig {
    /// Learning rate, in `[0,1]`
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// Discount factor, in `[0,1]`
    ///
    /// **Default**: `0.9`
    pub gamma: f32,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

/// One-step off-policy Q-learning
///
/// Q(s,a) ← Q(s,a) + α(r + γ max<sub>a'</sub> Q(s',a') - Q(s,a))
///
/// The bootstrap uses the greedy value of the next state regardless of what the policy does next,
/// and is zero when the transition ends the episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearning {
    alpha: f32, // learning rate
    gamma: f32, // discount factor
}

impl QLearning {
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `alpha` or `gamma` is not in `[0,1]`
    pub fn new(config: QLearningConfig) -> Result<Self> {
        check_interval!(config.alpha, 0.0, 1.0);
        check_interval!(config.gamma, 0.0, 1.0);
        Ok(Self {
            alpha: config.alpha,
            gamma: config.gamma,
        })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }
}

impl Learner for QLearning {
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
        let new_q_value = reward + self.gamma * max_next_q;
        // written as a convex blend so that α = 0 and α = 1 are exact
        let weighted_q_value = (1.0 - self.alpha) * q_value + self.alpha * new_q_value;

        table.set(state, action, weighted_q_value)
    }
}
