use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{Choice, Policy};
use crate::{
    algo::tabular::QTable,
    check_interval,
    decay::{self, Decay},
    gym::Pos,
    Result,
};

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
///
/// With probability epsilon a uniformly random action index is taken, otherwise the greedy action
/// (lowest index on ties). Epsilon is re-evaluated from the decay strategy at the start of every
/// episode.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
    episode: u32,
    rng: StdRng,
}

impl EpsilonGreedy<decay::Constant> {
    /// Fixed exploration rate
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) unless `epsilon` is in `[0,1]`
    pub fn constant(epsilon: f32) -> Result<Self> {
        check_interval!(epsilon, 0.0, 1.0);
        Ok(Self::new(decay::Constant::new(epsilon)))
    }
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self {
            epsilon: decay,
            episode: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a reproducible random stream
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Exploration rate for the current episode
    pub fn epsilon(&self) -> f32 {
        self.epsilon.evaluate(self.episode as f32)
    }

    /// Invoke epsilon greedy policy for the current episode
    pub fn choose(&mut self) -> Result<Choice> {
        let epsilon = self.epsilon();
        check_interval!(epsilon, 0.0, 1.0);
        if self.rng.gen::<f32>() < epsilon {
            Ok(Choice::Explore)
        } else {
            Ok(Choice::Exploit)
        }
    }
}

impl<D: Decay> Policy for EpsilonGreedy<D> {
    fn select(&mut self, state: Pos, table: &QTable) -> Result<usize> {
        table.check_state(state)?;
        match self.choose()? {
            Choice::Explore => Ok(self.rng.gen_range(0..table.num_actions())),
            Choice::Exploit => table.best_action(state),
        }
    }

    fn on_episode(&mut self, episode: u32) {
        self.episode = episode;
    }

    fn validate(&self) -> Result<()> {
        let epsilon = self.epsilon();
        check_interval!(epsilon, 0.0, 1.0);
        Ok(())
    }
}
