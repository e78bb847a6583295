use log::info;

use crate::{
    algo::tabular::{EpisodeOptions, EpisodeRecord, Learner, Outcome, QTable, Recording},
    env::{Environment, GridSpace},
    exploration::Policy,
    gym::{ActionSet, Dir, Pos},
    Error, Result,
};

/// Configuration for a [`Trainer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerConfig {
    /// Number of episodes to run
    ///
    /// **Default**: `1000`
    pub episodes: u32,
    /// Starting cell of every episode
    ///
    /// **Default**: `None`, a random non-goal cell each episode
    pub start: Option<Pos>,
    /// Step ceiling per episode
    ///
    /// **Default**: `None`
    pub max_steps: Option<usize>,
    /// Recording used for the first and the last episode
    ///
    /// **Default**: [`Recording::FULL`]
    pub boundary: Recording,
    /// Recording used for every episode in between
    ///
    /// **Default**: [`Recording::SUMMARY`]
    pub interior: Recording,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            start: None,
            max_steps: None,
            boundary: Recording::FULL,
            interior: Recording::SUMMARY,
        }
    }
}

/// Per-episode results of a training run, in episode order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingHistory {
    episodes: Vec<EpisodeRecord>,
}

impl TrainingHistory {
    pub fn episodes(&self) -> &[EpisodeRecord] {
        &self.episodes
    }

    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Total reward of each episode
    pub fn rewards(&self) -> Vec<f32> {
        self.episodes.iter().map(|e| e.total_reward).collect()
    }

    /// Step count of each episode
    pub fn steps(&self) -> Vec<usize> {
        self.episodes.iter().map(|e| e.steps).collect()
    }

    pub fn first(&self) -> Option<&EpisodeRecord> {
        self.episodes.first()
    }

    pub fn last(&self) -> Option<&EpisodeRecord> {
        self.episodes.last()
    }

    /// Number of episodes cut off by the step ceiling
    pub fn truncated(&self) -> usize {
        self.episodes
            .iter()
            .filter(|e| e.outcome == Outcome::Truncated)
            .count()
    }

    pub fn into_inner(self) -> Vec<EpisodeRecord> {
        self.episodes
    }
}

/// Runs a learner and a policy over many episodes against one shared [`QTable`]
pub struct Trainer<L, P>
where
    L: Learner,
    P: Policy,
{
    learner: L,
    policy: P,
    config: TrainerConfig,
}

impl<L, P> Trainer<L, P>
where
    L: Learner,
    P: Policy,
{
    /// Fails with [`Error::InvalidArgument`] if `episodes` or `max_steps` is zero
    pub fn new(learner: L, policy: P, config: TrainerConfig) -> Result<Self> {
        if config.episodes == 0 {
            return Err(Error::InvalidArgument(String::from(
                "`episodes` must be positive",
            )));
        }
        if config.max_steps == Some(0) {
            return Err(Error::InvalidArgument(String::from(
                "`max_steps` must be positive",
            )));
        }
        Ok(Self {
            learner,
            policy,
            config,
        })
    }

    pub fn learner(&self) -> &L {
        &self.learner
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Recording for episode `i`
    fn recording(&self, i: u32) -> Recording {
        if i == 0 || i + 1 == self.config.episodes {
            self.config.boundary
        } else {
            self.config.interior
        }
    }

    /// Run every configured episode, updating `table` in place
    ///
    /// The policy is checked for every episode before the first one starts, so a schedule that
    /// leaves its valid range fails without touching `table`. Otherwise stops at the first failing
    /// episode and returns its error.
    pub fn run<E>(
        &mut self,
        env: &mut E,
        actions: &ActionSet,
        table: &mut QTable,
    ) -> Result<TrainingHistory>
    where
        E: Environment<State = Pos, Action = Dir> + GridSpace,
    {
        table.check_shape(env.dims(), actions.len())?;
        for i in 0..self.config.episodes {
            self.policy.on_episode(i);
            self.policy.validate()?;
        }

        let TrainerConfig {
            episodes,
            start,
            max_steps,
            ..
        } = self.config;
        info!("training for {episodes} episodes");

        let mut history = Vec::with_capacity(episodes as usize);
        for i in 0..episodes {
            self.policy.on_episode(i);
            let options = EpisodeOptions {
                start,
                max_steps,
                recording: self.recording(i),
            };
            let record = self
                .learner
                .go(env, actions, &mut self.policy, table, &options)?;
            history.push(record);
        }

        let history = TrainingHistory { episodes: history };
        info!(
            "training finished: last episode {} steps, reward {}, {} truncated",
            history.last().map_or(0, |e| e.steps),
            history.last().map_or(0.0, |e| e.total_reward),
            history.truncated()
        );
        Ok(history)
    }
}
