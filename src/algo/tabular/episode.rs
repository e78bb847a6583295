use log::{debug, trace, warn};
use ndarray::Array3;

use super::QTable;
use crate::{
    env::{Environment, GridSpace},
    exploration::Policy,
    gym::{ActionSet, Dir, Pos},
    memory::Exp,
    Error, Result,
};

/// What to keep from an episode besides its total reward and step count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Recording {
    /// Keep the sequence of action indices taken
    pub actions: bool,
    /// Keep a copy of the whole Q-table after every update
    pub snapshots: bool,
}

impl Recording {
    pub const FULL: Self = Self {
        actions: true,
        snapshots: true,
    };
    pub const ACTIONS: Self = Self {
        actions: true,
        snapshots: false,
    };
    pub const SUMMARY: Self = Self {
        actions: false,
        snapshots: false,
    };
}

/// Per-episode settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EpisodeOptions {
    /// Starting cell
    ///
    /// **Default**: `None`, a random non-goal cell
    pub start: Option<Pos>,
    /// Step ceiling after which the episode is cut off
    ///
    /// **Default**: `None`, run until the goal is reached
    pub max_steps: Option<usize>,
    /// **Default**: [`Recording::SUMMARY`]
    pub recording: Recording,
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The agent moved onto the goal
    Reached,
    /// The step ceiling was hit first
    Truncated,
}

/// Everything produced by one episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRecord {
    /// Cell the episode started from
    pub start: Pos,
    /// Action indices in the order they were taken, empty unless recorded
    pub actions: Vec<usize>,
    /// Sum of all rewards received
    pub total_reward: f32,
    /// Number of steps taken
    pub steps: usize,
    /// Q-table copies taken after each update, empty unless recorded
    pub snapshots: Vec<Array3<f32>>,
    pub outcome: Outcome,
}

/// A tabular learner that improves a [`QTable`] from single transitions
///
/// Implementors provide the update rule; [`Learner::go`] drives a whole episode.
pub trait Learner {
    /// Called once per episode after the environment has been reset
    fn begin_episode(&mut self, _table: &QTable) {}

    /// Apply the update rule for one transition
    ///
    /// Fails with [`Error::OutOfBounds`] without touching the table if a state or the action lies
    /// outside of it
    fn update(&mut self, table: &mut QTable, exp: &Exp) -> Result<()>;

    /// Run one episode to completion (or truncation), learning after every step
    ///
    /// Arguments are validated before anything is mutated: the table must match the environment and
    /// action set, the policy's parameters must be valid, the start cell must be a valid non-goal
    /// cell and `max_steps` must not be zero.
    fn go<E, P>(
        &mut self,
        env: &mut E,
        actions: &ActionSet,
        policy: &mut P,
        table: &mut QTable,
        options: &EpisodeOptions,
    ) -> Result<EpisodeRecord>
    where
        Self: Sized,
        E: Environment<State = Pos, Action = Dir> + GridSpace,
        P: Policy + ?Sized,
    {
        table.check_shape(env.dims(), actions.len())?;
        if options.max_steps == Some(0) {
            return Err(Error::InvalidArgument(String::from(
                "`max_steps` must be positive",
            )));
        }
        policy.validate()?;

        let start = env.reset(options.start)?;
        self.begin_episode(table);

        let recording = options.recording;
        let mut record = EpisodeRecord {
            start,
            actions: Vec::new(),
            total_reward: 0.0,
            steps: 0,
            snapshots: Vec::new(),
            outcome: Outcome::Truncated,
        };

        let mut state = start;
        loop {
            if options.max_steps.is_some_and(|max| record.steps >= max) {
                warn!(
                    "episode from {start:?} truncated after {} steps",
                    record.steps
                );
                break;
            }

            let action = policy.select(state, table)?;
            let dir = actions.dir(action)?;
            let (reward, done) = env.step(dir);
            let next_state = env.state();
            trace!("{state:?} --{dir}--> {next_state:?} reward {reward}");

            self.update(
                table,
                &Exp {
                    state,
                    action,
                    reward,
                    next_state,
                    done,
                },
            )?;

            if recording.actions {
                record.actions.push(action);
            }
            if recording.snapshots {
                record.snapshots.push(table.as_array().clone());
            }
            record.steps += 1;
            record.total_reward += reward;
            state = next_state;

            if done {
                record.outcome = Outcome::Reached;
                break;
            }
        }

        debug!(
            "episode from {start:?}: {:?} after {} steps, total reward {}",
            record.outcome, record.steps, record.total_reward
        );
        Ok(record)
    }
}
