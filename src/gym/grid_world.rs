use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::{Display, EnumIter, EnumString, FromRepr, VariantArray};

use super::ActionSet;
use crate::{
    env::{Environment, GridSpace},
    Error, Result,
};

/// Grid coordinates `(x, y)` with `x < length` and `y < width`
pub type Pos = (usize, usize);

/// The four unit moves on the grid
///
/// `Up`/`Down` move along the first coordinate, `Left`/`Right` along the second.
#[derive(
    EnumIter, VariantArray, FromRepr, EnumString, Display, Clone, Copy, Debug, PartialEq, Eq, Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Dir {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// The mover inside a [`GridWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub pos: Pos,
}

impl Agent {
    pub fn new(pos: Pos) -> Self {
        Self { pos }
    }

    /// Take a unit step in `dir` on a grid of size `dims`
    ///
    /// A step that would leave the grid is absorbed: the position stays where it is.
    ///
    /// **Returns** whether the agent actually moved
    pub fn r#move(&mut self, dir: Dir, dims: (usize, usize)) -> bool {
        let (x, y) = self.pos;
        let (length, width) = dims;
        let next = match dir {
            Dir::Up if x > 0 => (x - 1, y),
            Dir::Down if x + 1 < length => (x + 1, y),
            Dir::Left if y > 0 => (x, y - 1),
            Dir::Right if y + 1 < width => (x, y + 1),
            _ => return false,
        };
        self.pos = next;
        true
    }
}

/// Reward paid for each kind of transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rewards {
    /// Moving onto the goal
    pub goal: f32,
    /// Any other successful move
    pub step: f32,
    /// Bumping into the edge of the grid
    pub invalid: f32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            goal: 10.0,
            step: -0.1,
            invalid: -1.0,
        }
    }
}

impl Rewards {
    /// Rewards that scale with the grid area: `{area, -1, -area / 10}`
    pub fn scaled(length: usize, width: usize) -> Self {
        let area = length as f32 * width as f32;
        Self {
            goal: area,
            step: -1.0,
            invalid: -area / 10.0,
        }
    }

    fn validate(&self) -> Result<()> {
        if [self.goal, self.step, self.invalid].iter().all(|r| r.is_finite()) {
            Ok(())
        } else {
            Err(Error::Configuration(format!(
                "rewards must be finite, got {self:?}"
            )))
        }
    }
}

/// Configuration for a [`GridWorld`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorldConfig {
    /// Number of rows (extent of the first coordinate)
    ///
    /// **Default**: `5`
    pub length: usize,
    /// Number of columns (extent of the second coordinate)
    ///
    /// **Default**: `5`
    pub width: usize,
    /// Goal cell
    ///
    /// **Default**: `None`, the bottom-right corner `(length - 1, width - 1)`
    pub goal: Option<Pos>,
    /// **Default**: `{goal: 10, step: -0.1, invalid: -1}`
    pub rewards: Rewards,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            length: 5,
            width: 5,
            goal: None,
            rewards: Rewards::default(),
        }
    }
}

/// A rectangular grid with a single goal cell
///
/// The agent starts anywhere except the goal and is done once it moves onto the goal. Moves off
/// the edge of the grid leave the agent in place and pay the `invalid` reward.
#[derive(Debug, Clone)]
pub struct GridWorld {
    length: usize,
    width: usize,
    cells: usize,
    goal: Pos,
    rewards: Rewards,
    agent: Agent,
    rng: StdRng,
}

impl GridWorld {
    /// Build a grid world, placing the agent on a random non-goal cell
    ///
    /// Fails with [`Error::Configuration`] if the grid has fewer than two cells, if the goal lies
    /// outside of the grid, or if a reward is not finite
    pub fn new(config: GridWorldConfig) -> Result<Self> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Same as [`GridWorld::new`] with a reproducible random stream
    pub fn with_seed(config: GridWorldConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: GridWorldConfig, rng: StdRng) -> Result<Self> {
        let GridWorldConfig {
            length,
            width,
            goal,
            rewards,
        } = config;

        if length == 0 || width == 0 {
            return Err(Error::Configuration(format!(
                "grid dimensions must be positive, got {length}x{width}"
            )));
        }
        let cells = length.checked_mul(width).ok_or_else(|| {
            Error::Configuration(format!("{length}x{width} grid has too many cells"))
        })?;
        if cells < 2 {
            return Err(Error::Configuration(String::from(
                "grid needs at least one cell besides the goal",
            )));
        }
        let goal = goal.unwrap_or((length - 1, width - 1));
        if goal.0 >= length || goal.1 >= width {
            return Err(Error::Configuration(format!(
                "goal {goal:?} outside of {length}x{width} grid"
            )));
        }
        rewards.validate()?;

        let mut env = Self {
            length,
            width,
            cells,
            goal,
            rewards,
            agent: Agent::new((0, 0)),
            rng,
        };
        env.agent.pos = env.random_start();
        Ok(env)
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 < self.length && pos.1 < self.width
    }

    /// Uniform over every cell but the goal
    fn random_start(&mut self) -> Pos {
        let goal_ix = self.goal.0 * self.width + self.goal.1;
        let mut ix = self.rng.gen_range(0..self.cells - 1);
        if ix >= goal_ix {
            ix += 1;
        }
        (ix / self.width, ix % self.width)
    }

    fn check_start(&self, start: Pos) -> Result<()> {
        if !self.contains(start) {
            return Err(Error::OutOfBounds(format!(
                "start {start:?} outside of {}x{} grid",
                self.length, self.width
            )));
        }
        if start == self.goal {
            return Err(Error::InvalidArgument(format!(
                "start {start:?} is the goal"
            )));
        }
        Ok(())
    }

    /// Cells visited by following `actions` from `start`, starting cell included
    ///
    /// The environment itself is not touched, so this can be used to draw a recorded trajectory.
    pub fn replay(
        &self,
        start: Pos,
        actions: &[usize],
        action_set: &ActionSet,
    ) -> Result<Vec<Pos>> {
        if !self.contains(start) {
            return Err(Error::OutOfBounds(format!("start {start:?} outside of grid")));
        }
        let dirs = actions
            .iter()
            .map(|&a| action_set.dir(a))
            .collect::<Result<Vec<_>>>()?;

        let mut agent = Agent::new(start);
        let mut path = Vec::with_capacity(dirs.len() + 1);
        path.push(start);
        for dir in dirs {
            agent.r#move(dir, self.dims());
            path.push(agent.pos);
        }
        Ok(path)
    }
}

impl GridSpace for GridWorld {
    fn dims(&self) -> (usize, usize) {
        (self.length, self.width)
    }
}

impl Environment for GridWorld {
    type State = Pos;
    type Action = Dir;

    fn state(&self) -> Self::State {
        self.agent.pos
    }

    fn is_active(&self) -> bool {
        self.agent.pos != self.goal
    }

    fn step(&mut self, action: Self::Action) -> (f32, bool) {
        let dims = self.dims();
        if !self.agent.r#move(action, dims) {
            (self.rewards.invalid, false)
        } else if self.agent.pos == self.goal {
            (self.rewards.goal, true)
        } else {
            (self.rewards.step, false)
        }
    }

    fn reset(&mut self, start: Option<Self::State>) -> Result<Self::State> {
        let pos = match start {
            Some(pos) => {
                self.check_start(pos)?;
                pos
            }
            None => self.random_start(),
        };
        self.agent.pos = pos;
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn grid(length: usize, width: usize, goal: Pos) -> GridWorld {
        let config = GridWorldConfig {
            length,
            width,
            goal: Some(goal),
            ..Default::default()
        };
        GridWorld::with_seed(config, 7).unwrap()
    }

    #[test]
    fn agent_moves() {
        let mut agent = Agent::new((1, 1));
        assert!(agent.r#move(Dir::Up, (3, 3)));
        assert_eq!(agent.pos, (0, 1), "up decrements x");
        assert!(agent.r#move(Dir::Down, (3, 3)));
        assert_eq!(agent.pos, (1, 1), "down increments x");
        assert!(agent.r#move(Dir::Left, (3, 3)));
        assert_eq!(agent.pos, (1, 0), "left decrements y");
        assert!(agent.r#move(Dir::Right, (3, 3)));
        assert_eq!(agent.pos, (1, 1), "right increments y");
    }

    #[test]
    fn agent_never_leaves_grid() {
        for dims in [(1, 1), (1, 4), (4, 1), (3, 5)] {
            for x in 0..dims.0 {
                for y in 0..dims.1 {
                    for dir in Dir::iter() {
                        let mut agent = Agent::new((x, y));
                        let moved = agent.r#move(dir, dims);
                        assert!(
                            agent.pos.0 < dims.0 && agent.pos.1 < dims.1,
                            "{dir} from {:?} left {dims:?}",
                            (x, y)
                        );
                        assert_eq!(moved, agent.pos != (x, y), "moved flag matches position");
                    }
                }
            }
        }
    }

    #[test]
    fn blocked_move_on_single_row() {
        let mut agent = Agent::new((0, 0));
        assert!(!agent.r#move(Dir::Down, (1, 3)), "no room to move down");
        assert!(!agent.r#move(Dir::Up, (1, 3)), "no room to move up");
        assert!(agent.r#move(Dir::Right, (1, 3)));
    }

    #[test]
    fn rejects_bad_configuration() {
        let config = |length, width, goal| GridWorldConfig {
            length,
            width,
            goal,
            ..Default::default()
        };
        assert!(matches!(
            GridWorld::new(config(3, 3, Some((3, 0)))),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            GridWorld::new(config(3, 3, Some((0, 3)))),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(GridWorld::new(config(0, 3, None)), Err(Error::Configuration(_))));
        assert!(matches!(GridWorld::new(config(1, 1, None)), Err(Error::Configuration(_))));

        assert!(
            matches!(
                GridWorld::new(config(usize::MAX, 2, Some((0, 0)))),
                Err(Error::Configuration(_))
            ),
            "cell count overflow"
        );

        let mut bad_rewards = config(3, 3, None);
        bad_rewards.rewards.step = f32::NAN;
        assert!(matches!(GridWorld::new(bad_rewards), Err(Error::Configuration(_))));
    }

    #[test]
    fn default_goal_is_bottom_right() {
        let env = GridWorld::new(GridWorldConfig::default()).unwrap();
        assert_eq!(env.goal(), (4, 4));
        assert_eq!(env.dims(), (5, 5));
        assert!(env.is_active(), "agent does not start on the goal");
    }

    #[test]
    fn step_rewards() {
        let mut env = grid(3, 3, (1, 1));
        let rewards = env.rewards();

        env.reset(Some((0, 0))).unwrap();
        assert_eq!(env.step(Dir::Up), (rewards.invalid, false), "blocked move");
        assert_eq!(env.state(), (0, 0), "blocked move leaves agent in place");
        assert_eq!(env.step(Dir::Right), (rewards.step, false), "plain move");
        assert_eq!(env.state(), (0, 1));
        assert_eq!(env.step(Dir::Down), (rewards.goal, true), "goal reached");
        assert!(!env.is_active());
    }

    #[test]
    fn goal_reward_from_every_side() {
        let mut env = grid(3, 3, (1, 1));
        let goal = env.rewards().goal;
        for (start, dir) in [
            ((0, 1), Dir::Down),
            ((2, 1), Dir::Up),
            ((1, 0), Dir::Right),
            ((1, 2), Dir::Left),
        ] {
            env.reset(Some(start)).unwrap();
            assert_eq!(env.step(dir), (goal, true), "{dir} from {start:?}");
        }
    }

    #[test]
    fn reset_never_lands_on_goal() {
        let mut env = grid(3, 3, (1, 1));
        let mut seen = [[false; 3]; 3];
        for _ in 0..1000 {
            let pos = env.reset(None).unwrap();
            assert_ne!(pos, env.goal(), "random start on goal");
            assert_eq!(env.state(), pos);
            seen[pos.0][pos.1] = true;
        }
        let covered = seen.iter().flatten().filter(|&&s| s).count();
        assert_eq!(covered, 8, "every non-goal cell is reachable");
    }

    #[test]
    fn reset_on_two_cell_grid() {
        let mut env = grid(1, 2, (0, 0));
        for _ in 0..100 {
            assert_eq!(env.reset(None), Ok((0, 1)));
        }
    }

    #[test]
    fn reset_validates_start() {
        let mut env = grid(3, 3, (2, 2));
        env.reset(Some((0, 0))).unwrap();
        assert!(matches!(env.reset(Some((3, 0))), Err(Error::OutOfBounds(_))));
        assert!(matches!(env.reset(Some((2, 2))), Err(Error::InvalidArgument(_))));
        assert_eq!(env.state(), (0, 0), "failed reset does not move the agent");
    }

    #[test]
    fn scaled_rewards() {
        let rewards = Rewards::scaled(10, 10);
        assert_eq!(rewards.goal, 100.0);
        assert_eq!(rewards.step, -1.0);
        assert_eq!(rewards.invalid, -10.0);
    }

    #[test]
    fn replay_functional() {
        let env = grid(2, 2, (1, 1));
        let actions = ActionSet::standard();
        let path = env.replay((0, 0), &[0, 3, 1], &actions).unwrap();
        assert_eq!(path, vec![(0, 0), (0, 0), (0, 1), (1, 1)], "blocked move repeats cell");
        assert!(matches!(
            env.replay((0, 0), &[4], &actions),
            Err(Error::OutOfBounds(_))
        ));
    }

    #[test]
    fn dir_names() {
        assert_eq!("up".parse::<Dir>(), Ok(Dir::Up));
        assert_eq!("Right".parse::<Dir>(), Ok(Dir::Right));
        assert!("jump".parse::<Dir>().is_err());
        assert_eq!(Dir::from_repr(2), Some(Dir::Left));
        assert_eq!(Dir::Down.to_string(), "down");
    }
}
