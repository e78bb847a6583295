use ndarray::{Array2, Array3, ArrayView1, Axis};

use crate::{
    env::GridSpace,
    gym::{ActionSet, Pos},
    Error, Result,
};

/// Dense table of action values indexed by `(x, y, action)`
///
/// Created once per training run and handed to every episode by mutable reference. Values start at
/// zero and are only ever changed by a learner's update rule.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Array3<f32>,
}

impl QTable {
    /// Zero-initialised table of shape `(length, width, num_actions)`
    pub fn new(length: usize, width: usize, num_actions: usize) -> Result<Self> {
        if length == 0 || width == 0 || num_actions == 0 {
            return Err(Error::Configuration(format!(
                "Q-table shape must be positive, got ({length}, {width}, {num_actions})"
            )));
        }
        if length
            .checked_mul(width)
            .and_then(|n| n.checked_mul(num_actions))
            .map_or(true, |n| n > isize::MAX as usize)
        {
            return Err(Error::Configuration(format!(
                "Q-table shape ({length}, {width}, {num_actions}) is too large"
            )));
        }
        Ok(Self {
            values: Array3::zeros((length, width, num_actions)),
        })
    }

    /// Zero-initialised table sized for an environment and its action set
    pub fn for_env(env: &impl GridSpace, actions: &ActionSet) -> Result<Self> {
        let (length, width) = env.dims();
        Self::new(length, width, actions.len())
    }

    /// `(length, width, num_actions)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.values.dim()
    }

    pub fn num_actions(&self) -> usize {
        self.values.len_of(Axis(2))
    }

    pub fn as_array(&self) -> &Array3<f32> {
        &self.values
    }

    pub(crate) fn as_array_mut(&mut self) -> &mut Array3<f32> {
        &mut self.values
    }

    /// Check that this table was built for a grid of `dims` with `num_actions` actions
    pub fn check_shape(&self, dims: (usize, usize), num_actions: usize) -> Result<()> {
        let expected = (dims.0, dims.1, num_actions);
        if self.shape() == expected {
            Ok(())
        } else {
            Err(Error::Configuration(format!(
                "Q-table shape {:?} does not match environment shape {expected:?}",
                self.shape()
            )))
        }
    }

    pub(crate) fn check_state(&self, state: Pos) -> Result<()> {
        let (length, width, _) = self.shape();
        if state.0 < length && state.1 < width {
            Ok(())
        } else {
            Err(Error::OutOfBounds(format!(
                "state {state:?} outside of Q-table with {length}x{width} states"
            )))
        }
    }

    pub(crate) fn check_action(&self, action: usize) -> Result<()> {
        if action < self.num_actions() {
            Ok(())
        } else {
            Err(Error::OutOfBounds(format!(
                "action {action} outside of Q-table with {} actions",
                self.num_actions()
            )))
        }
    }

    pub fn get(&self, state: Pos, action: usize) -> Result<f32> {
        self.check_state(state)?;
        self.check_action(action)?;
        Ok(self.values[[state.0, state.1, action]])
    }

    pub fn set(&mut self, state: Pos, action: usize, value: f32) -> Result<()> {
        self.check_state(state)?;
        self.check_action(action)?;
        self.values[[state.0, state.1, action]] = value;
        Ok(())
    }

    /// All action values for a state
    pub fn values(&self, state: Pos) -> Result<ArrayView1<'_, f32>> {
        self.check_state(state)?;
        Ok(self.row(state))
    }

    fn row(&self, state: Pos) -> ArrayView1<'_, f32> {
        self.values.index_axis(Axis(0), state.0).index_axis_move(Axis(0), state.1)
    }

    /// Greedy action and its value; the lowest index wins ties
    fn argmax(&self, state: Pos) -> (usize, f32) {
        self.row(state)
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (a, q)| {
                if q > best.1 {
                    (a, q)
                } else {
                    best
                }
            })
    }

    /// Index of the highest-valued action in `state`
    ///
    /// Ties go to the lowest action index, so an untouched state always yields action `0`.
    pub fn best_action(&self, state: Pos) -> Result<usize> {
        self.check_state(state)?;
        Ok(self.argmax(state).0)
    }

    /// max<sub>a</sub> Q(state, a)
    pub fn max_value(&self, state: Pos) -> Result<f32> {
        self.check_state(state)?;
        Ok(self.argmax(state).1)
    }

    /// Whether every entry is finite (no `NaN` or infinities)
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|q| q.is_finite())
    }

    /// One `(state, action values)` row per cell in row-major order
    pub fn rows(&self) -> impl Iterator<Item = (Pos, Vec<f32>)> + '_ {
        let (length, width, _) = self.shape();
        (0..length)
            .flat_map(move |x| (0..width).map(move |y| (x, y)))
            .map(move |state| (state, self.row(state).to_vec()))
    }

    /// Greedy action for every cell
    pub fn greedy_actions(&self) -> Array2<usize> {
        let (length, width, _) = self.shape();
        Array2::from_shape_fn((length, width), |state| self.argmax(state).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q_table_functional() {
        let mut table = QTable::new(2, 3, 4).unwrap();
        assert_eq!(table.shape(), (2, 3, 4));
        assert_eq!(table.num_actions(), 4);
        assert!(table.as_array().iter().all(|&q| q == 0.0), "zero initialised");

        table.set((1, 2), 3, 1.5).unwrap();
        assert_eq!(table.get((1, 2), 3), Ok(1.5));
        assert_eq!(table.values((1, 2)).unwrap().to_vec(), vec![0.0, 0.0, 0.0, 1.5]);
        assert_eq!(table.max_value((1, 2)), Ok(1.5));
        assert_eq!(table.best_action((1, 2)), Ok(3));
    }

    #[test]
    fn argmax_ties_go_to_lowest_index() {
        let mut table = QTable::new(1, 2, 4).unwrap();
        assert_eq!(table.best_action((0, 0)), Ok(0), "all zero");

        table.set((0, 1), 1, 2.0).unwrap();
        table.set((0, 1), 3, 2.0).unwrap();
        assert_eq!(table.best_action((0, 1)), Ok(1));

        for a in 0..4 {
            table.set((0, 0), a, -1.0).unwrap();
        }
        table.set((0, 0), 2, -0.5).unwrap();
        assert_eq!(table.best_action((0, 0)), Ok(2), "negative values");
        assert_eq!(table.max_value((0, 0)), Ok(-0.5));
    }

    #[test]
    fn out_of_bounds_indices() {
        let mut table = QTable::new(2, 2, 4).unwrap();
        assert!(matches!(table.get((2, 0), 0), Err(Error::OutOfBounds(_))));
        assert!(matches!(table.get((0, 2), 0), Err(Error::OutOfBounds(_))));
        assert!(matches!(table.get((0, 0), 4), Err(Error::OutOfBounds(_))));
        assert!(matches!(table.set((5, 5), 0, 1.0), Err(Error::OutOfBounds(_))));
        assert!(matches!(table.best_action((2, 2)), Err(Error::OutOfBounds(_))));
        assert!(matches!(QTable::new(0, 2, 4), Err(Error::Configuration(_))));
        assert!(
            matches!(QTable::new(usize::MAX, 2, 4), Err(Error::Configuration(_))),
            "element count overflow"
        );
    }

    #[test]
    fn shape_check() {
        let table = QTable::new(3, 4, 4).unwrap();
        assert!(table.check_shape((3, 4), 4).is_ok());
        assert!(matches!(table.check_shape((4, 3), 4), Err(Error::Configuration(_))));
    }

    #[test]
    fn rows_and_greedy_actions() {
        let mut table = QTable::new(2, 2, 4).unwrap();
        table.set((0, 1), 1, 1.0).unwrap();
        table.set((1, 0), 3, 1.0).unwrap();

        let rows = table.rows().collect::<Vec<_>>();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].0, (0, 0));
        assert_eq!(rows[1], ((0, 1), vec![0.0, 1.0, 0.0, 0.0]));
        assert_eq!(rows[2].0, (1, 0));

        let greedy = table.greedy_actions();
        assert_eq!(greedy[[0, 0]], 0);
        assert_eq!(greedy[[0, 1]], 1);
        assert_eq!(greedy[[1, 0]], 3);
    }

    #[test]
    fn finite_check() {
        let mut table = QTable::new(1, 2, 4).unwrap();
        assert!(table.is_finite());
        table.set((0, 0), 0, f32::NAN).unwrap();
        assert!(!table.is_finite());
    }
}
