use super::Policy;
use crate::{algo::tabular::QTable, gym::Pos, Result};

/// Always exploit: pick the highest-valued action, lowest index on ties
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Policy for Greedy {
    fn select(&mut self, state: Pos, table: &QTable) -> Result<usize> {
        table.best_action(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn greedy_functional() {
        let mut table = QTable::new(2, 2, 4).unwrap();
        table.set((1, 1), 2, 0.5).unwrap();
        assert_eq!(Greedy.select((1, 1), &table), Ok(2));
        assert_eq!(Greedy.select((0, 0), &table), Ok(0), "ties go to index 0");
        assert!(matches!(Greedy.select((2, 0), &table), Err(Error::OutOfBounds(_))));
    }
}
