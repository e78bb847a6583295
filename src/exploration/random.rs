use rand::{rngs::StdRng, Rng, SeedableRng};

use super::Policy;
use crate::{algo::tabular::QTable, gym::Pos, Result};

/// Always explore: pick an action index uniformly at random
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for Random {
    fn select(&mut self, state: Pos, table: &QTable) -> Result<usize> {
        table.check_state(state)?;
        Ok(self.rng.gen_range(0..table.num_actions()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_covers_all_actions() {
        let table = QTable::new(1, 2, 4).unwrap();
        let mut policy = Random::with_seed(3);
        let mut counts = [0; 4];
        for _ in 0..400 {
            counts[policy.select((0, 1), &table).unwrap()] += 1;
        }
        assert!(counts.iter().all(|&c| c > 50), "roughly uniform: {counts:?}");
        assert!(policy.select((1, 0), &table).is_err(), "state outside table");
    }
}
