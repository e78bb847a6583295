use std::str::FromStr;

use strum::VariantArray;

use super::grid_world::Dir;
use crate::{Error, Result};

/// Mapping from action index (the last axis of a [`QTable`](crate::algo::tabular::QTable)) to a [`Dir`]
///
/// There are always exactly four entries, one per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSet {
    dirs: [Dir; 4],
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl ActionSet {
    /// `up: 0, down: 1, left: 2, right: 3`
    pub fn standard() -> Self {
        Self {
            dirs: [Dir::Up, Dir::Down, Dir::Left, Dir::Right],
        }
    }

    /// Build a mapping from `(name, index)` pairs such as `("up", 0)`
    ///
    /// Names are matched case-insensitively against the four directions. Unknown names are rejected
    /// with [`Error::InvalidArgument`]; a mapping that does not assign each of the indices `0..4` to a
    /// distinct direction is rejected with [`Error::Configuration`].
    pub fn from_names(entries: &[(&str, usize)]) -> Result<Self> {
        if entries.len() != Dir::VARIANTS.len() {
            return Err(Error::Configuration(format!(
                "action set needs exactly {} entries, got {}",
                Dir::VARIANTS.len(),
                entries.len()
            )));
        }

        let mut slots: [Option<Dir>; 4] = [None; 4];
        for &(name, index) in entries {
            let dir = Dir::from_str(name)
                .map_err(|_| Error::InvalidArgument(format!("unknown action `{name}`")))?;
            let slot = slots.get_mut(index).ok_or_else(|| {
                Error::Configuration(format!("action index {index} for `{name}` is not in 0..4"))
            })?;
            if slot.is_some() {
                return Err(Error::Configuration(format!(
                    "action index {index} assigned twice"
                )));
            }
            *slot = Some(dir);
        }

        let mut dirs = [Dir::Up; 4];
        for (i, slot) in slots.into_iter().enumerate() {
            dirs[i] = slot
                .ok_or_else(|| Error::Configuration(format!("action index {i} unassigned")))?;
        }
        for (i, dir) in dirs.iter().enumerate() {
            if dirs[..i].contains(dir) {
                return Err(Error::Configuration(format!("action `{dir}` mapped twice")));
            }
        }

        Ok(Self { dirs })
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Direction for an action index
    pub fn dir(&self, index: usize) -> Result<Dir> {
        self.dirs.get(index).copied().ok_or_else(|| {
            Error::OutOfBounds(format!(
                "action index {index} outside of action set of size {}",
                self.len()
            ))
        })
    }

    /// Action index of a direction
    pub fn index_of(&self, dir: Dir) -> usize {
        self.dirs
            .iter()
            .position(|&d| d == dir)
            .expect("every direction is mapped")
    }

    /// `(index, dir)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Dir)> + '_ {
        self.dirs.iter().copied().enumerate()
    }
}
