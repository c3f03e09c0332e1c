//! Strategy tables.
//!
//! A [`Strategy`] stores one move for every possible memory state, indexed by
//! the encoded memory (see [`crate::memory`]). Its textual form spells out the
//! table with one character per entry, `C` for cooperate and `D` for defect,
//! starting at index 0.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::memory::{self, MAX_MEMORY_SIZE, Memory};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StrategyError {
    #[display("strategy table length {len} is not a power of two between 2 and 65536")]
    InvalidLength { len: usize },
    #[display("invalid move {found:?} at position {position}: expected 'C' or 'D'")]
    InvalidMove { found: char, position: usize },
}

/// A complete table of moves, one per memory state.
///
/// The table length is always `2^memory_size` for some `memory_size` in
/// `1..=MAX_MEMORY_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<bool>", into = "Vec<bool>")]
pub struct Strategy {
    moves: Vec<bool>,
}

impl Strategy {
    /// Creates a strategy from its table.
    pub fn from_moves(moves: Vec<bool>) -> Result<Self, StrategyError> {
        let len = moves.len();
        if len < 2 || !len.is_power_of_two() || len > memory::table_len(MAX_MEMORY_SIZE) {
            return Err(StrategyError::InvalidLength { len });
        }
        Ok(Self { moves })
    }

    /// Creates a strategy by evaluating `f` for every table index.
    ///
    /// # Panics
    ///
    /// Panics if `memory_size` is zero or larger than [`MAX_MEMORY_SIZE`].
    #[must_use]
    pub fn from_fn<F>(memory_size: u32, f: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        assert!(
            (1..=MAX_MEMORY_SIZE).contains(&memory_size),
            "memory size must be within 1..={MAX_MEMORY_SIZE}, got {memory_size}"
        );
        Self {
            moves: (0..memory::table_len(memory_size)).map(f).collect(),
        }
    }

    /// Returns a new strategy with `f` applied to every move.
    #[must_use]
    pub fn map_moves<F>(&self, f: F) -> Self
    where
        F: FnMut(bool) -> bool,
    {
        Self {
            moves: self.moves.iter().copied().map(f).collect(),
        }
    }

    #[must_use]
    pub fn moves(&self) -> &[bool] {
        &self.moves
    }

    #[must_use]
    pub fn into_moves(self) -> Vec<bool> {
        self.moves
    }

    #[must_use]
    pub fn table_len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn memory_size(&self) -> u32 {
        self.moves.len().trailing_zeros()
    }

    /// Returns the move this strategy plays for the given memory state.
    ///
    /// # Panics
    ///
    /// Panics if `memory` is longer than this strategy's memory size.
    #[must_use]
    pub fn next_move(&self, memory: &Memory) -> bool {
        self.moves[memory.index()]
    }

    /// Returns the number of memory states in which this strategy cooperates.
    #[must_use]
    pub fn cooperation_count(&self) -> usize {
        self.moves.iter().filter(|m| **m).count()
    }
}

impl TryFrom<Vec<bool>> for Strategy {
    type Error = StrategyError;

    fn try_from(moves: Vec<bool>) -> Result<Self, Self::Error> {
        Self::from_moves(moves)
    }
}

impl From<Strategy> for Vec<bool> {
    fn from(strategy: Strategy) -> Self {
        strategy.moves
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &m in &self.moves {
            f.write_str(if m { "C" } else { "D" })?;
        }
        Ok(())
    }
}

impl FromStr for Strategy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let moves = s
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch.to_ascii_uppercase() {
                'C' => Ok(true),
                'D' => Ok(false),
                _ => Err(StrategyError::InvalidMove {
                    found: ch,
                    position,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_moves(moves)
    }
}
