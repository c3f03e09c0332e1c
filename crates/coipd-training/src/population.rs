//! Populations of strategy tables.

use coipd_engine::{
    Strategy,
    memory::{self, MAX_MEMORY_SIZE},
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// An ordered collection of strategies sharing one memory size.
///
/// Every strategy's table has exactly `2^memory_size` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPopulation")]
pub struct Population {
    memory_size: u32,
    strategies: Vec<Strategy>,
}

#[derive(Debug, Deserialize)]
struct RawPopulation {
    memory_size: u32,
    strategies: Vec<Strategy>,
}

impl TryFrom<RawPopulation> for Population {
    type Error = ShapeError;

    fn try_from(raw: RawPopulation) -> Result<Self, Self::Error> {
        Self::from_strategies(raw.memory_size, raw.strategies)
    }
}

impl Population {
    /// Creates a population of `pop_size` strategies with uniformly random moves.
    ///
    /// # Panics
    ///
    /// Panics if `memory_size` is zero or larger than [`MAX_MEMORY_SIZE`].
    #[must_use]
    pub fn random<R>(pop_size: usize, memory_size: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let strategies = (0..pop_size)
            .map(|_| Strategy::from_fn(memory_size, |_| rng.random()))
            .collect();
        Self {
            memory_size,
            strategies,
        }
    }

    /// Creates a population from existing strategies, checking their table lengths.
    pub fn from_strategies(memory_size: u32, strategies: Vec<Strategy>) -> Result<Self, ShapeError> {
        if !(1..=MAX_MEMORY_SIZE).contains(&memory_size) {
            return Err(ShapeError::UnsupportedMemorySize {
                memory_size,
                max: MAX_MEMORY_SIZE,
            });
        }
        let expected = memory::table_len(memory_size);
        if let Some((index, strategy)) = strategies
            .iter()
            .enumerate()
            .find(|(_, s)| s.table_len() != expected)
        {
            return Err(ShapeError::TableLength {
                index,
                memory_size,
                expected,
                actual: strategy.table_len(),
            });
        }
        Ok(Self {
            memory_size,
            strategies,
        })
    }

    /// Builds a population without checking table lengths.
    ///
    /// Callers must only pass strategies with `2^memory_size` moves.
    pub(crate) fn from_strategies_unchecked(memory_size: u32, strategies: Vec<Strategy>) -> Self {
        debug_assert!(
            strategies
                .iter()
                .all(|s| s.table_len() == memory::table_len(memory_size))
        );
        Self {
            memory_size,
            strategies,
        }
    }

    #[must_use]
    pub fn memory_size(&self) -> u32 {
        self.memory_size
    }

    #[must_use]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    #[must_use]
    pub fn into_strategies(self) -> Vec<Strategy> {
        self.strategies
    }

    /// Returns the number of strategies.
    #[must_use]
    pub fn size(&self) -> usize {
        self.strategies.len()
    }

    /// Fails unless this population has the given memory size.
    pub(crate) fn check_memory_size(&self, expected: u32) -> Result<(), ShapeError> {
        if self.memory_size == expected {
            Ok(())
        } else {
            Err(ShapeError::MemorySize {
                expected,
                actual: self.memory_size,
            })
        }
    }
}
