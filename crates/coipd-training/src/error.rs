//! Error types for the co-evolution pipeline.
//!
//! All errors are terminal for the current run: evolution is deterministic
//! given its random source, so retrying would not help.

use coipd_engine::memory::MAX_MEMORY_SIZE;
use serde::{Deserialize, Serialize};

/// Identifies one of the two co-evolving populations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Side {
    A,
    B,
}

/// Invalid run configuration, detected before any simulation work.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("number of generations must be positive")]
    ZeroGenerations,
    #[display("population size must be positive")]
    ZeroPopulationSize,
    #[display("memory size must be positive")]
    ZeroMemorySize,
    #[display("memory size {memory_size} exceeds the supported maximum of {max}")]
    MemorySizeTooLarge { memory_size: u32, max: u32 },
    #[display("number of rounds must be positive")]
    ZeroRounds,
    #[display("mutation rate {rate} is outside [0, 1]")]
    InvalidMutationRate { rate: f64 },
}

impl ConfigError {
    pub(crate) fn memory_size_too_large(memory_size: u32) -> Self {
        Self::MemorySizeTooLarge {
            memory_size,
            max: MAX_MEMORY_SIZE,
        }
    }
}

/// Inconsistent shapes between strategies, populations and fitness vectors.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    #[display("unsupported memory size {memory_size}: must be within 1..={max}")]
    UnsupportedMemorySize { memory_size: u32, max: u32 },
    #[display(
        "strategy #{index} has {actual} moves, expected {expected} for memory size {memory_size}"
    )]
    TableLength {
        index: usize,
        memory_size: u32,
        expected: usize,
        actual: usize,
    },
    #[display("population has memory size {actual}, expected {expected}")]
    MemorySize { expected: u32, actual: u32 },
    #[display("population has {actual} strategies, expected {expected}")]
    PopulationSize { expected: usize, actual: usize },
    #[display("fitness vector has {actual} entries for a population of {expected}")]
    FitnessLength { expected: usize, actual: usize },
    #[display("parents have different table lengths ({left} and {right})")]
    ParentMismatch { left: usize, right: usize },
}

/// Fitness-proportionate selection is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SelectionError {
    #[display("cannot select parents: zero total fitness")]
    ZeroTotalFitness,
}

/// Failure while producing the next generation of one population.
#[derive(
    Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum BreedError {
    #[display("{_0}")]
    Config(ConfigError),
    #[display("{_0}")]
    Selection(SelectionError),
    #[display("{_0}")]
    Shape(ShapeError),
}

/// Any error that ends a co-evolution run.
#[derive(
    Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum EvolutionError {
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    #[display("inconsistent shape: {_0}")]
    Shape(ShapeError),
    #[display("breeding population {side} failed: {source}")]
    #[from(ignore)]
    Breed { side: Side, source: BreedError },
}

impl EvolutionError {
    /// Returns the side whose fitness summed to zero, if that is what stopped the run.
    #[must_use]
    pub fn degenerate_side(&self) -> Option<Side> {
        match self {
            Self::Breed {
                side,
                source: BreedError::Selection(SelectionError::ZeroTotalFitness),
            } => Some(*side),
            _ => None,
        }
    }
}
