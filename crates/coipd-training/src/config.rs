use coipd_engine::memory::MAX_MEMORY_SIZE;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_NUM_GENERATIONS: usize = 100;
pub const DEFAULT_POP_SIZE: usize = 50;
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub const DEFAULT_MEMORY_SIZE: u32 = 3;
pub const DEFAULT_NUM_ROUNDS: usize = 50;

/// Parameters of a co-evolution run.
///
/// Both populations share every parameter. Call [`EvolutionConfig::validate`]
/// before starting a run; the driver does so on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Number of evaluate/breed cycles
    pub num_generations: usize,
    /// Number of strategies in each population
    pub pop_size: usize,
    /// Probability of flipping each move of an offspring
    pub mutation_rate: f64,
    /// Number of opponent moves a strategy remembers
    pub memory_size: u32,
    /// Rounds played in every pairwise match
    pub num_rounds: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            num_generations: DEFAULT_NUM_GENERATIONS,
            pop_size: DEFAULT_POP_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            memory_size: DEFAULT_MEMORY_SIZE,
            num_rounds: DEFAULT_NUM_ROUNDS,
        }
    }
}

impl EvolutionConfig {
    /// Checks every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.pop_size == 0 {
            return Err(ConfigError::ZeroPopulationSize);
        }
        if self.memory_size == 0 {
            return Err(ConfigError::ZeroMemorySize);
        }
        if self.memory_size > MAX_MEMORY_SIZE {
            return Err(ConfigError::memory_size_too_large(self.memory_size));
        }
        if self.num_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        check_mutation_rate(self.mutation_rate)
    }
}

/// Fails unless `rate` is a probability in `[0, 1]`.
pub(crate) fn check_mutation_rate(rate: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(ConfigError::InvalidMutationRate { rate })
    }
}
