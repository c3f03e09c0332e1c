//! The co-evolution driver.
//!
//! Two populations evolve in lockstep, each serving as the other's fitness
//! landscape. One generation is:
//!
//! 1. Evaluate population A against B and B against A
//! 2. Record the mean fitness of both into the [`ScoreTrace`]
//! 3. Breed the next generation of A from A's fitness, then of B from B's
//! 4. Replace both populations
//!
//! The run ends after exactly `num_generations` generations; there is no
//! convergence criterion and no elitism. The returned populations are the
//! offspring bred in the last generation.
//!
//! # Example
//!
//! ```
//! use coipd_engine::PayoffMatrix;
//! use coipd_training::{config::EvolutionConfig, evolution};
//!
//! let config = EvolutionConfig {
//!     num_generations: 5,
//!     pop_size: 10,
//!     mutation_rate: 0.1,
//!     memory_size: 2,
//!     num_rounds: 20,
//! };
//! let outcome = evolution::run(&config, &PayoffMatrix::default(), &mut rand::rng()).unwrap();
//! assert_eq!(outcome.trace.len(), 5);
//! assert_eq!(outcome.population_a.size(), 10);
//! ```

use coipd_engine::PayoffMatrix;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    breeding,
    config::EvolutionConfig,
    error::{EvolutionError, ShapeError, Side},
    fitness,
    population::Population,
    stats::FitnessStats,
};

/// Mean fitness of both populations, one entry per generation.
///
/// Both sequences always have the same length; index `i` is generation `i`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub population_a: Vec<f64>,
    pub population_b: Vec<f64>,
}

impl ScoreTrace {
    fn push(&mut self, mean_a: f64, mean_b: f64) {
        self.population_a.push(mean_a);
        self.population_b.push(mean_b);
    }

    /// Returns the number of recorded generations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.population_a.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.population_a.is_empty()
    }

    /// Iterates `(generation, mean_a, mean_b)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.population_a
            .iter()
            .zip(&self.population_b)
            .enumerate()
            .map(|(generation, (&a, &b))| (generation, a, b))
    }
}

/// What happened in one generation, before breeding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub fitness_a: FitnessStats,
    pub fitness_b: FitnessStats,
}

/// Final state of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    pub population_a: Population,
    pub population_b: Population,
    pub trace: ScoreTrace,
}

/// A co-evolution run in progress.
#[derive(Debug, Clone)]
pub struct CoEvolution {
    config: EvolutionConfig,
    payoffs: PayoffMatrix,
    population_a: Population,
    population_b: Population,
    trace: ScoreTrace,
    generation: usize,
}

impl CoEvolution {
    /// Validates `config` and creates two random initial populations.
    pub fn new<R>(
        config: &EvolutionConfig,
        payoffs: &PayoffMatrix,
        rng: &mut R,
    ) -> Result<Self, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let population_a = Population::random(config.pop_size, config.memory_size, rng);
        let population_b = Population::random(config.pop_size, config.memory_size, rng);
        Ok(Self::with_populations(
            config,
            payoffs,
            population_a,
            population_b,
        ))
    }

    /// Starts a run from given initial populations.
    ///
    /// Both populations must have `config.pop_size` strategies and
    /// `config.memory_size` memory.
    pub fn from_populations(
        config: &EvolutionConfig,
        payoffs: &PayoffMatrix,
        population_a: Population,
        population_b: Population,
    ) -> Result<Self, EvolutionError> {
        config.validate()?;
        for population in [&population_a, &population_b] {
            population.check_memory_size(config.memory_size)?;
            if population.size() != config.pop_size {
                return Err(ShapeError::PopulationSize {
                    expected: config.pop_size,
                    actual: population.size(),
                }
                .into());
            }
        }
        Ok(Self::with_populations(
            config,
            payoffs,
            population_a,
            population_b,
        ))
    }

    fn with_populations(
        config: &EvolutionConfig,
        payoffs: &PayoffMatrix,
        population_a: Population,
        population_b: Population,
    ) -> Self {
        Self {
            config: *config,
            payoffs: *payoffs,
            population_a,
            population_b,
            trace: ScoreTrace::default(),
            generation: 0,
        }
    }

    /// Returns the index of the next generation to run.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn population_a(&self) -> &Population {
        &self.population_a
    }

    #[must_use]
    pub fn population_b(&self) -> &Population {
        &self.population_b
    }

    #[must_use]
    pub fn trace(&self) -> &ScoreTrace {
        &self.trace
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.generation >= self.config.num_generations
    }

    /// Runs one generation.
    ///
    /// A zero-fitness population stops the run with an error; the populations
    /// and the trace are left as they were before the step.
    pub fn step<R>(&mut self, rng: &mut R) -> Result<GenerationSummary, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        let EvolutionConfig {
            mutation_rate,
            memory_size,
            num_rounds,
            ..
        } = self.config;

        let (fitness_a, fitness_b) = fitness::evaluate_pair(
            &self.population_a,
            &self.population_b,
            memory_size,
            num_rounds,
            &self.payoffs,
        )?;
        let summary = GenerationSummary {
            generation: self.generation,
            fitness_a: FitnessStats::new(&fitness_a),
            fitness_b: FitnessStats::new(&fitness_b),
        };

        let next_a = breeding::breed(&self.population_a, &fitness_a, mutation_rate, rng)
            .map_err(|source| EvolutionError::Breed {
                side: Side::A,
                source,
            })?;
        let next_b = breeding::breed(&self.population_b, &fitness_b, mutation_rate, rng)
            .map_err(|source| EvolutionError::Breed {
                side: Side::B,
                source,
            })?;

        self.trace.push(fitness_a.mean(), fitness_b.mean());
        self.population_a = next_a;
        self.population_b = next_b;
        self.generation += 1;
        Ok(summary)
    }

    #[must_use]
    pub fn into_outcome(self) -> EvolutionOutcome {
        EvolutionOutcome {
            population_a: self.population_a,
            population_b: self.population_b,
            trace: self.trace,
        }
    }
}

/// Runs a complete co-evolution from random initial populations.
pub fn run<R>(
    config: &EvolutionConfig,
    payoffs: &PayoffMatrix,
    rng: &mut R,
) -> Result<EvolutionOutcome, EvolutionError>
where
    R: Rng + ?Sized,
{
    let mut evolution = CoEvolution::new(config, payoffs, rng)?;
    while !evolution.is_finished() {
        evolution.step(rng)?;
    }
    Ok(evolution.into_outcome())
}

#[cfg(test)]
mod tests {
    use coipd_engine::Strategy;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::error::{BreedError, ConfigError, SelectionError};

    fn population(memory_size: u32, strategies: &[&str]) -> Population {
        let strategies = strategies
            .iter()
            .map(|s| s.parse::<Strategy>().unwrap())
            .collect();
        Population::from_strategies(memory_size, strategies).unwrap()
    }

    fn single_round_config() -> EvolutionConfig {
        EvolutionConfig {
            num_generations: 1,
            pop_size: 1,
            mutation_rate: 0.0,
            memory_size: 1,
            num_rounds: 1,
        }
    }

    #[test]
    fn test_run_length() {
        let config = EvolutionConfig {
            num_generations: 7,
            pop_size: 6,
            mutation_rate: 0.1,
            memory_size: 2,
            num_rounds: 10,
        };
        let mut rng = Pcg32::seed_from_u64(42);
        let outcome = run(&config, &PayoffMatrix::default(), &mut rng).unwrap();
        assert_eq!(outcome.trace.population_a.len(), 7);
        assert_eq!(outcome.trace.population_b.len(), 7);
        assert_eq!(outcome.population_a.size(), 6);
        assert_eq!(outcome.population_b.size(), 6);
        assert!(
            outcome
                .population_a
                .strategies()
                .iter()
                .chain(outcome.population_b.strategies())
                .all(|s| s.table_len() == 4)
        );
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let config = EvolutionConfig {
            num_generations: 5,
            pop_size: 8,
            mutation_rate: 0.2,
            memory_size: 3,
            num_rounds: 12,
        };
        let payoffs = PayoffMatrix::default();
        let first = run(&config, &payoffs, &mut Pcg32::seed_from_u64(9)).unwrap();
        let second = run(&config, &payoffs, &mut Pcg32::seed_from_u64(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_generation_scores() {
        let payoffs = PayoffMatrix::default();

        let mut evolution = CoEvolution::from_populations(
            &single_round_config(),
            &payoffs,
            population(1, &["CD"]),
            population(1, &["CC"]),
        )
        .unwrap();
        let summary = evolution.step(&mut Pcg32::seed_from_u64(0)).unwrap();
        assert_eq!(summary.generation, 0);
        assert_eq!((summary.fitness_a.mean, summary.fitness_b.mean), (3.0, 3.0));
        assert!(evolution.is_finished());

        let outcome = evolution.into_outcome();
        assert_eq!(outcome.trace.population_a, vec![3.0]);
        assert_eq!(outcome.trace.population_b, vec![3.0]);
        // a lone parent without mutation breeds itself
        assert_eq!(outcome.population_a.strategies()[0].to_string(), "CD");
        assert_eq!(outcome.population_b.strategies()[0].to_string(), "CC");

        let (fitness_a, fitness_b) = fitness::evaluate_pair(
            &population(1, &["DD"]),
            &population(1, &["CC"]),
            1,
            1,
            &payoffs,
        )
        .unwrap();
        assert_eq!(fitness_a.scores(), &[5]);
        assert_eq!(fitness_b.scores(), &[0]);
    }

    #[test]
    fn test_degenerate_population_stops_run() {
        // B always cooperates against an always-defecting A and earns S = 0.
        let mut evolution = CoEvolution::from_populations(
            &single_round_config(),
            &PayoffMatrix::default(),
            population(1, &["DD"]),
            population(1, &["CC"]),
        )
        .unwrap();
        let error = evolution.step(&mut Pcg32::seed_from_u64(1)).unwrap_err();
        assert_eq!(
            error,
            EvolutionError::Breed {
                side: Side::B,
                source: BreedError::Selection(SelectionError::ZeroTotalFitness),
            }
        );
        assert_eq!(error.degenerate_side(), Some(Side::B));
        assert_eq!(evolution.generation(), 0);
        assert!(evolution.trace().is_empty());
        assert_eq!(evolution.population_a().strategies()[0].to_string(), "DD");
        assert_eq!(evolution.population_b().strategies()[0].to_string(), "CC");
    }

    #[test]
    fn test_invalid_config_fails_before_work() {
        let config = EvolutionConfig {
            mutation_rate: 1.5,
            ..EvolutionConfig::default()
        };
        let result = run(&config, &PayoffMatrix::default(), &mut Pcg32::seed_from_u64(0));
        assert_eq!(
            result.unwrap_err(),
            EvolutionError::Config(ConfigError::InvalidMutationRate { rate: 1.5 })
        );
    }

    #[test]
    fn test_from_populations_checks_shape() {
        let config = EvolutionConfig {
            pop_size: 2,
            ..single_round_config()
        };
        let result = CoEvolution::from_populations(
            &config,
            &PayoffMatrix::default(),
            population(1, &["CD", "DD"]),
            population(1, &["CC"]),
        );
        assert_eq!(
            result.unwrap_err(),
            EvolutionError::Shape(ShapeError::PopulationSize {
                expected: 2,
                actual: 1
            })
        );

        let result = CoEvolution::from_populations(
            &config,
            &PayoffMatrix::default(),
            population(1, &["CD", "DD"]),
            population(2, &["CCCC", "DDDD"]),
        );
        assert_eq!(
            result.unwrap_err(),
            EvolutionError::Shape(ShapeError::MemorySize {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_trace_iter() {
        let trace = ScoreTrace {
            population_a: vec![1.0, 2.0],
            population_b: vec![3.0, 4.0],
        };
        assert_eq!(
            trace.iter().collect::<Vec<_>>(),
            vec![(0, 1.0, 3.0), (1, 2.0, 4.0)]
        );
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn test_outcome_serde() {
        let config = EvolutionConfig {
            num_generations: 2,
            pop_size: 3,
            mutation_rate: 0.1,
            memory_size: 1,
            num_rounds: 4,
        };
        let outcome = run(&config, &PayoffMatrix::default(), &mut Pcg32::seed_from_u64(5)).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: EvolutionOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.population_a, outcome.population_a);
        assert_eq!(parsed.population_b, outcome.population_b);
        for ((_, a1, b1), (_, a2, b2)) in parsed.trace.iter().zip(outcome.trace.iter()) {
            assert!((a1 - a2).abs() < 1e-9);
            assert!((b1 - b2).abs() < 1e-9);
        }
    }
}
