//! Genetic operators producing the next generation of a population.
//!
//! # Operators
//!
//! - **Selection**: [`select_parents`] draws parent pairs with replacement, each
//!   index chosen with probability `fitness[i] / sum(fitness)`. A population
//!   whose fitness sums to zero cannot be selected from and is reported as
//!   [`SelectionError::ZeroTotalFitness`].
//! - **Crossover**: [`crossover`] blends two parents move by move with the
//!   truncated integer average `(p1 + p2) / 2`. Two cooperations give a
//!   cooperation, anything else gives a defection, so disagreeing parents
//!   always produce a defection.
//! - **Mutation**: [`mutate`] flips each move independently with probability
//!   `mutation_rate`.
//!
//! [`breed`] applies the three in order. There is no elitism: every member of
//! the next generation is a freshly bred offspring.

use std::iter;

use coipd_engine::Strategy;
use rand::Rng;

use crate::{
    config,
    error::{BreedError, SelectionError, ShapeError},
    fitness::Fitness,
    population::Population,
};

/// Fitness-proportionate index sampler over a cumulative distribution.
#[derive(Debug, Clone)]
pub struct ParentSampler {
    cumulative: Vec<u64>,
}

impl ParentSampler {
    /// Builds a sampler for the given fitness vector.
    ///
    /// Fails if the fitness vector is empty or sums to zero.
    pub fn new(fitness: &Fitness) -> Result<Self, SelectionError> {
        let cumulative: Vec<u64> = fitness
            .scores()
            .iter()
            .scan(0, |sum, &score| {
                *sum += score;
                Some(*sum)
            })
            .collect();
        match cumulative.last() {
            Some(&total) if total > 0 => Ok(Self { cumulative }),
            _ => Err(SelectionError::ZeroTotalFitness),
        }
    }

    fn total(&self) -> u64 {
        // `new` guarantees a non-empty table
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Draws one index.
    #[must_use]
    pub fn sample<R>(&self, rng: &mut R) -> usize
    where
        R: Rng + ?Sized,
    {
        let ticket = rng.random_range(0..self.total());
        // first entry whose cumulative fitness exceeds the ticket; zero-fitness
        // entries share their predecessor's bound and are never hit
        self.cumulative.partition_point(|&bound| bound <= ticket)
    }
}

/// Draws `count` parent index pairs proportionally to fitness.
pub fn select_parents<R>(
    fitness: &Fitness,
    count: usize,
    rng: &mut R,
) -> Result<Vec<(usize, usize)>, SelectionError>
where
    R: Rng + ?Sized,
{
    let sampler = ParentSampler::new(fitness)?;
    Ok(iter::repeat_with(|| (sampler.sample(&mut *rng), sampler.sample(&mut *rng)))
        .take(count)
        .collect())
}

/// Combines two parents with the truncated elementwise average.
pub fn crossover(parent1: &Strategy, parent2: &Strategy) -> Result<Strategy, ShapeError> {
    if parent1.table_len() != parent2.table_len() {
        return Err(ShapeError::ParentMismatch {
            left: parent1.table_len(),
            right: parent2.table_len(),
        });
    }
    let (moves1, moves2) = (parent1.moves(), parent2.moves());
    Ok(Strategy::from_fn(parent1.memory_size(), |i| {
        truncated_average(moves1[i], moves2[i])
    }))
}

/// `(a + b) / 2` on 0/1 moves, rounding toward zero.
fn truncated_average(a: bool, b: bool) -> bool {
    (u8::from(a) + u8::from(b)) / 2 == 1
}

/// Returns a copy of `strategy` with each move flipped with probability `mutation_rate`.
///
/// # Panics
///
/// Panics if `mutation_rate` is outside `[0, 1]`.
#[must_use]
pub fn mutate<R>(strategy: &Strategy, mutation_rate: f64, rng: &mut R) -> Strategy
where
    R: Rng + ?Sized,
{
    strategy.map_moves(|m| if rng.random_bool(mutation_rate) { !m } else { m })
}

/// Breeds the next generation of `population`.
///
/// Selects `population.size()` parent pairs, then builds one offspring per pair
/// by crossover followed by mutation, in selection order. An invalid
/// `mutation_rate` is rejected before any random draw.
pub fn breed<R>(
    population: &Population,
    fitness: &Fitness,
    mutation_rate: f64,
    rng: &mut R,
) -> Result<Population, BreedError>
where
    R: Rng + ?Sized,
{
    config::check_mutation_rate(mutation_rate)?;
    if fitness.len() != population.size() {
        return Err(ShapeError::FitnessLength {
            expected: population.size(),
            actual: fitness.len(),
        }
        .into());
    }

    let strategies = population.strategies();
    let parents = select_parents(fitness, population.size(), rng)?;
    let offspring = parents
        .into_iter()
        .map(|(p1, p2)| {
            let child = crossover(&strategies[p1], &strategies[p2])?;
            Ok(mutate(&child, mutation_rate, &mut *rng))
        })
        .collect::<Result<Vec<_>, ShapeError>>()?;

    Ok(Population::from_strategies_unchecked(
        population.memory_size(),
        offspring,
    ))
}
