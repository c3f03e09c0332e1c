//! Fitness evaluation by round-robin play against the opposing population.
//!
//! Every strategy of one population plays a fresh match of `num_rounds` rounds
//! against every strategy of the other. A strategy's fitness is the sum of its
//! per-round payoffs over all of its matches.
//!
//! Each match owns its memories, so matches are independent of each other and
//! totals do not depend on evaluation order.

use coipd_engine::{PayoffMatrix, game};

use crate::{error::ShapeError, population::Population};

/// Total scores of the strategies of one population, in population order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fitness {
    scores: Vec<u64>,
}

impl From<Vec<u64>> for Fitness {
    fn from(scores: Vec<u64>) -> Self {
        Self { scores }
    }
}

impl Fitness {
    #[must_use]
    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.scores.iter().sum()
    }

    /// Returns the mean score, or zero for an empty vector.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.total() as f64 / self.scores.len() as f64
        }
    }
}

/// Evaluates `population` against `opponent`.
///
/// Returns one score per strategy of `population`. Fails if either population's
/// memory size differs from `memory_size`.
pub fn evaluate(
    population: &Population,
    opponent: &Population,
    memory_size: u32,
    num_rounds: usize,
    payoffs: &PayoffMatrix,
) -> Result<Fitness, ShapeError> {
    population.check_memory_size(memory_size)?;
    opponent.check_memory_size(memory_size)?;

    let scores = population
        .strategies()
        .iter()
        .map(|strategy| {
            opponent
                .strategies()
                .iter()
                .map(|other| game::play_match(strategy, other, payoffs, num_rounds).0)
                .sum::<u64>()
        })
        .collect();
    Ok(Fitness { scores })
}

/// Evaluates both populations against each other in a single pass.
///
/// A match yields the scores of both players, so every pairing is simulated
/// once. The result equals `(evaluate(a, b, ..), evaluate(b, a, ..))`.
pub fn evaluate_pair(
    population_a: &Population,
    population_b: &Population,
    memory_size: u32,
    num_rounds: usize,
    payoffs: &PayoffMatrix,
) -> Result<(Fitness, Fitness), ShapeError> {
    population_a.check_memory_size(memory_size)?;
    population_b.check_memory_size(memory_size)?;

    let mut scores_a = vec![0; population_a.size()];
    let mut scores_b = vec![0; population_b.size()];
    for (strategy_a, total_a) in population_a.strategies().iter().zip(&mut scores_a) {
        for (strategy_b, total_b) in population_b.strategies().iter().zip(&mut scores_b) {
            let (score_a, score_b) = game::play_match(strategy_a, strategy_b, payoffs, num_rounds);
            *total_a += score_a;
            *total_b += score_b;
        }
    }
    Ok((Fitness { scores: scores_a }, Fitness { scores: scores_b }))
}

#[cfg(test)]
mod tests {
    use coipd_engine::Strategy;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn population(memory_size: u32, strategies: &[&str]) -> Population {
        let strategies = strategies
            .iter()
            .map(|s| s.parse::<Strategy>().unwrap())
            .collect();
        Population::from_strategies(memory_size, strategies).unwrap()
    }

    #[test]
    fn test_single_round_mutual_cooperation() {
        let a = population(1, &["CD"]);
        let b = population(1, &["CC"]);
        let payoffs = PayoffMatrix::default();
        assert_eq!(evaluate(&a, &b, 1, 1, &payoffs).unwrap().scores(), &[3]);
        assert_eq!(evaluate(&b, &a, 1, 1, &payoffs).unwrap().scores(), &[3]);
    }

    #[test]
    fn test_single_round_defector_gets_temptation() {
        let a = population(1, &["DD"]);
        let b = population(1, &["CC"]);
        let payoffs = PayoffMatrix::default();
        assert_eq!(evaluate(&a, &b, 1, 1, &payoffs).unwrap().scores(), &[5]);
        assert_eq!(evaluate(&b, &a, 1, 1, &payoffs).unwrap().scores(), &[0]);
    }

    #[test]
    fn test_fitness_sums_over_all_opponents() {
        let a = population(1, &["DD", "CC"]);
        let b = population(1, &["CC", "DD", "DC"]);
        let payoffs = PayoffMatrix::default();
        let fitness = evaluate(&a, &b, 1, 3, &payoffs).unwrap();
        // Always-defect: 3*5 vs CC, 3*1 vs DD, 3*1 vs tit-for-tat (which opens with D).
        // Always-cooperate: 3*3 vs CC, 3*0 vs DD, 0+3+3 vs tit-for-tat.
        assert_eq!(fitness.scores(), &[15 + 3 + 3, 9 + 0 + 6]);
        assert_eq!(fitness.total(), 36);
        assert!((fitness.mean() - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_rounds_gives_zero_fitness() {
        let a = population(2, &["CDCD", "DDDD"]);
        let b = population(2, &["CCCC"]);
        let fitness = evaluate(&a, &b, 2, 0, &PayoffMatrix::default()).unwrap();
        assert_eq!(fitness.scores(), &[0, 0]);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let mut rng = Pcg32::seed_from_u64(3);
        let a = Population::random(8, 3, &mut rng);
        let b = Population::random(6, 3, &mut rng);
        let payoffs = PayoffMatrix::default();
        let first = evaluate(&a, &b, 3, 20, &payoffs).unwrap();
        let second = evaluate(&a, &b, 3, 20, &payoffs).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
    }

    #[test]
    fn test_fitness_is_bounded_by_payoffs() {
        let mut rng = Pcg32::seed_from_u64(5);
        let a = Population::random(5, 2, &mut rng);
        let b = Population::random(4, 2, &mut rng);
        let payoffs = PayoffMatrix::default();
        let fitness = evaluate(&a, &b, 2, 10, &payoffs).unwrap();
        let max = u64::from(payoffs.temptation) * 10 * 4;
        assert!(fitness.scores().iter().all(|&s| s <= max));
    }

    #[test]
    fn test_evaluate_pair_matches_separate_evaluation() {
        let mut rng = Pcg32::seed_from_u64(13);
        let a = Population::random(7, 3, &mut rng);
        let b = Population::random(9, 3, &mut rng);
        let payoffs = PayoffMatrix::new(4, 1, 6, 2);
        let (fitness_a, fitness_b) = evaluate_pair(&a, &b, 3, 15, &payoffs).unwrap();
        assert_eq!(fitness_a, evaluate(&a, &b, 3, 15, &payoffs).unwrap());
        assert_eq!(fitness_b, evaluate(&b, &a, 3, 15, &payoffs).unwrap());
    }

    #[test]
    fn test_rejects_memory_size_mismatch() {
        let a = population(1, &["CD"]);
        let b = population(2, &["CDCD"]);
        assert_eq!(
            evaluate(&a, &b, 1, 5, &PayoffMatrix::default()),
            Err(ShapeError::MemorySize {
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(
            evaluate_pair(&a, &b, 2, 5, &PayoffMatrix::default()),
            Err(ShapeError::MemorySize {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_mean_of_empty_fitness() {
        assert!(Fitness::default().mean().abs() < f64::EPSILON);
    }
}
