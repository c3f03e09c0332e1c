use crate::fitness::Fitness;

/// Summary of a fitness vector.
///
/// Only the mean enters the score trace; the spread is reported alongside it
/// to follow how uniform a population has become.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitnessStats {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl FitnessStats {
    /// Computes statistics of `fitness`; all fields are zero for an empty vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use coipd_training::{fitness::Fitness, stats::FitnessStats};
    ///
    /// let stats = FitnessStats::new(&Fitness::from(vec![2, 4, 4, 4, 5, 5, 7, 9]));
    /// assert_eq!((stats.min, stats.max), (2, 9));
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.std_dev, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(fitness: &Fitness) -> Self {
        let scores = fitness.scores();
        let (Some(&min), Some(&max)) = (scores.iter().min(), scores.iter().max()) else {
            return Self::default();
        };
        let mean = fitness.mean();
        let variance = scores
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / scores.len() as f64;
        Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}
