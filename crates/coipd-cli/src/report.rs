use chrono::{DateTime, Utc};
use coipd_engine::PayoffMatrix;
use coipd_training::{EvolutionConfig, Population, ScoreTrace};
use serde::{Deserialize, Serialize};

/// Result of an `evolve` run, as written to disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvolutionReport {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub config: EvolutionConfig,
    pub payoffs: PayoffMatrix,
    pub score_trace: ScoreTrace,
    pub population_a: Population,
    pub population_b: Population,
}
