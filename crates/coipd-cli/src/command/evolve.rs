use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use coipd_training::{
    CoEvolution, EvolutionConfig, GenerationSummary,
    config::{
        DEFAULT_MEMORY_SIZE, DEFAULT_MUTATION_RATE, DEFAULT_NUM_GENERATIONS, DEFAULT_NUM_ROUNDS,
        DEFAULT_POP_SIZE,
    },
    stats::FitnessStats,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use super::PayoffArg;
use crate::{report::EvolutionReport, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    /// Number of generations to run
    #[arg(long, default_value_t = DEFAULT_NUM_GENERATIONS)]
    generations: usize,
    /// Number of strategies in each population
    #[arg(long, default_value_t = DEFAULT_POP_SIZE)]
    population_size: usize,
    /// Probability of flipping each move of an offspring
    #[arg(long, default_value_t = DEFAULT_MUTATION_RATE)]
    mutation_rate: f64,
    /// Number of opponent moves a strategy remembers
    #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: u32,
    /// Rounds played in every match
    #[arg(long, default_value_t = DEFAULT_NUM_ROUNDS)]
    rounds: usize,
    /// Random seed (chosen at random and recorded in the report when omitted)
    #[arg(long)]
    seed: Option<u64>,
    #[clap(flatten)]
    payoffs: PayoffArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EvolveArg) -> anyhow::Result<()> {
    let EvolveArg {
        generations,
        population_size,
        mutation_rate,
        memory_size,
        rounds,
        seed,
        payoffs,
        output,
    } = arg;

    let config = EvolutionConfig {
        num_generations: *generations,
        pop_size: *population_size,
        mutation_rate: *mutation_rate,
        memory_size: *memory_size,
        num_rounds: *rounds,
    };
    config.validate().context("Invalid evolution parameters")?;
    let payoffs = payoffs.to_payoffs();

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);

    eprintln!("Running co-evolution (seed {seed})...");
    let mut evolution = CoEvolution::new(&config, &payoffs, &mut rng)?;
    while !evolution.is_finished() {
        let summary = evolution
            .step(&mut rng)
            .with_context(|| format!("Generation #{} failed", evolution.generation()))?;
        print_summary(&summary);
    }
    let outcome = evolution.into_outcome();

    eprintln!("Co-evolution completed.");
    let report = EvolutionReport {
        generated_at: Utc::now(),
        seed,
        config,
        payoffs,
        score_trace: outcome.trace,
        population_a: outcome.population_a,
        population_b: outcome.population_b,
    };
    Output::save_json(&report, output.clone())?;

    eprintln!();
    eprintln!("Report saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Generated at: {}", report.generated_at);
    if let (Some(mean_a), Some(mean_b)) = (
        report.score_trace.population_a.last(),
        report.score_trace.population_b.last(),
    ) {
        eprintln!("  Final mean fitness: A {mean_a:.3} / B {mean_b:.3}");
    }

    Ok(())
}

fn print_summary(summary: &GenerationSummary) {
    let GenerationSummary {
        generation,
        fitness_a,
        fitness_b,
    } = summary;
    eprintln!("Generation #{generation}:");
    print_fitness("A", fitness_a);
    print_fitness("B", fitness_b);
}

fn print_fitness(label: &str, stats: &FitnessStats) {
    eprintln!(
        "  {label}: min {:6} / max {:6} / mean {:10.3} / std {:8.3}",
        stats.min, stats.max, stats.mean, stats.std_dev
    );
}
