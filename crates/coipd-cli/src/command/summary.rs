use std::{collections::BTreeMap, path::PathBuf};

use coipd_engine::Strategy;
use coipd_training::{Population, ScoreTrace};

use crate::{report::EvolutionReport, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    /// Path to the report file (JSON format)
    report_file: PathBuf,
    /// Print every generation instead of a sample of the trace
    #[arg(long)]
    full: bool,
}

const SAMPLED_ROWS: usize = 20;

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let SummaryArg { report_file, full } = arg;

    eprintln!("Loading report from {}", report_file.display());
    let report: EvolutionReport = util::read_json_file("report", report_file)?;

    let EvolutionReport {
        generated_at,
        seed,
        config,
        payoffs,
        score_trace,
        population_a,
        population_b,
    } = &report;

    println!("Generated at: {generated_at}");
    println!("Seed:         {seed}");
    println!(
        "Parameters:   {} generations, {} strategies, mutation rate {}, memory {}, {} rounds",
        config.num_generations,
        config.pop_size,
        config.mutation_rate,
        config.memory_size,
        config.num_rounds
    );
    println!(
        "Payoffs:      R={} S={} T={} P={}",
        payoffs.reward, payoffs.sucker, payoffs.temptation, payoffs.punishment
    );
    println!();

    print_trace(score_trace, *full);
    println!();
    print_population("A", population_a);
    println!();
    print_population("B", population_b);

    Ok(())
}

fn print_trace(trace: &ScoreTrace, full: bool) {
    println!("Mean fitness by generation:");
    println!("  {:>10}  {:>12}  {:>12}", "Generation", "A", "B");
    let stride = if full {
        1
    } else {
        trace.len().div_ceil(SAMPLED_ROWS).max(1)
    };
    let last = trace.len().saturating_sub(1);
    for (generation, mean_a, mean_b) in trace.iter() {
        if generation % stride == 0 || generation == last {
            println!("  {generation:>10}  {mean_a:>12.3}  {mean_b:>12.3}");
        }
    }
}

fn print_population(label: &str, population: &Population) {
    println!(
        "Population {label} ({} strategies, memory {}):",
        population.size(),
        population.memory_size()
    );
    let mut counts = BTreeMap::<&Strategy, usize>::new();
    for strategy in population.strategies() {
        *counts.entry(strategy).or_default() += 1;
    }
    let mut counts = counts.into_iter().collect::<Vec<_>>();
    counts.sort_by(|(_, a), (_, b)| b.cmp(a));
    for (strategy, count) in counts {
        println!(
            "  {count:4} x {strategy}  (cooperates in {}/{} states)",
            strategy.cooperation_count(),
            strategy.table_len()
        );
    }
}
