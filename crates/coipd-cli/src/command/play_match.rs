use coipd_engine::{Match, Round, Strategy};

use super::PayoffArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayMatchArg {
    /// Strategy of player A as a C/D table (index 0 first), e.g. `DC` for tit-for-tat
    #[arg(long)]
    a: Strategy,
    /// Strategy of player B as a C/D table
    #[arg(long)]
    b: Strategy,
    /// Number of rounds to play
    #[arg(long, default_value_t = 10)]
    rounds: usize,
    #[clap(flatten)]
    payoffs: PayoffArg,
}

pub(crate) fn run(arg: &PlayMatchArg) -> anyhow::Result<()> {
    let PlayMatchArg {
        a,
        b,
        rounds,
        payoffs,
    } = arg;
    let payoffs = payoffs.to_payoffs();

    println!("A: {a} (memory {})", a.memory_size());
    println!("B: {b} (memory {})", b.memory_size());
    println!("  {:>5}  {:>4}  {:>4}  {:>7}  {:>7}", "Round", "A", "B", "Score A", "Score B");

    let (mut total_a, mut total_b) = (0_u64, 0_u64);
    for (i, round) in Match::new(a, b, &payoffs).take(*rounds).enumerate() {
        let Round {
            move_a,
            move_b,
            score_a,
            score_b,
        } = round;
        total_a += u64::from(score_a);
        total_b += u64::from(score_b);
        println!(
            "  {:>5}  {:>4}  {:>4}  {score_a:>7}  {score_b:>7}",
            i + 1,
            move_char(move_a),
            move_char(move_b),
        );
    }
    println!("Total: A {total_a} / B {total_b}");

    Ok(())
}

fn move_char(cooperate: bool) -> char {
    if cooperate { 'C' } else { 'D' }
}
