use clap::{Parser, Subcommand};
use coipd_engine::PayoffMatrix;

use self::{evolve::EvolveArg, play_match::PlayMatchArg, summary::SummaryArg};

mod evolve;
mod play_match;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Co-evolve two strategy populations and write a JSON report
    Evolve(#[clap(flatten)] EvolveArg),
    /// Print the score trace and final populations of a report
    Summary(#[clap(flatten)] SummaryArg),
    /// Replay a single match round by round
    PlayMatch(#[clap(flatten)] PlayMatchArg),
}

/// Payoff constants shared by the subcommands that play games.
#[derive(Debug, Clone, Copy, clap::Args)]
struct PayoffArg {
    /// Reward for mutual cooperation (R)
    #[arg(long, default_value_t = PayoffMatrix::STANDARD.reward)]
    reward: u32,
    /// Payoff of a cooperator facing a defector (S)
    #[arg(long, default_value_t = PayoffMatrix::STANDARD.sucker)]
    sucker: u32,
    /// Payoff of a defector facing a cooperator (T)
    #[arg(long, default_value_t = PayoffMatrix::STANDARD.temptation)]
    temptation: u32,
    /// Punishment for mutual defection (P)
    #[arg(long, default_value_t = PayoffMatrix::STANDARD.punishment)]
    punishment: u32,
}

impl PayoffArg {
    fn to_payoffs(self) -> PayoffMatrix {
        let payoffs = PayoffMatrix::new(self.reward, self.sucker, self.temptation, self.punishment);
        if !payoffs.is_dilemma() {
            eprintln!(
                "Warning: payoffs R={} S={} T={} P={} do not satisfy T > R > P > S",
                payoffs.reward, payoffs.sucker, payoffs.temptation, payoffs.punishment
            );
        }
        payoffs
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Evolve(arg) => evolve::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::PlayMatch(arg) => play_match::run(&arg)?,
    }
    Ok(())
}
