//! Co-evolution of two populations of Iterated Prisoner's Dilemma strategies.
//!
//! Each population is the other's fitness landscape: a strategy's fitness is
//! its total payoff against every member of the opposing population, so both
//! populations chase a moving target.
//!
//! # How a Run Works
//!
//! 1. **Population** - Create two populations of random strategy tables ([`population`])
//! 2. **Evaluation** - Play every A-B pairing for a fixed number of rounds ([`fitness`])
//! 3. **Trace** - Record the mean fitness of both populations
//! 4. **Selection** - Draw parent pairs proportionally to fitness ([`breeding`])
//! 5. **Reproduction** - Blend parents by truncated average, then flip moves at random
//! 6. **Repeat** - Continue for the configured number of generations ([`evolution`])
//!
//! # Architecture
//!
//! ```text
//! EvolutionConfig + PayoffMatrix
//!     ↓ drive
//! CoEvolution (evolution)
//!     ↓ evaluates with
//! evaluate_pair (fitness) → Match (coipd-engine)
//!     ↓ produces
//! Fitness A, Fitness B
//!     ↓ feed
//! breed (breeding) → next Population A, next Population B
//! ```
//!
//! # Current Limitations
//!
//! - **No elitism**: the best strategy of a generation may be lost to mutation
//! - **No convergence criterion**: runs always last `num_generations`
//! - **Degenerate populations are fatal**: a population whose total fitness is
//!   zero ends the run with [`error::SelectionError::ZeroTotalFitness`]
//! - **Sequential evaluation**: matches are independent but evaluated on one thread

pub use self::{
    config::EvolutionConfig,
    error::{BreedError, ConfigError, EvolutionError, SelectionError, ShapeError, Side},
    evolution::{CoEvolution, EvolutionOutcome, GenerationSummary, ScoreTrace},
    fitness::Fitness,
    population::Population,
};

pub mod breeding;
pub mod config;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod population;
pub mod stats;
