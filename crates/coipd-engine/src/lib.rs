//! Game engine for the Iterated Prisoner's Dilemma (IPD).
//!
//! This crate holds the pure, deterministic parts of the simulation:
//!
//! - [`memory`] - encoding of a player's recent history into a strategy table index
//! - [`payoff`] - the payoff table that resolves a single round
//! - [`strategy`] - strategy tables (one move per possible memory state)
//! - [`game`] - a round-by-round simulation of one match between two strategies
//!
//! A move is a `bool`: `true` means cooperate, `false` means defect.
//!
//! # Example
//!
//! ```
//! use coipd_engine::{PayoffMatrix, Strategy, game};
//!
//! let tit_for_tat: Strategy = "DC".parse().unwrap();
//! let always_cooperate: Strategy = "CC".parse().unwrap();
//!
//! // Both players start with an all-defect memory, so tit-for-tat opens with a defection.
//! let (score_a, score_b) = game::play_match(&tit_for_tat, &always_cooperate, &PayoffMatrix::default(), 3);
//! assert_eq!((score_a, score_b), (5 + 3 + 3, 0 + 3 + 3));
//! ```

pub use self::{
    game::{Match, Round},
    memory::Memory,
    payoff::PayoffMatrix,
    strategy::{Strategy, StrategyError},
};

pub mod game;
pub mod memory;
pub mod payoff;
pub mod strategy;
