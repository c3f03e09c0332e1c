//! Simulation of a single match between two strategies.
//!
//! Each player keeps a private [`Memory`] of the *opponent's* recent moves,
//! starting from all defections. Every round both players look up their move
//! from their own memory, the round is resolved with the [`PayoffMatrix`], and
//! each memory slides forward with the move the other player just made.

use crate::{Memory, PayoffMatrix, Strategy};

/// Outcome of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub move_a: bool,
    pub move_b: bool,
    pub score_a: u32,
    pub score_b: u32,
}

/// An endless sequence of rounds between two strategies.
///
/// The iterator never ends; take as many rounds as the match lasts.
///
/// # Example
///
/// ```
/// use coipd_engine::{Match, PayoffMatrix, Strategy};
///
/// let a: Strategy = "DD".parse().unwrap();
/// let b: Strategy = "CC".parse().unwrap();
/// let payoffs = PayoffMatrix::default();
///
/// let rounds: Vec<_> = Match::new(&a, &b, &payoffs).take(2).collect();
/// assert!(rounds.iter().all(|r| (r.score_a, r.score_b) == (5, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct Match<'a> {
    strategy_a: &'a Strategy,
    strategy_b: &'a Strategy,
    payoffs: &'a PayoffMatrix,
    memory_a: Memory,
    memory_b: Memory,
}

impl<'a> Match<'a> {
    /// Starts a new match.
    ///
    /// Each memory is sized to its own strategy's table.
    #[must_use]
    pub fn new(
        strategy_a: &'a Strategy,
        strategy_b: &'a Strategy,
        payoffs: &'a PayoffMatrix,
    ) -> Self {
        Self {
            strategy_a,
            strategy_b,
            payoffs,
            memory_a: Memory::new(strategy_a.memory_size()),
            memory_b: Memory::new(strategy_b.memory_size()),
        }
    }
}

impl Iterator for Match<'_> {
    type Item = Round;

    fn next(&mut self) -> Option<Self::Item> {
        let move_a = self.strategy_a.next_move(&self.memory_a);
        let move_b = self.strategy_b.next_move(&self.memory_b);
        let (score_a, score_b) = self.payoffs.play(move_a, move_b);

        self.memory_a.push(move_b);
        self.memory_b.push(move_a);

        Some(Round {
            move_a,
            move_b,
            score_a,
            score_b,
        })
    }
}

/// Plays `num_rounds` rounds and returns the total score of each player.
#[must_use]
pub fn play_match(
    strategy_a: &Strategy,
    strategy_b: &Strategy,
    payoffs: &PayoffMatrix,
    num_rounds: usize,
) -> (u64, u64) {
    Match::new(strategy_a, strategy_b, payoffs)
        .take(num_rounds)
        .fold((0, 0), |(total_a, total_b), round| {
            (
                total_a + u64::from(round.score_a),
                total_b + u64::from(round.score_b),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy(s: &str) -> Strategy {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_round_mutual_cooperation() {
        let a = strategy("CD");
        let b = strategy("CC");
        assert_eq!(play_match(&a, &b, &PayoffMatrix::default(), 1), (3, 3));
    }

    #[test]
    fn test_single_round_defector_exploits_cooperator() {
        let a = strategy("DD");
        let b = strategy("CC");
        assert_eq!(play_match(&a, &b, &PayoffMatrix::default(), 1), (5, 0));
    }

    #[test]
    fn test_zero_rounds() {
        let a = strategy("CD");
        let b = strategy("DC");
        assert_eq!(play_match(&a, &b, &PayoffMatrix::default(), 0), (0, 0));
    }

    #[test]
    fn test_memory_tracks_opponent_moves() {
        // Tit-for-tat (copy the opponent's last move) against an alternating strategy
        // keyed on its own memory of the opponent.
        let tit_for_tat = strategy("DC");
        let contrarian = strategy("CD");
        let rounds: Vec<_> = Match::new(&tit_for_tat, &contrarian, &PayoffMatrix::default())
            .take(4)
            .map(|r| (r.move_a, r.move_b))
            .collect();
        // Round 1: both memories are [D]. TFT plays D, contrarian plays C.
        // Round 2: TFT saw C -> C; contrarian saw D -> C.
        // Round 3: TFT saw C -> C; contrarian saw C -> D.
        // Round 4: TFT saw D -> D; contrarian saw C -> D.
        assert_eq!(
            rounds,
            vec![(false, true), (true, true), (true, false), (false, false)]
        );
    }

    #[test]
    fn test_longer_memory_uses_window() {
        // Cooperates only after two consecutive opponent cooperations (index 3).
        let cautious = strategy("DDDC");
        let cooperator = strategy("CCCC");
        let moves: Vec<_> = Match::new(&cautious, &cooperator, &PayoffMatrix::default())
            .take(4)
            .map(|r| r.move_a)
            .collect();
        assert_eq!(moves, vec![false, false, true, true]);
    }

    #[test]
    fn test_match_totals_are_swapped_when_players_swap() {
        let a = strategy("CDDCDCCD");
        let b = strategy("DCCCDDCD");
        let payoffs = PayoffMatrix::default();
        let (score_a, score_b) = play_match(&a, &b, &payoffs, 50);
        assert_eq!(play_match(&b, &a, &payoffs, 50), (score_b, score_a));
    }
}
