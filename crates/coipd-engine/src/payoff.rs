use serde::{Deserialize, Serialize};

/// Payoff table of the Prisoner's Dilemma.
///
/// The four constants are named after their classic roles:
///
/// | Player A    | Player B    | Payoff (A, B)             |
/// |-------------|-------------|---------------------------|
/// | cooperate   | cooperate   | (`reward`, `reward`)      |
/// | cooperate   | defect      | (`sucker`, `temptation`)  |
/// | defect      | cooperate   | (`temptation`, `sucker`)  |
/// | defect      | defect      | (`punishment`, `punishment`) |
///
/// Payoffs are unsigned, so accumulated scores are never negative. The table is
/// not required to form a real dilemma; see [`PayoffMatrix::is_dilemma`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayoffMatrix {
    /// R: both players cooperate
    pub reward: u32,
    /// S: the player cooperates while the opponent defects
    pub sucker: u32,
    /// T: the player defects while the opponent cooperates
    pub temptation: u32,
    /// P: both players defect
    pub punishment: u32,
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl PayoffMatrix {
    /// The conventional payoffs `R = 3`, `S = 0`, `T = 5`, `P = 1`.
    pub const STANDARD: Self = Self::new(3, 0, 5, 1);

    #[must_use]
    pub const fn new(reward: u32, sucker: u32, temptation: u32, punishment: u32) -> Self {
        Self {
            reward,
            sucker,
            temptation,
            punishment,
        }
    }

    /// Resolves one round and returns `(score_a, score_b)`.
    ///
    /// The defector of a mixed round earns the temptation payoff, so
    /// `play(false, true)` is `(T, S)` and `play(true, false)` is `(S, T)`.
    /// This is the reverse of a table that lists `play(true, false)` as `(T, S)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use coipd_engine::PayoffMatrix;
    ///
    /// let payoffs = PayoffMatrix::default();
    /// assert_eq!(payoffs.play(true, true), (3, 3));
    /// assert_eq!(payoffs.play(false, true), (5, 0));
    /// ```
    #[must_use]
    pub fn play(&self, move_a: bool, move_b: bool) -> (u32, u32) {
        match (move_a, move_b) {
            (true, true) => (self.reward, self.reward),
            (true, false) => (self.sucker, self.temptation),
            (false, true) => (self.temptation, self.sucker),
            (false, false) => (self.punishment, self.punishment),
        }
    }

    /// Returns `true` if the payoffs satisfy `T > R > P > S`.
    ///
    /// Other orderings are still playable, they just do not describe a
    /// Prisoner's Dilemma.
    #[must_use]
    pub fn is_dilemma(&self) -> bool {
        self.temptation > self.reward && self.reward > self.punishment && self.punishment > self.sucker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVES: [bool; 2] = [true, false];

    #[test]
    fn test_standard_payoffs() {
        let payoffs = PayoffMatrix::default();
        assert_eq!(payoffs.play(true, true), (3, 3));
        assert_eq!(payoffs.play(false, false), (1, 1));
        assert_eq!(payoffs.play(true, false), (0, 5));
        assert_eq!(payoffs.play(false, true), (5, 0));
    }

    #[test]
    fn test_play_is_symmetric() {
        let payoffs = PayoffMatrix::new(4, 1, 7, 2);
        for a in MOVES {
            for b in MOVES {
                let (score_a, score_b) = payoffs.play(a, b);
                assert_eq!(payoffs.play(b, a), (score_b, score_a));
            }
        }
    }

    #[test]
    fn test_is_dilemma() {
        assert!(PayoffMatrix::STANDARD.is_dilemma());
        assert!(!PayoffMatrix::new(5, 0, 3, 1).is_dilemma());
        assert!(!PayoffMatrix::new(3, 1, 5, 1).is_dilemma());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(PayoffMatrix::STANDARD).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"reward": 3, "sucker": 0, "temptation": 5, "punishment": 1})
        );
    }
}
