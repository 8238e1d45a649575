//! Sides of a compare and per-side data storage.
//!
//! ## Side
//!
//! Every compare has exactly two sides: the player and the AI.
//!
//! ## SideMap
//!
//! Per-side storage with `Index<Side>` access. Used for modifier pairs,
//! scores and running totals.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::hand::Hand;

/// One side of a compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Ai];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => f.write_str("Player"),
            Side::Ai => f.write_str("AI"),
        }
    }
}

/// Who came out ahead: in an RPS matchup or on score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Player,
    Ai,
    Tie,
}

impl Outcome {
    /// Outcome of the raw rock-paper-scissors matchup.
    #[must_use]
    pub fn of_hands(player: Hand, ai: Hand) -> Self {
        if player == ai {
            Outcome::Tie
        } else if player.beats(ai) {
            Outcome::Player
        } else {
            Outcome::Ai
        }
    }

    /// Outcome of a score comparison. Exact equality is a tie.
    #[must_use]
    pub fn of_scores(player: f64, ai: f64) -> Self {
        if player > ai {
            Outcome::Player
        } else if player < ai {
            Outcome::Ai
        } else {
            Outcome::Tie
        }
    }

    /// The winning side, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Player => Some(Side::Player),
            Outcome::Ai => Some(Side::Ai),
            Outcome::Tie => None,
        }
    }
}

/// Base and multiplier for one side of one compare.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub base: f64,
    pub mult: f64,
}

impl Modifier {
    /// Create a modifier pair.
    #[must_use]
    pub const fn new(base: f64, mult: f64) -> Self {
        Self { base, mult }
    }

    /// Raw `base × mult`. May be non-finite; callers normalize.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.base * self.mult
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Self::new(100.0, 1.0)
    }
}

/// Per-side storage.
///
/// ## Example
///
/// ```
/// use handforge::{Side, SideMap};
///
/// let mut totals: SideMap<f64> = SideMap::default();
/// totals[Side::Player] += 150.0;
/// assert_eq!(totals.player, 150.0);
/// assert_eq!(totals[Side::Ai], 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    pub player: T,
    pub ai: T,
}

impl<T> SideMap<T> {
    /// Create with explicit values.
    pub const fn new(player: T, ai: T) -> Self {
        Self { player, ai }
    }

    /// Create with the same value on both sides.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            player: value.clone(),
            ai: value,
        }
    }

    /// Build each side from a factory.
    pub fn from_fn(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            player: factory(Side::Player),
            ai: factory(Side::Ai),
        }
    }

    /// Map each side's value.
    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SideMap<U> {
        SideMap {
            player: f(Side::Player, &self.player),
            ai: f(Side::Ai, &self.ai),
        }
    }

    /// Iterate `(side, value)` pairs, player first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Player, &self.player), (Side::Ai, &self.ai)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rps_outcome() {
        assert_eq!(Outcome::of_hands(Hand::Rock, Hand::Scissors), Outcome::Player);
        assert_eq!(Outcome::of_hands(Hand::Rock, Hand::Paper), Outcome::Ai);
        assert_eq!(Outcome::of_hands(Hand::Paper, Hand::Paper), Outcome::Tie);
    }

    #[test]
    fn test_score_outcome() {
        assert_eq!(Outcome::of_scores(200.0, 150.0), Outcome::Player);
        assert_eq!(Outcome::of_scores(100.0, 150.0), Outcome::Ai);
        assert_eq!(Outcome::of_scores(150.0, 150.0), Outcome::Tie);
    }

    #[test]
    fn test_winner() {
        assert_eq!(Outcome::Player.winner(), Some(Side::Player));
        assert_eq!(Outcome::Ai.winner(), Some(Side::Ai));
        assert_eq!(Outcome::Tie.winner(), None);
        assert_eq!(Side::Player.opponent(), Side::Ai);
    }

    #[test]
    fn test_modifier_default() {
        let m = Modifier::default();
        assert_eq!(m.base, 100.0);
        assert_eq!(m.mult, 1.0);
        assert_eq!(m.score(), 100.0);
    }

    #[test]
    fn test_side_map_indexing() {
        let mut mods = SideMap::with_value(Modifier::default());
        mods[Side::Ai].base += 10.0;

        assert_eq!(mods.player.base, 100.0);
        assert_eq!(mods[Side::Ai].base, 110.0);

        let scores = mods.map(|_, m| m.score());
        assert_eq!(scores, SideMap::new(100.0, 110.0));
    }

    #[test]
    fn test_side_map_iter_order() {
        let map = SideMap::from_fn(|side| side == Side::Player);
        let sides: Vec<_> = map.iter().map(|(side, _)| side).collect();
        assert_eq!(sides, vec![Side::Player, Side::Ai]);
    }
}
