//! Hands and the beats relation.
//!
//! ## Hand
//!
//! The closed set of playable hands. Every compare pits one player hand
//! against one AI hand.
//!
//! ## CraftedHandId
//!
//! Opaque identifier produced by crafting a recipe. The engine records
//! crafted hands but defines no compare semantics for them yet, so they
//! are a separate type and cannot be played.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::EngineError;
use super::rng::GameRng;

/// A playable hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    /// All playable hands, in display order.
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    /// The hand this one defeats.
    ///
    /// ```
    /// use handforge::Hand;
    ///
    /// assert_eq!(Hand::Rock.defeats(), Hand::Scissors);
    /// assert!(Hand::Paper.beats(Hand::Rock));
    /// ```
    #[must_use]
    pub const fn defeats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Paper => Hand::Rock,
            Hand::Scissors => Hand::Paper,
        }
    }

    /// Does this hand beat `other`?
    #[must_use]
    pub fn beats(self, other: Hand) -> bool {
        self.defeats() == other
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Hand::Rock => "Rock",
            Hand::Paper => "Paper",
            Hand::Scissors => "Scissors",
        }
    }

    /// Pick one hand uniformly at random.
    pub fn random(rng: &mut GameRng) -> Hand {
        Hand::ALL[rng.gen_range_usize(0..Hand::ALL.len())]
    }

    /// Fill `count` slots uniformly at random.
    pub fn random_sequence(count: usize, rng: &mut GameRng) -> Vec<Hand> {
        (0..count).map(|_| Hand::random(rng)).collect()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hand {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Hand::Rock),
            "paper" => Ok(Hand::Paper),
            "scissors" => Ok(Hand::Scissors),
            _ => Err(EngineError::UnknownHand(s.to_string())),
        }
    }
}

/// Per-hand tallies for one side's hand sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCounts {
    pub rock: usize,
    pub paper: usize,
    pub scissors: usize,
}

impl HandCounts {
    /// Count the hands in a sequence.
    #[must_use]
    pub fn of(hands: &[Hand]) -> Self {
        hands.iter().fold(Self::default(), |mut acc, hand| {
            match hand {
                Hand::Rock => acc.rock += 1,
                Hand::Paper => acc.paper += 1,
                Hand::Scissors => acc.scissors += 1,
            }
            acc
        })
    }

    /// Count for a single hand.
    #[must_use]
    pub fn get(&self, hand: Hand) -> usize {
        match hand {
            Hand::Rock => self.rock,
            Hand::Paper => self.paper,
            Hand::Scissors => self.scissors,
        }
    }

    /// Number of distinct hands played at least once.
    #[must_use]
    pub fn distinct(&self) -> usize {
        [self.rock, self.paper, self.scissors]
            .iter()
            .filter(|&&n| n > 0)
            .count()
    }
}

/// Identifier of a crafted hand (recipe output).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CraftedHandId(pub String);

impl CraftedHandId {
    /// Create a crafted hand identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CraftedHandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Crafted({})", self.0)
    }
}
