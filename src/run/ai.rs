//! AI hand selection.

use crate::core::{GameRng, Hand};

/// Chooses the AI's hands for a match.
///
/// Called once per lock-in with the run's AI stream. Implementations
/// must return exactly `count` hands.
pub trait AiPolicy: Send + Sync {
    /// Pick `count` hands for the match in `round`.
    fn choose_hands(&self, round: u32, count: usize, rng: &mut GameRng) -> Vec<Hand>;
}

/// Uniform random AI.
///
/// Every slot is drawn independently from the three hands.
#[derive(Clone, Debug, Default)]
pub struct UniformAi;

impl AiPolicy for UniformAi {
    fn choose_hands(&self, _round: u32, count: usize, rng: &mut GameRng) -> Vec<Hand> {
        Hand::random_sequence(count, rng)
    }
}

/// Replays a fixed sequence, cycling when the match is longer.
///
/// Every match starts again from the front of the script.
#[derive(Clone, Debug)]
pub struct ScriptedAi {
    script: Vec<Hand>,
}

impl ScriptedAi {
    /// Create a scripted AI. An empty script plays Rock.
    #[must_use]
    pub fn new(script: Vec<Hand>) -> Self {
        let script = if script.is_empty() { vec![Hand::Rock] } else { script };
        Self { script }
    }
}

impl AiPolicy for ScriptedAi {
    fn choose_hands(&self, _round: u32, count: usize, _rng: &mut GameRng) -> Vec<Hand> {
        self.script.iter().copied().cycle().take(count).collect()
    }
}
