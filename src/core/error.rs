//! Engine errors.
//!
//! Every public operation that can be rejected returns [`EngineError`]
//! and leaves state untouched when it does. Artifact hooks return
//! [`HookError`], which never escapes the hook engine.

use crate::run::Phase;

/// Precondition failures and configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Hand name is not one of Rock, Paper, Scissors.
    #[error("unknown hand: {0}")]
    UnknownHand(String),

    /// Wrong number of hands for the match.
    #[error("expected {expected} hands, got {actual}")]
    HandCount { expected: usize, actual: usize },

    /// A match must have at least one compare.
    #[error("a match needs at least one hand")]
    EmptyMatch,

    /// Operation rejected while a match is resolving.
    #[error("match in progress")]
    MatchInProgress,

    /// Operation not valid in the current phase.
    #[error("cannot {action} while {phase:?}")]
    InvalidPhase { action: &'static str, phase: Phase },

    /// Reward claim without a pending offer, or index out of range.
    #[error("no reward at index {0}")]
    NoSuchReward(usize),

    /// Recipe id not in the catalog.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    /// Recipe exists but has not been learned.
    #[error("recipe not learned: {0}")]
    RecipeNotKnown(String),

    /// Recipe requirements not met.
    #[error("missing artifacts for {recipe}: {missing:?}")]
    MissingRequirements { recipe: String, missing: Vec<String> },

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Failure reported by an artifact hook.
///
/// The hook engine rolls back the hook's mutations and records a
/// diagnostic; resolution continues.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HookError {
    /// The hook could not apply its effect.
    #[error("hook failed: {0}")]
    Failed(String),

    /// The hook found a carry value it cannot use.
    #[error("bad carry value for {key}: {value}")]
    BadCarry { key: String, value: f64 },
}

/// Result type returned by artifact hooks.
pub type HookResult = Result<(), HookError>;
