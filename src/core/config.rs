//! Engine configuration.
//!
//! All tunable constants live in [`EngineConfig`]. Defaults reproduce the
//! standard ruleset; games and tests override pieces with the `with_*`
//! builders or load a partial JSON document with [`EngineConfig::from_json`].

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::side::Modifier;

/// Round-indexed handicap added to the AI's modifiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiScaling {
    /// Disable to play every round at round-1 difficulty.
    pub enabled: bool,

    /// Base added to the AI per scaling level.
    pub base_per_match: f64,

    /// Multiplier added (additively) to the AI per scaling level.
    pub mult_add_per_match: f64,
}

impl Default for AiScaling {
    fn default() -> Self {
        Self {
            enabled: true,
            base_per_match: 10.0,
            mult_add_per_match: 0.05,
        }
    }
}

impl AiScaling {
    /// Scaling level for a round: round 1 is level 0.
    #[must_use]
    pub fn level(&self, round: u32) -> u32 {
        if self.enabled {
            round.saturating_sub(1)
        } else {
            0
        }
    }
}

/// Reveal pacing in milliseconds.
///
/// Only the reveal timeline reads these; they never influence scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pace {
    pub chip_delay_ms: u64,
    pub number_ms: u64,
    pub number_ms_mult: u64,
    pub score_reveal_delay_ms: u64,
    pub between_sides_ms: u64,
    pub between_compares_ms: u64,
    pub totals_ms: u64,
    /// Hold after the compare verdict is shown.
    pub verdict_hold_ms: u64,
    /// Extra time the end-of-match bonus animation gets over `totals_ms`.
    pub end_bonus_extra_ms: u64,
}

impl Default for Pace {
    fn default() -> Self {
        Self {
            chip_delay_ms: 240,
            number_ms: 800,
            number_ms_mult: 900,
            score_reveal_delay_ms: 420,
            between_sides_ms: 360,
            between_compares_ms: 700,
            totals_ms: 800,
            verdict_hold_ms: 450,
            end_bonus_extra_ms: 200,
        }
    }
}

impl Pace {
    /// Zero pacing, for headless consumers.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            chip_delay_ms: 0,
            number_ms: 0,
            number_ms_mult: 0,
            score_reveal_delay_ms: 0,
            between_sides_ms: 0,
            between_compares_ms: 0,
            totals_ms: 0,
            verdict_hold_ms: 0,
            end_bonus_extra_ms: 0,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Modifier pair both sides start every compare with.
    pub starting: Modifier,

    /// Factor applied to the RPS winner's multiplier.
    pub rps_win_factor: f64,

    /// Changes at or below this magnitude are treated as no change.
    pub epsilon: f64,

    /// AI difficulty scaling.
    pub ai_scaling: AiScaling,

    /// Maximum reward candidates offered after a win.
    pub reward_offer_size: usize,

    /// Reveal pacing.
    pub pace: Pace,

    /// Seed for AI hands and reward draws.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting: Modifier::new(100.0, 1.0),
            rps_win_factor: 1.5,
            epsilon: 1e-9,
            ai_scaling: AiScaling::default(),
            reward_offer_size: 3,
            pace: Pace::default(),
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(EngineError::Config(format!("epsilon must be finite and >= 0, got {}", self.epsilon)));
        }
        if !self.rps_win_factor.is_finite() {
            return Err(EngineError::Config("rps_win_factor must be finite".to_string()));
        }
        if !(self.starting.base.is_finite() && self.starting.mult.is_finite()) {
            return Err(EngineError::Config("starting modifier must be finite".to_string()));
        }
        Ok(())
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the AI scaling.
    #[must_use]
    pub fn with_ai_scaling(mut self, scaling: AiScaling) -> Self {
        self.ai_scaling = scaling;
        self
    }

    /// Disable AI scaling.
    #[must_use]
    pub fn without_ai_scaling(mut self) -> Self {
        self.ai_scaling.enabled = false;
        self
    }

    /// Set the reward offer size.
    #[must_use]
    pub fn with_reward_offer_size(mut self, size: usize) -> Self {
        self.reward_offer_size = size;
        self
    }

    /// Set the reveal pacing.
    #[must_use]
    pub fn with_pace(mut self, pace: Pace) -> Self {
        self.pace = pace;
        self
    }
}
