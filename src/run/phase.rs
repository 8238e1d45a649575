//! Match phases of a run.

use serde::{Deserialize, Serialize};

use crate::orchestrator::MatchResult;

/// Where a run is in the match cycle.
///
/// `Idle → InProgress → {Won, Lost, Drawn} → Idle`. Won returns to Idle
/// through a reward claim or skip, Drawn through a retry, Lost only
/// through a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to lock in hands.
    #[default]
    Idle,
    /// A match has been resolved and is being revealed.
    InProgress,
    Won,
    Lost,
    Drawn,
}

impl Phase {
    /// Phase a finished match leads to.
    #[must_use]
    pub const fn after(result: MatchResult) -> Self {
        match result {
            MatchResult::Won => Phase::Won,
            MatchResult::Lost => Phase::Lost,
            MatchResult::Drawn => Phase::Drawn,
        }
    }
}
