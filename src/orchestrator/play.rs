//! Driving a full match.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::artifacts::ArtifactDefinition;
use crate::core::{finite_or_zero, EngineConfig, EngineError, Hand, Outcome, Side, SideMap};
use crate::hooks::{Carry, CompareFrame, HookDiagnostic, HookEngine, MatchFrame};
use crate::resolve::{resolve_compare, CompareReport};

/// How a match ended for the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Won,
    Lost,
    Drawn,
}

impl MatchResult {
    /// Compare final totals.
    #[must_use]
    pub fn of_totals(totals: &SideMap<f64>) -> Self {
        match Outcome::of_scores(totals.player, totals.ai) {
            Outcome::Player => MatchResult::Won,
            Outcome::Ai => MatchResult::Lost,
            Outcome::Tie => MatchResult::Drawn,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MatchResult::Won => "You Win!",
            MatchResult::Lost => "You Lose",
            MatchResult::Drawn => "Draw",
        };
        f.write_str(text)
    }
}

/// Inputs for one match.
#[derive(Clone, Copy, Debug)]
pub struct MatchSetup<'a> {
    pub round: u32,
    pub player_hands: &'a [Hand],
    pub ai_hands: &'a [Hand],
    /// Active artifacts in acquisition order.
    pub artifacts: &'a [Arc<ArtifactDefinition>],
}

/// Everything that happened in one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub round: u32,
    pub player_hands: Vec<Hand>,
    pub ai_hands: Vec<Hand>,
    pub compares: Vec<CompareReport>,
    /// Sum of compare scores, before match-end hooks.
    pub totals_before_end: SideMap<f64>,
    /// What match-end hooks added to each side.
    pub end_adjustment: SideMap<f64>,
    pub totals: SideMap<f64>,
    pub result: MatchResult,
    /// Hooks that failed and were rolled back.
    pub diagnostics: Vec<HookDiagnostic>,
}

impl MatchReport {
    /// Number of compares played.
    #[must_use]
    pub fn hands_count(&self) -> usize {
        self.compares.len()
    }
}

/// Resolve a whole match.
///
/// Both hand sequences must be non-empty and of equal length. Compares
/// run in slot order with a carry that lives only for this match.
#[instrument(skip_all, fields(round = setup.round, hands = setup.player_hands.len()))]
pub fn resolve_match(config: &EngineConfig, setup: MatchSetup<'_>) -> Result<MatchReport, EngineError> {
    if setup.player_hands.is_empty() {
        return Err(EngineError::EmptyMatch);
    }
    if setup.ai_hands.len() != setup.player_hands.len() {
        return Err(EngineError::HandCount {
            expected: setup.player_hands.len(),
            actual: setup.ai_hands.len(),
        });
    }

    let matched = MatchFrame {
        round: setup.round,
        player_hands: setup.player_hands,
        ai_hands: setup.ai_hands,
    };
    let mut hooks = HookEngine::new(setup.artifacts);
    let mut carry = Carry::new();
    let mut totals: SideMap<f64> = SideMap::default();
    let mut last_result = None;
    let mut compares = Vec::with_capacity(matched.hands_count());

    hooks.match_start(matched, &mut carry, &totals);

    for compare_index in 0..matched.hands_count() {
        let frame = CompareFrame {
            matched,
            compare_index,
            totals: &totals,
            last_result,
        };
        let report = resolve_compare(config, &mut hooks, frame, &mut carry);
        for side in Side::BOTH {
            totals[side] += report.scores[side];
        }
        last_result = Some(report.result);
        compares.push(report);
    }

    let totals_before_end = totals;
    hooks.match_end(matched, &mut totals);
    for side in Side::BOTH {
        if !totals[side].is_finite() {
            warn!(%side, total = totals[side], "non-finite total, using 0");
            totals[side] = 0.0;
        }
    }
    let end_adjustment = SideMap::from_fn(|side| finite_or_zero(totals[side] - totals_before_end[side]));
    let result = MatchResult::of_totals(&totals);
    let diagnostics = hooks.into_diagnostics();

    debug!(
        player = totals.player,
        ai = totals.ai,
        ?result,
        failed_hooks = diagnostics.len(),
        "match resolved"
    );

    Ok(MatchReport {
        round: setup.round,
        player_hands: setup.player_hands.to_vec(),
        ai_hands: setup.ai_hands.to_vec(),
        compares,
        totals_before_end,
        end_adjustment,
        totals,
        result,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{standard_catalog, ArtifactId, Rarity};
    use crate::core::HookError;
    use crate::hooks::active_artifacts;

    fn artifacts(ids: &[&str]) -> Vec<Arc<ArtifactDefinition>> {
        let catalog = standard_catalog();
        let owned: Vec<ArtifactId> = ids.iter().map(|&id| ArtifactId::new(id)).collect();
        active_artifacts(&owned, &catalog.artifacts)
    }

    fn play(round: u32, player: &[Hand], ai: &[Hand], active: &[Arc<ArtifactDefinition>]) -> MatchReport {
        let config = EngineConfig::default();
        resolve_match(
            &config,
            MatchSetup {
                round,
                player_hands: player,
                ai_hands: ai,
                artifacts: active,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_hand_counts() {
        let config = EngineConfig::default();
        let empty = resolve_match(
            &config,
            MatchSetup {
                round: 1,
                player_hands: &[],
                ai_hands: &[],
                artifacts: &[],
            },
        );
        assert_eq!(empty.unwrap_err(), EngineError::EmptyMatch);

        let mismatched = resolve_match(
            &config,
            MatchSetup {
                round: 2,
                player_hands: &[Hand::Rock, Hand::Rock],
                ai_hands: &[Hand::Rock],
                artifacts: &[],
            },
        );
        assert_eq!(
            mismatched.unwrap_err(),
            EngineError::HandCount { expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_totals_accumulate() {
        let report = play(
            1,
            &[Hand::Rock, Hand::Paper],
            &[Hand::Scissors, Hand::Scissors],
            &[],
        );

        assert_eq!(report.totals, SideMap { player: 250.0, ai: 250.0 });
        assert_eq!(report.result, MatchResult::Drawn);
        assert_eq!(report.end_adjustment, SideMap::default());
    }

    #[test]
    fn test_counter_surge_carries_to_next_compare() {
        let active = artifacts(&["counter-surge"]);
        let report = play(1, &[Hand::Rock, Hand::Rock], &[Hand::Paper, Hand::Rock], &active);

        assert_eq!(report.compares[0].result, Outcome::Ai);
        // 100 × (1 + 0.5) on the second compare.
        assert_eq!(report.compares[1].scores.player, 150.0);
        assert_eq!(report.compares[1].events[0].source.display_name(), "Counter Surge");
    }

    #[test]
    fn test_opening_gambit_only_first_slot() {
        let active = artifacts(&["opening-gambit"]);
        let report = play(1, &[Hand::Rock, Hand::Rock], &[Hand::Rock, Hand::Rock], &active);

        assert_eq!(report.compares[0].scores.player, 150.0);
        assert_eq!(report.compares[1].scores.player, 100.0);
    }

    #[test]
    fn test_win_streak_resets_on_loss() {
        let active = artifacts(&["win-streaker"]);
        let player = [Hand::Rock, Hand::Rock, Hand::Rock, Hand::Rock];
        let ai = [Hand::Scissors, Hand::Scissors, Hand::Paper, Hand::Rock];
        let report = play(1, &player, &ai, &active);

        assert_eq!(report.compares[1].end.player.mult, (1.0 + 0.15) * 1.5);
        assert!((report.compares[2].end.player.mult - 1.3).abs() < 1e-9);
        assert_eq!(report.compares[3].end.player.mult, 1.0);
    }

    #[test]
    fn test_match_end_adjustment() {
        let active = artifacts(&["rock-dividend"]);
        let report = play(1, &[Hand::Rock, Hand::Rock], &[Hand::Rock, Hand::Rock], &active);

        assert_eq!(report.totals_before_end, SideMap { player: 200.0, ai: 200.0 });
        assert!((report.totals.player - 212.0).abs() < 1e-9);
        assert!((report.end_adjustment.player - 12.0).abs() < 1e-9);
        assert_eq!(report.end_adjustment.ai, 0.0);
        assert_eq!(report.result, MatchResult::Won);
    }

    #[test]
    fn test_failing_hook_does_not_abort() {
        let flaky = Arc::new(
            ArtifactDefinition::new("flaky", "Flaky", Rarity::Common)
                .on_compare_start(|ctx| {
                    if ctx.compare_index == 1 {
                        return Err(HookError::Failed("slot 1".to_string()));
                    }
                    ctx.player_mut().base += 10.0;
                    Ok(())
                }),
        );
        let report = play(1, &[Hand::Rock, Hand::Rock], &[Hand::Rock, Hand::Rock], &[flaky]);

        assert_eq!(report.compares[0].scores.player, 110.0);
        assert_eq!(report.compares[1].scores.player, 100.0);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].compare_index, Some(1));
    }

    #[test]
    fn test_result_display() {
        assert_eq!(MatchResult::Won.to_string(), "You Win!");
        assert_eq!(MatchResult::of_totals(&SideMap { player: 1.0, ai: 2.0 }), MatchResult::Lost);
    }
}
