//! Hook invocation with per-call rollback.
//!
//! The engine walks the active artifact list in acquisition order and
//! calls each artifact's handler for the requested point. Every call is
//! bracketed by a snapshot of the state the hook can reach; a hook that
//! returns an error has its mutations undone and is recorded as a
//! [`HookDiagnostic`]. Later artifacts always see the cumulative result
//! of the earlier ones that succeeded.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::artifacts::{ArtifactDefinition, ArtifactId, ArtifactRegistry};
use crate::core::{Hand, HookError, Modifier, Outcome, SideMap};

use super::carry::Carry;
use super::context::{CompareContext, HookPoint, MatchEndContext, MatchStartContext};

/// A hook that failed and was rolled back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HookDiagnostic {
    pub artifact: ArtifactId,
    pub point: HookPoint,
    /// Compare slot, for compare-start and compare-end failures.
    pub compare_index: Option<usize>,
    pub message: String,
}

/// Match-wide facts shared by every hook call of one match.
#[derive(Clone, Copy, Debug)]
pub struct MatchFrame<'a> {
    pub round: u32,
    pub player_hands: &'a [Hand],
    pub ai_hands: &'a [Hand],
}

impl MatchFrame<'_> {
    /// Number of compares in the match.
    #[must_use]
    pub fn hands_count(&self) -> usize {
        self.player_hands.len()
    }
}

/// Read-only facts for one compare.
///
/// Both hand sequences of `matched` must have the same length and
/// `compare_index` must be below it; hook contexts index them directly.
#[derive(Clone, Copy, Debug)]
pub struct CompareFrame<'a> {
    pub matched: MatchFrame<'a>,
    pub compare_index: usize,
    pub totals: &'a SideMap<f64>,
    pub last_result: Option<Outcome>,
}

impl<'a> CompareFrame<'a> {
    fn context<'c>(
        &self,
        modifiers: &'c mut SideMap<Modifier>,
        carry: &'c mut Carry,
    ) -> CompareContext<'c>
    where
        'a: 'c,
    {
        CompareContext {
            round: self.matched.round,
            hands_count: self.matched.hands_count(),
            compare_index: self.compare_index,
            player_hands: self.matched.player_hands,
            ai_hands: self.matched.ai_hands,
            player_hand: self.matched.player_hands[self.compare_index],
            ai_hand: self.matched.ai_hands[self.compare_index],
            modifiers,
            carry,
            totals: self.totals,
            last_result: self.last_result,
        }
    }
}

/// Runs artifact hooks for one match.
pub struct HookEngine<'a> {
    artifacts: &'a [Arc<ArtifactDefinition>],
    diagnostics: Vec<HookDiagnostic>,
}

impl<'a> HookEngine<'a> {
    /// Create an engine over the active artifacts, in acquisition order.
    #[must_use]
    pub fn new(artifacts: &'a [Arc<ArtifactDefinition>]) -> Self {
        Self {
            artifacts,
            diagnostics: Vec::new(),
        }
    }

    /// Failures recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[HookDiagnostic] {
        &self.diagnostics
    }

    /// Consume the engine, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<HookDiagnostic> {
        self.diagnostics
    }

    /// Run match-start hooks.
    pub fn match_start(&mut self, frame: MatchFrame<'_>, carry: &mut Carry, totals: &SideMap<f64>) {
        for artifact in self.artifacts {
            let Some(hook) = &artifact.match_start else {
                continue;
            };
            let snapshot = carry.clone();
            let mut ctx = MatchStartContext {
                round: frame.round,
                hands_count: frame.hands_count(),
                player_hands: frame.player_hands,
                ai_hands: frame.ai_hands,
                carry: &mut *carry,
                totals,
            };
            if let Err(err) = hook(&mut ctx) {
                *carry = snapshot;
                self.record(artifact, HookPoint::MatchStart, None, &err);
            }
        }
    }

    /// Run compare-start hooks.
    ///
    /// `observe` is called after each successful hook with the modifier
    /// pairs from just before and just after it.
    pub fn compare_start(
        &mut self,
        frame: CompareFrame<'_>,
        modifiers: &mut SideMap<Modifier>,
        carry: &mut Carry,
        mut observe: impl FnMut(&ArtifactDefinition, &SideMap<Modifier>, &SideMap<Modifier>),
    ) {
        for artifact in self.artifacts {
            let Some(hook) = &artifact.compare_start else {
                continue;
            };
            let before = *modifiers;
            let carry_snapshot = carry.clone();
            let result = hook(&mut frame.context(modifiers, carry));
            match result {
                Ok(()) => {
                    trace!(artifact = %artifact.id, index = frame.compare_index, "compare-start hook applied");
                    observe(artifact, &before, modifiers);
                }
                Err(err) => {
                    *modifiers = before;
                    *carry = carry_snapshot;
                    self.record(artifact, HookPoint::CompareStart, Some(frame.compare_index), &err);
                }
            }
        }
    }

    /// Run compare-end hooks. `frame.last_result` is this compare's result.
    pub fn compare_end(
        &mut self,
        frame: CompareFrame<'_>,
        modifiers: &mut SideMap<Modifier>,
        carry: &mut Carry,
    ) {
        for artifact in self.artifacts {
            let Some(hook) = &artifact.compare_end else {
                continue;
            };
            let before = *modifiers;
            let carry_snapshot = carry.clone();
            let result = hook(&mut frame.context(modifiers, carry));
            if let Err(err) = result {
                *modifiers = before;
                *carry = carry_snapshot;
                self.record(artifact, HookPoint::CompareEnd, Some(frame.compare_index), &err);
            }
        }
    }

    /// Run match-end hooks. These may scale the final totals.
    pub fn match_end(&mut self, frame: MatchFrame<'_>, totals: &mut SideMap<f64>) {
        for artifact in self.artifacts {
            let Some(hook) = &artifact.match_end else {
                continue;
            };
            let snapshot = *totals;
            let mut ctx = MatchEndContext {
                round: frame.round,
                hands_count: frame.hands_count(),
                player_hands: frame.player_hands,
                ai_hands: frame.ai_hands,
                totals: &mut *totals,
            };
            if let Err(err) = hook(&mut ctx) {
                *totals = snapshot;
                self.record(artifact, HookPoint::MatchEnd, None, &err);
            }
        }
    }

    fn record(
        &mut self,
        artifact: &ArtifactDefinition,
        point: HookPoint,
        compare_index: Option<usize>,
        err: &HookError,
    ) {
        warn!(artifact = %artifact.id, %point, ?compare_index, error = %err, "artifact hook failed, rolled back");
        self.diagnostics.push(HookDiagnostic {
            artifact: artifact.id.clone(),
            point,
            compare_index,
            message: err.to_string(),
        });
    }
}

/// Resolve owned ids against the catalog, keeping order.
///
/// Ids the registry does not know are skipped.
pub fn active_artifacts<'i>(
    owned: impl IntoIterator<Item = &'i ArtifactId>,
    registry: &ArtifactRegistry,
) -> Vec<Arc<ArtifactDefinition>> {
    owned
        .into_iter()
        .filter_map(|id| {
            let found = registry.artifact(id).cloned();
            if found.is_none() {
                debug!(artifact = %id, "owned artifact not in catalog, skipping");
            }
            found
        })
        .collect()
}
