//! Resolution of a single hand-vs-hand compare.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{exceeds, finite_or_zero, EngineConfig, Hand, Modifier, Outcome, Side, SideMap};
use crate::hooks::{Carry, CompareFrame, HookEngine};

use super::event::{diff_side, CompareEvent, EventSource, Op, Stat};

/// Everything that happened in one compare.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    /// 0-based slot.
    pub index: usize,
    pub hands: SideMap<Hand>,
    /// Modifier pairs before any hook ran.
    pub start: SideMap<Modifier>,
    /// Modifier pairs the scores were computed from.
    pub end: SideMap<Modifier>,
    pub scores: SideMap<f64>,
    /// Hook events in invocation order, then AI scaling, then the RPS win.
    pub events: Vec<CompareEvent>,
    /// Raw rock-paper-scissors outcome.
    pub rps: Outcome,
    /// Score-based result. May disagree with `rps`.
    pub result: Outcome,
}

impl CompareReport {
    /// Events for one side, in order.
    pub fn events_for(&self, side: Side) -> impl Iterator<Item = &CompareEvent> {
        self.events.iter().filter(move |e| e.side == side)
    }
}

/// Resolve one compare.
///
/// Order: reset both sides, compare-start hooks, AI scaling, RPS win
/// factor, score, result, compare-end hooks. `frame.last_result` is the
/// previous compare's result; compare-end hooks see this one's, and
/// running totals that already include this compare's scores.
///
/// `frame.compare_index` must be a valid slot of both hand sequences.
pub fn resolve_compare(
    config: &EngineConfig,
    hooks: &mut HookEngine<'_>,
    frame: CompareFrame<'_>,
    carry: &mut Carry,
) -> CompareReport {
    let index = frame.compare_index;
    debug_assert_eq!(
        frame.matched.player_hands.len(),
        frame.matched.ai_hands.len(),
        "hand sequences must have equal length"
    );
    debug_assert!(index < frame.matched.hands_count(), "compare index {} out of range", index);
    let hands = SideMap {
        player: frame.matched.player_hands[index],
        ai: frame.matched.ai_hands[index],
    };
    let epsilon = config.epsilon;

    let start = SideMap::with_value(config.starting);
    let mut modifiers = start;
    let mut events = Vec::new();

    hooks.compare_start(frame, &mut modifiers, carry, |artifact, before, after| {
        let source = EventSource::artifact(artifact);
        for side in Side::BOTH {
            diff_side(side, before[side], after[side], epsilon, &source, &mut events);
        }
    });

    let level = config.ai_scaling.level(frame.matched.round);
    if level > 0 {
        let ai = &mut modifiers[Side::Ai];
        let base_add = f64::from(level) * config.ai_scaling.base_per_match;
        let mult_add = f64::from(level) * config.ai_scaling.mult_add_per_match;
        if exceeds(base_add, epsilon) {
            ai.base += base_add;
            events.push(CompareEvent {
                side: Side::Ai,
                stat: Stat::Base,
                op: Op::Add,
                amount: base_add,
                after: ai.base,
                source: EventSource::AiScaling,
            });
        }
        if exceeds(mult_add, epsilon) {
            ai.mult += mult_add;
            events.push(CompareEvent {
                side: Side::Ai,
                stat: Stat::Mult,
                op: Op::Add,
                amount: mult_add,
                after: ai.mult,
                source: EventSource::AiScaling,
            });
        }
    }

    let rps = Outcome::of_hands(hands.player, hands.ai);
    if let Some(winner) = rps.winner() {
        let side = &mut modifiers[winner];
        side.mult *= config.rps_win_factor;
        events.push(CompareEvent {
            side: winner,
            stat: Stat::Mult,
            op: Op::Multiply,
            amount: config.rps_win_factor,
            after: side.mult,
            source: EventSource::RpsWin,
        });
    }

    let scores = modifiers.map(|side, m| {
        let raw = m.score();
        if !raw.is_finite() {
            warn!(%side, index, base = m.base, mult = m.mult, "non-finite score, using 0");
        }
        finite_or_zero(raw)
    });
    let result = Outcome::of_scores(scores.player, scores.ai);
    let end = modifiers;

    trace!(
        index,
        player = %hands.player,
        ai = %hands.ai,
        player_score = scores.player,
        ai_score = scores.ai,
        ?rps,
        ?result,
        events = events.len(),
        "compare resolved"
    );

    let totals_after = SideMap::from_fn(|side| frame.totals[side] + scores[side]);
    let end_frame = CompareFrame {
        matched: frame.matched,
        compare_index: index,
        totals: &totals_after,
        last_result: Some(result),
    };
    hooks.compare_end(end_frame, &mut modifiers, carry);

    CompareReport {
        index,
        hands,
        start,
        end,
        scores,
        events,
        rps,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{ArtifactDefinition, Rarity};
    use crate::hooks::MatchFrame;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn resolve(
        config: &EngineConfig,
        artifacts: &[Arc<ArtifactDefinition>],
        round: u32,
        player: Hand,
        ai: Hand,
    ) -> CompareReport {
        let player_hands = [player];
        let ai_hands = [ai];
        let totals = SideMap::default();
        let mut engine = HookEngine::new(artifacts);
        let frame = CompareFrame {
            matched: MatchFrame {
                round,
                player_hands: &player_hands,
                ai_hands: &ai_hands,
            },
            compare_index: 0,
            totals: &totals,
            last_result: None,
        };
        resolve_compare(config, &mut engine, frame, &mut Carry::new())
    }

    #[test]
    fn test_plain_rock_beats_scissors() {
        let report = resolve(&EngineConfig::default(), &[], 1, Hand::Rock, Hand::Scissors);

        assert_eq!(report.scores, SideMap { player: 150.0, ai: 100.0 });
        assert_eq!(report.rps, Outcome::Player);
        assert_eq!(report.result, Outcome::Player);
        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].source, EventSource::RpsWin);
        assert_eq!(report.start, SideMap::with_value(Modifier::new(100.0, 1.0)));
    }

    #[test]
    fn test_tie_has_no_rps_event() {
        let report = resolve(&EngineConfig::default(), &[], 1, Hand::Paper, Hand::Paper);
        assert!(report.events.is_empty());
        assert_eq!(report.result, Outcome::Tie);
    }

    #[test]
    fn test_ai_scaling_events() {
        let report = resolve(&EngineConfig::default(), &[], 4, Hand::Rock, Hand::Rock);

        let scaling: Vec<_> = report.events_for(Side::Ai).collect();
        assert_eq!(scaling.len(), 2);
        assert_eq!(scaling[0].stat, Stat::Base);
        assert!((scaling[0].amount - 30.0).abs() < 1e-9);
        assert_eq!(scaling[1].stat, Stat::Mult);
        assert!((scaling[1].amount - 0.15).abs() < 1e-9);
        assert_eq!(report.result, Outcome::Ai);
    }

    #[test]
    fn test_score_result_can_disagree_with_rps() {
        let gauntlet = Arc::new(
            ArtifactDefinition::new("granite-gauntlet", "Granite Gauntlet", Rarity::Common)
                .on_compare_start(|ctx| {
                    if ctx.player_hand == Hand::Rock {
                        ctx.player_mut().base += 100.0;
                    }
                    Ok(())
                }),
        );
        let report = resolve(&EngineConfig::default(), &[gauntlet], 1, Hand::Rock, Hand::Paper);

        assert_eq!(report.scores, SideMap { player: 200.0, ai: 150.0 });
        assert_eq!(report.rps, Outcome::Ai);
        assert_eq!(report.result, Outcome::Player);
        assert_eq!(report.events[0].source.display_name(), "Granite Gauntlet");
        assert_eq!(report.events.last().map(|e| &e.source), Some(&EventSource::RpsWin));
    }

    #[test]
    fn test_non_finite_score_is_zero() {
        let blowup = Arc::new(
            ArtifactDefinition::new("blowup", "Blowup", Rarity::Rare).on_compare_start(|ctx| {
                ctx.player_mut().mult = f64::INFINITY;
                Ok(())
            }),
        );
        let report = resolve(&EngineConfig::default(), &[blowup], 1, Hand::Rock, Hand::Rock);
        assert_eq!(report.scores.player, 0.0);
        assert_eq!(report.result, Outcome::Ai);
    }

    #[test]
    fn test_compare_end_sees_updated_totals() {
        let recorder = Arc::new(
            ArtifactDefinition::new("ledger", "Ledger", Rarity::Common).on_compare_end(|ctx| {
                ctx.carry.set("player", ctx.totals.player);
                ctx.carry.set("ai", ctx.totals.ai);
                Ok(())
            }),
        );
        let artifacts = [recorder];
        let hands = [Hand::Rock, Hand::Rock];
        let ai_hands = [Hand::Scissors, Hand::Scissors];
        let totals = SideMap { player: 150.0, ai: 100.0 };
        let mut carry = Carry::new();
        let mut engine = HookEngine::new(&artifacts);
        let frame = CompareFrame {
            matched: MatchFrame {
                round: 1,
                player_hands: &hands,
                ai_hands: &ai_hands,
            },
            compare_index: 1,
            totals: &totals,
            last_result: Some(Outcome::Player),
        };

        resolve_compare(&EngineConfig::default(), &mut engine, frame, &mut carry);

        assert_eq!(carry.get("player"), 300.0);
        assert_eq!(carry.get("ai"), 200.0);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_mismatched_hand_sequences_panic() {
        let hands = [Hand::Rock, Hand::Paper];
        let ai_hands = [Hand::Rock];
        let totals = SideMap::default();
        let frame = CompareFrame {
            matched: MatchFrame {
                round: 1,
                player_hands: &hands,
                ai_hands: &ai_hands,
            },
            compare_index: 0,
            totals: &totals,
            last_result: None,
        };
        resolve_compare(&EngineConfig::default(), &mut HookEngine::new(&[]), frame, &mut Carry::new());
    }

    fn any_hand() -> impl Strategy<Value = Hand> {
        prop_oneof![Just(Hand::Rock), Just(Hand::Paper), Just(Hand::Scissors)]
    }

    proptest! {
        #[test]
        fn prop_resolution_is_deterministic(
            round in 1u32..20,
            player in any_hand(),
            ai in any_hand(),
        ) {
            let artifacts: Vec<_> = crate::artifacts::standard_artifacts()
                .into_iter()
                .map(Arc::new)
                .collect();
            let config = EngineConfig::default();
            let a = resolve(&config, &artifacts, round, player, ai);
            let b = resolve(&config, &artifacts, round, player, ai);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_rps_win_is_last_for_winner(
            round in 1u32..20,
            player in any_hand(),
            ai in any_hand(),
        ) {
            let report = resolve(&EngineConfig::default(), &[], round, player, ai);
            match Outcome::of_hands(player, ai).winner() {
                Some(side) => {
                    let last = report.events_for(side).last().cloned();
                    prop_assert_eq!(last.map(|e| e.source), Some(EventSource::RpsWin));
                }
                None => prop_assert!(report.events.iter().all(|e| e.source != EventSource::RpsWin)),
            }
        }

        #[test]
        fn prop_tiny_changes_emit_nothing(delta in -1e-10f64..1e-10) {
            let nudge = Arc::new(
                ArtifactDefinition::new("nudge", "Nudge", Rarity::Common).on_compare_start(move |ctx| {
                    ctx.player_mut().base += delta;
                    ctx.player_mut().mult += delta;
                    Ok(())
                }),
            );
            let report = resolve(&EngineConfig::default(), &[nudge], 1, Hand::Rock, Hand::Rock);
            prop_assert!(report.events.is_empty());
        }
    }
}
