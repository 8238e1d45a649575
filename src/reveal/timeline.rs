//! Timed reveal cues for a resolved match.

use serde::{Deserialize, Serialize};

use crate::core::{exceeds, Outcome, Pace, Side, SideMap};
use crate::orchestrator::{MatchReport, MatchResult};
use crate::resolve::Stat;

/// Something the presentation should show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealCue {
    /// A new compare starts; both sides show their starting pair.
    CompareShown { index: usize },
    /// Animate one event of `compares[index].events[event]`.
    Event { index: usize, event: usize, side: Side },
    /// Show one side's compare score.
    Score { index: usize, side: Side, score: f64 },
    /// Show the score-based verdict for the compare.
    Verdict { index: usize, result: Outcome },
    /// Roll one side's running total up to `total`.
    Total { index: usize, side: Side, total: f64 },
    /// Match-end hooks raised the player's total.
    EndBonus { amount: f64 },
    /// Final result.
    Result { result: MatchResult },
}

/// A cue with its absolute start time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedCue {
    pub at_ms: u64,
    pub duration_ms: u64,
    pub cue: RevealCue,
}

/// Ordered cues plus the total running time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevealTimeline {
    pub cues: Vec<TimedCue>,
    pub total_ms: u64,
}

impl RevealTimeline {
    /// Lay out the reveal of `report` with the given pacing.
    ///
    /// The timeline is derived data: dropping it, or playing it at any
    /// speed, has no effect on the run.
    #[must_use]
    pub fn build(report: &MatchReport, pace: &Pace) -> Self {
        let mut timeline = Self::default();
        let mut running: SideMap<f64> = SideMap::default();

        for compare in &report.compares {
            let index = compare.index;
            timeline.push(0, RevealCue::CompareShown { index });

            for (event, e) in compare.events.iter().enumerate() {
                let duration = match e.stat {
                    Stat::Base => pace.number_ms,
                    Stat::Mult => pace.number_ms_mult,
                };
                timeline.push(duration, RevealCue::Event { index, event, side: e.side });
                timeline.wait(pace.chip_delay_ms);
            }

            timeline.push(0, RevealCue::Score { index, side: Side::Player, score: compare.scores.player });
            timeline.wait(pace.score_reveal_delay_ms);
            timeline.push(0, RevealCue::Score { index, side: Side::Ai, score: compare.scores.ai });
            timeline.wait(pace.between_sides_ms);
            timeline.push(0, RevealCue::Verdict { index, result: compare.result });
            timeline.wait(pace.verdict_hold_ms);

            for side in Side::BOTH {
                running[side] += compare.scores[side];
                timeline.push(pace.totals_ms, RevealCue::Total { index, side, total: running[side] });
            }
            timeline.wait(pace.between_compares_ms);
        }

        // The presentation shows only a player-side end bonus.
        let bonus = report.end_adjustment.player;
        if exceeds(bonus, 1e-9) {
            timeline.push(
                pace.totals_ms + pace.end_bonus_extra_ms,
                RevealCue::EndBonus { amount: bonus },
            );
        }
        timeline.push(0, RevealCue::Result { result: report.result });
        timeline
    }

    fn push(&mut self, duration_ms: u64, cue: RevealCue) {
        self.cues.push(TimedCue {
            at_ms: self.total_ms,
            duration_ms,
            cue,
        });
        self.total_ms += duration_ms;
    }

    fn wait(&mut self, ms: u64) {
        self.total_ms += ms;
    }

    /// Cues that have started by `elapsed_ms`.
    pub fn started_by(&self, elapsed_ms: u64) -> impl Iterator<Item = &TimedCue> {
        self.cues.iter().take_while(move |c| c.at_ms <= elapsed_ms)
    }
}
