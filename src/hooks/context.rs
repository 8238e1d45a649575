//! Contexts handed to artifact hooks at each lifecycle point.
//!
//! Each context borrows match state from the orchestrator for the
//! duration of one hook call. Fields a hook may change are `&mut`;
//! everything else is read-only.

use crate::core::{Hand, HandCounts, Modifier, Outcome, Side, SideMap};

use super::carry::Carry;

/// Lifecycle points at which artifacts can act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum HookPoint {
    MatchStart,
    CompareStart,
    CompareEnd,
    MatchEnd,
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HookPoint::MatchStart => "match-start",
            HookPoint::CompareStart => "compare-start",
            HookPoint::CompareEnd => "compare-end",
            HookPoint::MatchEnd => "match-end",
        };
        f.write_str(name)
    }
}

/// Context for `on_match_start`.
pub struct MatchStartContext<'a> {
    pub round: u32,
    pub hands_count: usize,
    /// The player's full hand sequence for this match.
    pub player_hands: &'a [Hand],
    /// The AI's full hand sequence for this match.
    pub ai_hands: &'a [Hand],
    pub carry: &'a mut Carry,
    pub totals: &'a SideMap<f64>,
}

impl MatchStartContext<'_> {
    /// Tallies of the player's hands this match.
    #[must_use]
    pub fn player_counts(&self) -> HandCounts {
        HandCounts::of(self.player_hands)
    }
}

/// Context for `on_compare_start` and `on_compare_end`.
///
/// At compare-start `last_result` is the previous compare's score result
/// (`None` on the first compare). At compare-end it is this compare's.
pub struct CompareContext<'a> {
    pub round: u32,
    pub hands_count: usize,
    /// 0-based slot of this compare.
    pub compare_index: usize,
    pub player_hands: &'a [Hand],
    pub ai_hands: &'a [Hand],
    pub player_hand: Hand,
    pub ai_hand: Hand,
    pub modifiers: &'a mut SideMap<Modifier>,
    pub carry: &'a mut Carry,
    /// Running totals. At compare-start they exclude this compare's scores;
    /// at compare-end they include them.
    pub totals: &'a SideMap<f64>,
    pub last_result: Option<Outcome>,
}

impl CompareContext<'_> {
    /// Mutable modifier pair for one side.
    pub fn side_mut(&mut self, side: Side) -> &mut Modifier {
        &mut self.modifiers[side]
    }

    /// The player's modifier pair.
    pub fn player_mut(&mut self) -> &mut Modifier {
        self.side_mut(Side::Player)
    }

    /// Is this the last compare of the match?
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.compare_index + 1 == self.hands_count
    }

    /// The player's hand in the previous slot, if any.
    #[must_use]
    pub fn previous_player_hand(&self) -> Option<Hand> {
        self.compare_index
            .checked_sub(1)
            .and_then(|i| self.player_hands.get(i).copied())
    }

    /// Tallies of the player's hands this match.
    #[must_use]
    pub fn player_counts(&self) -> HandCounts {
        HandCounts::of(self.player_hands)
    }

    /// Tallies of the AI's hands this match.
    #[must_use]
    pub fn ai_counts(&self) -> HandCounts {
        HandCounts::of(self.ai_hands)
    }
}

/// Context for `on_match_end`. Hooks may scale final totals.
pub struct MatchEndContext<'a> {
    pub round: u32,
    pub hands_count: usize,
    pub player_hands: &'a [Hand],
    pub ai_hands: &'a [Hand],
    pub totals: &'a mut SideMap<f64>,
}

impl MatchEndContext<'_> {
    /// Tallies of the player's hands this match.
    #[must_use]
    pub fn player_counts(&self) -> HandCounts {
        HandCounts::of(self.player_hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_context_helpers() {
        let player_hands = [Hand::Rock, Hand::Paper, Hand::Paper];
        let ai_hands = [Hand::Scissors, Hand::Scissors, Hand::Rock];
        let mut modifiers = SideMap::with_value(Modifier::default());
        let mut carry = Carry::new();
        let totals = SideMap::default();

        let mut ctx = CompareContext {
            round: 3,
            hands_count: 3,
            compare_index: 2,
            player_hands: &player_hands,
            ai_hands: &ai_hands,
            player_hand: Hand::Paper,
            ai_hand: Hand::Rock,
            modifiers: &mut modifiers,
            carry: &mut carry,
            totals: &totals,
            last_result: Some(Outcome::Tie),
        };

        assert!(ctx.is_last());
        assert_eq!(ctx.previous_player_hand(), Some(Hand::Paper));
        assert_eq!(ctx.player_counts().paper, 2);
        assert_eq!(ctx.ai_counts().scissors, 2);

        ctx.player_mut().base += 40.0;
        assert_eq!(modifiers.player.base, 140.0);
    }

    #[test]
    fn test_first_compare_has_no_previous_hand() {
        let hands = [Hand::Rock];
        let mut modifiers = SideMap::with_value(Modifier::default());
        let mut carry = Carry::new();
        let totals = SideMap::default();

        let ctx = CompareContext {
            round: 1,
            hands_count: 1,
            compare_index: 0,
            player_hands: &hands,
            ai_hands: &hands,
            player_hand: Hand::Rock,
            ai_hand: Hand::Rock,
            modifiers: &mut modifiers,
            carry: &mut carry,
            totals: &totals,
            last_result: None,
        };

        assert_eq!(ctx.previous_player_hand(), None);
        assert!(ctx.is_last());
    }

    #[test]
    fn test_hook_point_display() {
        assert_eq!(HookPoint::CompareStart.to_string(), "compare-start");
        assert_eq!(HookPoint::MatchEnd.to_string(), "match-end");
    }
}
