//! Structured compare events.
//!
//! Every change to a side's base or multiplier during a compare is
//! reported as one [`CompareEvent`]. Hook-driven changes are recovered by
//! diffing snapshots, so artifacts never emit events themselves.

use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactDefinition, ArtifactId};
use crate::core::{exceeds, format_value, Modifier, Side};

/// Which half of the modifier pair changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Base,
    Mult,
}

/// How it changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Multiply,
}

/// What caused a change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    Artifact { id: ArtifactId, name: String },
    AiScaling,
    RpsWin,
}

impl EventSource {
    pub(crate) fn artifact(artifact: &ArtifactDefinition) -> Self {
        EventSource::Artifact {
            id: artifact.id.clone(),
            name: artifact.name.clone(),
        }
    }

    /// Name shown to the player.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            EventSource::Artifact { name, .. } => name,
            EventSource::AiScaling => "AI Scaling",
            EventSource::RpsWin => "RPS Win",
        }
    }
}

/// One change to one stat of one side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompareEvent {
    pub side: Side,
    pub stat: Stat,
    pub op: Op,
    /// Addend for [`Op::Add`], factor for [`Op::Multiply`].
    pub amount: f64,
    /// Value of the stat once this event is applied.
    pub after: f64,
    pub source: EventSource,
}

impl CompareEvent {
    /// Short label such as `+100 Base` or `×1.5 Mult`.
    #[must_use]
    pub fn label(&self) -> String {
        let stat = match self.stat {
            Stat::Base => "Base",
            Stat::Mult => "Mult",
        };
        match self.op {
            Op::Add if self.amount < 0.0 => format!("{} {}", format_value(self.amount), stat),
            Op::Add => format!("+{} {}", format_value(self.amount), stat),
            Op::Multiply => format!("×{} {}", format_value(self.amount), stat),
        }
    }
}

impl std::fmt::Display for CompareEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.side, self.label(), self.source.display_name())
    }
}

/// Append the events that explain `before → after` for one side.
///
/// Base changes are always additive. A mult change is reported as a
/// multiply by `after / before` unless that ratio is within `epsilon` of
/// one, or `before` is within `epsilon` of zero; then it is an add.
pub fn diff_side(
    side: Side,
    before: Modifier,
    after: Modifier,
    epsilon: f64,
    source: &EventSource,
    out: &mut Vec<CompareEvent>,
) {
    let base_delta = after.base - before.base;
    if exceeds(base_delta, epsilon) {
        out.push(CompareEvent {
            side,
            stat: Stat::Base,
            op: Op::Add,
            amount: base_delta,
            after: after.base,
            source: source.clone(),
        });
    }

    let mult_delta = after.mult - before.mult;
    if exceeds(mult_delta, epsilon) {
        let ratio = after.mult / before.mult;
        let (op, amount) = if exceeds(before.mult, epsilon) && exceeds(ratio - 1.0, epsilon) {
            (Op::Multiply, ratio)
        } else {
            (Op::Add, mult_delta)
        };
        out.push(CompareEvent {
            side,
            stat: Stat::Mult,
            op,
            amount,
            after: after.mult,
            source: source.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(before: Modifier, after: Modifier) -> Vec<CompareEvent> {
        let mut out = Vec::new();
        diff_side(Side::Player, before, after, 1e-9, &EventSource::AiScaling, &mut out);
        out
    }

    #[test]
    fn test_base_add() {
        let events = diff(Modifier::new(100.0, 1.0), Modifier::new(200.0, 1.0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].stat, Stat::Base);
        assert_eq!(events[0].op, Op::Add);
        assert_eq!(events[0].amount, 100.0);
        assert_eq!(events[0].after, 200.0);
    }

    #[test]
    fn test_mult_change_reported_as_ratio() {
        let events = diff(Modifier::new(100.0, 1.0), Modifier::new(100.0, 1.2));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].op, Op::Multiply);
        assert!((events[0].amount - 1.2).abs() < 1e-12);

        // Additive hooks show up as a ratio too.
        let events = diff(Modifier::new(100.0, 2.0), Modifier::new(100.0, 2.5));
        assert_eq!(events[0].op, Op::Multiply);
        assert!((events[0].amount - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_mult_from_zero_is_add() {
        let events = diff(Modifier::new(100.0, 0.0), Modifier::new(100.0, 0.5));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].op, Op::Add);
        assert_eq!(events[0].amount, 0.5);
    }

    #[test]
    fn test_sub_epsilon_change_is_silent() {
        let events = diff(Modifier::new(100.0, 1.0), Modifier::new(100.0 + 1e-10, 1.0 + 1e-10));
        assert!(events.is_empty());
    }

    #[test]
    fn test_labels() {
        let mut events = diff(Modifier::new(100.0, 1.0), Modifier::new(60.0, 1.5));
        assert_eq!(events[0].label(), "-40 Base");
        assert_eq!(events[1].label(), "×1.5 Mult");

        events[0].source = EventSource::RpsWin;
        assert_eq!(events[0].to_string(), "Player: -40 Base (RPS Win)");
    }
}
