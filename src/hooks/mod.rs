//! Effect hook engine.
//!
//! Artifacts act at four lifecycle points of a match:
//!
//! | point | sees | may change |
//! |-------|------|------------|
//! | match-start | both hand sequences, totals | carry |
//! | compare-start | the above plus this compare's hands, previous result | modifiers, carry |
//! | compare-end | same, with this compare's result | modifiers, carry |
//! | match-end | both hand sequences | totals |
//!
//! [`HookEngine`] invokes the handlers of the active artifacts in
//! acquisition order. [`Carry`] is the only state that survives from one
//! compare to the next, and it lives for one match.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use handforge::artifacts::{ArtifactDefinition, Rarity};
//! use handforge::hooks::{Carry, CompareFrame, HookEngine, MatchFrame};
//! use handforge::{Hand, Modifier, SideMap};
//!
//! let artifacts = vec![Arc::new(
//!     ArtifactDefinition::new("anchor-turn", "Anchor Turn", Rarity::Common)
//!         .on_compare_start(|ctx| {
//!             if ctx.is_last() {
//!                 ctx.player_mut().base += 80.0;
//!             }
//!             Ok(())
//!         }),
//! )];
//!
//! let hands = [Hand::Rock, Hand::Paper];
//! let totals = SideMap::default();
//! let mut modifiers = SideMap::with_value(Modifier::default());
//! let mut carry = Carry::new();
//!
//! let mut engine = HookEngine::new(&artifacts);
//! let frame = CompareFrame {
//!     matched: MatchFrame { round: 2, player_hands: &hands, ai_hands: &hands },
//!     compare_index: 1,
//!     totals: &totals,
//!     last_result: None,
//! };
//! engine.compare_start(frame, &mut modifiers, &mut carry, |_, _, _| {});
//!
//! assert_eq!(modifiers.player.base, 180.0);
//! assert!(engine.diagnostics().is_empty());
//! ```

pub mod carry;
pub mod context;
pub mod engine;

pub use carry::Carry;
pub use context::{CompareContext, HookPoint, MatchEndContext, MatchStartContext};
pub use engine::{active_artifacts, CompareFrame, HookDiagnostic, HookEngine, MatchFrame};
