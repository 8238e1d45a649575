//! Match orchestration.
//!
//! A match is `hands_count` compares played in slot order. The
//! orchestrator owns the match-scoped state (carry, running totals, the
//! previous compare's result), feeds it to each compare, then lets
//! match-end hooks adjust the totals once before deciding the winner.
//!
//! ## Example Usage
//!
//! ```
//! use handforge::orchestrator::{resolve_match, MatchResult, MatchSetup};
//! use handforge::{EngineConfig, Hand};
//!
//! let config = EngineConfig::default();
//! let report = resolve_match(
//!     &config,
//!     MatchSetup {
//!         round: 1,
//!         player_hands: &[Hand::Rock],
//!         ai_hands: &[Hand::Scissors],
//!         artifacts: &[],
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(report.totals.player, 150.0);
//! assert_eq!(report.totals.ai, 100.0);
//! assert_eq!(report.result, MatchResult::Won);
//! ```

pub mod play;

pub use play::{resolve_match, MatchReport, MatchResult, MatchSetup};
