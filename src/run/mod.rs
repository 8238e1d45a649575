//! Player runs.
//!
//! A [`Run`] ties the engine together: it owns the player's progression
//! (round, hands per match, artifacts, recipes, crafted hands), chooses
//! the AI's hands, resolves matches and applies rewards. Matches are
//! resolved eagerly at lock-in; the phase only records how far the
//! presentation has got.
//!
//! ## Key Components
//!
//! - [`Run`]: Run state plus the match state machine
//! - [`Phase`]: Idle, in progress, or a decided match
//! - [`AiPolicy`]: How the AI picks its hands

pub mod ai;
pub mod phase;
pub mod state;

pub use ai::{AiPolicy, ScriptedAi, UniformAi};
pub use phase::Phase;
pub use state::Run;
