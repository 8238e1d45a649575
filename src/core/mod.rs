//! Core engine types: hands, sides, RNG, configuration, errors.
//!
//! These are the leaf building blocks every other module uses. Nothing
//! here knows about artifacts or matches.

pub mod hand;
pub mod side;
pub mod rng;
pub mod config;
pub mod error;
pub mod num;

pub use hand::{CraftedHandId, Hand, HandCounts};
pub use side::{Modifier, Outcome, Side, SideMap};
pub use rng::GameRng;
pub use config::{AiScaling, EngineConfig, Pace};
pub use error::{EngineError, HookError, HookResult};
pub use num::{exceeds, finite_or_zero, format_value};
