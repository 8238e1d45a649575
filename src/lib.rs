//! # handforge
//!
//! A deterministic Rock-Paper-Scissors scoring engine with stacking
//! modifiers ("artifacts"), built for round-based runs.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: The same hands, artifacts and round always give
//!    the same scores and the same event log. Randomness (AI hands,
//!    rewards) comes from seeded streams.
//!
//! 2. **Order Is Semantics**: Artifacts act in acquisition order and each
//!    sees the cumulative result of the ones before it.
//!
//! 3. **Presentation-Agnostic**: A match resolves eagerly into a report.
//!    Pacing is a separate data product a presentation layer may consume
//!    at any speed.
//!
//! ## Architecture
//!
//! - Every compare starts both sides at base 100, mult 1.0. Hooks mutate
//!   the pair; the engine diffs snapshots to explain each change.
//!
//! - Match-scoped carry is the only state that crosses compares.
//!
//! ## Modules
//!
//! - `core`: Hands, sides, RNG, configuration, errors
//! - `artifacts`: Artifact and recipe definitions, registries, built-in pool
//! - `hooks`: Lifecycle contexts, carry and the hook engine
//! - `resolve`: Single compare resolution and its event log
//! - `orchestrator`: Full match resolution
//! - `rewards`: Reward draws and crafting
//! - `run`: Run state and the match state machine
//! - `reveal`: Timed reveal cues for a presentation layer

pub mod core;
pub mod artifacts;
pub mod hooks;
pub mod resolve;
pub mod orchestrator;
pub mod rewards;
pub mod run;
pub mod reveal;

// Re-export commonly used types
pub use crate::core::{
    CraftedHandId, Hand, HandCounts,
    Modifier, Outcome, Side, SideMap,
    GameRng,
    AiScaling, EngineConfig, Pace,
    EngineError, HookError, HookResult,
};

pub use crate::artifacts::{
    ArtifactDefinition, ArtifactId, Catalog, Rarity, RecipeDefinition, RecipeId,
    standard_catalog,
};

pub use crate::hooks::{Carry, HookDiagnostic, HookPoint};

pub use crate::resolve::{CompareEvent, CompareReport, EventSource};

pub use crate::orchestrator::{resolve_match, MatchReport, MatchResult, MatchSetup};

pub use crate::rewards::{CraftCheck, RewardCandidate};

pub use crate::run::{AiPolicy, Phase, Run};

pub use crate::reveal::RevealTimeline;
