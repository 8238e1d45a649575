//! Artifacts and recipes: the modifier registry.
//!
//! Artifacts are passive modifiers a player accumulates over a run. Each
//! one may act at up to four lifecycle points of a match (see
//! [`crate::hooks::HookPoint`]). Recipes consume owned artifacts to craft
//! a hand.
//!
//! ## Key Components
//!
//! - [`ArtifactDefinition`]: Identity plus optional hook closures
//! - [`RecipeDefinition`]: Required artifacts and the crafted output
//! - [`Registry`]: Ordered, id-indexed storage for either kind
//! - [`Catalog`]: The artifact and recipe registries a run draws from
//! - [`standard_catalog`]: The built-in pool
//!
//! ## Example Usage
//!
//! ```
//! use handforge::artifacts::{standard_catalog, ArtifactDefinition, Rarity};
//!
//! let catalog = standard_catalog().with_artifact(
//!     ArtifactDefinition::new("lucky-coin", "Lucky Coin", Rarity::Common)
//!         .with_description("+5 base on every compare.")
//!         .on_compare_start(|ctx| {
//!             ctx.player_mut().base += 5.0;
//!             Ok(())
//!         }),
//! );
//!
//! assert!(catalog.artifacts.contains("lucky-coin"));
//! assert!(catalog.recipes.contains("heavy-rock"));
//! ```

pub mod definition;
pub mod recipe;
pub mod registry;
pub mod builtin;

pub use definition::{
    ArtifactDefinition, ArtifactId, ArtifactSummary, CompareHook, MatchEndHook, MatchStartHook,
    Rarity,
};
pub use recipe::{RecipeDefinition, RecipeId};
pub use registry::{ArtifactRegistry, Catalog, RecipeRegistry, Registered, Registry};
pub use builtin::{standard_artifacts, standard_catalog, standard_recipes};
