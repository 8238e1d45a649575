//! Post-win reward draws.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifacts::{ArtifactId, Catalog, RecipeId};
use crate::core::GameRng;

/// Something offered after a win.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardCandidate {
    Artifact(ArtifactId),
    Recipe(RecipeId),
}

impl RewardCandidate {
    /// Display name from the catalog, or the raw id.
    #[must_use]
    pub fn name(&self, catalog: &Catalog) -> String {
        match self {
            RewardCandidate::Artifact(id) => catalog.artifact_name(id),
            RewardCandidate::Recipe(id) => catalog
                .recipes
                .recipe(id)
                .map_or_else(|| id.to_string(), |r| r.name.clone()),
        }
    }
}

impl std::fmt::Display for RewardCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewardCandidate::Artifact(id) => write!(f, "artifact {}", id),
            RewardCandidate::Recipe(id) => write!(f, "recipe {}", id),
        }
    }
}

/// Every candidate the player does not already have, artifacts first,
/// each group in catalog order.
pub fn reward_pool<'a>(
    catalog: &Catalog,
    owned: impl IntoIterator<Item = &'a ArtifactId>,
    known: impl IntoIterator<Item = &'a RecipeId>,
) -> Vec<RewardCandidate> {
    let owned: FxHashSet<String> = owned.into_iter().map(ArtifactId::normalized).collect();
    let known: FxHashSet<String> = known.into_iter().map(RecipeId::normalized).collect();

    let artifacts = catalog
        .artifacts
        .iter()
        .filter(|a| !owned.contains(&a.id.normalized()))
        .map(|a| RewardCandidate::Artifact(a.id.clone()));
    let recipes = catalog
        .recipes
        .iter()
        .filter(|r| !known.contains(&r.id.normalized()))
        .map(|r| RewardCandidate::Recipe(r.id.clone()));

    artifacts.chain(recipes).collect()
}

/// Draw up to `count` distinct candidates uniformly without replacement.
///
/// Returns fewer when the pool is smaller, and nothing when it is empty.
pub fn draw_rewards<'a>(
    catalog: &Catalog,
    owned: impl IntoIterator<Item = &'a ArtifactId>,
    known: impl IntoIterator<Item = &'a RecipeId>,
    count: usize,
    rng: &mut GameRng,
) -> Vec<RewardCandidate> {
    let pool = reward_pool(catalog, owned, known);
    let offer: Vec<RewardCandidate> = rng
        .sample_indices(pool.len(), count)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect();
    debug!(pool = pool.len(), offered = offer.len(), "reward draw");
    offer
}
