//! Recipe definitions.
//!
//! A recipe names a set of artifacts that can be consumed together to
//! craft a hand. Learning a recipe and crafting it are separate steps.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::CraftedHandId;

use super::definition::{ArtifactId, Rarity};

/// Recipe identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecipeId(pub String);

impl RecipeId {
    /// Create a recipe id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trimmed, lowercased form used for lenient matching.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A crafting recipe.
///
/// ```
/// use handforge::artifacts::{RecipeDefinition, Rarity};
///
/// let heavy = RecipeDefinition::new("heavy-rock", "Heavy Rock", Rarity::Uncommon, "HeavyRock")
///     .requires("granite-gauntlet")
///     .requires("rock-enthusiast")
///     .requires("granite-gauntlet");
///
/// assert_eq!(heavy.requires.len(), 2);
/// assert_eq!(heavy.output.as_str(), "HeavyRock");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    pub id: RecipeId,
    pub name: String,
    pub rarity: Rarity,
    /// Required artifacts. Unique; order only matters for display.
    pub requires: SmallVec<[ArtifactId; 4]>,
    pub output: CraftedHandId,
    pub summary: String,
}

impl RecipeDefinition {
    /// Create a recipe with no requirements.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rarity: Rarity,
        output: impl Into<String>,
    ) -> Self {
        Self {
            id: RecipeId::new(id),
            name: name.into(),
            rarity,
            requires: SmallVec::new(),
            output: CraftedHandId::new(output),
            summary: String::new(),
        }
    }

    /// Add a required artifact (builder pattern). Duplicates are ignored.
    #[must_use]
    pub fn requires(mut self, artifact: impl Into<ArtifactId>) -> Self {
        let artifact = artifact.into();
        if !self.requires.iter().any(|r| r.matches(&artifact)) {
            self.requires.push(artifact);
        }
        self
    }

    /// Set the summary (builder pattern).
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_are_unique() {
        let recipe = RecipeDefinition::new("r", "R", Rarity::Rare, "Out")
            .requires("a")
            .requires(" A ")
            .requires("b");

        let ids: Vec<_> = recipe.requires.iter().map(ArtifactId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_recipe_serialization() {
        let recipe = RecipeDefinition::new("primer", "Primer", Rarity::Uncommon, "Primer")
            .requires("opening-gambit")
            .requires("momentum")
            .with_summary("Bank Base for later.");

        let json = serde_json::to_string(&recipe).unwrap();
        let deserialized: RecipeDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe, deserialized);
    }
}
