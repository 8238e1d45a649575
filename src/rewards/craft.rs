//! Crafting: consuming owned artifacts to make a hand.
//!
//! Requirement ids are matched against owned ids ignoring case and
//! surrounding whitespace. An id no catalog knows is simply a missing
//! requirement.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactId, ArtifactRegistry, RecipeDefinition, RecipeId};
use crate::core::{CraftedHandId, EngineError};

/// One requirement of a recipe and whether it is met.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementStatus {
    pub id: ArtifactId,
    /// Catalog display name, when the catalog knows the id.
    pub name: Option<String>,
    pub satisfied: bool,
}

/// Craftability breakdown for one recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftCheck {
    pub recipe: RecipeId,
    pub output: CraftedHandId,
    pub requirements: Vec<RequirementStatus>,
}

impl CraftCheck {
    /// Every requirement is owned.
    #[must_use]
    pub fn craftable(&self) -> bool {
        self.requirements.iter().all(|r| r.satisfied)
    }

    /// Ids of unmet requirements, in recipe order.
    #[must_use]
    pub fn missing(&self) -> Vec<String> {
        self.requirements
            .iter()
            .filter(|r| !r.satisfied)
            .map(|r| r.id.to_string())
            .collect()
    }
}

/// Check a recipe against the owned artifacts.
#[must_use]
pub fn check_craft(
    recipe: &RecipeDefinition,
    owned: &Vector<ArtifactId>,
    artifacts: &ArtifactRegistry,
) -> CraftCheck {
    let requirements = recipe
        .requires
        .iter()
        .map(|id| RequirementStatus {
            id: id.clone(),
            name: artifacts.artifact(id).map(|a| a.name.clone()),
            satisfied: owned.iter().any(|o| o.matches(id)),
        })
        .collect();

    CraftCheck {
        recipe: recipe.id.clone(),
        output: recipe.output.clone(),
        requirements,
    }
}

/// Consume one owned instance per requirement and return the output.
///
/// Nothing is removed unless every requirement is met.
pub fn commit_craft(
    recipe: &RecipeDefinition,
    owned: &mut Vector<ArtifactId>,
) -> Result<CraftedHandId, EngineError> {
    let mut remaining = owned.clone();
    let mut missing = Vec::new();
    for required in &recipe.requires {
        match remaining.iter().position(|o| o.matches(required)) {
            Some(at) => {
                remaining.remove(at);
            }
            None => missing.push(required.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(EngineError::MissingRequirements {
            recipe: recipe.id.to_string(),
            missing,
        });
    }

    *owned = remaining;
    Ok(recipe.output.clone())
}
