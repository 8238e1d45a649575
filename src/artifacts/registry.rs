//! Registries for artifact and recipe definitions.
//!
//! Registries keep insertion order (reward pools are built by walking
//! the catalog, so order must be stable for a seed to replay) and index
//! entries by normalized id for lenient lookup.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::definition::{ArtifactDefinition, ArtifactId};
use super::recipe::{RecipeDefinition, RecipeId};

/// Something a [`Registry`] can store.
pub trait Registered {
    /// Lookup key. Keys are compared trimmed and lowercased.
    fn key(&self) -> &str;
}

impl Registered for ArtifactDefinition {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Registered for RecipeDefinition {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Ordered registry of shared definitions.
///
/// ## Example
///
/// ```
/// use handforge::artifacts::{ArtifactDefinition, ArtifactRegistry, Rarity};
///
/// let mut registry = ArtifactRegistry::new();
/// registry.register(ArtifactDefinition::new("momentum", "Momentum", Rarity::Rare));
///
/// let found = registry.get("Momentum").unwrap();
/// assert_eq!(found.name, "Momentum");
/// ```
#[derive(Clone, Debug)]
pub struct Registry<T> {
    entries: Vec<Arc<T>>,
    index: FxHashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<T: Registered> Registry<T> {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Panics if an entry with the same (normalized) id already exists.
    pub fn register(&mut self, entry: T) {
        let key = normalize(entry.key());
        if self.index.contains_key(&key) {
            panic!("Definition with id {:?} already registered", entry.key());
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(Arc::new(entry));
    }

    /// Look up by id, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<T>> {
        self.index.get(&normalize(id)).map(|&i| &self.entries[i])
    }

    /// Check if an id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&normalize(id))
    }

    /// Get the number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.iter()
    }
}

pub type ArtifactRegistry = Registry<ArtifactDefinition>;
pub type RecipeRegistry = Registry<RecipeDefinition>;

impl ArtifactRegistry {
    /// Look up by typed id.
    #[must_use]
    pub fn artifact(&self, id: &ArtifactId) -> Option<&Arc<ArtifactDefinition>> {
        self.get(id.as_str())
    }
}

impl RecipeRegistry {
    /// Look up by typed id.
    #[must_use]
    pub fn recipe(&self, id: &RecipeId) -> Option<&Arc<RecipeDefinition>> {
        self.get(id.as_str())
    }
}

/// Everything a run can draw from: artifacts and recipes.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub artifacts: ArtifactRegistry,
    pub recipes: RecipeRegistry,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact (builder pattern).
    #[must_use]
    pub fn with_artifact(mut self, artifact: ArtifactDefinition) -> Self {
        self.artifacts.register(artifact);
        self
    }

    /// Add a recipe (builder pattern).
    #[must_use]
    pub fn with_recipe(mut self, recipe: RecipeDefinition) -> Self {
        self.recipes.register(recipe);
        self
    }

    /// Display name for an artifact id, falling back to the raw id.
    #[must_use]
    pub fn artifact_name(&self, id: &ArtifactId) -> String {
        self.artifacts
            .artifact(id)
            .map_or_else(|| id.to_string(), |a| a.name.clone())
    }
}
