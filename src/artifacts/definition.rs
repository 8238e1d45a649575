//! Artifact definitions: identity plus optional lifecycle hooks.
//!
//! An artifact is data. It carries up to four hook closures and the
//! engine calls whichever are present; there is no trait hierarchy to
//! implement. New artifacts are built with the same builder the built-in
//! catalog uses.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::HookResult;
use crate::hooks::{CompareContext, HookPoint, MatchEndContext, MatchStartContext};

/// Artifact identifier.
///
/// Ids compare exactly; use [`ArtifactId::matches`] for the
/// case- and whitespace-insensitive comparison crafting uses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId(pub String);

impl ArtifactId {
    /// Create an artifact id.
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

    /// Lenient equality: ignores case and surrounding whitespace.
    #[must_use]
    pub fn matches(&self, other: &ArtifactId) -> bool {
        self.normalized() == other.normalized()
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Rarity tier for artifacts and recipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
        };
        f.write_str(name)
    }
}

pub type MatchStartHook = Arc<dyn Fn(&mut MatchStartContext<'_>) -> HookResult + Send + Sync>;
pub type CompareHook = Arc<dyn Fn(&mut CompareContext<'_>) -> HookResult + Send + Sync>;
pub type MatchEndHook = Arc<dyn Fn(&mut MatchEndContext<'_>) -> HookResult + Send + Sync>;

/// An artifact: a passive, stacking modifier.
///
/// ## Example
///
/// ```
/// use handforge::artifacts::{ArtifactDefinition, Rarity};
/// use handforge::Hand;
///
/// let gauntlet = ArtifactDefinition::new("granite-gauntlet", "Granite Gauntlet", Rarity::Common)
///     .with_description("+100 base to every Rock you play.")
///     .on_compare_start(|ctx| {
///         if ctx.player_hand == Hand::Rock {
///             ctx.player_mut().base += 100.0;
///         }
///         Ok(())
///     });
///
/// assert!(gauntlet.has_hook(handforge::hooks::HookPoint::CompareStart));
/// assert!(!gauntlet.has_hook(handforge::hooks::HookPoint::MatchEnd));
/// ```
#[derive(Clone)]
pub struct ArtifactDefinition {
    pub id: ArtifactId,
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
    pub match_start: Option<MatchStartHook>,
    pub compare_start: Option<CompareHook>,
    pub compare_end: Option<CompareHook>,
    pub match_end: Option<MatchEndHook>,
}

impl ArtifactDefinition {
    /// Create an artifact with no hooks.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            id: ArtifactId::new(id),
            name: name.into(),
            rarity,
            description: String::new(),
            match_start: None,
            compare_start: None,
            compare_end: None,
            match_end: None,
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the match-start hook (builder pattern).
    #[must_use]
    pub fn on_match_start(
        mut self,
        hook: impl Fn(&mut MatchStartContext<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.match_start = Some(Arc::new(hook));
        self
    }

    /// Set the compare-start hook (builder pattern).
    #[must_use]
    pub fn on_compare_start(
        mut self,
        hook: impl Fn(&mut CompareContext<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.compare_start = Some(Arc::new(hook));
        self
    }

    /// Set the compare-end hook (builder pattern).
    #[must_use]
    pub fn on_compare_end(
        mut self,
        hook: impl Fn(&mut CompareContext<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.compare_end = Some(Arc::new(hook));
        self
    }

    /// Set the match-end hook (builder pattern).
    #[must_use]
    pub fn on_match_end(
        mut self,
        hook: impl Fn(&mut MatchEndContext<'_>) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.match_end = Some(Arc::new(hook));
        self
    }

    /// Does this artifact act at `point`?
    #[must_use]
    pub fn has_hook(&self, point: HookPoint) -> bool {
        match point {
            HookPoint::MatchStart => self.match_start.is_some(),
            HookPoint::CompareStart => self.compare_start.is_some(),
            HookPoint::CompareEnd => self.compare_end.is_some(),
            HookPoint::MatchEnd => self.match_end.is_some(),
        }
    }

    /// Serializable identity, without hooks.
    #[must_use]
    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            rarity: self.rarity,
            description: self.description.clone(),
        }
    }
}

impl std::fmt::Debug for ArtifactDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hooks: Vec<HookPoint> = [
            HookPoint::MatchStart,
            HookPoint::CompareStart,
            HookPoint::CompareEnd,
            HookPoint::MatchEnd,
        ]
        .into_iter()
        .filter(|&point| self.has_hook(point))
        .collect();

        f.debug_struct("ArtifactDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("rarity", &self.rarity)
            .field("hooks", &hooks)
            .finish()
    }
}

/// Display data for an artifact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    pub id: ArtifactId,
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_id_matching() {
        let a = ArtifactId::new("Granite-Gauntlet ");
        let b = ArtifactId::new("granite-gauntlet");

        assert_ne!(a, b);
        assert!(a.matches(&b));
        assert_eq!(a.normalized(), "granite-gauntlet");
        assert!(!a.matches(&ArtifactId::new("paper-crane")));
    }

    #[test]
    fn test_builder_records_hooks() {
        let artifact = ArtifactDefinition::new("x", "X", Rarity::Rare)
            .with_description("does things")
            .on_match_start(|_| Ok(()))
            .on_compare_end(|_| Ok(()));

        assert!(artifact.has_hook(HookPoint::MatchStart));
        assert!(!artifact.has_hook(HookPoint::CompareStart));
        assert!(artifact.has_hook(HookPoint::CompareEnd));
        assert!(!artifact.has_hook(HookPoint::MatchEnd));
        assert_eq!(artifact.description, "does things");
    }

    #[test]
    fn test_debug_lists_hooks() {
        let artifact = ArtifactDefinition::new("x", "X", Rarity::Common).on_match_end(|_| Ok(()));
        let debug = format!("{:?}", artifact);
        assert!(debug.contains("MatchEnd"));
        assert!(!debug.contains("CompareStart"));
    }

    #[test]
    fn test_summary_serialization() {
        let summary = ArtifactDefinition::new("momentum", "Momentum", Rarity::Rare)
            .with_description("After each win, +25 base to your next compare this match.")
            .summary();

        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: ArtifactSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, deserialized);
    }
}
