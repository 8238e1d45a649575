//! Run state and the match state machine.

use im::Vector;
use std::sync::Arc;
use tracing::{debug, info};

use crate::artifacts::{ArtifactId, ArtifactSummary, Catalog, RecipeDefinition, RecipeId};
use crate::core::{CraftedHandId, EngineConfig, EngineError, GameRng, Hand};
use crate::hooks::active_artifacts;
use crate::orchestrator::{resolve_match, MatchReport, MatchResult, MatchSetup};
use crate::rewards::{check_craft, commit_craft, draw_rewards, CraftCheck, RewardCandidate};

use super::ai::{AiPolicy, UniformAi};
use super::phase::Phase;

const AI_STREAM: &str = "ai-hands";
const REWARD_STREAM: &str = "rewards";

/// One player's run: progression, inventory and the current match.
///
/// All mutation happens between matches. While a match is in progress
/// the inventory is frozen and every mutating call except [`Run::reset`]
/// and [`Run::finish_match`] is rejected.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use handforge::artifacts::standard_catalog;
/// use handforge::run::{Phase, Run, ScriptedAi};
/// use handforge::{EngineConfig, Hand};
///
/// let mut run = Run::new(EngineConfig::default(), Arc::new(standard_catalog()))
///     .with_ai(ScriptedAi::new(vec![Hand::Scissors]));
///
/// let report = run.lock_in(&[Hand::Rock]).unwrap();
/// assert_eq!(report.totals.player, 150.0);
///
/// run.finish_match().unwrap();
/// assert_eq!(run.phase(), Phase::Won);
/// assert_eq!(run.reward_offer().len(), 3);
///
/// run.claim_reward(0).unwrap();
/// assert_eq!(run.round(), 2);
/// assert_eq!(run.hands_count(), 2);
/// ```
pub struct Run {
    config: EngineConfig,
    catalog: Arc<Catalog>,
    ai: Box<dyn AiPolicy>,
    root_rng: GameRng,
    ai_rng: GameRng,
    reward_rng: GameRng,
    phase: Phase,
    round: u32,
    hands_count: usize,
    owned: Vector<ArtifactId>,
    known_recipes: Vec<RecipeId>,
    crafted: Vec<CraftedHandId>,
    report: Option<MatchReport>,
    offer: Vec<RewardCandidate>,
}

impl Run {
    /// Start a run at round 1 with an empty inventory.
    #[must_use]
    pub fn new(config: EngineConfig, catalog: Arc<Catalog>) -> Self {
        let root_rng = GameRng::new(config.seed);
        let ai_rng = root_rng.for_context(AI_STREAM);
        let reward_rng = root_rng.for_context(REWARD_STREAM);
        Self {
            config,
            catalog,
            ai: Box::new(UniformAi),
            root_rng,
            ai_rng,
            reward_rng,
            phase: Phase::Idle,
            round: 1,
            hands_count: 1,
            owned: Vector::new(),
            known_recipes: Vec::new(),
            crafted: Vec::new(),
            report: None,
            offer: Vec::new(),
        }
    }

    /// Use a different AI policy (builder pattern).
    #[must_use]
    pub fn with_ai(mut self, ai: impl AiPolicy + 'static) -> Self {
        self.ai = Box::new(ai);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Hands the next (or current) match is played with.
    #[must_use]
    pub fn hands_count(&self) -> usize {
        self.hands_count
    }

    /// Owned artifacts in acquisition order.
    #[must_use]
    pub fn owned_artifacts(&self) -> &Vector<ArtifactId> {
        &self.owned
    }

    /// Display data for the owned artifacts the catalog knows, in
    /// acquisition order.
    #[must_use]
    pub fn owned_summaries(&self) -> Vec<ArtifactSummary> {
        self.owned
            .iter()
            .filter_map(|id| self.catalog.artifacts.artifact(id))
            .map(|artifact| artifact.summary())
            .collect()
    }

    /// Learned recipes in learning order.
    #[must_use]
    pub fn known_recipes(&self) -> &[RecipeId] {
        &self.known_recipes
    }

    #[must_use]
    pub fn crafted_hands(&self) -> &[CraftedHandId] {
        &self.crafted
    }

    /// Report of the current or most recent match.
    #[must_use]
    pub fn last_report(&self) -> Option<&MatchReport> {
        self.report.as_ref()
    }

    /// Pending reward candidates. Empty unless the run is in [`Phase::Won`].
    #[must_use]
    pub fn reward_offer(&self) -> &[RewardCandidate] {
        &self.offer
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // === Match cycle ===

    /// Commit the player's hands and resolve the whole match.
    ///
    /// Requires [`Phase::Idle`] and exactly [`Run::hands_count`] hands.
    /// On error nothing changes.
    pub fn lock_in(&mut self, hands: &[Hand]) -> Result<&MatchReport, EngineError> {
        self.require(Phase::Idle, "lock in")?;
        if hands.len() != self.hands_count {
            return Err(EngineError::HandCount {
                expected: self.hands_count,
                actual: hands.len(),
            });
        }

        let active = active_artifacts(&self.owned, &self.catalog.artifacts);
        let mut ai_rng = self.ai_rng.clone();
        let ai_hands = self.ai.choose_hands(self.round, self.hands_count, &mut ai_rng);
        let report = resolve_match(
            &self.config,
            MatchSetup {
                round: self.round,
                player_hands: hands,
                ai_hands: &ai_hands,
                artifacts: &active,
            },
        )?;

        self.ai_rng = ai_rng;
        self.phase = Phase::InProgress;
        debug!(round = self.round, hands = self.hands_count, "locked in");
        Ok(self.report.insert(report))
    }

    /// End the reveal and move to Won, Lost or Drawn.
    ///
    /// A win draws the reward offer.
    pub fn finish_match(&mut self) -> Result<MatchResult, EngineError> {
        if self.phase != Phase::InProgress {
            return Err(EngineError::InvalidPhase {
                action: "finish a match",
                phase: self.phase,
            });
        }
        let Some(result) = self.report.as_ref().map(|r| r.result) else {
            return Err(EngineError::InvalidPhase {
                action: "finish a match",
                phase: self.phase,
            });
        };

        if result == MatchResult::Won {
            self.offer = draw_rewards(
                &self.catalog,
                &self.owned,
                &self.known_recipes,
                self.config.reward_offer_size,
                &mut self.reward_rng,
            );
        }
        self.phase = Phase::after(result);
        info!(round = self.round, ?result, offered = self.offer.len(), "match finished");
        Ok(result)
    }

    /// Take one of the offered rewards and advance to the next round.
    pub fn claim_reward(&mut self, index: usize) -> Result<RewardCandidate, EngineError> {
        self.require(Phase::Won, "claim a reward")?;
        let Some(candidate) = self.offer.get(index).cloned() else {
            return Err(EngineError::NoSuchReward(index));
        };

        match &candidate {
            RewardCandidate::Artifact(id) => self.owned.push_back(id.clone()),
            RewardCandidate::Recipe(id) => self.learn(id.clone()),
        }
        debug!(reward = %candidate, "reward claimed");
        self.advance();
        Ok(candidate)
    }

    /// Decline the offer (or continue past an empty one).
    pub fn skip_reward(&mut self) -> Result<(), EngineError> {
        self.require(Phase::Won, "skip a reward")?;
        debug!(offered = self.offer.len(), "reward skipped");
        self.advance();
        Ok(())
    }

    /// Replay the round after a draw.
    pub fn retry(&mut self) -> Result<(), EngineError> {
        self.require(Phase::Drawn, "retry")?;
        self.phase = Phase::Idle;
        debug!(round = self.round, "retrying round");
        Ok(())
    }

    /// Start over from round 1 with an empty inventory.
    ///
    /// Allowed in every phase. AI and reward streams continue from a fresh
    /// fork, so a reset run does not replay the previous one.
    pub fn reset(&mut self) {
        let branch = self.root_rng.fork();
        self.ai_rng = branch.for_context(AI_STREAM);
        self.reward_rng = branch.for_context(REWARD_STREAM);
        self.phase = Phase::Idle;
        self.round = 1;
        self.hands_count = 1;
        self.owned = Vector::new();
        self.known_recipes.clear();
        self.crafted.clear();
        self.report = None;
        self.offer.clear();
        info!("run reset");
    }

    // === Inventory ===

    /// Add an artifact to the end of the owned list.
    ///
    /// Rejected while a reward offer is pending, so a granted artifact can
    /// never be claimed a second time from that offer.
    pub fn grant_artifact(&mut self, id: impl Into<ArtifactId>) -> Result<(), EngineError> {
        self.require_not_in_match()?;
        if !self.offer.is_empty() {
            return Err(EngineError::InvalidPhase {
                action: "grant an artifact during a reward offer",
                phase: self.phase,
            });
        }
        self.owned.push_back(id.into());
        Ok(())
    }

    /// Learn a recipe from the catalog. Learning twice is a no-op.
    pub fn learn_recipe(&mut self, id: &RecipeId) -> Result<(), EngineError> {
        self.require_not_in_match()?;
        let recipe = self
            .catalog
            .recipes
            .recipe(id)
            .ok_or_else(|| EngineError::UnknownRecipe(id.to_string()))?;
        let id = recipe.id.clone();
        self.learn(id);
        Ok(())
    }

    /// Craftability breakdown for a learned recipe.
    pub fn craft_check(&self, id: &RecipeId) -> Result<CraftCheck, EngineError> {
        self.require_not_in_match()?;
        let recipe = self.known_recipe(id)?;
        Ok(check_craft(recipe, &self.owned, &self.catalog.artifacts))
    }

    /// Craft a learned recipe, consuming one owned artifact per requirement.
    ///
    /// The recipe stays learned.
    pub fn craft(&mut self, id: &RecipeId) -> Result<CraftedHandId, EngineError> {
        self.require_not_in_match()?;
        let catalog = Arc::clone(&self.catalog);
        let recipe = self.known_recipe_in(&catalog, id)?;
        let output = commit_craft(recipe, &mut self.owned)?;
        info!(recipe = %recipe.id, output = %output, "crafted");
        self.crafted.push(output.clone());
        Ok(output)
    }

    fn known_recipe(&self, id: &RecipeId) -> Result<&RecipeDefinition, EngineError> {
        self.known_recipe_in(&self.catalog, id)
    }

    fn known_recipe_in<'c>(
        &self,
        catalog: &'c Catalog,
        id: &RecipeId,
    ) -> Result<&'c RecipeDefinition, EngineError> {
        let recipe = catalog
            .recipes
            .recipe(id)
            .ok_or_else(|| EngineError::UnknownRecipe(id.to_string()))?;
        let target = recipe.id.normalized();
        if !self.known_recipes.iter().any(|k| k.normalized() == target) {
            return Err(EngineError::RecipeNotKnown(id.to_string()));
        }
        Ok(recipe)
    }

    fn learn(&mut self, id: RecipeId) {
        let target = id.normalized();
        if !self.known_recipes.iter().any(|k| k.normalized() == target) {
            self.known_recipes.push(id);
        }
    }

    fn advance(&mut self) {
        self.round += 1;
        self.hands_count += 1;
        self.offer.clear();
        self.phase = Phase::Idle;
        debug!(round = self.round, hands = self.hands_count, "next round");
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), EngineError> {
        if self.phase == phase {
            Ok(())
        } else if self.phase == Phase::InProgress {
            Err(EngineError::MatchInProgress)
        } else {
            Err(EngineError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn require_not_in_match(&self) -> Result<(), EngineError> {
        if self.phase == Phase::InProgress {
            Err(EngineError::MatchInProgress)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Run")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("hands_count", &self.hands_count)
            .field("owned", &self.owned)
            .field("known_recipes", &self.known_recipes)
            .field("crafted", &self.crafted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::standard_catalog;
    use crate::run::ScriptedAi;

    fn run_against(script: Vec<Hand>) -> Run {
        Run::new(EngineConfig::default(), Arc::new(standard_catalog())).with_ai(ScriptedAi::new(script))
    }

    #[test]
    fn test_new_run() {
        let run = run_against(vec![Hand::Rock]);
        assert_eq!(run.phase(), Phase::Idle);
        assert_eq!(run.round(), 1);
        assert_eq!(run.hands_count(), 1);
        assert!(run.owned_artifacts().is_empty());
        assert!(run.last_report().is_none());
    }

    #[test]
    fn test_lock_in_validates_before_mutating() {
        let mut run = run_against(vec![Hand::Rock]);

        let err = run.lock_in(&[Hand::Rock, Hand::Paper]).unwrap_err();
        assert_eq!(err, EngineError::HandCount { expected: 1, actual: 2 });
        assert_eq!(run.phase(), Phase::Idle);

        run.lock_in(&[Hand::Paper]).unwrap();
        assert_eq!(run.phase(), Phase::InProgress);
        assert_eq!(run.lock_in(&[Hand::Paper]).unwrap_err(), EngineError::MatchInProgress);
    }

    #[test]
    fn test_loss_needs_reset() {
        let mut run = run_against(vec![Hand::Paper]);
        run.lock_in(&[Hand::Rock]).unwrap();
        assert_eq!(run.finish_match().unwrap(), MatchResult::Lost);

        assert!(run.reward_offer().is_empty());
        assert!(matches!(
            run.lock_in(&[Hand::Rock]),
            Err(EngineError::InvalidPhase { phase: Phase::Lost, .. })
        ));
        assert!(run.retry().is_err());

        run.reset();
        assert_eq!(run.phase(), Phase::Idle);
        assert_eq!(run.round(), 1);
    }

    #[test]
    fn test_draw_retries_same_round() {
        let mut run = run_against(vec![Hand::Rock]);
        run.lock_in(&[Hand::Rock]).unwrap();
        assert_eq!(run.finish_match().unwrap(), MatchResult::Drawn);

        run.retry().unwrap();
        assert_eq!(run.phase(), Phase::Idle);
        assert_eq!(run.round(), 1);
        assert_eq!(run.hands_count(), 1);
    }

    #[test]
    fn test_claim_artifact_and_recipe() {
        let mut run = run_against(vec![Hand::Scissors]);
        run.lock_in(&[Hand::Rock]).unwrap();
        run.finish_match().unwrap();

        assert_eq!(run.claim_reward(7).unwrap_err(), EngineError::NoSuchReward(7));
        let claimed = run.claim_reward(0).unwrap();
        match claimed {
            RewardCandidate::Artifact(id) => assert_eq!(run.owned_artifacts().back(), Some(&id)),
            RewardCandidate::Recipe(id) => assert_eq!(run.known_recipes(), &[id]),
        }
        assert_eq!(run.round(), 2);
        assert_eq!(run.hands_count(), 2);
        assert!(run.reward_offer().is_empty());
    }

    #[test]
    fn test_inventory_frozen_during_match() {
        let mut run = run_against(vec![Hand::Rock]);
        run.learn_recipe(&RecipeId::new("heavy-rock")).unwrap();
        run.lock_in(&[Hand::Rock]).unwrap();

        assert_eq!(run.grant_artifact("momentum").unwrap_err(), EngineError::MatchInProgress);
        assert_eq!(
            run.craft(&RecipeId::new("heavy-rock")).unwrap_err(),
            EngineError::MatchInProgress
        );
        assert_eq!(run.skip_reward().unwrap_err(), EngineError::MatchInProgress);
    }

    #[test]
    fn test_craft_errors() {
        let mut run = run_against(vec![Hand::Rock]);

        assert_eq!(
            run.craft(&RecipeId::new("nope")).unwrap_err(),
            EngineError::UnknownRecipe("nope".to_string())
        );
        assert_eq!(
            run.craft(&RecipeId::new("primer")).unwrap_err(),
            EngineError::RecipeNotKnown("primer".to_string())
        );

        run.learn_recipe(&RecipeId::new("primer")).unwrap();
        run.grant_artifact("opening-gambit").unwrap();
        assert!(matches!(
            run.craft(&RecipeId::new("primer")),
            Err(EngineError::MissingRequirements { .. })
        ));
        assert_eq!(run.owned_artifacts().len(), 1);
    }

    #[test]
    fn test_reset_mid_match() {
        let mut run = run_against(vec![Hand::Rock]);
        run.grant_artifact("momentum").unwrap();
        run.lock_in(&[Hand::Paper]).unwrap();

        run.reset();

        assert_eq!(run.phase(), Phase::Idle);
        assert!(run.owned_artifacts().is_empty());
        assert!(run.last_report().is_none());
        assert!(run.finish_match().is_err());
    }
}
