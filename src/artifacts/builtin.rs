//! The standard artifact and recipe pool.

use crate::core::{Hand, Outcome, Side};

use super::definition::{ArtifactDefinition, Rarity};
use super::recipe::RecipeDefinition;
use super::registry::Catalog;

// Carry keys used by the standard artifacts.
const SLOT0_BASE: &str = "slot0Base";
const NEXT_MULT: &str = "nextMult";
const NEXT_BASE: &str = "nextBase";
const WIN_STREAK_MULT: &str = "winStreakMult";

/// The standard catalog: every built-in artifact and recipe.
#[must_use]
pub fn standard_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for artifact in standard_artifacts() {
        catalog.artifacts.register(artifact);
    }
    for recipe in standard_recipes() {
        catalog.recipes.register(recipe);
    }
    catalog
}

fn hand_base(id: &str, name: &str, hand: Hand) -> ArtifactDefinition {
    ArtifactDefinition::new(id, name, Rarity::Common)
        .with_description(format!("+100 base to every {} you play.", hand))
        .on_compare_start(move |ctx| {
            if ctx.player_hand == hand {
                ctx.player_mut().base += 100.0;
            }
            Ok(())
        })
}

/// Built-in artifacts in pool order.
#[must_use]
pub fn standard_artifacts() -> Vec<ArtifactDefinition> {
    vec![
        hand_base("granite-gauntlet", "Granite Gauntlet", Hand::Rock),
        hand_base("paper-crane", "Paper Crane", Hand::Paper),
        hand_base("shear-sharpeners", "Shear Sharpeners", Hand::Scissors),
        ArtifactDefinition::new("rock-enthusiast", "Basalt Banner", Rarity::Uncommon)
            .with_description("If you play ≥2 Rocks this match, +2.5 to your multiplier (each compare).")
            .on_compare_start(|ctx| {
                if ctx.player_counts().rock >= 2 {
                    ctx.player_mut().mult += 2.5;
                }
                Ok(())
            }),
        ArtifactDefinition::new("opening-gambit", "Opening Gambit", Rarity::Uncommon)
            .with_description("At match start, +50 base to your first compare.")
            .on_match_start(|ctx| {
                ctx.carry.add(SLOT0_BASE, 50.0);
                Ok(())
            })
            .on_compare_start(|ctx| {
                if ctx.compare_index == 0 {
                    let bonus = ctx.carry.get(SLOT0_BASE);
                    ctx.player_mut().base += bonus;
                }
                Ok(())
            }),
        ArtifactDefinition::new("counter-surge", "Counter Surge", Rarity::Uncommon)
            .with_description("When you lose a compare, +0.5 to multiplier on the next compare.")
            .on_compare_start(|ctx| {
                let bonus = ctx.carry.take(NEXT_MULT);
                ctx.player_mut().mult += bonus;
                Ok(())
            })
            .on_compare_end(|ctx| {
                if ctx.last_result == Some(Outcome::Ai) {
                    ctx.carry.add(NEXT_MULT, 0.5);
                }
                Ok(())
            }),
        ArtifactDefinition::new("momentum", "Momentum", Rarity::Rare)
            .with_description("After each win, +25 base to your next compare this match.")
            .on_compare_start(|ctx| {
                let bonus = ctx.carry.take(NEXT_BASE);
                ctx.player_mut().base += bonus;
                Ok(())
            })
            .on_compare_end(|ctx| {
                if ctx.last_result == Some(Outcome::Player) {
                    ctx.carry.add(NEXT_BASE, 25.0);
                }
                Ok(())
            }),
        ArtifactDefinition::new("precision-play", "Precision Play", Rarity::Uncommon)
            .with_description("Scissors gets +0.3 to multiplier on that compare.")
            .on_compare_start(|ctx| {
                if ctx.player_hand == Hand::Scissors {
                    ctx.player_mut().mult += 0.3;
                }
                Ok(())
            }),
        ArtifactDefinition::new("paper-engine", "Paper Engine", Rarity::Rare)
            .with_description("If you play exactly one Paper this match, ×1.2 multiplier on all compares.")
            .on_compare_start(|ctx| {
                if ctx.player_counts().paper == 1 {
                    ctx.player_mut().mult *= 1.2;
                }
                Ok(())
            }),
        ArtifactDefinition::new("tactician", "Tactician", Rarity::Rare)
            .with_description("End of match: if your total Rocks ≥ Papers ≥ Scissors, +5% bonus to your final total.")
            .on_match_end(|ctx| {
                let c = ctx.player_counts();
                if c.rock >= c.paper && c.paper >= c.scissors {
                    ctx.totals[Side::Player] *= 1.05;
                }
                Ok(())
            }),
        ArtifactDefinition::new("switch-hitter", "Switch Hitter", Rarity::Common)
            .with_description("If this hand differs from your previous play, +60 base.")
            .on_compare_start(|ctx| {
                if ctx.previous_player_hand().is_some_and(|prev| prev != ctx.player_hand) {
                    ctx.player_mut().base += 60.0;
                }
                Ok(())
            }),
        ArtifactDefinition::new("anchor-turn", "Anchor Turn", Rarity::Common)
            .with_description("On the last compare this match, +80 base.")
            .on_compare_start(|ctx| {
                if ctx.is_last() {
                    ctx.player_mut().base += 80.0;
                }
                Ok(())
            }),
        ArtifactDefinition::new("tiebreak-practice", "Tiebreak Practice", Rarity::Common)
            .with_description("If the previous compare was a tie, +40 base.")
            .on_compare_start(|ctx| {
                if ctx.last_result == Some(Outcome::Tie) {
                    ctx.player_mut().base += 40.0;
                }
                Ok(())
            }),
        ArtifactDefinition::new("counter-read", "Counter Read", Rarity::Common)
            .with_description("If your hand beats the AI's this compare, +50 base.")
            .on_compare_start(|ctx| {
                if ctx.player_hand.beats(ctx.ai_hand) {
                    ctx.player_mut().base += 50.0;
                }
                Ok(())
            }),
        ArtifactDefinition::new("underdog", "Underdog", Rarity::Uncommon)
            .with_description("If you are trailing in total before this compare, +0.25 to multiplier.")
            .on_compare_start(|ctx| {
                if ctx.totals.player < ctx.totals.ai {
                    ctx.player_mut().mult += 0.25;
                }
                Ok(())
            }),
        ArtifactDefinition::new("win-streaker", "Win Streaker", Rarity::Uncommon)
            .with_description("While on a win streak, +0.15 mult per consecutive prior win (resets on loss).")
            .on_compare_start(|ctx| {
                let bonus = ctx.carry.get(WIN_STREAK_MULT);
                ctx.player_mut().mult += bonus;
                Ok(())
            })
            .on_compare_end(|ctx| {
                match ctx.last_result {
                    Some(Outcome::Player) => ctx.carry.add(WIN_STREAK_MULT, 0.15),
                    Some(Outcome::Ai) => ctx.carry.set(WIN_STREAK_MULT, 0.0),
                    _ => {}
                }
                Ok(())
            }),
        ArtifactDefinition::new("scouts-report", "Scout's Report", Rarity::Uncommon)
            .with_description("If AI plays ≥2 of one type this match, your counter gets +0.3 mult on those compares.")
            .on_compare_start(|ctx| {
                let ai = ctx.ai_counts();
                let bonus: f64 = Hand::ALL
                    .iter()
                    .filter(|&&hand| ai.get(hand.defeats()) >= 2 && ctx.player_hand == hand)
                    .map(|_| 0.3)
                    .sum();
                ctx.player_mut().mult += bonus;
                Ok(())
            }),
        ArtifactDefinition::new("full-suite", "Full Suite", Rarity::Rare)
            .with_description("If you play all three types at least once this match, ×1.15 multiplier on all compares.")
            .on_compare_start(|ctx| {
                if ctx.player_counts().distinct() == 3 {
                    ctx.player_mut().mult *= 1.15;
                }
                Ok(())
            }),
        ArtifactDefinition::new("monotype-engine", "Monotype Engine", Rarity::Rare)
            .with_description("If you play only one type this match, ×1.25 multiplier on all compares.")
            .on_compare_start(|ctx| {
                if ctx.player_counts().distinct() == 1 {
                    ctx.player_mut().mult *= 1.25;
                }
                Ok(())
            }),
        ArtifactDefinition::new("closers-instinct", "Closer's Instinct", Rarity::Rare)
            .with_description("On the last compare this match, ×1.3 multiplier.")
            .on_compare_start(|ctx| {
                if ctx.is_last() {
                    ctx.player_mut().mult *= 1.3;
                }
                Ok(())
            }),
        ArtifactDefinition::new("rock-dividend", "Rock Dividend", Rarity::Rare)
            .with_description("End of match: +3% final total per Rock played (cap +9%).")
            .on_match_end(|ctx| {
                let bonus = (0.03 * ctx.player_counts().rock as f64).min(0.09);
                if bonus > 0.0 {
                    ctx.totals[Side::Player] *= 1.0 + bonus;
                }
                Ok(())
            }),
    ]
}

/// Built-in recipes in pool order.
#[must_use]
pub fn standard_recipes() -> Vec<RecipeDefinition> {
    vec![
        RecipeDefinition::new("heavy-rock", "Heavy Rock", Rarity::Uncommon, "HeavyRock")
            .requires("granite-gauntlet")
            .requires("rock-enthusiast")
            .with_summary("Rock spike; plan around a dip next compare."),
        RecipeDefinition::new("switchblade", "Switchblade", Rarity::Uncommon, "Switchblade")
            .requires("precision-play")
            .requires("switch-hitter")
            .with_summary("Big gains when alternating."),
        RecipeDefinition::new("metronome-paper", "Metronome Paper", Rarity::Uncommon, "MetronomePaper")
            .requires("paper-crane")
            .requires("anchor-turn")
            .with_summary("Rewards repeats."),
        RecipeDefinition::new("riposte", "Riposte", Rarity::Rare, "Riposte")
            .requires("counter-surge")
            .requires("tiebreak-practice")
            .with_summary("Lose then punish."),
        RecipeDefinition::new("primer", "Primer", Rarity::Uncommon, "Primer")
            .requires("opening-gambit")
            .requires("momentum")
            .with_summary("Bank Base for later."),
        RecipeDefinition::new("detonator", "Detonator", Rarity::Rare, "Detonator")
            .requires("precision-play")
            .requires("closers-instinct")
            .with_summary("Turn stored Base into Mult spike."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookPoint;

    #[test]
    fn test_standard_catalog_sizes() {
        let catalog = standard_catalog();
        assert_eq!(catalog.artifacts.len(), 21);
        assert_eq!(catalog.recipes.len(), 6);
    }

    #[test]
    fn test_every_artifact_has_a_hook() {
        let points = [
            HookPoint::MatchStart,
            HookPoint::CompareStart,
            HookPoint::CompareEnd,
            HookPoint::MatchEnd,
        ];
        for artifact in standard_artifacts() {
            assert!(
                points.iter().any(|&p| artifact.has_hook(p)),
                "{} has no hooks",
                artifact.id
            );
            assert!(!artifact.description.is_empty());
        }
    }

    #[test]
    fn test_recipes_reference_catalog_artifacts() {
        let catalog = standard_catalog();
        for recipe in catalog.recipes.iter() {
            assert_eq!(recipe.requires.len(), 2);
            for required in &recipe.requires {
                assert!(
                    catalog.artifacts.artifact(required).is_some(),
                    "{} requires unknown {}",
                    recipe.id,
                    required
                );
            }
        }
    }

    #[test]
    fn test_display_name_differs_from_id() {
        let catalog = standard_catalog();
        let banner = catalog.artifacts.get("rock-enthusiast").unwrap();
        assert_eq!(banner.name, "Basalt Banner");
        assert_eq!(banner.rarity, Rarity::Uncommon);
    }
}
