//! Auto-play a seeded run and print what happened.
//!
//! ```text
//! handforge-sim --seed 7 --matches 5
//! RUST_LOG=handforge=debug handforge-sim --ai-script rock,paper
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use handforge::core::format_value;
use handforge::run::{ScriptedAi, UniformAi};
use handforge::{
    standard_catalog, EngineConfig, EngineError, GameRng, Hand, MatchResult, RevealTimeline, Run,
};

/// Handforge simulator - plays a run with random player hands
#[derive(Parser, Debug)]
#[command(name = "handforge-sim")]
#[command(about = "Auto-play a seeded handforge run", long_about = None)]
#[command(version)]
struct Cli {
    /// Seed for AI hands, rewards and the simulated player
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many matches
    #[arg(short, long, default_value = "10")]
    matches: usize,

    /// Engine config as JSON (missing fields keep their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fixed AI hands, comma-separated (e.g. "rock,paper")
    #[arg(long)]
    ai_script: Option<String>,

    /// Print each match report as JSON
    #[arg(long)]
    json: bool,
}

fn load_config(cli: &Cli) -> Result<EngineConfig, EngineError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))?;
            EngineConfig::from_json(&text)?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn parse_script(script: &str) -> Result<Vec<Hand>, EngineError> {
    script.split(',').map(str::parse).collect()
}

fn main() -> Result<(), EngineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut player_rng = GameRng::new(config.seed).for_context("simulated-player");
    let catalog = Arc::new(standard_catalog());

    let run = Run::new(config, Arc::clone(&catalog));
    let mut run = match &cli.ai_script {
        Some(script) => run.with_ai(ScriptedAi::new(parse_script(script)?)),
        None => run.with_ai(UniformAi),
    };

    info!(seed = run.config().seed, matches = cli.matches, "starting run");

    for _ in 0..cli.matches {
        let hands = Hand::random_sequence(run.hands_count(), &mut player_rng);
        let report = run.lock_in(&hands)?.clone();
        let timeline = RevealTimeline::build(&report, &run.config().pace);

        if cli.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| EngineError::Config(e.to_string()))?;
            println!("{}", json);
        }

        println!("Round {} ({} hands)", report.round, report.hands_count());
        for compare in &report.compares {
            println!(
                "  [{}/{}] {} vs {} -> {} vs {}",
                compare.index + 1,
                report.hands_count(),
                compare.hands.player,
                compare.hands.ai,
                format_value(compare.scores.player),
                format_value(compare.scores.ai),
            );
            for event in &compare.events {
                println!("      {}", event);
            }
        }
        if report.end_adjustment.player != 0.0 {
            println!("  End bonus +{}", format_value(report.end_adjustment.player));
        }
        println!(
            "  Totals {} vs {} ({} ms reveal)",
            format_value(report.totals.player),
            format_value(report.totals.ai),
            timeline.total_ms,
        );

        let result = run.finish_match()?;
        println!("  {}", result);

        match result {
            MatchResult::Won => {
                if run.reward_offer().is_empty() {
                    run.skip_reward()?;
                } else {
                    let picked = run.claim_reward(0)?;
                    println!("  Reward: {}", picked.name(&catalog));
                }
                craft_everything(&mut run)?;
            }
            MatchResult::Drawn => run.retry()?,
            MatchResult::Lost => break,
        }
    }

    println!(
        "Finished in {:?} at round {} with {} artifacts, {} recipes, {} crafted hands",
        run.phase(),
        run.round(),
        run.owned_artifacts().len(),
        run.known_recipes().len(),
        run.crafted_hands().len(),
    );
    for artifact in run.owned_summaries() {
        println!("  {} [{}] {}", artifact.name, artifact.rarity, artifact.description);
    }
    if cli.json {
        let json = serde_json::to_string_pretty(&run.owned_summaries())
            .map_err(|e| EngineError::Config(e.to_string()))?;
        println!("{}", json);
    }
    Ok(())
}

fn craft_everything(run: &mut Run) -> Result<(), EngineError> {
    let known = run.known_recipes().to_vec();
    for recipe in &known {
        if run.craft_check(recipe)?.craftable() {
            let output = run.craft(recipe)?;
            println!("  Crafted {}", output);
        }
    }
    Ok(())
}
