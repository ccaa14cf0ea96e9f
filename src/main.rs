//! Headless replay runner (default binary).
//!
//! Plays a seeded game from a list of action names and prints the final
//! snapshot as JSON, the same value a client sends as its `game_state`.
//!
//! ```text
//! tetris-duel 42 rotate moveLeft hardDrop hold tick tick hardDrop
//! ```
//!
//! The seed is the first argument when it is a number, otherwise
//! `TETRIS_SEED`, otherwise 1. Logging goes to stderr and is filtered by
//! `RUST_LOG`.

use std::env;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use tetris_duel::core::{GameEngine, TickOutcome};
use tetris_duel::types::GameAction;

const DEFAULT_SEED: u32 = 1;

/// One replay step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Action(GameAction),
    Tick,
}

fn parse_step(name: &str) -> Result<Step> {
    if name.eq_ignore_ascii_case("tick") {
        return Ok(Step::Tick);
    }
    match GameAction::from_str(name) {
        Some(action) => Ok(Step::Action(action)),
        None => bail!("unknown action {:?}", name),
    }
}

fn seed_from_env() -> Result<u32> {
    match env::var("TETRIS_SEED") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("TETRIS_SEED is not a u32: {:?}", raw)),
        Err(_) => Ok(DEFAULT_SEED),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let seed = match args.first().and_then(|a| a.parse::<u32>().ok()) {
        Some(seed) => {
            args.remove(0);
            seed
        }
        None => seed_from_env()?,
    };

    let steps = args
        .iter()
        .map(|a| parse_step(a))
        .collect::<Result<Vec<_>>>()?;

    let mut game = GameEngine::new(seed);
    tracing::info!(seed, steps = steps.len(), "replaying");

    for (i, step) in steps.iter().enumerate() {
        match step {
            Step::Action(action) => {
                let applied = game.apply_action(*action);
                tracing::debug!(step = i, action = action.as_str(), applied, "action");
            }
            Step::Tick => {
                if let TickOutcome::Placed(lines) = game.tick() {
                    tracing::debug!(step = i, lines, "piece placed by gravity");
                }
            }
        }
    }

    if game.is_game_over() {
        tracing::info!(score = game.score(), lines = game.lines_cleared(), "game over");
    }

    let json = serde_json::to_string_pretty(&game.snapshot()).context("encode snapshot")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).context("write snapshot")?;
    Ok(())
}
