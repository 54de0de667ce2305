mod error;
mod game;
mod grid;
mod snake;
mod term;
mod world;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::GameError;
use crate::game::{EndReason, SnakeGame};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    // Off unless RUST_LOG asks for it; the game owns the screen.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    let game = interrupt_flag()
        .context("Failed to set up the interrupt handler")
        .and_then(|running| {
            SnakeGame::new(rand::thread_rng(), running).context("Failed to prepare the game")
        });

    let (score, outcome) = finish(game);
    println!("{}", end_of_game(score));

    let reason = outcome?;
    info!(?reason, score, "game over");

    Ok(())
}

/// Runs the game if it could be prepared and always puts the terminal back.
/// The score is 0 when the game never got as far as having a snake.
fn finish<R: Rng>(game: Result<SnakeGame<R>>) -> (u64, Result<EndReason>) {
    let mut game = match game {
        Ok(game) => game,
        Err(err) => return (0, Err(err)),
    };

    let outcome = game.initialize().and_then(|_| game.play()).context("Game aborted");
    let restored = game.shutdown().context("Failed to restore the terminal");

    (game.score(), outcome.and_then(|reason| restored.map(|_| reason)))
}

fn end_of_game(score: u64) -> String {
    format!("END OF GAME\nScore: {}", score)
}

/// Cleared on SIGINT. The game loop checks it once per frame.
fn interrupt_flag() -> Result<Arc<AtomicBool>, GameError> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    Ok(running)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn failed_preparation_still_reports_a_zero_score() {
        let (score, outcome) = finish::<StdRng>(Err(GameError::NoRoomForFood.into()));

        assert_eq!(score, 0);
        let err = outcome.unwrap_err();
        assert!(matches!(err.downcast_ref::<GameError>(), Some(GameError::NoRoomForFood)));
        assert_eq!(end_of_game(score), "END OF GAME\nScore: 0");
    }

    #[test]
    fn report_carries_the_score() {
        assert_eq!(end_of_game(17), "END OF GAME\nScore: 17");
    }
}
