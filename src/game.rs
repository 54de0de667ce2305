use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use rand::Rng;
use tracing::{debug, info};

use crate::error::GameError;
use crate::snake::Direction::{*, self};
use crate::term::TermManager;
use crate::world::{Frame, Step, World};

const FRAME_BUDGET: Duration = Duration::from_millis(50);
const POLL_WINDOW: Duration = Duration::from_millis(1);

const SNAKE_CHAR: char = 'O';
const FOOD_CHAR: char = '@';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    Interrupted,
    Collision,
    BoardFull,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Turn(Direction),
    Quit,
}

pub struct SnakeGame<R> {
    term: TermManager,
    world: World<R>,
    running: Arc<AtomicBool>,
}

impl<R: Rng> SnakeGame<R> {
    /// `running` is the cancellation flag; clearing it stops the game at the next frame.
    pub fn new(rng: R, running: Arc<AtomicBool>) -> Result<Self, GameError> {
        let term = TermManager::new()?;
        let (width, height) = term.get_terminal_size();
        let world = World::new(width, height, rng)?;

        info!(width, height, "grid ready");
        Ok(SnakeGame { term, world, running })
    }

    pub fn initialize(&mut self) -> Result<(), GameError> {
        self.term.setup()?;

        for &pos in self.world.snake().body() {
            self.term.print_at(pos, SNAKE_CHAR)?;
        }
        self.term.print_at(self.world.food(), FOOD_CHAR)?;
        self.term.flush()
    }

    pub fn play(&mut self) -> Result<EndReason, GameError> {
        loop {
            let frame_start = Instant::now();

            if let Some(reason) = cancelled(&self.running) {
                return Ok(reason);
            }

            for key_ev in self.term.read_key_events_queue(POLL_WINDOW)? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => return Ok(EndReason::Quit),
                    Some(Command::Turn(dir)) => {
                        if self.world.turn(dir) {
                            debug!(?dir, "direction changed");
                        }
                    }
                    None => {}
                }
            }

            match self.world.step() {
                Step::Crashed(head) => {
                    debug!(direction = ?self.world.snake().direction(), "crashed at {:?}", head);
                    return Ok(EndReason::Collision);
                }
                Step::Advanced(frame) => self.print_frame(&frame)?,
                Step::BoardFull(frame) => {
                    self.print_frame(&frame)?;
                    return Ok(EndReason::BoardFull);
                }
            }

            sleep(FRAME_BUDGET.saturating_sub(frame_start.elapsed()));
        }
    }

    /// Puts the terminal back. Safe to call more than once.
    pub fn shutdown(&mut self) -> Result<(), GameError> {
        self.term.restore()
    }

    pub fn score(&self) -> u64 {
        self.world.score()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_frame(&mut self, frame: &Frame) -> Result<(), GameError> {
        if let Some(pos) = frame.vacated {
            self.term.print_at(pos, ' ')?;
        }
        self.term.print_at(frame.head, SNAKE_CHAR)?;

        if let Some(food) = frame.food {
            self.term.print_at(food, FOOD_CHAR)?;
        }

        self.term.flush()
    }
}

fn cancelled(running: &AtomicBool) -> Option<EndReason> {
    if running.load(Ordering::SeqCst) {
        None
    } else {
        Some(EndReason::Interrupted)
    }
}

fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Command::Turn(Right)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
