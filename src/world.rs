use rand::Rng;
use tracing::debug;

use crate::error::GameError;
use crate::grid::OccupancyGrid;
use crate::snake::{Direction, MoveResult, Snake};
use crate::{Coords, TermInt};

pub const STARTING_LENGTH: usize = 10;
const STARTING_DIRECTION: Direction = Direction::Left;

/// Cells the renderer has to touch after a frame.
#[derive(Debug, PartialEq, Eq)]
pub struct Frame {
    pub head: Coords,
    /// Cell left behind by the tail, if nothing covers it anymore.
    pub vacated: Option<Coords>,
    /// New food cell, only set when the food moved this frame.
    pub food: Option<Coords>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Advanced(Frame),
    Crashed(Coords),
    BoardFull(Frame),
}

/// Game state for a grid of fixed size, free of any terminal I/O.
pub struct World<R> {
    width: TermInt,
    height: TermInt,
    starting_length: usize,
    snake: Snake,
    food: Coords,
    grid: OccupancyGrid,
    rng: R,
}

impl<R: Rng> World<R> {
    pub fn new(width: TermInt, height: TermInt, rng: R) -> Result<Self, GameError> {
        Self::with_length(width, height, STARTING_LENGTH, rng)
    }

    pub fn with_length(width: TermInt, height: TermInt, length: usize, rng: R) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::EmptyGrid { width, height });
        }

        let snake = Snake::new((width / 2, height / 2), length, STARTING_DIRECTION);
        let mut grid = OccupancyGrid::new(width, height);
        grid.rasterize(snake.body());

        let preferred = (width / 2, height / 4);
        let food = if grid.is_occupied(preferred) {
            grid.probe_from(grid.index(preferred)).ok_or(GameError::NoRoomForFood)?
        } else {
            preferred
        };

        Ok(World { width, height, starting_length: length, snake, food, grid, rng })
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    /// Segments grown beyond the starting length.
    pub fn score(&self) -> u64 {
        self.snake.len().saturating_sub(self.starting_length) as u64
    }

    pub fn turn(&mut self, direction: Direction) -> bool {
        let turned = self.snake.turn(direction, self.width, self.height);
        if !turned {
            debug!(?direction, "ignored reversal into the neck");
        }
        turned
    }

    pub fn step(&mut self) -> Step {
        let (new_head, old_tail) = match self.snake.move_step(self.width, self.height) {
            MoveResult::Crashed { head } => return Step::Crashed(head),
            MoveResult::Moved { new_head, old_tail } => (new_head, old_tail),
        };

        self.grid.rasterize(self.snake.body());

        let vacated = if self.grid.is_occupied(old_tail) { None } else { Some(old_tail) };
        let mut frame = Frame { head: new_head, vacated, food: None };

        if new_head == self.food {
            // Grows before looking for room, so the meal that fills the board still scores.
            self.snake.grow();
            debug!(length = self.snake.len(), "food eaten at {:?}", new_head);

            match self.grid.find_free(&mut self.rng) {
                Some(pos) => {
                    debug!("food moved to {:?}", pos);
                    self.food = pos;
                    frame.food = Some(pos);
                }
                None => return Step::BoardFull(frame),
            }
        }

        Step::Advanced(frame)
    }
}
