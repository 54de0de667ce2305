use std::collections::VecDeque;

use crate::{Coords, TermInt};
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Coords },
    Crashed { head: Coords },
}

/// The snake body, head first. Every segment is one grid cell.
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    /// All `size` segments start stacked on `pos` and unfold as the head moves away.
    pub fn new(pos: Coords, size: usize, direction: Direction) -> Self {
        let body = std::iter::repeat(pos).take(size.max(1)).collect();
        Snake { body, direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Changes direction unless the new heading would put the head straight
    /// onto the neck. Returns whether the turn was taken.
    pub fn turn(&mut self, new_direction: Direction, width: TermInt, height: TermInt) -> bool {
        if let Some(&neck) = self.body.get(1) {
            if next_cell(self.head(), new_direction, width, height) == neck {
                return false;
            }
        }

        self.direction = new_direction;
        true
    }

    /// Every segment takes its predecessor's cell, then the head advances one
    /// cell, wrapping around the grid edges.
    pub fn move_step(&mut self, width: TermInt, height: TermInt) -> MoveResult {
        let new_head = next_cell(self.head(), self.direction, width, height);

        self.body.push_front(new_head);
        let old_tail = self.body.pop_back().unwrap_or(new_head);

        if self.body.iter().skip(1).any(|&pos| pos == new_head) {
            Crashed { head: new_head }
        } else {
            Moved { new_head, old_tail }
        }
    }

    /// Appends a segment on top of the tail. It shows up once the body moves on.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }
}

pub fn next_cell(pos: Coords, direction: Direction, width: TermInt, height: TermInt) -> Coords {
    let (x, y) = pos;

    match direction {
        Up => (x, if y == 0 { height - 1 } else { y - 1 }),
        Down => (x, if y + 1 >= height { 0 } else { y + 1 }),
        Left => (if x == 0 { width - 1 } else { x - 1 }, y),
        Right => (if x + 1 >= width { 0 } else { x + 1 }, y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfolded(len: usize, direction: Direction) -> Snake {
        let mut snake = Snake::new((40, 12), len, direction);
        for _ in 0..len {
            snake.move_step(80, 24);
        }
        snake
    }

    #[test]
    fn segments_follow_the_leader() {
        let mut snake = unfolded(5, Left);
        let before: Vec<Coords> = snake.body().iter().copied().collect();

        snake.turn(Up, 80, 24);
        assert!(matches!(snake.move_step(80, 24), Moved { .. }));

        let after: Vec<Coords> = snake.body().iter().copied().collect();
        assert_eq!(after[0], (before[0].0, before[0].1 - 1));
        assert_eq!(&after[1..], &before[..before.len() - 1]);
    }

    #[test]
    fn head_wraps_on_every_edge() {
        assert_eq!(next_cell((0, 5), Left, 80, 24), (79, 5));
        assert_eq!(next_cell((79, 5), Right, 80, 24), (0, 5));
        assert_eq!(next_cell((5, 0), Up, 80, 24), (5, 23));
        assert_eq!(next_cell((5, 23), Down, 80, 24), (5, 0));
        assert_eq!(next_cell((5, 5), Down, 80, 24), (5, 6));
    }

    #[test]
    fn stacked_start_accepts_any_turn() {
        let mut snake = Snake::new((10, 10), 10, Left);
        assert!(snake.turn(Right, 80, 24));
        assert_eq!(snake.direction(), Right);
        assert!(matches!(snake.move_step(80, 24), Moved { new_head: (11, 10), .. }));
    }

    #[test]
    fn reversal_into_neck_is_ignored() {
        let mut snake = unfolded(4, Left);
        assert!(!snake.turn(Right, 80, 24));
        assert_eq!(snake.direction(), Left);

        assert!(snake.turn(Down, 80, 24));
        assert!(!snake.turn(Right, 80, 24));
        // The neck sits to the right, so up is still fine before moving.
        assert!(snake.turn(Up, 80, 24));
    }

    #[test]
    fn reversal_check_sees_through_wraparound() {
        let mut snake = Snake::new((0, 3), 2, Right);
        snake.move_step(4, 4);
        snake.turn(Left, 4, 4);
        assert_eq!(snake.direction(), Right);

        let mut snake = Snake::new((3, 3), 2, Left);
        snake.turn(Right, 4, 4);
        snake.move_step(4, 4);
        assert_eq!(snake.head(), (0, 3));
        assert!(!snake.turn(Left, 4, 4));
    }

    #[test]
    fn running_into_the_body_crashes() {
        let mut snake = unfolded(6, Left);
        snake.turn(Up, 80, 24);
        snake.move_step(80, 24);
        snake.turn(Right, 80, 24);
        snake.move_step(80, 24);
        snake.turn(Down, 80, 24);

        let head = snake.head();
        assert_eq!(snake.move_step(80, 24), Crashed { head: (head.0, head.1 + 1) });
    }

    #[test]
    fn growing_duplicates_the_tail_until_the_next_move() {
        let mut snake = unfolded(3, Left);
        let tail = snake.tail();
        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body()[2], tail);
        assert_eq!(snake.body()[3], tail);

        match snake.move_step(80, 24) {
            Moved { old_tail, .. } => assert_eq!(old_tail, tail),
            Crashed { .. } => panic!("unexpected crash"),
        }
        assert_eq!(snake.tail(), tail);
        assert_ne!(snake.body()[2], tail);
    }
}
