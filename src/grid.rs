use rand::Rng;

use crate::{Coords, TermInt};

/// One byte per terminal cell, non-zero where a snake segment sits.
/// Rebuilt from scratch every frame and only read when placing food.
pub struct OccupancyGrid {
    width: TermInt,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        let cells = vec![0; width as usize * height as usize];
        OccupancyGrid { width, cells }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn rasterize<'a, I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = &'a Coords>,
    {
        self.cells.iter_mut().for_each(|cell| *cell = 0);

        for &pos in segments {
            let idx = self.index(pos);
            self.cells[idx] = 1;
        }
    }

    pub fn is_occupied(&self, pos: Coords) -> bool {
        self.cells[self.index(pos)] != 0
    }

    /// Picks a random cell and walks forward from it, row by row and wrapping
    /// past the last cell, until a free one turns up.
    pub fn find_free<R: Rng>(&self, rng: &mut R) -> Option<Coords> {
        if self.cells.is_empty() {
            return None;
        }

        let start = rng.gen_range(0..self.size());
        self.probe_from(start)
    }

    /// `None` once every cell has been checked.
    pub fn probe_from(&self, start: usize) -> Option<Coords> {
        let size = self.size();

        (0..size)
            .map(|offset| (start + offset) % size)
            .find(|&idx| self.cells[idx] == 0)
            .map(|idx| self.coords(idx))
    }

    pub fn index(&self, pos: Coords) -> usize {
        pos.1 as usize * self.width as usize + pos.0 as usize
    }

    fn coords(&self, idx: usize) -> Coords {
        let width = self.width as usize;
        ((idx % width) as TermInt, (idx / width) as TermInt)
    }
}
