/*
random_path.rs

Copyright 2025 Hervé Quatremain

This file is part of Zipgrid.

Zipgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Zipgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Zipgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate a random Hamiltonian path.
//!
//! The path visits every cell of the grid exactly once. The search is a depth-first search
//! that visits first the neighbors with the fewest remaining moves (Warnsdorff's rule). Moves
//! that split the unvisited cells, or that leave more than one dead end, are skipped before they
//! are explored. Most grids are covered without backtracking, and the number of backtracks is
//! bounded.

use log::debug;
use std::time::Instant;

use super::grid::{Coord, Grid, NeighborMode, Visited};
use super::path::{Frame, Path};
use super::seeded_random::SeededRandom;

/// Default maximum number of backtracks before giving up.
pub const MAX_BACKTRACKS: usize = 1000;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum RandomPathError {
    /// The whole search space from the starting cell was explored without finding a path.
    NoPath,

    /// The search backtracked too many times.
    RetriesExceeded,
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Size of the grid.
    pub grid_size: usize,

    /// The search returns [`RandomPathError::RetriesExceeded`] when the number of backtracks
    /// reaches this value.
    pub max_backtracks: usize,

    /// Starting cell of the last generated path.
    pub starting_cell: Coord,

    /// Number of cells pushed on the path during the last generation.
    pub iteration: usize,

    /// Number of backtracks during the last generation.
    pub retries: usize,

    /// Number of moves skipped during the last generation, because they would have cut the
    /// unvisited cells off.
    pub pruned: usize,

    /// Duration in seconds it took to generate the last random path.
    pub duration: f32,

    /// Grid without walls. Walls are placed later around the path.
    grid: Grid,
}

impl RandomPath {
    /// Create the object.
    pub fn new(grid_size: usize, max_backtracks: usize) -> Self {
        Self {
            grid_size,
            max_backtracks,
            starting_cell: Coord(0, 0),
            iteration: 0,
            retries: 0,
            pruned: 0,
            duration: 0.0,
            grid: Grid::new(grid_size),
        }
    }

    /// Generate and return a random path.
    ///
    /// The starting cell and all the tie-breaks between equivalent moves are drawn from `rnd`.
    ///
    /// # Errors
    ///
    /// The method returns an error if the backtrack ceiling is reached, or (on degenerate
    /// grids) if no path exists from the starting cell. Retry with another seed.
    pub fn generate(&mut self, rnd: &mut SeededRandom) -> Result<Path, RandomPathError> {
        let start: Instant = Instant::now();
        self.iteration = 0;
        self.retries = 0;
        self.pruned = 0;
        self.duration = 0.0;

        let size: usize = self.grid_size;
        let row: usize = rnd.next_int(0, size - 1);
        let col: usize = rnd.next_int(0, size - 1);
        self.starting_cell = Coord(row, col);
        debug!(
            "Starting cell = {}  Number of cells = {}",
            self.starting_cell,
            self.grid.num_cells()
        );

        let mut path: Path = Path::new(size);
        path.push(self.starting_cell);
        let res: Result<(), RandomPathError> = self.find_path(&mut path, rnd);

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Backtracks = {}  Pruned = {}  Duration = {}",
            self.iteration, self.retries, self.pruned, self.duration
        );
        res.map(|()| path)
    }

    /// Extend the path until it covers the grid.
    ///
    /// Each time a cell is pushed, the retry ceiling is checked first and the completion
    /// second. Popping a cell counts as one retry.
    fn find_path(&mut self, path: &mut Path, rnd: &mut SeededRandom) -> Result<(), RandomPathError> {
        let total: usize = self.grid.num_cells();
        let mut frames: Vec<Frame> = Vec::with_capacity(total);

        loop {
            if self.retries >= self.max_backtracks {
                debug!("    Back: too many retries ({})", self.retries);
                return Err(RandomPathError::RetriesExceeded);
            }
            if path.len() == total {
                return Ok(());
            }

            let current: Coord = path.get_last().ok_or(RandomPathError::NoPath)?;
            frames.push(Frame::new(self.ordered_moves(current, path.visited(), rnd)));

            // Go down to the next candidate, backtracking through exhausted frames
            loop {
                let frame: &mut Frame = frames.last_mut().ok_or(RandomPathError::NoPath)?;
                match frame.next_candidate() {
                    Some(next) => {
                        path.push(next);
                        // Skip the moves that leave cells no path can cover any more
                        if path.len() < total && path.strands_cells(&self.grid, None) {
                            path.pop();
                            self.pruned += 1;
                            continue;
                        }
                        self.iteration += 1;
                        break;
                    }
                    None => {
                        frames.pop();
                        if frames.is_empty() {
                            debug!("    Back: no eligible move from the starting cell");
                            return Err(RandomPathError::NoPath);
                        }
                        if let Some(c) = path.pop() {
                            debug!("    Back: dead end at {c}");
                        }
                        self.retries += 1;
                    }
                }
            }
        }
    }

    /// Return the unvisited neighbors of the cell, the most constrained first.
    ///
    /// The neighbors are shuffled before a stable sort on their number of remaining moves, so
    /// that ties are broken randomly.
    fn ordered_moves(&self, cell: Coord, visited: &Visited, rnd: &mut SeededRandom) -> Vec<Coord> {
        let mut moves: Vec<Coord> = self.grid.neighbors(cell, visited, NeighborMode::Unvisited);
        rnd.shuffle_in_place(&mut moves);
        moves.sort_by_key(|c| self.grid.degree(*c, visited));
        moves
    }
}
