/*
walls.rs

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

//! Walls between adjacent cells, and wall placement around the solution path.
//!
//! A wall blocks the move between two orthogonally adjacent cells. Walls make the puzzle
//! harder by removing the shortcuts that the player could otherwise take, and in unique
//! solution mode they are used to block every alternate solution.
//!
//! Walls never cut the solution path and never touch a numbered cell.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use super::difficulty::{DifficultyConfig, GeneratorOptions, WallStrategy};
use super::grid::{Coord, Grid};
use super::path::Path;
use super::seeded_random::SeededRandom;
use super::uniqueness::{self, UniquenessError};

/// Wall representation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct Wall {
    pub cell1: Coord,
    pub cell2: Coord,
}

impl Hash for Wall {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.cell1 < self.cell2 {
            self.cell1.hash(state);
            self.cell2.hash(state);
        } else {
            self.cell2.hash(state);
            self.cell1.hash(state);
        }
    }
}

impl PartialEq for Wall {
    fn eq(&self, other: &Self) -> bool {
        (self.cell1 == other.cell1 && self.cell2 == other.cell2)
            || (self.cell1 == other.cell2 && self.cell2 == other.cell1)
    }
}

impl Eq for Wall {}

impl Wall {
    /// Create a [`Wall`] object. The cells are stored in row-major order.
    pub fn new(cell1: Coord, cell2: Coord) -> Self {
        if cell2 < cell1 {
            Self {
                cell1: cell2,
                cell2: cell1,
            }
        } else {
            Self { cell1, cell2 }
        }
    }

    /// Whether the given cell is one side of the wall.
    pub fn is_in(&self, cell: Coord) -> bool {
        self.cell1 == cell || self.cell2 == cell
    }

    /// Whether the two cells of the wall are orthogonal neighbors.
    pub fn is_between_neighbors(&self) -> bool {
        self.cell1.is_orthogonal_to(self.cell2)
    }
}

/// Set of walls, without duplicates.
#[derive(Debug, Default, Clone)]
pub struct WallSet {
    walls: HashSet<Wall>,
}

impl WallSet {
    pub fn new() -> Self {
        Self {
            walls: HashSet::new(),
        }
    }

    /// Add a wall. Return `false` if the wall was already in the set.
    pub fn insert(&mut self, wall: Wall) -> bool {
        self.walls.insert(wall)
    }

    pub fn contains(&self, wall: &Wall) -> bool {
        self.walls.contains(wall)
    }

    /// Whether a wall separates the two cells.
    pub fn contains_between(&self, cell1: Coord, cell2: Coord) -> bool {
        !self.walls.is_empty() && self.walls.contains(&Wall { cell1, cell2 })
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum WallError {
    /// Fewer walls than the minimum wall count could be placed.
    NotEnoughWalls { placed: usize, min: usize },

    /// Blocking the alternate solutions needs more walls than the maximum wall count.
    TooManyWalls { max: usize },

    /// An alternate solution only differs from the solution along numbered cells, so no wall
    /// can block it.
    CannotBlockAlternate,

    /// The final wall set still allows several solutions.
    NotUnique,

    /// The alternate solution search failed.
    Verifier(UniquenessError),
}

/// Reasons for refusing a wall.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Rejection {
    /// The cells are not orthogonal neighbors inside the grid.
    NotAnEdge,

    /// The cells are consecutive in the solution path.
    SolutionEdge,

    /// One of the cells is numbered.
    NumberedCell,

    /// The wall already exists.
    Duplicate,
}

/// [`WallPlacer`] object.
pub struct WallPlacer<'a> {
    /// Solution path.
    solution: &'a Path,

    /// Numbered cells, in number order.
    checkpoints: &'a [Coord],

    /// Numbered cells, for quick lookups.
    numbered: HashSet<Coord>,

    /// Edges between consecutive cells of the solution path.
    solution_edges: WallSet,

    /// Grid with the walls placed so far.
    grid: Grid,

    /// Walls in the order they were placed.
    walls: Vec<Wall>,

    /// Number of candidate walls that were refused.
    pub rejected: usize,
}

impl<'a> WallPlacer<'a> {
    /// Create the object.
    pub fn new(grid_size: usize, solution: &'a Path, checkpoints: &'a [Coord]) -> Self {
        let mut solution_edges: WallSet = WallSet::new();
        for w in solution.get().windows(2) {
            solution_edges.insert(Wall::new(w[0], w[1]));
        }
        Self {
            solution,
            checkpoints,
            numbered: checkpoints.iter().copied().collect(),
            solution_edges,
            grid: Grid::new(grid_size),
            walls: Vec::new(),
            rejected: 0,
        }
    }

    /// Whether the wall can be added to the walls placed so far.
    pub fn check(&self, wall: &Wall) -> Result<(), Rejection> {
        if !wall.is_between_neighbors()
            || !self.grid.contains(wall.cell1)
            || !self.grid.contains(wall.cell2)
        {
            return Err(Rejection::NotAnEdge);
        }
        if self.solution_edges.contains(wall) {
            return Err(Rejection::SolutionEdge);
        }
        if self.numbered.contains(&wall.cell1) || self.numbered.contains(&wall.cell2) {
            return Err(Rejection::NumberedCell);
        }
        if self.grid.walls().contains(wall) {
            return Err(Rejection::Duplicate);
        }
        Ok(())
    }

    /// Add the wall if it passes [`WallPlacer::check`]. Return whether the wall was added.
    fn try_add(&mut self, wall: Wall) -> bool {
        match self.check(&wall) {
            Ok(()) => {
                self.grid.add_wall(wall);
                self.walls.push(wall);
                true
            }
            Err(r) => {
                debug!("    Wall {}-{} rejected: {r:?}", wall.cell1, wall.cell2);
                self.rejected += 1;
                false
            }
        }
    }

    /// Place and return the walls.
    ///
    /// The wall count is drawn from the configuration. In unique solution mode, the walls that
    /// block the alternate solutions are placed first, and the count is then topped up.
    ///
    /// # Errors
    ///
    /// The method returns an error when the wall count cannot be satisfied, or when the unique
    /// solution mode cannot reach a unique solution. A new level must be tried.
    pub fn place(
        &mut self,
        config: &DifficultyConfig,
        options: &GeneratorOptions,
        rnd: &mut SeededRandom,
    ) -> Result<Vec<Wall>, WallError> {
        let (min, max): (usize, usize) = config.wall_count.bounds();
        let target: usize = config.wall_count.draw(rnd);
        debug!("Wall target = {target} (between {min} and {max})");

        if options.require_unique_solution {
            self.block_alternates(max, options, rnd)?;
        }

        match options.wall_strategy {
            WallStrategy::Enumerate => self.fill_enumerate(target, rnd),
            WallStrategy::Sample => self.fill_sample(target, config, rnd),
        }

        if log_enabled!(Level::Debug) {
            debug!(
                "Placed {} walls, rejected {} candidates",
                self.walls.len(),
                self.rejected
            );
            for w in &self.walls {
                debug!("    {} | {}", w.cell1, w.cell2);
            }
        }

        if self.walls.len() < min {
            return Err(WallError::NotEnoughWalls {
                placed: self.walls.len(),
                min,
            });
        }

        if options.require_unique_solution {
            match uniqueness::is_unique_solution(
                &self.grid,
                self.checkpoints,
                options.uniqueness_mode,
                options.verifier_budget,
            ) {
                Ok(true) => (),
                Ok(false) => return Err(WallError::NotUnique),
                Err(e) => return Err(WallError::Verifier(e)),
            }
        }
        Ok(self.walls.clone())
    }

    /// Place walls until no alternate solution remains.
    fn block_alternates(
        &mut self,
        max: usize,
        options: &GeneratorOptions,
        rnd: &mut SeededRandom,
    ) -> Result<(), WallError> {
        loop {
            let alternate: Vec<Coord> = match uniqueness::find_alternate(
                &self.grid,
                self.checkpoints,
                self.solution,
                options.uniqueness_mode,
                options.verifier_budget,
            ) {
                Ok(Some(a)) => a,
                Ok(None) => {
                    debug!("No alternate solution with {} walls", self.walls.len());
                    return Ok(());
                }
                Err(e) => return Err(WallError::Verifier(e)),
            };

            let blockable: Vec<Wall> = alternate
                .windows(2)
                .map(|w| Wall::new(w[0], w[1]))
                .filter(|w| self.check(w).is_ok())
                .collect();
            if blockable.is_empty() {
                debug!("Alternate solution cannot be blocked: {alternate:?}");
                return Err(WallError::CannotBlockAlternate);
            }
            if self.walls.len() >= max {
                return Err(WallError::TooManyWalls { max });
            }
            let wall: Wall = blockable[rnd.next_int(0, blockable.len() - 1)];
            debug!(
                "Blocking alternate solution with wall {}-{}",
                wall.cell1, wall.cell2
            );
            self.try_add(wall);
        }
    }

    /// Go through all the interior edges in random order and add walls up to the target.
    fn fill_enumerate(&mut self, target: usize, rnd: &mut SeededRandom) {
        let candidates: Vec<Wall> = rnd.shuffle(&self.grid.interior_edges());
        for wall in candidates {
            if self.walls.len() >= target {
                break;
            }
            self.try_add(wall);
        }
    }

    /// Draw random edges and add walls up to the target, with a bounded number of draws.
    fn fill_sample(&mut self, target: usize, config: &DifficultyConfig, rnd: &mut SeededRandom) {
        let size: usize = self.grid.size;
        let max_attempts: usize = size * size * 4;
        let mut attempts: usize = 0;

        while self.walls.len() < target && attempts < max_attempts {
            attempts += 1;

            if config.wall_probability < 1.0 && rnd.next() > config.wall_probability {
                continue;
            }

            let row: usize = rnd.next_int(0, size - 1);
            let col: usize = rnd.next_int(0, size - 1);
            let direction: usize = rnd.next_int(0, 2);

            // One chance out of three for a vertical wall, two for a horizontal one
            if direction < 1 && col < size - 1 {
                self.try_add(Wall::new(Coord(row, col), Coord(row, col + 1)));
            } else if direction >= 1 && row < size - 1 {
                self.try_add(Wall::new(Coord(row, col), Coord(row + 1, col)));
            }
        }
        debug!("Wall sampling stopped after {attempts} draws");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::{Difficulty, WallCount};
    use crate::generator::uniqueness::UniquenessMode;

    /// Snake path on a 4x4 grid: left to right on even rows, right to left on odd rows.
    fn snake(size: usize) -> Path {
        let mut cells: Vec<Coord> = Vec::new();
        for row in 0..size {
            for i in 0..size {
                let col: usize = if row % 2 == 0 { i } else { size - 1 - i };
                cells.push(Coord(row, col));
            }
        }
        Path::from_cells(size, &cells)
    }

    fn config(wall_count: WallCount) -> DifficultyConfig {
        DifficultyConfig {
            grid_size: 4,
            wall_count,
            ..DifficultyConfig::for_difficulty(Difficulty::Easy)
        }
    }

    #[test]
    fn order_independent_equality() {
        let a = Wall::new(Coord(1, 1), Coord(1, 2));
        let b = Wall {
            cell1: Coord(1, 2),
            cell2: Coord(1, 1),
        };
        assert_eq!(a, b);
        let mut set = WallSet::new();
        assert!(set.insert(a));
        assert!(!set.insert(b));
        assert!(set.contains_between(Coord(1, 2), Coord(1, 1)));
        assert_eq!(a.cell1, Coord(1, 1));
    }

    #[test]
    fn candidate_rules() {
        let path: Path = snake(4);
        let checkpoints = [Coord(0, 0), Coord(3, 0)];
        let mut placer = WallPlacer::new(4, &path, &checkpoints);
        assert_eq!(
            placer.check(&Wall::new(Coord(0, 1), Coord(0, 2))),
            Err(Rejection::SolutionEdge)
        );
        assert_eq!(
            placer.check(&Wall::new(Coord(0, 0), Coord(1, 0))),
            Err(Rejection::NumberedCell)
        );
        assert_eq!(
            placer.check(&Wall::new(Coord(0, 1), Coord(1, 2))),
            Err(Rejection::NotAnEdge)
        );
        let wall = Wall::new(Coord(0, 1), Coord(1, 1));
        assert_eq!(placer.check(&wall), Ok(()));
        assert!(placer.try_add(wall));
        assert_eq!(placer.check(&wall), Err(Rejection::Duplicate));
    }

    #[test]
    fn enumerate_reaches_fixed_target() {
        let path: Path = snake(4);
        let checkpoints = [Coord(0, 0), Coord(3, 0)];
        let mut placer = WallPlacer::new(4, &path, &checkpoints);
        let walls: Vec<Wall> = placer
            .place(
                &config(WallCount::Fixed(5)),
                &GeneratorOptions::default(),
                &mut SeededRandom::new(8),
            )
            .expect("walls");
        assert_eq!(walls.len(), 5);
        for w in &walls {
            assert!(!w.is_in(Coord(0, 0)) && !w.is_in(Coord(3, 0)));
            let i1: usize = path.cell_index(w.cell1).unwrap();
            let i2: usize = path.cell_index(w.cell2).unwrap();
            assert_ne!(i1.abs_diff(i2), 1);
        }
    }

    #[test]
    fn not_enough_room_for_walls() {
        // 24 interior edges, 15 on the path, 2 touching a numbered cell: 7 walls at most
        let path: Path = snake(4);
        let checkpoints = [Coord(0, 0), Coord(3, 0)];
        let mut placer = WallPlacer::new(4, &path, &checkpoints);
        let res = placer.place(
            &config(WallCount::Range { min: 8, max: 10 }),
            &GeneratorOptions::default(),
            &mut SeededRandom::new(8),
        );
        assert_eq!(res, Err(WallError::NotEnoughWalls { placed: 7, min: 8 }));
    }

    #[test]
    fn sampling_terminates() {
        let path: Path = snake(4);
        let checkpoints = [Coord(0, 0), Coord(3, 0)];
        let mut placer = WallPlacer::new(4, &path, &checkpoints);
        let options = GeneratorOptions {
            wall_strategy: WallStrategy::Sample,
            ..GeneratorOptions::default()
        };
        // Larger than the available edges: the number of draws bounds the loop
        let res = placer.place(
            &config(WallCount::Range { min: 0, max: 50 }),
            &options,
            &mut SeededRandom::new(4),
        );
        let walls: Vec<Wall> = res.expect("walls");
        assert!(walls.len() <= 7);
        for w in &walls {
            assert_eq!(placer.check(w), Err(Rejection::Duplicate));
        }
    }

    #[test]
    fn unique_mode_blocks_every_alternate() {
        let path: Path = snake(4);
        let checkpoints = [Coord(0, 0), Coord(1, 2), Coord(3, 0)];
        let mut placer = WallPlacer::new(4, &path, &checkpoints);
        let options = GeneratorOptions {
            require_unique_solution: true,
            ..GeneratorOptions::default()
        };
        let walls: Vec<Wall> = placer
            .place(
                &config(WallCount::Range { min: 0, max: 7 }),
                &options,
                &mut SeededRandom::new(11),
            )
            .expect("walls");
        let grid = Grid::with_walls(4, &walls);
        assert_eq!(
            uniqueness::count_solutions(
                &grid,
                &checkpoints,
                UniquenessMode::HamiltonianCompletion,
                2,
                uniqueness::DEFAULT_BUDGET
            ),
            Ok(1)
        );
    }
}
