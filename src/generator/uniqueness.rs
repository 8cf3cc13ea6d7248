/*
uniqueness.rs

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

//! Count the solutions of a puzzle.
//!
//! A solution starts on the first numbered cell, meets the numbered cells in increasing order,
//! and ends on the last numbered cell. What counts as a solution depends on the
//! [`UniquenessMode`]:
//!
//! * [`UniquenessMode::HamiltonianCompletion`]: the solution must also fill every cell of the
//!   grid. This is the rule of the game, and the default.
//! * [`UniquenessMode::CheckpointPath`]: any path that meets the numbered cells in order is a
//!   solution, whatever its length. This mode is for counting only: the level generator
//!   cannot make such puzzles unique.
//!
//! The searches stop as soon as the requested number of solutions is found, and give up after
//! a bounded number of steps.

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::grid::{Coord, Grid, NeighborMode};
use super::path::{Frame, Path};

/// Default maximum number of moves explored by a search.
pub const DEFAULT_BUDGET: usize = 2_000_000;

/// What counts as a solution.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UniquenessMode {
    /// Paths that fill every cell.
    #[default]
    #[value(name = "hamiltonian")]
    HamiltonianCompletion,

    /// Paths of any length.
    #[value(name = "checkpoint")]
    CheckpointPath,
}

/// Type of errors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniquenessError {
    /// A puzzle needs at least two numbered cells.
    NotEnoughCheckpoints,

    /// The search explored more moves than its budget.
    BudgetExceeded,
}

/// Depth-first search over the solutions.
struct SolutionSearch<'a> {
    grid: &'a Grid,
    checkpoints: &'a [Coord],
    mode: UniquenessMode,
    budget: usize,

    /// Position of the numbered cells in the checkpoint list.
    checkpoint_index: HashMap<Coord, usize>,

    /// Current path.
    path: Path,

    /// For each cell in the path, index of the next checkpoint to meet after that cell.
    targets: Vec<usize>,

    /// Number of moves explored so far.
    steps: usize,
}

impl<'a> SolutionSearch<'a> {
    fn new(
        grid: &'a Grid,
        checkpoints: &'a [Coord],
        mode: UniquenessMode,
        budget: usize,
    ) -> Result<Self, UniquenessError> {
        if checkpoints.len() < 2 {
            return Err(UniquenessError::NotEnoughCheckpoints);
        }
        Ok(Self {
            grid,
            checkpoints,
            mode,
            budget,
            checkpoint_index: checkpoints
                .iter()
                .enumerate()
                .map(|(i, c)| (*c, i))
                .collect(),
            path: Path::new(grid.size),
            targets: Vec::with_capacity(grid.num_cells()),
            steps: 0,
        })
    }

    /// Index of the next checkpoint to meet.
    fn target(&self) -> usize {
        self.targets.last().copied().unwrap_or(0)
    }

    fn push(&mut self, cell: Coord) {
        let target: usize = self.target();
        let next_target: usize = if self.checkpoints[target] == cell {
            target + 1
        } else {
            target
        };
        self.path.push(cell);
        self.targets.push(next_target);
    }

    fn pop(&mut self) {
        self.path.pop();
        self.targets.pop();
    }

    /// Whether the path meets all the checkpoints.
    fn is_complete(&self) -> bool {
        self.target() == self.checkpoints.len()
    }

    /// Return the legal moves from the end of the path.
    fn moves(&self) -> Vec<Coord> {
        let head: Coord = match self.path.get_last() {
            Some(c) => c,
            None => return Vec::new(),
        };
        let target: usize = self.target();
        let last: usize = self.checkpoints.len() - 1;
        let total: usize = self.grid.num_cells();
        let filling: bool = self.mode == UniquenessMode::HamiltonianCompletion;

        self.grid
            .neighbors(head, self.path.visited(), NeighborMode::Unvisited)
            .into_iter()
            .filter(|c| match self.checkpoint_index.get(c) {
                // Numbered cells must be met in order
                Some(&i) if i != target => false,
                // The last numbered cell ends the path, so it comes after all the other cells
                Some(&i) if i == last && filling => self.path.len() + 1 == total,
                _ => true,
            })
            .collect()
    }

    /// Whether the path cannot lead to a solution any more.
    fn is_dead_end(&self) -> bool {
        match self.mode {
            UniquenessMode::HamiltonianCompletion => self
                .path
                .strands_cells(self.grid, self.checkpoints.last().copied()),
            UniquenessMode::CheckpointPath => false,
        }
    }

    /// Run the search and call `on_solution` for each solution found. The search stops when
    /// `on_solution` returns `true`.
    fn run<F>(&mut self, mut on_solution: F) -> Result<(), UniquenessError>
    where
        F: FnMut(&Path) -> bool,
    {
        self.path.clear();
        self.targets.clear();
        self.steps = 0;

        self.push(self.checkpoints[0]);
        let mut frames: Vec<Frame> = Vec::with_capacity(self.grid.num_cells());
        frames.push(Frame::new(self.moves()));

        while let Some(frame) = frames.last_mut() {
            match frame.next_candidate() {
                Some(next) => {
                    self.steps += 1;
                    if self.steps > self.budget {
                        debug!("Solution search budget of {} moves exceeded", self.budget);
                        return Err(UniquenessError::BudgetExceeded);
                    }
                    self.push(next);
                    if self.is_complete() {
                        if on_solution(&self.path) {
                            return Ok(());
                        }
                        self.pop();
                        continue;
                    }
                    if self.is_dead_end() {
                        self.pop();
                        continue;
                    }
                    frames.push(Frame::new(self.moves()));
                }
                None => {
                    frames.pop();
                    self.pop();
                }
            }
        }
        Ok(())
    }
}

/// Count the solutions of the puzzle, up to `limit`.
///
/// # Errors
///
/// The function returns an error when fewer than two checkpoints are provided, or when the
/// search needs more than `budget` moves.
pub fn count_solutions(
    grid: &Grid,
    checkpoints: &[Coord],
    mode: UniquenessMode,
    limit: usize,
    budget: usize,
) -> Result<usize, UniquenessError> {
    let mut search: SolutionSearch = SolutionSearch::new(grid, checkpoints, mode, budget)?;
    let mut count: usize = 0;
    if limit > 0 {
        search.run(|_| {
            count += 1;
            count >= limit
        })?;
    }
    debug!("Solutions = {count} (limit {limit}, {} moves)", search.steps);
    Ok(count)
}

/// Whether the puzzle has exactly one solution.
///
/// # Errors
///
/// See [`count_solutions`].
pub fn is_unique_solution(
    grid: &Grid,
    checkpoints: &[Coord],
    mode: UniquenessMode,
    budget: usize,
) -> Result<bool, UniquenessError> {
    Ok(count_solutions(grid, checkpoints, mode, 2, budget)? == 1)
}

/// Return a solution that differs from `solution`, or None when there is none.
///
/// # Errors
///
/// See [`count_solutions`].
pub fn find_alternate(
    grid: &Grid,
    checkpoints: &[Coord],
    solution: &Path,
    mode: UniquenessMode,
    budget: usize,
) -> Result<Option<Vec<Coord>>, UniquenessError> {
    let mut search: SolutionSearch = SolutionSearch::new(grid, checkpoints, mode, budget)?;
    let mut alternate: Option<Vec<Coord>> = None;
    search.run(|p| {
        if p != solution {
            alternate = Some(p.get().clone());
            true
        } else {
            false
        }
    })?;
    debug!(
        "Alternate solution search: {} after {} moves",
        if alternate.is_some() { "found" } else { "none" },
        search.steps
    );
    Ok(alternate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::walls::Wall;

    const HAMILTONIAN: UniquenessMode = UniquenessMode::HamiltonianCompletion;

    #[test]
    fn corner_to_corner_on_open_2x2() {
        // (0,0) to (1,0) through every cell: only around the square
        let grid = Grid::new(2);
        let cps = [Coord(0, 0), Coord(1, 0)];
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, 10, DEFAULT_BUDGET),
            Ok(1)
        );
        // Without the fill requirement, the direct move is a solution too
        assert_eq!(
            count_solutions(&grid, &cps, UniquenessMode::CheckpointPath, 10, DEFAULT_BUDGET),
            Ok(2)
        );
    }

    #[test]
    fn open_3x3_corner_to_corner() {
        // Only the horizontal and the vertical snakes join opposite corners
        let grid = Grid::new(3);
        let cps = [Coord(0, 0), Coord(2, 2)];
        let n: usize = count_solutions(&grid, &cps, HAMILTONIAN, 100, DEFAULT_BUDGET).unwrap();
        assert_eq!(n, 2);
        assert!(!is_unique_solution(&grid, &cps, HAMILTONIAN, DEFAULT_BUDGET).unwrap());
    }

    #[test]
    fn limit_short_circuits() {
        // There are 8 paths between two adjacent corners of the 4x4 grid
        let grid = Grid::new(4);
        let cps = [Coord(0, 0), Coord(3, 0)];
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, 100, DEFAULT_BUDGET),
            Ok(8)
        );
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, 2, DEFAULT_BUDGET),
            Ok(2)
        );
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, 0, DEFAULT_BUDGET),
            Ok(0)
        );
    }

    #[test]
    fn wall_makes_solution_unique() {
        // A wall between (0,1) and (1,1) rules the vertical snake out
        let cps = [Coord(0, 0), Coord(2, 2)];
        let grid = Grid::with_walls(3, &[Wall::new(Coord(0, 1), Coord(1, 1))]);
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, 10, DEFAULT_BUDGET),
            Ok(1)
        );
    }

    #[test]
    fn checkpoints_met_in_order() {
        // From (0,0) to (1,0) on 2x2, (0,1) must come before (1,1)
        let grid = Grid::new(2);
        let cps = [Coord(0, 0), Coord(1, 1), Coord(0, 1), Coord(1, 0)];
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, 10, DEFAULT_BUDGET),
            Ok(0)
        );
        let cps = [Coord(0, 0), Coord(0, 1), Coord(1, 1), Coord(1, 0)];
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, 10, DEFAULT_BUDGET),
            Ok(1)
        );
    }

    #[test]
    fn alternate_differs_from_solution() {
        let grid = Grid::new(3);
        let cps = [Coord(0, 0), Coord(2, 2)];
        let solution = Path::from_cells(
            3,
            &[
                Coord(0, 0),
                Coord(0, 1),
                Coord(0, 2),
                Coord(1, 2),
                Coord(1, 1),
                Coord(1, 0),
                Coord(2, 0),
                Coord(2, 1),
                Coord(2, 2),
            ],
        );
        let alt: Vec<Coord> = find_alternate(&grid, &cps, &solution, HAMILTONIAN, DEFAULT_BUDGET)
            .unwrap()
            .expect("alternate");
        assert_ne!(&alt, solution.get());
        assert_eq!(alt.len(), 9);
        assert_eq!(alt[0], Coord(0, 0));
        assert_eq!(alt[8], Coord(2, 2));

        let blocked = Grid::with_walls(3, &[Wall::new(Coord(1, 0), Coord(0, 0))]);
        assert_eq!(
            find_alternate(&blocked, &cps, &solution, HAMILTONIAN, DEFAULT_BUDGET),
            Ok(None)
        );
    }

    #[test]
    fn budget_is_enforced() {
        let grid = Grid::new(6);
        let cps = [Coord(0, 0), Coord(5, 0)];
        assert_eq!(
            count_solutions(&grid, &cps, HAMILTONIAN, usize::MAX, 50),
            Err(UniquenessError::BudgetExceeded)
        );
    }

    #[test]
    fn needs_two_checkpoints() {
        let grid = Grid::new(2);
        assert_eq!(
            count_solutions(&grid, &[Coord(0, 0)], HAMILTONIAN, 2, DEFAULT_BUDGET),
            Err(UniquenessError::NotEnoughCheckpoints)
        );
    }
}
