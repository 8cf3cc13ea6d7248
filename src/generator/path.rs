/*
path.rs

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

//! Path in the grid.

use super::grid::{Coord, Grid, NeighborMode, Visited};

/// Path object.
#[derive(Debug, Clone)]
pub struct Path {
    /// Path as an ordered list of cells.
    path: Vec<Coord>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this [`Visited`] object
    /// speeds up the lookup.
    visited: Visited,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object for a grid of the given size.
    pub fn new(grid_size: usize) -> Self {
        Self {
            path: Vec::with_capacity(grid_size * grid_size),
            visited: Visited::new(grid_size),
        }
    }

    /// Create a [`Path`] object from a list of cells.
    pub fn from_cells(grid_size: usize, cells: &[Coord]) -> Self {
        let mut p: Path = Path::new(grid_size);
        for c in cells {
            p.push(*c);
        }
        p
    }

    /// Remove all the cells from the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.visited.clear();
    }

    /// Add a cell to the path.
    pub fn push(&mut self, cell: Coord) {
        self.path.push(cell);
        self.visited.insert(cell);
    }

    /// Remove the last cell from the path.
    pub fn pop(&mut self) -> Option<Coord> {
        let c: Option<Coord> = self.path.pop();
        if let Some(cell) = c {
            self.visited.remove(cell);
        }
        c
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: Coord) -> bool {
        self.visited.contains(cell)
    }

    /// Return the visited status of the cells.
    pub fn visited(&self) -> &Visited {
        &self.visited
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<Coord> {
        &self.path
    }

    /// Consume the object and return the path vector.
    pub fn into_cells(self) -> Vec<Coord> {
        self.path
    }

    /// Return the position of the given cell in the path.
    pub fn cell_index(&self, cell: Coord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        self.path.iter().position(|c| *c == cell)
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Coord> {
        self.path.last().copied()
    }

    /// Whether the unvisited cells can no longer be covered by extending the path from its
    /// last cell.
    ///
    /// This happens when the unvisited cells are not all reachable from the last cell, or when
    /// an unvisited cell has fewer than two open sides and cannot be the end of the path. When
    /// `end` is None, any single cell can be the end of the path.
    pub fn strands_cells(&self, grid: &Grid, end: Option<Coord>) -> bool {
        let head: Coord = match self.get_last() {
            Some(c) => c,
            None => return false,
        };
        let remaining: usize = grid.num_cells() - self.len();
        if remaining == 0 {
            return false;
        }

        let mut seen: Visited = Visited::new(grid.size);
        let mut stack: Vec<Coord> = grid.neighbors(head, &self.visited, NeighborMode::Unvisited);
        for c in &stack {
            seen.insert(*c);
        }
        let mut reached: usize = 0;
        let mut dead_ends: usize = 0;
        while let Some(c) = stack.pop() {
            reached += 1;
            let open: Vec<Coord> = grid.neighbors(c, &self.visited, NeighborMode::Unvisited);
            let degree: usize = open.len() + usize::from(grid.is_adjacent(c, head));
            if degree < 2 {
                match end {
                    Some(e) if e == c => (),
                    Some(_) => return true,
                    None => {
                        dead_ends += 1;
                        if dead_ends > 1 {
                            return true;
                        }
                    }
                }
            }
            for n in open {
                if !seen.contains(n) {
                    seen.insert(n);
                    stack.push(n);
                }
            }
        }
        reached != remaining
    }
}

/// Stack frame for the iterative depth-first searches.
///
/// The candidates are computed when the frame is created. They are still unvisited when the
/// search comes back to the frame, because the deeper frames unmark their cells when they are
/// popped.
#[derive(Debug)]
pub struct Frame {
    candidates: Vec<Coord>,
    next: usize,
}

impl Frame {
    pub fn new(candidates: Vec<Coord>) -> Self {
        Self {
            candidates,
            next: 0,
        }
    }

    /// Return the next candidate to explore, or None when the frame is exhausted.
    pub fn next_candidate(&mut self) -> Option<Coord> {
        let c: Option<Coord> = self.candidates.get(self.next).copied();
        if c.is_some() {
            self.next += 1;
        }
        c
    }
}
