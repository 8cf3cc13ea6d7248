/*
grid.rs

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

//! Grid coordinates and cell adjacency.
//!
//! The [`Grid`] object stores the size of the square grid and the walls that block moves
//! between adjacent cells. It resolves the legal moves from a cell, both for the searches
//! that walk unvisited cells only, and for the connectivity checks that walk over filled
//! cells.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::walls::{Wall, WallSet};

/// Cell coordinate in the grid. Serialized as `[row, col]`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(pub usize, pub usize);

impl Coord {
    pub fn row(&self) -> usize {
        self.0
    }

    pub fn col(&self) -> usize {
        self.1
    }

    /// Manhattan distance between the two cells.
    pub fn manhattan(&self, other: Coord) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    /// Whether the two cells share a side.
    pub fn is_orthogonal_to(&self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Move one cell in the given direction. Return None when leaving the grid.
    pub fn step(&self, direction: Direction, grid_size: usize) -> Option<Coord> {
        let (row, col) = (self.0, self.1);
        match direction {
            Direction::Up => row.checked_sub(1).map(|r| Coord(r, col)),
            Direction::Down => (row + 1 < grid_size).then_some(Coord(row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| Coord(row, c)),
            Direction::Right => (col + 1 < grid_size).then_some(Coord(row, col + 1)),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

/// The four orthogonal directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which the neighbors are collected.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Whether the neighbor resolution skips the visited cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NeighborMode {
    /// Only return cells that are not visited yet (path searches).
    Unvisited,

    /// Return visited cells too (connectivity and win checks).
    Any,
}

/// Visited status of the grid cells, indexed in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Visited {
    grid_size: usize,
    cells: Vec<bool>,
    count: usize,
}

impl Visited {
    /// Create a [`Visited`] object where no cell is visited.
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            cells: vec![false; grid_size * grid_size],
            count: 0,
        }
    }

    fn index(&self, cell: Coord) -> usize {
        cell.0 * self.grid_size + cell.1
    }

    /// Mark the cell visited.
    pub fn insert(&mut self, cell: Coord) {
        let i: usize = self.index(cell);
        if !self.cells[i] {
            self.cells[i] = true;
            self.count += 1;
        }
    }

    /// Mark the cell not visited.
    pub fn remove(&mut self, cell: Coord) {
        let i: usize = self.index(cell);
        if self.cells[i] {
            self.cells[i] = false;
            self.count -= 1;
        }
    }

    pub fn contains(&self, cell: Coord) -> bool {
        self.cells[self.index(cell)]
    }

    /// Number of visited cells.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.count = 0;
    }
}

/// Square grid with its walls.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Number of rows (and columns).
    pub size: usize,

    /// Blocked edges.
    walls: WallSet,
}

impl Grid {
    /// Create a [`Grid`] object without any wall.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            walls: WallSet::new(),
        }
    }

    /// Create a [`Grid`] object with the given walls.
    pub fn with_walls(size: usize, walls: &[Wall]) -> Self {
        let mut grid: Grid = Grid::new(size);
        for w in walls {
            grid.walls.insert(*w);
        }
        grid
    }

    /// Number of cells in the grid.
    pub fn num_cells(&self) -> usize {
        self.size * self.size
    }

    pub fn contains(&self, cell: Coord) -> bool {
        cell.0 < self.size && cell.1 < self.size
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    /// Add a wall. Return `false` if the wall already exists.
    pub fn add_wall(&mut self, wall: Wall) -> bool {
        self.walls.insert(wall)
    }

    pub fn has_wall_between(&self, cell1: Coord, cell2: Coord) -> bool {
        self.walls.contains_between(cell1, cell2)
    }

    /// Whether a move from `from` to `to` is legal: both cells in the grid, orthogonally
    /// adjacent, and not separated by a wall.
    pub fn is_adjacent(&self, from: Coord, to: Coord) -> bool {
        self.contains(from)
            && self.contains(to)
            && from.is_orthogonal_to(to)
            && !self.has_wall_between(from, to)
    }

    /// Return the in-bounds, wall-free neighbors of the cell, in up, down, left, right order.
    ///
    /// With [`NeighborMode::Unvisited`], the cells marked in `visited` are skipped.
    pub fn neighbors(&self, cell: Coord, visited: &Visited, mode: NeighborMode) -> Vec<Coord> {
        let mut neighbors: Vec<Coord> = Vec::with_capacity(4);
        for d in Direction::ALL {
            if let Some(n) = cell.step(d, self.size) {
                if self.has_wall_between(cell, n) {
                    continue;
                }
                if mode == NeighborMode::Unvisited && visited.contains(n) {
                    continue;
                }
                neighbors.push(n);
            }
        }
        neighbors
    }

    /// Number of unvisited, wall-free neighbors of the cell.
    pub fn degree(&self, cell: Coord, visited: &Visited) -> usize {
        self.neighbors(cell, visited, NeighborMode::Unvisited).len()
    }

    /// Every interior edge of the grid, in row-major order (right edge, then down edge).
    pub fn interior_edges(&self) -> Vec<Wall> {
        let mut edges: Vec<Wall> = Vec::with_capacity(2 * self.size * self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                let cell: Coord = Coord(row, col);
                for d in [Direction::Right, Direction::Down] {
                    if let Some(n) = cell.step(d, self.size) {
                        edges.push(Wall::new(cell, n));
                    }
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stays_in_grid() {
        assert_eq!(Coord(0, 0).step(Direction::Up, 3), None);
        assert_eq!(Coord(0, 0).step(Direction::Left, 3), None);
        assert_eq!(Coord(2, 2).step(Direction::Down, 3), None);
        assert_eq!(Coord(2, 2).step(Direction::Right, 3), None);
        assert_eq!(Coord(1, 1).step(Direction::Up, 3), Some(Coord(0, 1)));
        assert_eq!(Coord(1, 1).step(Direction::Right, 3), Some(Coord(1, 2)));
    }

    #[test]
    fn neighbors_in_direction_order() {
        let grid = Grid::new(3);
        let visited = Visited::new(3);
        assert_eq!(
            grid.neighbors(Coord(1, 1), &visited, NeighborMode::Unvisited),
            vec![Coord(0, 1), Coord(2, 1), Coord(1, 0), Coord(1, 2)]
        );
        assert_eq!(
            grid.neighbors(Coord(0, 0), &visited, NeighborMode::Unvisited),
            vec![Coord(1, 0), Coord(0, 1)]
        );
    }

    #[test]
    fn visited_cells_depend_on_mode() {
        let grid = Grid::new(3);
        let mut visited = Visited::new(3);
        visited.insert(Coord(0, 1));
        assert_eq!(
            grid.neighbors(Coord(1, 1), &visited, NeighborMode::Unvisited),
            vec![Coord(2, 1), Coord(1, 0), Coord(1, 2)]
        );
        assert_eq!(
            grid.neighbors(Coord(1, 1), &visited, NeighborMode::Any).len(),
            4
        );
    }

    #[test]
    fn walls_block_in_both_modes() {
        let grid = Grid::with_walls(3, &[Wall::new(Coord(1, 2), Coord(1, 1))]);
        let visited = Visited::new(3);
        for mode in [NeighborMode::Unvisited, NeighborMode::Any] {
            let n: Vec<Coord> = grid.neighbors(Coord(1, 1), &visited, mode);
            assert!(!n.contains(&Coord(1, 2)));
            assert_eq!(n.len(), 3);
        }
        assert!(!grid.is_adjacent(Coord(1, 2), Coord(1, 1)));
        assert!(grid.is_adjacent(Coord(1, 1), Coord(0, 1)));
        assert!(!grid.is_adjacent(Coord(0, 0), Coord(1, 1)));
    }

    #[test]
    fn interior_edge_count() {
        // 2 * n * (n - 1) edges
        assert_eq!(Grid::new(6).interior_edges().len(), 60);
        assert_eq!(Grid::new(1).interior_edges().len(), 0);
    }

    #[test]
    fn visited_counts_distinct_cells() {
        let mut visited = Visited::new(2);
        visited.insert(Coord(0, 0));
        visited.insert(Coord(0, 0));
        visited.insert(Coord(1, 1));
        assert_eq!(visited.len(), 2);
        visited.remove(Coord(0, 0));
        assert_eq!(visited.len(), 1);
        assert!(!visited.contains(Coord(0, 0)));
    }
}
