/*
checkpoints.rs

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

//! Select the numbered cells along the solution path.
//!
//! The first and the last cells of the path are always numbered. The other numbered cells are
//! spread evenly along the path, and each one is pushed forward until it is far enough from
//! the previous numbered cell.

use log::warn;

use super::grid::Coord;
use super::path::Path;

/// Numbered positions along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointSelection {
    /// Indexes in the path of the numbered cells, strictly increasing.
    pub indices: Vec<usize>,

    /// Positions in [`CheckpointSelection::indices`] of the numbered cells that are closer to
    /// the previous numbered cell than the minimum spacing.
    ///
    /// This happens when no cell of the segment is far enough from the previous numbered cell;
    /// the farthest cell of the segment is then used. This also happens when the end of the path
    /// is too close to the last intermediate numbered cell.
    pub relaxed: Vec<usize>,
}

impl CheckpointSelection {
    /// Return the numbered cells, in number order.
    pub fn cells(&self, path: &Path) -> Vec<Coord> {
        self.indices.iter().map(|i| path.get()[*i]).collect()
    }
}

/// Select `dot_count` positions along the path.
///
/// `dot_count` is clamped between 2 and the path length. An empty path gives an empty
/// selection.
pub fn select(path: &Path, dot_count: usize, min_spacing: usize) -> CheckpointSelection {
    let cells: &Vec<Coord> = path.get();
    let len: usize = cells.len();
    let mut selection: CheckpointSelection = CheckpointSelection {
        indices: Vec::with_capacity(dot_count),
        relaxed: Vec::new(),
    };
    if len == 0 {
        return selection;
    }
    selection.indices.push(0);
    if len == 1 {
        return selection;
    }

    let dot_count: usize = dot_count.clamp(2, len);
    let segment: usize = len / (dot_count - 1);

    for i in 1..dot_count - 1 {
        let previous: usize = selection.indices[i - 1];
        let previous_cell: Coord = cells[previous];

        // Leave room for the numbered cells that follow
        let last_allowed: usize = len - 1 - (dot_count - 1 - i);
        let low: usize = (i * segment).max(previous + 1).min(last_allowed);
        let high: usize = ((i + 1) * segment).min(last_allowed + 1).max(low + 1);

        let index: usize = match (low..high)
            .find(|idx| cells[*idx].manhattan(previous_cell) >= min_spacing)
        {
            Some(idx) => idx,
            None => {
                // Nothing is far enough: take the farthest cell, the first one on ties
                let mut best: usize = low;
                for idx in low..high {
                    if cells[idx].manhattan(previous_cell) > cells[best].manhattan(previous_cell) {
                        best = idx;
                    }
                }
                warn!(
                    "Numbered cell {} at {} is only {} cells away from the previous one (minimum {min_spacing})",
                    i + 1,
                    cells[best],
                    cells[best].manhattan(previous_cell)
                );
                selection.relaxed.push(i);
                best
            }
        };
        selection.indices.push(index);
    }

    let previous_cell: Coord = cells[*selection.indices.last().unwrap_or(&0)];
    if cells[len - 1].manhattan(previous_cell) < min_spacing {
        warn!(
            "Last numbered cell at {} is only {} cells away from the previous one (minimum {min_spacing})",
            cells[len - 1],
            cells[len - 1].manhattan(previous_cell)
        );
        selection.relaxed.push(selection.indices.len());
    }
    selection.indices.push(len - 1);
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Snake path: left to right on even rows, right to left on odd rows.
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

    fn assert_increasing(indices: &[usize]) {
        assert!(indices.windows(2).all(|w| w[0] < w[1]), "{indices:?}");
    }

    #[test]
    fn endpoints_always_selected() {
        let path: Path = snake(6);
        for dots in 2..=9 {
            let s: CheckpointSelection = select(&path, dots, 2);
            assert_eq!(s.indices.len(), dots);
            assert_eq!(s.indices[0], 0);
            assert_eq!(*s.indices.last().unwrap(), 35);
            assert_increasing(&s.indices);
        }
    }

    #[test]
    fn evenly_spaced_when_spacing_allows() {
        // 36 cells, 4 dots: segment of 12
        let path: Path = snake(6);
        let s: CheckpointSelection = select(&path, 4, 1);
        assert_eq!(s.indices, vec![0, 12, 24, 35]);
        assert!(s.relaxed.is_empty());
    }

    #[test]
    fn pushed_forward_for_spacing() {
        // segment = 36 / 5 = 7, and path index 7 is (1,4), 5 cells away from (0,0)
        let path: Path = snake(6);
        let s: CheckpointSelection = select(&path, 6, 3);
        assert_eq!(s.indices[1], 7);
        for (n, w) in s.indices.windows(2).enumerate() {
            let d: usize = path.get()[w[0]].manhattan(path.get()[w[1]]);
            assert!(d >= 3 || s.relaxed.contains(&(n + 1)), "{s:?}");
        }
    }

    #[test]
    fn relaxed_when_segment_too_close() {
        // A straight 1x2 path: the end is always at distance 1
        let path = Path::from_cells(2, &[Coord(0, 0), Coord(0, 1)]);
        let s: CheckpointSelection = select(&path, 2, 4);
        assert_eq!(s.indices, vec![0, 1]);
        assert_eq!(s.relaxed, vec![1]);
    }

    #[test]
    fn farthest_cell_used_on_relaxation() {
        // The first segment of the 3x3 snake holds (1,2), (1,1), and (1,0). None of them is 8
        // cells away from (0,0), so the farthest one, (1,2), is selected.
        let path: Path = snake(3);
        let s: CheckpointSelection = select(&path, 4, 8);
        assert_eq!(s.indices, vec![0, 3, 6, 8]);
        assert_eq!(s.relaxed, vec![1, 2, 3]);
        assert_increasing(&s.indices);
    }

    #[test]
    fn dot_count_clamped() {
        let path: Path = snake(2);
        let s: CheckpointSelection = select(&path, 10, 1);
        assert_eq!(s.indices, vec![0, 1, 2, 3]);
        let s: CheckpointSelection = select(&path, 0, 1);
        assert_eq!(s.indices, vec![0, 3]);
    }
}
