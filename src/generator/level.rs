/*
level.rs

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

//! Assemble levels.
//!
//! A level is built in three steps from a single [`SeededRandom`] object:
//!
//! 1. A random Hamiltonian path is generated. It is the solution of the level.
//! 2. Numbered cells are selected along the path.
//! 3. Walls are placed around the path.
//!
//! When a step fails, the whole level is generated again from the next seed, up to
//! [`GeneratorOptions::max_attempts`] times.

use chrono::{Datelike, Local, NaiveDate};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::checkpoints::{self, CheckpointSelection};
use super::difficulty::{Difficulty, DifficultyConfig, GeneratorOptions};
use super::error::GeneratorError;
use super::grid::{Coord, Grid};
use super::path::Path;
use super::random_path::RandomPath;
use super::seeded_random::SeededRandom;
use super::walls::{Wall, WallError, WallPlacer};

/// Numbered cell. Numbers start at 1.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct NumberedCell {
    pub row: usize,
    pub col: usize,
    pub number: usize,
}

impl NumberedCell {
    pub fn coord(&self) -> Coord {
        Coord(self.row, self.col)
    }
}

/// Generated level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub grid_size: usize,
    pub difficulty: Difficulty,

    /// Numbered cells, sorted by number.
    pub numbered_cells: Vec<NumberedCell>,

    /// Solution path, visiting every cell once.
    pub solution_path: Vec<Coord>,

    pub walls: Vec<Wall>,

    /// Seed of the attempt that produced the level. Generating a level with this seed gives
    /// the same level at the first attempt.
    pub seed: u64,
}

/// Why an attempt failed.
#[derive(Debug)]
enum AttemptError {
    Path(GeneratorError),
    Walls(WallError),
}

impl Level {
    /// Return the grid with the walls of the level.
    pub fn grid(&self) -> Grid {
        Grid::with_walls(self.grid_size, &self.walls)
    }

    /// Return the numbered cells in number order.
    pub fn checkpoints(&self) -> Vec<Coord> {
        self.numbered_cells.iter().map(|n| n.coord()).collect()
    }

    /// Verify the level invariants.
    ///
    /// # Errors
    ///
    /// The method returns [`GeneratorError::InvalidLevel`] with the first broken invariant.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let grid: Grid = self.grid();
        let invalid = |msg: String| -> Result<(), GeneratorError> {
            Err(GeneratorError::InvalidLevel(msg))
        };

        // Solution path
        if self.solution_path.len() != grid.num_cells() {
            return invalid(format!(
                "path has {} cells instead of {}",
                self.solution_path.len(),
                grid.num_cells()
            ));
        }
        let mut seen: HashSet<Coord> = HashSet::with_capacity(grid.num_cells());
        for c in &self.solution_path {
            if !grid.contains(*c) {
                return invalid(format!("path cell {c} is outside the grid"));
            }
            if !seen.insert(*c) {
                return invalid(format!("path visits {c} twice"));
            }
        }
        for w in self.solution_path.windows(2) {
            if !grid.is_adjacent(w[0], w[1]) {
                return invalid(format!("path cannot move from {} to {}", w[0], w[1]));
            }
        }

        // Numbered cells
        if self.numbered_cells.len() < 2 {
            return invalid(format!("{} numbered cells", self.numbered_cells.len()));
        }
        let mut previous: Option<usize> = None;
        for (i, n) in self.numbered_cells.iter().enumerate() {
            if n.number != i + 1 {
                return invalid(format!("numbered cell {} has number {}", i + 1, n.number));
            }
            let index: usize = match self.solution_path.iter().position(|c| *c == n.coord()) {
                Some(idx) => idx,
                None => return invalid(format!("numbered cell {} is not on the path", n.coord())),
            };
            if previous.is_some_and(|p| index <= p) {
                return invalid(format!("numbered cell {} is out of order", n.number));
            }
            previous = Some(index);
        }
        if self.numbered_cells[0].coord() != self.solution_path[0] {
            return invalid("numbered cell 1 does not start the path".to_string());
        }
        if previous != Some(self.solution_path.len() - 1) {
            return invalid("last numbered cell does not end the path".to_string());
        }

        // Walls
        let numbered: HashSet<Coord> = self.checkpoints().into_iter().collect();
        let mut walls: HashSet<Wall> = HashSet::with_capacity(self.walls.len());
        for w in &self.walls {
            if !w.is_between_neighbors() || !grid.contains(w.cell1) || !grid.contains(w.cell2) {
                return invalid(format!("wall {}-{} is not an interior edge", w.cell1, w.cell2));
            }
            if numbered.contains(&w.cell1) || numbered.contains(&w.cell2) {
                return invalid(format!("wall {}-{} touches a numbered cell", w.cell1, w.cell2));
            }
            if !walls.insert(*w) {
                return invalid(format!("wall {}-{} is duplicated", w.cell1, w.cell2));
            }
        }
        Ok(())
    }

    /// Whether the path drawn by the player solves the level.
    ///
    /// The path must fill the grid, follow legal moves, start on number 1, end on the last
    /// number, and meet the numbered cells in increasing order. It does not have to be the
    /// stored solution.
    pub fn is_solution(&self, drawn: &[Coord]) -> bool {
        let grid: Grid = self.grid();
        if drawn.len() != grid.num_cells() {
            return false;
        }
        let mut seen: HashSet<Coord> = HashSet::with_capacity(drawn.len());
        if !drawn.iter().all(|c| grid.contains(*c) && seen.insert(*c)) {
            return false;
        }
        if !drawn.windows(2).all(|w| grid.is_adjacent(w[0], w[1])) {
            return false;
        }

        let checkpoints: Vec<Coord> = self.checkpoints();
        let met: Vec<Coord> = drawn
            .iter()
            .filter(|c| checkpoints.contains(c))
            .copied()
            .collect();
        met == checkpoints
            && drawn.first() == checkpoints.first()
            && drawn.last() == checkpoints.last()
    }

    /// Return the next cell of the solution after the part of `drawn` that matches the
    /// solution, or None when the drawn path is the whole solution.
    pub fn hint(&self, drawn: &[Coord]) -> Option<Coord> {
        let matching: usize = drawn
            .iter()
            .zip(&self.solution_path)
            .take_while(|(a, b)| a == b)
            .count();
        self.solution_path.get(matching).copied()
    }
}

/// Draw a seed when the caller does not provide one.
fn random_seed() -> u64 {
    rand::rng().random_range(0..=u64::from(u32::MAX))
}

/// Generate one level from the seed.
fn generate_attempt(
    config: &DifficultyConfig,
    seed: u64,
    options: &GeneratorOptions,
) -> Result<Level, AttemptError> {
    let mut rnd: SeededRandom = SeededRandom::new(seed);

    let mut builder: RandomPath = RandomPath::new(config.grid_size, options.max_backtracks);
    let path: Path = builder.generate(&mut rnd).map_err(|e| {
        debug!("Path search failed: {e:?}");
        AttemptError::Path(GeneratorError::PathGenerationExhausted {
            seed,
            retries: builder.retries,
        })
    })?;

    let dot_count: usize = rnd.next_int(config.min_dot_count, config.max_dot_count);
    let selection: CheckpointSelection = checkpoints::select(&path, dot_count, config.min_spacing);
    let cells: Vec<Coord> = selection.cells(&path);
    debug!(
        "Numbered cells = {:?}  Relaxed spacing = {:?}",
        selection.indices, selection.relaxed
    );

    let walls: Vec<Wall> = WallPlacer::new(config.grid_size, &path, &cells)
        .place(config, options, &mut rnd)
        .map_err(AttemptError::Walls)?;

    let numbered_cells: Vec<NumberedCell> = cells
        .iter()
        .enumerate()
        .map(|(i, c)| NumberedCell {
            row: c.row(),
            col: c.col(),
            number: i + 1,
        })
        .collect();

    Ok(Level {
        grid_size: config.grid_size,
        difficulty: config.difficulty,
        numbered_cells,
        solution_path: path.into_cells(),
        walls,
        seed,
    })
}

/// Generate a level with an explicit configuration.
///
/// With a seed, the attempts use the seeds that follow it, so that the same seed always gives
/// the same level. Without a seed, each attempt draws a new random seed.
///
/// # Errors
///
/// * [`GeneratorError::InvalidConfiguration`] when the configuration or the options are not
///   valid.
/// * [`GeneratorError::LevelGenerationFailed`] when all the attempts failed.
/// * [`GeneratorError::InvalidLevel`] when an assembled level breaks an invariant.
pub fn generate_level_with_config(
    config: &DifficultyConfig,
    seed: Option<u64>,
    options: &GeneratorOptions,
) -> Result<Level, GeneratorError> {
    config.validate()?;
    options.validate()?;

    let mut current: u64 = match seed {
        Some(s) => s,
        None => {
            let s: u64 = random_seed();
            info!("No seed provided, using random seed {s}");
            s
        }
    };

    let mut last_seed: u64 = current;
    for attempt in 1..=options.max_attempts {
        last_seed = current;
        debug!("Attempt {attempt} with seed {current}");
        match generate_attempt(config, current, options) {
            Ok(level) => {
                level.validate()?;
                return Ok(level);
            }
            Err(AttemptError::Path(e)) => info!("Attempt {attempt} failed: {e}"),
            Err(AttemptError::Walls(e)) => {
                info!("Attempt {attempt} failed: cannot place the walls ({e:?})")
            }
        }
        current = match seed {
            Some(_) => current.wrapping_add(1),
            None => {
                let s: u64 = random_seed();
                info!("Retrying with random seed {s}");
                s
            }
        };
    }
    Err(GeneratorError::LevelGenerationFailed {
        attempts: options.max_attempts,
        last_seed,
    })
}

/// Generate a level for the difficulty.
///
/// # Errors
///
/// See [`generate_level_with_config`].
pub fn generate_level(
    difficulty: Difficulty,
    seed: Option<u64>,
    options: &GeneratorOptions,
) -> Result<Level, GeneratorError> {
    generate_level_with_config(&DifficultyConfig::for_difficulty(difficulty), seed, options)
}

/// Return the seed of the daily level for the date.
pub fn daily_seed(date: NaiveDate) -> u64 {
    let seed: i64 =
        i64::from(date.day()) + i64::from(date.month0()) * 31 + i64::from(date.year()) * 365;
    seed.unsigned_abs()
}

/// Generate the easy level of the day.
///
/// # Errors
///
/// See [`generate_level_with_config`].
pub fn generate_daily_level(date: NaiveDate) -> Result<Level, GeneratorError> {
    generate_level(
        Difficulty::Easy,
        Some(daily_seed(date)),
        &GeneratorOptions::default(),
    )
}

/// Generate the easy level for the local date.
///
/// # Errors
///
/// See [`generate_level_with_config`].
pub fn generate_today_level() -> Result<Level, GeneratorError> {
    generate_daily_level(Local::now().date_naive())
}

/// Generate a level from a random seed.
///
/// # Errors
///
/// See [`generate_level_with_config`].
pub fn generate_random_level(difficulty: Difficulty) -> Result<Level, GeneratorError> {
    generate_level(difficulty, None, &GeneratorOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::uniqueness::UniquenessMode;

    /// 3x3 level solved by the horizontal snake.
    fn small_level() -> Level {
        Level {
            grid_size: 3,
            difficulty: Difficulty::Easy,
            numbered_cells: vec![
                NumberedCell {
                    row: 0,
                    col: 0,
                    number: 1,
                },
                NumberedCell {
                    row: 1,
                    col: 1,
                    number: 2,
                },
                NumberedCell {
                    row: 2,
                    col: 2,
                    number: 3,
                },
            ],
            solution_path: vec![
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
            walls: vec![Wall::new(Coord(0, 2), Coord(1, 2))],
            seed: 1,
        }
    }

    #[test]
    fn daily_seed_from_date() {
        let date: NaiveDate = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(daily_seed(date), 15 + 2025 * 365);
        let date: NaiveDate = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        assert_eq!(daily_seed(date), 2 + 2 * 31 + 2025 * 365);
    }

    #[test]
    fn validate_catches_broken_levels() {
        // The wall cuts the solution path
        assert!(matches!(
            small_level().validate(),
            Err(GeneratorError::InvalidLevel(_))
        ));

        let mut level: Level = small_level();
        level.walls = vec![Wall::new(Coord(0, 1), Coord(1, 1))];
        assert!(matches!(level.validate(), Err(GeneratorError::InvalidLevel(_))));

        level.walls = vec![Wall::new(Coord(1, 0), Coord(2, 0))];
        assert_eq!(level.validate(), Err(GeneratorError::InvalidLevel(
            "path cannot move from (1,0) to (2,0)".to_string()
        )));

        level.walls.clear();
        assert_eq!(level.validate(), Ok(()));

        let mut swapped: Level = level.clone();
        swapped.numbered_cells.swap(0, 1);
        assert!(swapped.validate().is_err());

        let mut short: Level = level.clone();
        short.solution_path.pop();
        assert!(short.validate().is_err());
    }

    #[test]
    fn win_check() {
        let mut level: Level = small_level();
        level.walls.clear();
        assert!(level.is_solution(&level.solution_path));

        // The vertical snake meets (1,1) in the middle too
        let vertical: Vec<Coord> = vec![
            Coord(0, 0),
            Coord(1, 0),
            Coord(2, 0),
            Coord(2, 1),
            Coord(1, 1),
            Coord(0, 1),
            Coord(0, 2),
            Coord(1, 2),
            Coord(2, 2),
        ];
        assert!(level.is_solution(&vertical));

        let mut swapped: Vec<Coord> = level.solution_path.clone();
        swapped.swap(3, 4);
        assert!(!level.is_solution(&swapped));
        assert!(!level.is_solution(&level.solution_path[..8]));

        // A wall between (0,0) and (1,0) only blocks the vertical snake
        level.walls = vec![Wall::new(Coord(0, 0), Coord(1, 0))];
        assert!(!level.is_solution(&vertical));
        assert!(level.is_solution(&level.solution_path));
    }

    #[test]
    fn hint_follows_the_solution() {
        let level: Level = small_level();
        assert_eq!(level.hint(&[]), Some(Coord(0, 0)));
        assert_eq!(level.hint(&[Coord(0, 0), Coord(0, 1)]), Some(Coord(0, 2)));
        // Wrong turn at the second cell
        assert_eq!(level.hint(&[Coord(0, 0), Coord(1, 0)]), Some(Coord(0, 1)));
        assert_eq!(level.hint(&level.solution_path), None);
    }

    #[test]
    fn generated_level_is_valid() {
        let level: Level =
            generate_level(Difficulty::Easy, Some(12345), &GeneratorOptions::default()).unwrap();
        assert_eq!(level.grid_size, 6);
        assert_eq!(level.difficulty, Difficulty::Easy);
        assert_eq!(level.validate(), Ok(()));
        assert!(level.is_solution(&level.solution_path));
    }

    #[test]
    fn invalid_configuration_fails_fast() {
        let config = DifficultyConfig {
            grid_size: 1,
            ..DifficultyConfig::for_difficulty(Difficulty::Easy)
        };
        assert!(matches!(
            generate_level_with_config(&config, Some(1), &GeneratorOptions::default()),
            Err(GeneratorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn zero_backtracks_exhausts_attempts() {
        let options = GeneratorOptions {
            max_attempts: 3,
            max_backtracks: 0,
            ..GeneratorOptions::default()
        };
        assert_eq!(
            generate_level(Difficulty::Medium, Some(42), &options),
            Err(GeneratorError::LevelGenerationFailed {
                attempts: 3,
                last_seed: 44
            })
        );

        // Seeds wrap around
        assert_eq!(
            generate_level(Difficulty::Easy, Some(u64::MAX), &options),
            Err(GeneratorError::LevelGenerationFailed {
                attempts: 3,
                last_seed: 1
            })
        );
    }

    #[test]
    fn checkpoint_mode_cannot_generate_unique_levels() {
        let options = GeneratorOptions {
            require_unique_solution: true,
            uniqueness_mode: UniquenessMode::CheckpointPath,
            ..GeneratorOptions::default()
        };
        assert!(matches!(
            generate_level(Difficulty::Easy, Some(3), &options),
            Err(GeneratorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn random_level() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let level: Level = generate_random_level(difficulty).unwrap();
            assert_eq!(level.difficulty, difficulty);
            assert_eq!(level.validate(), Ok(()));
            assert_eq!(
                generate_level(difficulty, Some(level.seed), &GeneratorOptions::default()),
                Ok(level)
            );
        }
    }

    #[test]
    fn today_level() {
        let before: NaiveDate = Local::now().date_naive();
        let level: Level = generate_today_level().unwrap();
        let after: NaiveDate = Local::now().date_naive();
        assert_eq!(level.difficulty, Difficulty::Easy);
        assert_eq!(level.validate(), Ok(()));
        // Skip the comparison when the test runs across midnight
        if before == after {
            assert_eq!(generate_daily_level(before), Ok(level));
        }
    }
}
