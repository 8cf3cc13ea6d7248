/*
difficulty.rs

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

//! Difficulty levels and generator parameters.
//!
//! A [`DifficultyConfig`] object gives the shape of the levels for a difficulty: grid size,
//! number of numbered cells, spacing between them, and number of walls.
//! A [`GeneratorOptions`] object gives the behavior of the generator itself: retry bounds,
//! unique solution mode, and wall placement strategy.
//!
//! Both objects can be read from JSON configuration files.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::Display;

use super::error::GeneratorError;
use super::random_path::MAX_BACKTRACKS;
use super::seeded_random::SeededRandom;
use super::uniqueness::{DEFAULT_BUDGET, UniquenessMode};

/// Level difficulty.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Default,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GeneratorError::InvalidConfiguration(format!(
                "unknown difficulty: {s}"
            ))),
        }
    }
}

/// Number of walls to place.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum WallCount {
    /// Exactly this number of walls.
    Fixed(usize),

    /// A number of walls drawn between `min` and `max`, both included.
    Range { min: usize, max: usize },
}

impl WallCount {
    /// Return the minimum and the maximum number of walls.
    pub fn bounds(&self) -> (usize, usize) {
        match *self {
            WallCount::Fixed(n) => (n, n),
            WallCount::Range { min, max } => (min, max),
        }
    }

    /// Return the number of walls to place. A range consumes one draw from `rnd`.
    pub fn draw(&self, rnd: &mut SeededRandom) -> usize {
        match *self {
            WallCount::Fixed(n) => n,
            WallCount::Range { min, max } => rnd.next_int(min, max),
        }
    }
}

/// How the random walls are chosen.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WallStrategy {
    /// Go through all the interior edges in random order.
    #[default]
    Enumerate,

    /// Draw random edges, with a bounded number of draws.
    Sample,
}

/// Shape of the levels for a difficulty.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    /// Difficulty that is recorded in the levels.
    pub difficulty: Difficulty,

    /// Number of rows and columns.
    pub grid_size: usize,

    pub min_dot_count: usize,
    pub max_dot_count: usize,

    /// Minimum Manhattan distance between two consecutive numbered cells.
    pub min_spacing: usize,

    pub wall_count: WallCount,

    /// With the [`WallStrategy::Sample`] strategy, probability that a draw is kept.
    pub wall_probability: f64,
}

impl DifficultyConfig {
    /// Return the default configuration for the difficulty.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                grid_size: 6,
                min_dot_count: 3,
                max_dot_count: 9,
                min_spacing: 2,
                wall_count: WallCount::Range { min: 4, max: 18 },
                wall_probability: 0.2,
            },
            Difficulty::Medium => Self {
                difficulty,
                grid_size: 8,
                min_dot_count: 4,
                max_dot_count: 8,
                min_spacing: 4,
                wall_count: WallCount::Range { min: 9, max: 18 },
                wall_probability: 1.0,
            },
            Difficulty::Hard => Self {
                difficulty,
                grid_size: 10,
                min_dot_count: 7,
                max_dot_count: 7,
                min_spacing: 8,
                wall_count: WallCount::Range { min: 16, max: 28 },
                wall_probability: 1.0,
            },
        }
    }

    /// Verify that the parameters can produce levels.
    ///
    /// # Errors
    ///
    /// The method returns [`GeneratorError::InvalidConfiguration`] with the reason.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.grid_size < 2 {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "grid size must be at least 2 (got {})",
                self.grid_size
            )));
        }
        if self.min_dot_count < 2 || self.min_dot_count > self.max_dot_count {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "invalid dot count range {}-{}",
                self.min_dot_count, self.max_dot_count
            )));
        }
        if self.max_dot_count > self.grid_size * self.grid_size {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "{} dots do not fit in a {}x{} grid",
                self.max_dot_count, self.grid_size, self.grid_size
            )));
        }
        let (min, max): (usize, usize) = self.wall_count.bounds();
        if min > max {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "invalid wall count range {min}-{max}"
            )));
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "wall probability must be between 0 and 1 (got {})",
                self.wall_probability
            )));
        }
        Ok(())
    }
}

/// Generator behavior.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// Number of levels tried before giving up.
    pub max_attempts: usize,

    /// Backtrack ceiling of the path search, for each attempt.
    pub max_backtracks: usize,

    /// Place walls until the level has exactly one solution.
    pub require_unique_solution: bool,

    /// What counts as a solution in unique solution mode. Only
    /// [`UniquenessMode::HamiltonianCompletion`] can produce levels: shorter paths can always
    /// reach the last numbered cell through an edge that walls are not allowed on.
    pub uniqueness_mode: UniquenessMode,

    pub wall_strategy: WallStrategy,

    /// Maximum number of moves explored by each solution search.
    pub verifier_budget: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            max_backtracks: MAX_BACKTRACKS,
            require_unique_solution: false,
            uniqueness_mode: UniquenessMode::default(),
            wall_strategy: WallStrategy::default(),
            verifier_budget: DEFAULT_BUDGET,
        }
    }
}

impl GeneratorOptions {
    /// Verify the options.
    ///
    /// # Errors
    ///
    /// The method returns [`GeneratorError::InvalidConfiguration`] when no attempt is allowed,
    /// or when unique solution mode is requested with a mode that cannot produce levels.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.max_attempts == 0 {
            return Err(GeneratorError::InvalidConfiguration(
                "the number of attempts must be at least 1".to_string(),
            ));
        }
        if self.require_unique_solution
            && self.uniqueness_mode != UniquenessMode::HamiltonianCompletion
        {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "unique solution mode requires the hamiltonian mode (got {:?})",
                self.uniqueness_mode
            )));
        }
        Ok(())
    }
}
