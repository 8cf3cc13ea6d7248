/*
error.rs

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

//! Errors returned by the level generator.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// The generator parameters cannot produce levels. Never retried.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The path search of one attempt gave up.
    #[error("no path found with seed {seed} after {retries} backtracks")]
    PathGenerationExhausted { seed: u64, retries: usize },

    /// All the attempts failed. `last_seed` is the seed of the last attempt.
    #[error("level generation failed after {attempts} attempts (last seed {last_seed})")]
    LevelGenerationFailed { attempts: usize, last_seed: u64 },

    /// An assembled level breaks an invariant of the level format.
    #[error("invalid level: {0}")]
    InvalidLevel(String),
}
