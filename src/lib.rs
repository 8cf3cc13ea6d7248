/*
lib.rs

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

//! Zipgrid generates levels for a puzzle where the player connects numbered cells in order
//! while filling every cell of a square grid.
//!
//! ```no_run
//! use zipgrid::generator::difficulty::{Difficulty, GeneratorOptions};
//! use zipgrid::generator::level::generate_level;
//!
//! let level = generate_level(Difficulty::Medium, Some(2024), &GeneratorOptions::default())
//!     .expect("level");
//! assert!(level.is_solution(&level.solution_path));
//! ```

pub mod generator;
pub mod saver;

pub use generator::difficulty::{Difficulty, DifficultyConfig, GeneratorOptions};
pub use generator::error::GeneratorError;
pub use generator::level::{Level, NumberedCell};
