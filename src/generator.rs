/*
generator.rs

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

//! Generate random levels.
//!
//! A [`level::Level`] object is the only artifact that the generator produces.
//! You create it with [`level::generate_level`], [`level::generate_level_with_config`],
//! [`level::generate_daily_level`], or [`level::generate_random_level`].
//!
//! Generating a level goes through the following components, which all draw their random
//! numbers from the same [`seeded_random::SeededRandom`] object so that a seed always gives the
//! same level:
//!
//! * [`random_path::RandomPath`] builds the solution, a path that visits every cell of the
//!   grid exactly once.
//! * [`checkpoints::select`] chooses the numbered cells along the solution.
//! * [`walls::WallPlacer`] places walls around the solution. In unique solution mode, it uses
//!   [`uniqueness`] to block every alternate solution.
//!
//! The level shape for each difficulty is given by [`difficulty::DifficultyConfig`], and the
//! generator behavior by [`difficulty::GeneratorOptions`].

pub mod checkpoints;
pub mod difficulty;
pub mod error;
pub mod grid;
pub mod level;
pub mod path;
pub mod random_path;
pub mod seeded_random;
pub mod uniqueness;
pub mod walls;
