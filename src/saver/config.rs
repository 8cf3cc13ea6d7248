/*
config.rs

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

//! Read generator configuration files.
//!
//! A configuration file is a JSON object with an optional `level` key, which holds a
//! [`DifficultyConfig`] object, and an optional `options` key, which holds a
//! [`GeneratorOptions`] object:
//!
//! ```json
//! {
//!     "level": {
//!         "difficulty": "medium",
//!         "gridSize": 7,
//!         "minDotCount": 4,
//!         "maxDotCount": 6,
//!         "minSpacing": 3,
//!         "wallCount": {"min": 6, "max": 12},
//!         "wallProbability": 1.0
//!     },
//!     "options": {"requireUniqueSolution": true, "maxAttempts": 10}
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::generator::difficulty::{DifficultyConfig, GeneratorOptions};

/// Content of a configuration file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Replaces the difficulty table.
    pub level: Option<DifficultyConfig>,

    pub options: GeneratorOptions,
}

/// Read and verify the configuration file.
pub fn load_config(path: &Path) -> Result<ConfigFile, Box<dyn Error>> {
    debug!("Configuration file: {path:?}");
    let file: File = File::open(path)?;
    let reader: BufReader<File> = BufReader::new(file);
    let config: ConfigFile = serde_json::from_reader(reader)?;
    if let Some(level) = &config.level {
        level.validate()?;
    }
    config.options.validate()?;
    Ok(config)
}
