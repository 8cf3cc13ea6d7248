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

//! Save and restore lists of levels.

use log::debug;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::level::Level;

/// Object to save and restore levels.
pub struct SaverLevel {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverLevel {
    /// Create a [`SaverLevel`] object for the given file.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Levels file: {save_file:?}");
        Self { save_file }
    }

    /// Create a [`SaverLevel`] object that uses the `levels.json` file in the given directory.
    pub fn in_dir(mut data_dir: PathBuf) -> Self {
        data_dir.push("levels.json");
        Self::new(data_dir)
    }

    /// Retrieve the saved levels.
    ///
    /// Return None if the file does not exist.
    pub fn get_levels(&self) -> Result<Option<Vec<Level>>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let levels: Vec<Level> = serde_json::from_reader(reader)?;

        // Refuse files that were edited into impossible levels
        for level in &levels {
            level.validate()?;
        }
        Ok(Some(levels))
    }

    /// Save the levels, replacing the previous file.
    pub fn save_levels(&self, levels: &[Level]) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, levels)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the save file.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
