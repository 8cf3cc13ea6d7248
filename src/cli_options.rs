/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the generator.
//! The generated levels are printed as JSON, or saved to a file.
//!
//! # Examples
//!
//! Generate three hard levels from seed 100 and print some statistics:
//!
//! ```
//! $ zipgrid -f hard -s 100 -c 3 --summary
//! ```
//!
//! Generate the daily level for a given date:
//!
//! ```
//! $ zipgrid --daily 2025-06-01
//! ```
//!
//! Generate easy levels with a unique solution, and save them:
//!
//! ```
//! $ zipgrid -f easy -u -c 10 -o levels.json
//! ```

use chrono::NaiveDate;
use clap::Parser;
use log::debug;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use zipgrid::generator::difficulty::{
    Difficulty, DifficultyConfig, GeneratorOptions, WallStrategy,
};
use zipgrid::generator::error::GeneratorError;
use zipgrid::generator::level::{self, Level};
use zipgrid::generator::uniqueness::UniquenessMode;
use zipgrid::saver::config::{self, ConfigFile};
use zipgrid::saver::level::SaverLevel;

/// Generate Zipgrid levels.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Difficulty level
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Seed of the first level. The following levels use the next seeds
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Generate the daily level for the date (YYYY-MM-DD), today by default
    #[arg(long, num_args = 0..=1, default_missing_value = "today", conflicts_with_all = ["seed", "difficulty"])]
    daily: Option<String>,

    /// Place walls until the level has exactly one solution
    #[arg(short, long, default_value_t = false)]
    unique: bool,

    /// What counts as a solution in unique solution mode (only hamiltonian generates levels)
    #[arg(value_enum, long)]
    mode: Option<UniquenessMode>,

    /// Wall placement strategy
    #[arg(value_enum, long)]
    strategy: Option<WallStrategy>,

    /// Number of attempts for each level
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Backtrack ceiling of the path search
    #[arg(long)]
    max_backtracks: Option<usize>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the levels to this file instead of printing them
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print some statistics after generating the levels
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Merge the configuration file and the command-line options. Options win.
    fn options(&self, file: &ConfigFile) -> GeneratorOptions {
        let mut options: GeneratorOptions = file.options.clone();
        if self.unique {
            options.require_unique_solution = true;
        }
        if let Some(mode) = self.mode {
            options.uniqueness_mode = mode;
        }
        if let Some(strategy) = self.strategy {
            options.wall_strategy = strategy;
        }
        if let Some(n) = self.max_attempts {
            options.max_attempts = n;
        }
        if let Some(n) = self.max_backtracks {
            options.max_backtracks = n;
        }
        options
    }
}

/// Parse the date of the `--daily` option.
fn daily_date(value: &str) -> Result<NaiveDate, String> {
    if value == "today" {
        return Ok(chrono::Local::now().date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("{value}: {e}"))
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let file: ConfigFile = match &args.config {
        Some(path) => match config::load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                return 1;
            }
        },
        None => ConfigFile::default(),
    };
    let options: GeneratorOptions = args.options(&file);

    let mut levels: Vec<Level> = Vec::with_capacity(args.count);
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: usize = 0;

    if let Some(value) = &args.daily {
        let date: NaiveDate = match daily_date(value) {
            Ok(d) => d,
            Err(msg) => {
                eprintln!("Error: invalid date {msg}");
                return 1;
            }
        };
        debug!("Daily level for {date}");
        let start: Instant = Instant::now();
        let res: Result<Level, GeneratorError> = level::generate_level(
            Difficulty::Easy,
            Some(level::daily_seed(date)),
            &options,
        );
        total = start.elapsed().as_secs_f32();
        max = total;
        match res {
            Ok(l) => levels.push(l),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    } else {
        let config: DifficultyConfig = file
            .level
            .clone()
            .unwrap_or_else(|| DifficultyConfig::for_difficulty(args.difficulty));
        let mut seed: Option<u64> = args.seed;

        for i in 0..args.count {
            debug!("Level {i}");
            let start: Instant = Instant::now();
            let res: Result<Level, GeneratorError> =
                level::generate_level_with_config(&config, seed, &options);
            let duration: f32 = start.elapsed().as_secs_f32();
            total += duration;
            if duration > max {
                max = duration;
            }
            match res {
                Ok(l) => {
                    // The next level starts after the seed that succeeded
                    seed = seed.map(|_| l.seed.wrapping_add(1));
                    levels.push(l);
                }
                Err(e @ GeneratorError::InvalidConfiguration(_)) => {
                    eprintln!("Error: {e}");
                    return 1;
                }
                Err(e) => {
                    errors += 1;
                    eprintln!("Error: {e}");
                    seed = seed.map(|s| s.wrapping_add(options.max_attempts as u64));
                }
            }
        }
    }

    match &args.output {
        Some(path) => {
            if let Err(e) = SaverLevel::new(path.clone()).save_levels(&levels) {
                eprintln!("Error: {}: {e}", path.display());
                return 1;
            }
        }
        None => {
            for l in &levels {
                match serde_json::to_string_pretty(l) {
                    Ok(s) => println!("{s}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return 1;
                    }
                }
            }
        }
    }

    // Print some stats
    if args.summary {
        let count: usize = levels.len() + errors;
        let walls: usize = levels.iter().map(|l| l.walls.len()).sum();
        eprintln!(
            "
    total time = {}s
  average time = {}s
      max time = {}s
 average walls = {}
        errors = {}",
            total,
            total / count.max(1) as f32,
            max,
            walls / levels.len().max(1),
            errors
        );
    }

    if errors > 0 { 1 } else { 0 }
}
