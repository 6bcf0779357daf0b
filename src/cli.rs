// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;

use crate::cmd::check::check_collection;
use crate::cmd::drill::drill_collection;
use crate::cmd::quiz::quiz_collection;
use crate::cmd::stats::print_collection_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill the words that are due.
    Drill {
        /// Path to the collection directory. Defaults to the current directory.
        directory: Option<String>,
        /// Number of bubbles per board. Overrides the configuration file.
        #[arg(long)]
        batch_size: Option<usize>,
        /// Seed for the random number generator.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Timed pop quiz over the mastered words.
    Quiz {
        /// Path to the collection directory. Defaults to the current directory.
        directory: Option<String>,
        /// Seed for the random number generator.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print collection statistics as JSON.
    Stats {
        /// Path to the collection directory. Defaults to the current directory.
        directory: Option<String>,
    },
    /// Check that the collection can be read.
    Check {
        /// Path to the collection directory. Defaults to the current directory.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            batch_size,
            seed,
        } => drill_collection(directory, batch_size, seed),
        Command::Quiz { directory, seed } => quiz_collection(directory, seed),
        Command::Stats { directory } => print_collection_stats(directory),
        Command::Check { directory } => check_collection(directory),
    }
}
