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

use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::DEFAULT_BATCH_SIZE;

/// The name of the optional configuration file in a collection directory.
pub const CONFIG_FILE_NAME: &str = "bubblepop.toml";

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of bubbles on a drill board.
    pub batch_size: usize,
    /// Path of the item store, relative to the collection directory.
    pub words_file: String,
    /// Time limit of the pop quiz, in seconds.
    pub quiz_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            words_file: "words.json".to_string(),
            quiz_seconds: 60,
        }
    }
}

impl Config {
    /// Read the configuration from a collection directory. If there is no
    /// configuration file, the defaults are used.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        log::debug!("Reading configuration from {}", path.display());
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Fallible<()> {
        if self.batch_size == 0 {
            return fail("batch_size must be positive.");
        }
        if self.quiz_seconds == 0 {
            return fail("quiz_seconds must be positive.");
        }
        if self.words_file.trim().is_empty() {
            return fail("words_file must not be empty.");
        }
        Ok(())
    }

    pub fn quiz_time_limit(&self) -> Duration {
        Duration::from_secs(self.quiz_seconds)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults_without_file() -> Fallible<()> {
        let dir = tempdir()?;
        let config = Config::load(dir.path())?;
        assert_eq!(config, Config::default());
        assert_eq!(config.batch_size, 12);
        assert_eq!(config.quiz_time_limit(), Duration::from_secs(60));
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE_NAME), "batch_size = 8\n")?;
        let config = Config::load(dir.path())?;
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.words_file, "words.json");
        Ok(())
    }

    #[test]
    fn test_full_file() -> Fallible<()> {
        let config = Config::parse(
            "batch_size = 6\nwords_file = \"data/words.json\"\nquiz_seconds = 30\n",
        )?;
        assert_eq!(
            config,
            Config {
                batch_size: 6,
                words_file: "data/words.json".to_string(),
                quiz_seconds: 30,
            }
        );
        Ok(())
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::parse("batch_size = 0").is_err());
        assert!(Config::parse("quiz_seconds = 0").is_err());
        assert!(Config::parse("words_file = \"  \"").is_err());
        assert!(Config::parse("batch_size = -1").is_err());
    }

    #[test]
    fn test_unknown_key() {
        let err = Config::parse("bubble_colour = \"blue\"").unwrap_err();
        assert!(err.to_string().starts_with("error: invalid configuration"));
    }
}
