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

use std::fs::copy;
use std::fs::create_dir_all;
use std::fs::read_to_string;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::seed::seed_items;
use crate::types::item::DEFAULT_INTERVAL;
use crate::types::item::Item;
use crate::types::timestamp::Timestamp;

/// Persists a collection's items as a JSON array.
pub struct ItemStore {
    path: PathBuf,
}

/// A record as it may appear on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemRecord {
    Current(Item),
    /// The format of the original bubble game's `words.json`.
    Legacy {
        word: String,
        translation: String,
        #[serde(default)]
        confidence: u8,
        #[serde(default)]
        last_shown: Option<Timestamp>,
        #[serde(default = "default_interval")]
        interval: u32,
    },
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

impl ItemRecord {
    fn into_item(self) -> Item {
        match self {
            ItemRecord::Current(item) => item,
            ItemRecord::Legacy {
                word,
                translation,
                confidence,
                last_shown,
                interval,
            } => Item {
                key: word.clone(),
                primary_text: word,
                secondary_text: translation,
                confidence,
                last_shown,
                interval,
            },
        }
    }
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the items. Missing, unreadable and empty stores are errors.
    pub fn load(&self) -> Fallible<Vec<Item>> {
        if !self.path.exists() {
            return fail(format!("item store not found: {}", self.path.display()));
        }
        log::debug!("Loading items from {}", self.path.display());
        let content = read_to_string(&self.path)?;
        let records: Vec<ItemRecord> = serde_json::from_str(&content).map_err(|e| {
            ErrorReport::new(format!("corrupt item store {}: {e}", self.path.display()))
        })?;
        if records.is_empty() {
            return fail(format!("item store is empty: {}", self.path.display()));
        }
        Ok(records.into_iter().map(ItemRecord::into_item).collect())
    }

    /// Load the items, falling back to the seed set if the store is missing,
    /// corrupt, or empty. The seed set is written back to disk. An unusable
    /// store is first copied to a `.bak` file next to it.
    pub fn load_or_seed(&self) -> Fallible<Vec<Item>> {
        if self.path.exists() {
            match self.load() {
                Ok(items) => return Ok(items),
                Err(e) => {
                    let backup = self.backup_path();
                    copy(&self.path, &backup)?;
                    log::warn!(
                        "{e}. Saved a copy to {} and replaced it with the seed set.",
                        backup.display()
                    );
                }
            }
        } else {
            log::debug!("No item store at {}. Using the seed set.", self.path.display());
        }
        let items = seed_items();
        self.save(&items)?;
        Ok(items)
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Write the items. The file is replaced atomically.
    pub fn save(&self, items: &[Item]) -> Fallible<()> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        create_dir_all(&directory)?;
        let json = serde_json::to_string_pretty(items)?;
        let mut file = NamedTempFile::new_in(&directory)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path)?;
        log::debug!("Saved {} items to {}", items.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::scheduler::record_rating;

    #[test]
    fn test_missing_store_is_seeded() -> Fallible<()> {
        let dir = tempdir()?;
        let store = ItemStore::new(dir.path().join("words.json"));
        assert!(store.load().is_err());
        let items = store.load_or_seed()?;
        assert_eq!(items, seed_items());
        // The seed set was written to disk.
        assert_eq!(store.load()?, seed_items());
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Fallible<()> {
        let dir = tempdir()?;
        let store = ItemStore::new(dir.path().join("words.json"));
        let mut items = seed_items();
        record_rating(&mut items[2], 4, Timestamp::now())?;
        store.save(&items)?;
        assert_eq!(store.load()?, items);
        Ok(())
    }

    #[test]
    fn test_corrupt_store_is_replaced() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("words.json");
        write(&path, "{ this is not json")?;
        let store = ItemStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("corrupt item store"));
        assert_eq!(store.load_or_seed()?, seed_items());
        assert_eq!(store.load()?, seed_items());
        Ok(())
    }

    #[test]
    fn test_unreadable_store_is_backed_up() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("words.json");
        let progress = r#"[
            {"word": "Hola", "translation": "Hello", "confidence": 5, "last_shown": "2025-01-10T08:15:30", "interval": 30},
            {"word": "Sí", "translation": "Yes", "confidence": 4, "last_shown": "someday", "interval": 7}
        ]"#;
        write(&path, progress)?;
        let store = ItemStore::new(&path);
        assert_eq!(store.load_or_seed()?, seed_items());
        let backup = store.backup_path();
        assert!(backup.ends_with("words.json.bak"));
        assert_eq!(read_to_string(&backup)?, progress);
        Ok(())
    }

    #[test]
    fn test_empty_store_is_replaced() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("words.json");
        write(&path, "[]")?;
        let store = ItemStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(store.load_or_seed()?, seed_items());
        Ok(())
    }

    #[test]
    fn test_legacy_records() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("words.json");
        let legacy = r#"[
            {"word": "Hola", "translation": "Hello", "confidence": 0, "last_shown": null, "interval": 1},
            {"word": "Sí", "translation": "Yes", "confidence": 5, "last_shown": "2025-01-10T08:15:30.250000", "interval": 30}
        ]"#;
        write(&path, legacy)?;
        let items = ItemStore::new(&path).load()?;
        assert_eq!(items[0], Item::new("Hola", "Hola", "Hello"));
        assert_eq!(items[1].key, "Sí");
        assert_eq!(items[1].secondary_text, "Yes");
        assert_eq!(items[1].confidence, 5);
        assert_eq!(items[1].interval, 30);
        assert_eq!(
            items[1].last_shown,
            Some(Timestamp::parse("2025-01-10T08:15:30.250000")?)
        );
        Ok(())
    }

    #[test]
    fn test_save_creates_parent_directories() -> Fallible<()> {
        let dir = tempdir()?;
        let store = ItemStore::new(dir.path().join("data").join("words.json"));
        store.save(&seed_items())?;
        assert!(store.path().exists());
        Ok(())
    }
}
