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

use std::env::current_dir;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::ItemStore;
use crate::types::item::Item;

/// A collection directory, its configuration, and its items.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub store: ItemStore,
    pub items: Vec<Item>,
}

impl Collection {
    /// Open a collection, seeding the item store if it is missing or unusable.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let (directory, config, store) = open(directory)?;
        let items = store.load_or_seed()?;
        log::debug!("Loaded {} items.", items.len());
        Ok(Self {
            directory,
            config,
            store,
            items,
        })
    }

    /// Open a collection without repairing anything: a missing or corrupt
    /// item store is an error.
    pub fn open_strict(directory: Option<String>) -> Fallible<Self> {
        let (directory, config, store) = open(directory)?;
        let items = store.load()?;
        Ok(Self {
            directory,
            config,
            store,
            items,
        })
    }

    pub fn save(&self) -> Fallible<()> {
        self.store.save(&self.items)
    }
}

fn open(directory: Option<String>) -> Fallible<(PathBuf, Config, ItemStore)> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    let directory = if directory.exists() {
        directory.canonicalize()?
    } else {
        return fail("directory does not exist.");
    };
    let config = Config::load(&directory)?;
    let store = ItemStore::new(directory.join(&config.words_file));
    Ok((directory, config, store))
}
