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

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// Items rated at or above this confidence count as known.
pub const HIGH_CONFIDENCE: u8 = 4;

/// The interval of an item that has never been rated.
pub const DEFAULT_INTERVAL: u32 = 1;

/// A single learnable unit, e.g. a vocabulary word and its translation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Uniquely identifies the item within a collection.
    pub key: String,
    /// The text shown on an unpopped bubble.
    pub primary_text: String,
    /// The text revealed when the bubble is popped.
    pub secondary_text: String,
    /// The last recorded confidence, from 0 (never rated) to 5.
    #[serde(default)]
    pub confidence: u8,
    /// When the item was last rated. `None` if it has never been shown.
    #[serde(default)]
    pub last_shown: Option<Timestamp>,
    /// Days that must pass after `last_shown` before the item is due.
    #[serde(default = "default_interval")]
    pub interval: u32,
}

impl Item {
    pub fn new(
        key: impl Into<String>,
        primary_text: impl Into<String>,
        secondary_text: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            primary_text: primary_text.into(),
            secondary_text: secondary_text.into(),
            confidence: 0,
            last_shown: None,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn is_high_confidence(&self) -> bool {
        self.confidence >= HIGH_CONFIDENCE
    }

    /// Forget the item's schedule so that it is due immediately.
    pub fn reset_schedule(&mut self) {
        self.interval = DEFAULT_INTERVAL;
        self.last_shown = None;
    }
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}
