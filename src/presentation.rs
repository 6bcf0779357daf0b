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

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::Batch;
use crate::types::item::Item;

/// Bubbles per row when a board is rendered.
pub const COLUMNS: usize = 4;

/// The look of a bubble.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AssetKey {
    /// Low confidence.
    Calm,
    /// Medium confidence.
    Glowing,
    /// High confidence.
    Bright,
    Popped,
}

impl AssetKey {
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKey::Calm => "bubbles_blue_unpopped_whitebackground_regularsize.png",
            AssetKey::Glowing => "bubbles_glowing_unpopped_whitebackground_regularsize.png",
            AssetKey::Bright => "bubbles_blue_unpopped_whitebackground_regularsize_2.png",
            AssetKey::Popped => "bubbles_blue_popped_whitebackground_regularsize.png",
        }
    }

    /// How the bubble is drawn in a terminal.
    pub fn marker(self) -> &'static str {
        match self {
            AssetKey::Calm => "( )",
            AssetKey::Glowing => "(*)",
            AssetKey::Bright => "(o)",
            AssetKey::Popped => " ~ ",
        }
    }
}

/// The look of an unpopped bubble for an item with the given confidence.
pub fn asset_key_for(confidence: u8) -> AssetKey {
    match confidence {
        0..=2 => AssetKey::Calm,
        3 => AssetKey::Glowing,
        _ => AssetKey::Bright,
    }
}

struct Bubble {
    item: usize,
    popped: bool,
}

/// One round of bubbles. Bubbles are numbered from 1 in reading order.
pub struct Board {
    bubbles: Vec<Bubble>,
}

impl Board {
    /// A board whose bubbles show the items at the given positions.
    pub fn new(slots: Vec<usize>) -> Self {
        let bubbles = slots
            .into_iter()
            .map(|item| Bubble {
                item,
                popped: false,
            })
            .collect();
        Self { bubbles }
    }

    pub fn from_batch(batch: Batch) -> Self {
        Self::new(batch.into_slots())
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.bubbles.iter().filter(|bubble| !bubble.popped).count()
    }

    pub fn all_popped(&self) -> bool {
        self.remaining() == 0
    }

    /// Pop the bubble with the given number and return the position of its
    /// item.
    pub fn pop(&mut self, number: usize) -> Fallible<usize> {
        if number == 0 || number > self.bubbles.len() {
            return fail(format!(
                "there is no bubble {number}; pick one from 1 to {}.",
                self.bubbles.len()
            ));
        }
        let bubble = &mut self.bubbles[number - 1];
        if bubble.popped {
            return fail(format!("bubble {number} is already popped."));
        }
        bubble.popped = true;
        Ok(bubble.item)
    }

    pub fn render(&self, items: &[Item]) -> String {
        let cells: Vec<String> = self
            .bubbles
            .iter()
            .enumerate()
            .map(|(n, bubble)| {
                let item = &items[bubble.item];
                let (asset, text) = if bubble.popped {
                    (AssetKey::Popped, &item.secondary_text)
                } else {
                    (asset_key_for(item.confidence), &item.primary_text)
                };
                format!("{:>2}. {} {}", n + 1, asset.marker(), text)
            })
            .collect();
        let width = cells
            .iter()
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for row in cells.chunks(COLUMNS) {
            let line: Vec<String> = row.iter().map(|cell| format!("{cell:<width$}")).collect();
            out.push_str(line.join("   ").trim_end());
            out.push('\n');
        }
        out
    }
}
