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

//! Spaced repetition scheduling: which items are due, which of them go on
//! the next board, and how a confidence rating moves an item's due date.

use chrono::TimeDelta;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::Fallible;
use crate::types::item::Item;
use crate::types::rating::Rating;
use crate::types::timestamp::Timestamp;

/// The number of bubbles on a board: three rows of four.
pub const DEFAULT_BATCH_SIZE: usize = 12;

/// The items selected for one round, in presentation order.
///
/// Entries are positions in the item set the batch was selected from, so
/// the batch stays valid while the items themselves are rated. An item may
/// appear more than once when there are fewer eligible items than slots.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Batch {
    slots: Vec<usize>,
}

impl Batch {
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[cfg(test)]
    pub fn items<'a>(&'a self, items: &'a [Item]) -> impl Iterator<Item = &'a Item> + 'a {
        self.slots.iter().map(move |&index| &items[index])
    }

    pub fn into_slots(self) -> Vec<usize> {
        self.slots
    }
}

/// An item is eligible if it has never been shown, or if at least
/// `interval` days have passed since it was last shown.
pub fn is_eligible(item: &Item, now: Timestamp) -> bool {
    match item.last_shown {
        None => true,
        Some(last_shown) => now.since(last_shown) >= TimeDelta::days(i64::from(item.interval)),
    }
}

/// Select `batch_size` items to present next.
///
/// If no item is eligible, every item's schedule is reset first, so this
/// always makes progress. Low-confidence (`<= 3`) and high-confidence
/// (`>= 4`) items split the batch roughly in half; when there are too few
/// distinct eligible items the batch is padded with repeats.
pub fn select_batch<R: Rng + ?Sized>(
    items: &mut [Item],
    now: Timestamp,
    batch_size: usize,
    rng: &mut R,
) -> Batch {
    if items.is_empty() {
        log::warn!("Cannot select a batch from an empty item set.");
        return Batch { slots: Vec::new() };
    }

    let mut eligible: Vec<usize> = (0..items.len())
        .filter(|&index| is_eligible(&items[index], now))
        .collect();
    if eligible.is_empty() {
        log::info!(
            "No items are due. Resetting the schedule of all {} items.",
            items.len()
        );
        for item in items.iter_mut() {
            item.reset_schedule();
        }
        eligible = (0..items.len()).collect();
    }

    let (low, high): (Vec<usize>, Vec<usize>) = eligible
        .iter()
        .copied()
        .partition(|&index| !items[index].is_high_confidence());
    let (low_count, high_count) = allocate(low.len(), high.len(), batch_size);
    log::debug!(
        "Eligible: {} low, {} high. Sampling {low_count} low and {high_count} high.",
        low.len(),
        high.len()
    );

    let mut slots: Vec<usize> = Vec::with_capacity(batch_size);
    slots.extend(low.choose_multiple(rng, low_count).copied());
    slots.extend(high.choose_multiple(rng, high_count).copied());

    // Not enough distinct items: pad with repeats.
    while slots.len() < batch_size {
        eligible.shuffle(rng);
        let missing = batch_size - slots.len();
        slots.extend(eligible.iter().take(missing).copied());
    }

    slots.shuffle(rng);
    separate_adjacent_duplicates(&mut slots, items, rng);
    Batch { slots }
}

/// Split `batch_size` between the two confidence partitions. Returns the
/// number of low and high confidence items to sample.
fn allocate(low_available: usize, high_available: usize, batch_size: usize) -> (usize, usize) {
    let mut low = low_available.min(batch_size / 2);
    let high = high_available.min(batch_size - low);
    // High already takes whatever low leaves, so only low can fall short.
    if low + high < batch_size && low_available > low {
        low = low_available.min(batch_size - high);
    }
    (low, high)
}

/// A single left-to-right pass that swaps the second of two adjacent
/// entries for the same item with a random other position. A swap can
/// create a new adjacent pair elsewhere; those are left alone.
fn separate_adjacent_duplicates<R: Rng + ?Sized>(
    slots: &mut [usize],
    items: &[Item],
    rng: &mut R,
) {
    for i in 1..slots.len() {
        if items[slots[i]].key == items[slots[i - 1]].key {
            // Any position but `i` itself.
            let mut j = rng.gen_range(0..slots.len() - 1);
            if j >= i {
                j += 1;
            }
            slots.swap(i, j);
        }
    }
}

/// Record the learner's confidence in an item.
///
/// Fails without touching the item if `confidence` is not between 1 and 5.
pub fn record_rating(item: &mut Item, confidence: u8, now: Timestamp) -> Fallible<()> {
    let rating = Rating::try_from(confidence)?;
    apply_rating(item, rating, now);
    Ok(())
}

pub fn apply_rating(item: &mut Item, rating: Rating, now: Timestamp) {
    log::debug!("Rated '{}' {rating}.", item.key);
    item.confidence = rating.value();
    item.last_shown = Some(now);
    item.interval = rating.interval_days();
}

/// True if every item has been shown and rated with high confidence.
pub fn is_mastered(items: &[Item]) -> bool {
    items
        .iter()
        .all(|item| item.is_high_confidence() && item.last_shown.is_some())
}

/// Every high-confidence item, in random order. Used by the pop quiz.
pub fn mastered_items<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Vec<usize> {
    let mut mastered: Vec<usize> = (0..items.len())
        .filter(|&index| items[index].is_high_confidence())
        .collect();
    mastered.shuffle(rng);
    mastered
}
