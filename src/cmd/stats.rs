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

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::scheduler::is_eligible;
use crate::scheduler::is_mastered;
use crate::types::item::Item;
use crate::types::timestamp::Timestamp;

pub fn print_collection_stats(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stats = collection_stats(&coll.items, Timestamp::now());
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}

#[derive(Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    item_count: usize,
    due_count: usize,
    never_shown_count: usize,
    mastered_count: usize,
    all_mastered: bool,
}

/// Summarize the items' schedule. Unlike a drill, this never resets
/// anything when no item is due.
pub fn collection_stats(items: &[Item], now: Timestamp) -> Stats {
    Stats {
        item_count: items.len(),
        due_count: items.iter().filter(|item| is_eligible(item, now)).count(),
        never_shown_count: items.iter().filter(|item| item.last_shown.is_none()).count(),
        mastered_count: items
            .iter()
            .filter(|item| item.is_high_confidence() && item.last_shown.is_some())
            .count(),
        all_mastered: is_mastered(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::apply_rating;
    use crate::seed::seed_items;
    use crate::types::rating::Rating;

    #[test]
    fn test_fresh_items() {
        let stats = collection_stats(&seed_items(), Timestamp::now());
        assert_eq!(
            stats,
            Stats {
                item_count: 10,
                due_count: 10,
                never_shown_count: 10,
                mastered_count: 0,
                all_mastered: false,
            }
        );
    }

    #[test]
    fn test_rated_items() {
        let now = Timestamp::now();
        let mut items = seed_items();
        apply_rating(&mut items[0], Rating::VeryConfident, now);
        apply_rating(&mut items[1], Rating::Familiar, now.minus_days(3));
        apply_rating(&mut items[2], Rating::Confident, now.minus_days(2));
        let stats = collection_stats(&items, now);
        assert_eq!(stats.due_count, 8);
        assert_eq!(stats.never_shown_count, 7);
        assert_eq!(stats.mastered_count, 2);
        assert!(!stats.all_mastered);
    }

    #[test]
    fn test_json_shape() -> Fallible<()> {
        let stats = collection_stats(&seed_items(), Timestamp::now());
        let json = serde_json::to_value(&stats)?;
        assert_eq!(json["itemCount"], 10);
        assert_eq!(json["allMastered"], false);
        Ok(())
    }
}
