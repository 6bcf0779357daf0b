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

use crate::types::item::Item;

const SEED_PAIRS: [(&str, &str); 10] = [
    ("Hola", "Hello"),
    ("Adiós", "Goodbye"),
    ("Gracias", "Thank you"),
    ("Por favor", "Please"),
    ("Sí", "Yes"),
    ("No", "No"),
    ("Buenos días", "Good morning"),
    ("Buenas noches", "Good night"),
    ("¿Cómo estás?", "How are you?"),
    ("Estoy bien", "I am fine"),
];

/// The word list a new collection starts with.
pub fn seed_items() -> Vec<Item> {
    SEED_PAIRS
        .iter()
        .map(|(word, translation)| Item::new(*word, *word, *translation))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_seed_keys_are_unique() {
        let items = seed_items();
        let keys: HashSet<&str> = items.iter().map(|item| item.key.as_str()).collect();
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_seed_items_are_unseen() {
        for item in seed_items() {
            assert_eq!(item.confidence, 0);
            assert_eq!(item.last_shown, None);
            assert_eq!(item.interval, 1);
        }
    }
}
