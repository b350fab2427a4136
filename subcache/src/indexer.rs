//  Copyright 2026 subrender-rs Authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use std::sync::Arc;

use hashbrown::HashTable;

use crate::entry::Entry;
use crate::family::Family;

/// The bucketed map, standing in for the source's fixed array of atomic
/// bucket heads. `hashbrown::HashTable` stores the entry directly (the key
/// lives inside the `Entry`, not duplicated as a map key), which is the
/// natural hashbrown idiom for node-embedded keys and avoids requiring
/// `Key: Clone` just to satisfy a conventional `HashMap`. Lookup hashes are
/// computed by the caller (the coordinator keeps its own `BuildHasher` so it
/// can hash a bare `&Key` before an entry exists); the table itself only
/// ever rehashes via the pre-stashed `Entry::hash` through the closures
/// below.
pub(crate) struct Indexer<F: Family> {
    table: HashTable<Arc<Entry<F>>>,
}

impl<F: Family> Indexer<F> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
        }
    }

    pub(crate) fn find(&self, hash: u64, key: &F::Key) -> Option<&Arc<Entry<F>>> {
        self.table.find(hash, |e| &e.key == key)
    }

    pub(crate) fn insert(&mut self, entry: Arc<Entry<F>>) {
        let hash = entry.hash;
        self.table.insert_unique(hash, entry, |e| e.hash);
    }

    pub(crate) fn remove(&mut self, hash: u64, key: &F::Key) -> Option<Arc<Entry<F>>> {
        match self.table.find_entry(hash, |e| &e.key == key) {
            Ok(occupied) => Some(occupied.remove().0),
            Err(_) => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    /// Removes every entry, returning them for the caller to destroy (or
    /// hand to an eviction listener) after releasing the coordinator lock.
    pub(crate) fn drain(&mut self) -> Vec<Arc<Entry<F>>> {
        self.table.drain().collect()
    }
}
