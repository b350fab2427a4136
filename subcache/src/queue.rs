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

use slab::Slab;

use crate::entry::Entry;
use crate::family::Family;

struct Node<F: Family> {
    prev: Option<usize>,
    next: Option<usize>,
    entry: Arc<Entry<F>>,
}

/// The eviction queue, in least-recently-promoted-first order. An
/// arena-indexed doubly linked list (via `slab`) rather than a raw
/// pointer-linked one: each entry records its own slot index, so promoting
/// or unlinking a specific entry is O(1) without unsafe pointer arithmetic.
pub(crate) struct Queue<F: Family> {
    slab: Slab<Node<F>>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<F: Family> Queue<F> {
    pub(crate) fn new() -> Self {
        Self {
            slab: Slab::new(),
            head: None,
            tail: None,
        }
    }

    pub(crate) fn push_back(&mut self, entry: Arc<Entry<F>>) {
        let prev_tail = self.tail;
        let vacant = self.slab.vacant_entry();
        let idx = vacant.key();
        entry.queue_slot.set(Some(idx));
        vacant.insert(Node {
            prev: prev_tail,
            next: None,
            entry,
        });
        match prev_tail {
            Some(t) => self.slab[t].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Unlinks `entry` from wherever it currently sits, if anywhere. A
    /// no-op if the entry is not presently in the queue.
    pub(crate) fn unlink(&mut self, entry: &Arc<Entry<F>>) {
        let Some(idx) = entry.queue_slot.take() else {
            return;
        };
        let node = self.slab.remove(idx);
        match node.prev {
            Some(p) => self.slab[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.slab[n].prev = node.prev,
            None => self.tail = node.prev,
        }
    }

    /// Moves `entry` to the tail, as if newly touched. Drops it first if
    /// already linked.
    pub(crate) fn promote(&mut self, entry: Arc<Entry<F>>) {
        self.unlink(&entry);
        self.push_back(entry);
    }

    pub(crate) fn front(&self) -> Option<&Arc<Entry<F>>> {
        self.head.map(|i| &self.slab[i].entry)
    }

    pub(crate) fn pop_front(&mut self) -> Option<Arc<Entry<F>>> {
        let idx = self.head?;
        let node = self.slab.remove(idx);
        self.head = node.next;
        match node.next {
            Some(n) => self.slab[n].prev = None,
            None => self.tail = None,
        }
        node.entry.queue_slot.set(None);
        Some(node.entry)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slab.is_empty()
    }
}
