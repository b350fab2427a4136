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

use std::cell::{Cell, UnsafeCell};
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use subcache_common::strict_assert;

use crate::client::Signal;
use crate::family::Family;

/// `state` encodes completion without the size==1 sentinel the original
/// bucket-array design used: 0 means pending, any other value is the
/// entry's byte charge plus one. A legitimate zero-byte charge and "still
/// under construction" are therefore never ambiguous.
const PENDING: usize = 0;

fn encode_ready(charge: usize) -> usize {
    charge.checked_add(1).expect("entry charge overflowed usize")
}

fn decode_ready(raw: usize) -> Option<usize> {
    if raw == PENDING {
        None
    } else {
        Some(raw - 1)
    }
}

/// One memoized record: the embedded key/value plus the bookkeeping the
/// coordinator and eviction queue need. Shared via `Arc`; the coordinator's
/// own structural holds (indexer + eviction queue) are themselves `Arc`
/// clones, so dropping the last one runs `Value`'s (and then `Key`'s)
/// destructor automatically, including any cross-cache `CachedRef` fields
/// embedded in the key. No separate manual refcount is kept: `Arc`'s own
/// strong count *is* the entry's reference count.
pub(crate) struct Entry<F: Family> {
    pub(crate) hash: u64,
    pub(crate) key: F::Key,
    value: UnsafeCell<MaybeUninit<F::Value>>,
    state: AtomicUsize,
    last_used_frame: AtomicU64,
    pub(crate) creating_signal: Arc<Signal>,
    /// Slot index into the coordinator's eviction queue, or `None` if not
    /// currently linked. Mutated only while the coordinator mutex is held.
    pub(crate) queue_slot: Cell<Option<usize>>,
}

// SAFETY: `value` is written exactly once, by the constructing thread,
// before `state` is released to `Ready`; all other readers only observe it
// after acquiring `Ready`. `queue_slot` is mutated only under the
// coordinator mutex, which serializes all access to it.
unsafe impl<F: Family> Sync for Entry<F> {}

impl<F: Family> Entry<F> {
    pub(crate) fn new_pending(
        hash: u64,
        key: F::Key,
        creating_signal: Arc<Signal>,
        created_frame: u64,
    ) -> Self {
        Self {
            hash,
            key,
            value: UnsafeCell::new(MaybeUninit::uninit()),
            state: AtomicUsize::new(PENDING),
            last_used_frame: AtomicU64::new(created_frame),
            creating_signal,
            queue_slot: Cell::new(None),
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.state.load(Ordering::Acquire) != PENDING
    }

    pub(crate) fn charge(&self) -> Option<usize> {
        decode_ready(self.state.load(Ordering::Acquire))
    }

    /// Publishes the constructed value. Must be called at most once, by
    /// the entry's creator, before any waiter is woken.
    pub(crate) fn publish(&self, value: F::Value, charge: usize) {
        debug_assert!(!self.is_ready(), "entry published twice");
        // SAFETY: we are the sole writer (the creating client, synchronously
        // inside its own `get` call) and no reader observes `Ready` until
        // the release-store below.
        unsafe {
            (*self.value.get()).write(value);
        }
        self.state.store(encode_ready(charge), Ordering::Release);
    }

    pub(crate) fn value(&self) -> &F::Value {
        debug_assert!(self.is_ready(), "read of a pending entry's value");
        // SAFETY: guarded by the `Ready` check above, itself load-bearing on
        // the acquire semantics of `is_ready`.
        unsafe { (*self.value.get()).assume_init_ref() }
    }

    pub(crate) fn last_used_frame(&self) -> u64 {
        self.last_used_frame.load(Ordering::Relaxed)
    }

    /// Records that this entry was used in `cur_frame`. Returns `true` the
    /// first time this is observed for a given frame, which is the signal
    /// to promote the entry into the calling client's local touch list.
    pub(crate) fn touch(&self, cur_frame: u64) -> bool {
        let previous = self.last_used_frame.load(Ordering::Relaxed);
        if previous == cur_frame {
            return false;
        }
        strict_assert!(
            cur_frame > previous,
            "frame counter moved backwards under a live entry: {cur_frame} < {previous}"
        );
        self.last_used_frame.store(cur_frame, Ordering::Relaxed);
        true
    }
}

impl<F: Family> Drop for Entry<F> {
    fn drop(&mut self) {
        if decode_ready(*self.state.get_mut()).is_some() {
            // SAFETY: state is Ready, so `value` was written and never
            // moved out.
            unsafe {
                (*self.value.get()).assume_init_drop();
            }
        }
    }
}
