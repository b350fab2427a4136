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

use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hashbrown::HashMap;
use itertools::Itertools;
use parking_lot::Mutex;
use subcache_common::{strict_assert, strict_assert_ne};

use crate::client::{Client, ClientId, ClientState};
use crate::entry::Entry;
use crate::family::Family;
use crate::indexer::Indexer;
use crate::listener::{CacheEventListener, DefaultCacheEventListener};
use crate::metrics::{CacheStats, Metrics};
use crate::queue::Queue;
use crate::refs::CachedRef;

/// Mirrors the source's fixed bucket-array size; used only as an initial
/// capacity hint for the (dynamically growable) bucketed map.
pub const DEFAULT_INITIAL_BUCKETS: usize = 65_535;

/// Construction parameters for a [`Cache`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Size budget enforced by `trim`, in the same units `Family::construct`
    /// returns charges in.
    pub capacity_bytes: usize,
    /// Initial bucket-table capacity hint.
    pub initial_buckets: usize,
}

impl CacheConfig {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            capacity_bytes,
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
        }
    }
}

struct CoordinatorState<F: Family> {
    indexer: Indexer<F>,
    queue: Queue<F>,
    size: usize,
    cur_frame: u64,
}

struct Roster<F: Family> {
    clients: HashMap<ClientId, Arc<ClientState<F>>>,
}

pub(crate) struct CacheInner<F: Family, L = DefaultCacheEventListener, S = ahash::RandomState> {
    state: Mutex<CoordinatorState<F>>,
    roster: Mutex<Roster<F>>,
    next_client_id: AtomicU64,
    capacity_bytes: usize,
    metrics: Metrics,
    listener: L,
    hash_builder: S,
}

impl<F, L, S> CacheInner<F, L, S>
where
    F: Family,
    L: CacheEventListener<F>,
    S: BuildHasher + Clone,
{
    fn get(
        &self,
        client: &ClientState<F>,
        key: F::Key,
        args: F::Args,
    ) -> CachedRef<F> {
        let hash = self.hash_builder.hash_one(&key);

        let mut st = self.state.lock();
        if let Some(found) = st.indexer.find(hash, &key) {
            let found = found.clone();
            let first_touch = found.touch(st.cur_frame);
            drop(st);
            if first_touch {
                // Recorded locally and folded into the eviction queue only
                // at the next `trim`, per the frame/promotion protocol: a
                // touch updates `last_used_frame` (which alone is enough to
                // pin the entry against eviction) without contending the
                // coordinator lock to reorder the queue on every hit.
                client.promote.lock().push(found.clone());
            }

            self.metrics.record_hit();
            if !found.is_ready() {
                let signal = found.creating_signal.clone();
                signal.wait_while(|| !found.is_ready());
            }
            return CachedRef::new(found);
        }

        // Miss: stage a pending entry under the lock so uniqueness holds by
        // construction, then release the lock before running the
        // (possibly expensive) constructor.
        let entry = Arc::new(Entry::new_pending(
            hash,
            key,
            client.signal.clone(),
            st.cur_frame,
        ));
        st.indexer.insert(entry.clone());
        st.queue.push_back(entry.clone());
        drop(st);

        self.metrics.record_miss();
        tracing::trace!(hash, "constructing cache entry");
        let (value, charge) = F::construct(&entry.key, args);
        entry.publish(value, charge);
        client.signal.notify_all();

        {
            let mut st = self.state.lock();
            st.size += charge;
        }

        CachedRef::new(entry)
    }

    fn register_client(&self) -> Arc<ClientState<F>> {
        let id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        let state = ClientState::new(id);
        self.roster.lock().clients.insert(id, state.clone());
        state
    }

    fn deregister_client(&self, id: ClientId) {
        self.roster.lock().clients.remove(&id);
    }

    fn trim(&self, max_bytes: usize) {
        let clients = self.roster.lock().clients.values().cloned().collect_vec();

        let mut evicted = Vec::new();
        {
            let mut st = self.state.lock();

            for client in &clients {
                let touched = std::mem::take(&mut *client.promote.lock());
                for touched_entry in touched {
                    st.queue.promote(touched_entry);
                }
            }

            loop {
                if st.size <= max_bytes {
                    break;
                }
                let Some(head) = st.queue.front() else {
                    break;
                };
                // Never evict an entry still under construction, nor one
                // touched in the frame that is ending right now.
                if !head.is_ready() || head.last_used_frame() == st.cur_frame {
                    break;
                }
                let entry = st.queue.pop_front().expect("front just confirmed present");
                strict_assert!(entry.is_ready(), "trim evicted a still-pending entry");
                strict_assert_ne!(
                    entry.last_used_frame(),
                    st.cur_frame,
                    "trim evicted an entry touched in the frame that just ended"
                );
                st.indexer.remove(entry.hash, &entry.key);
                st.size = st.size.saturating_sub(entry.charge().unwrap_or(0));
                evicted.push(entry);
            }

            st.cur_frame += 1;
            tracing::trace!(cur_frame = st.cur_frame, size = st.size, "trimmed cache");
        }

        self.metrics.record_evictions(evicted.len() as u64);
        for entry in evicted {
            // Best-effort: an external `CachedRef` dropped concurrently with
            // this check is not synchronized against it, so a holder's final
            // decrement can race this one and suppress `on_evict` even
            // though this thread ends up running the entry's destructor.
            // Fine for a diagnostic callback; not part of the functional
            // contract.
            if Arc::strong_count(&entry) == 1 {
                self.listener.on_evict(&entry.key, entry.value());
            }
            drop(entry);
        }
    }

    fn empty(&self) {
        let drained = {
            let mut st = self.state.lock();
            let drained = st.indexer.drain();
            st.queue = Queue::new();
            st.size = 0;
            drained
        };

        tracing::trace!(count = drained.len(), "emptied cache");
        for entry in &drained {
            // See the matching note in `trim`: this race is inherent to
            // using `strong_count` as a liveness proxy, not specific to
            // draining.
            if Arc::strong_count(entry) == 1 {
                self.listener.on_evict(&entry.key, entry.value());
            }
        }
    }

    fn stats(&self) -> CacheStats {
        let st = self.state.lock();
        CacheStats {
            size_bytes: st.size,
            items: st.indexer.len(),
            hits: self.metrics.hits.load(Ordering::Relaxed),
            misses: self.metrics.misses.load(Ordering::Relaxed),
            evictions: self.metrics.evictions.load(Ordering::Relaxed),
        }
    }
}

/// A concurrent, generational memoization cache for one [`Family`].
///
/// Lookups and construction are safe to call from multiple clients
/// concurrently; the first caller to miss on a key constructs it while
/// holding no cache lock, and concurrent lookups of the same key block on
/// that construction rather than racing to build a duplicate. `trim`
/// advances the frame counter and evicts least-recently-touched entries
/// down to a byte budget, never evicting anything touched in the frame
/// that just ended.
pub struct Cache<F: Family, L = DefaultCacheEventListener, S = ahash::RandomState> {
    inner: Arc<CacheInner<F, L, S>>,
}

impl<F: Family> Cache<F, DefaultCacheEventListener, ahash::RandomState> {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_listener_and_hasher(
            config,
            DefaultCacheEventListener,
            ahash::RandomState::default(),
        )
    }
}

impl<F, L, S> Cache<F, L, S>
where
    F: Family,
    L: CacheEventListener<F>,
    S: BuildHasher + Clone,
{
    pub fn with_listener_and_hasher(config: CacheConfig, listener: L, hash_builder: S) -> Self {
        let inner = Arc::new(CacheInner {
            state: Mutex::new(CoordinatorState {
                indexer: Indexer::with_capacity(config.initial_buckets),
                queue: Queue::new(),
                size: 0,
                cur_frame: 0,
            }),
            roster: Mutex::new(Roster {
                clients: HashMap::new(),
            }),
            next_client_id: AtomicU64::new(0),
            capacity_bytes: config.capacity_bytes,
            metrics: Metrics::default(),
            listener,
            hash_builder,
        });
        Self { inner }
    }

    pub fn create_client(&self) -> Client<F, L, S> {
        let state = self.inner.register_client();
        Client {
            state,
            cache: self.inner.clone(),
        }
    }

    /// Promotes every client's touched entries into the eviction queue,
    /// evicts least-recently-used untouched entries until the cache is at
    /// or under `max_bytes`, and advances the frame counter.
    pub fn trim(&self, max_bytes: usize) {
        self.inner.trim(max_bytes);
    }

    /// Trims to the cache's configured capacity.
    pub fn trim_to_capacity(&self) {
        let cap = self.inner.capacity_bytes;
        self.inner.trim(cap);
    }

    /// Discards every entry the cache itself holds. Entries kept alive by
    /// external `CachedRef` holders survive until those are released.
    pub fn empty(&self) {
        self.inner.empty();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.stats()
    }

    pub fn capacity_bytes(&self) -> usize {
        self.inner.capacity_bytes
    }
}

impl<F: Family, L, S> Clone for Cache<F, L, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    struct Counting;
    impl Family for Counting {
        type Key = u32;
        type Value = u32;
        type Args = usize;
        fn construct(key: &u32, charge: usize) -> (u32, usize) {
            (*key, charge)
        }
    }

    #[test]
    fn miss_then_hit() {
        let cache = Cache::<Counting>::new(CacheConfig::new(1024));
        let client = cache.create_client();

        let a = client.get(7, 4);
        assert_eq!(*a.value(), 7);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);

        let b = client.get(7, 4);
        assert_eq!(*b.value(), 7);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.size_bytes, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn trim_evicts_least_recently_touched_first() {
        let cache = Cache::<Counting>::new(CacheConfig::new(1024));
        let client = cache.create_client();

        client.get(1, 10);
        client.get(2, 10);
        client.get(3, 10);
        // Advance past the frame all three were created in so none of them
        // are pinned by "touched this frame".
        cache.trim(1024);

        client.get(2, 10); // touch 2 again before the next trim
        cache.trim(15); // budget only room for one entry

        let stats = cache.stats();
        assert_eq!(stats.size_bytes, 10);
        assert_eq!(stats.evictions, 2);
    }

    #[test]
    fn entries_touched_in_the_current_frame_are_never_evicted() {
        let cache = Cache::<Counting>::new(CacheConfig::new(1024));
        let client = cache.create_client();

        client.get(1, 10);
        client.get(2, 10);
        // No intervening trim: both entries were touched in the frame that
        // is about to end, so trimming to a budget of 0 must not evict them.
        cache.trim(0);

        let stats = cache.stats();
        assert_eq!(stats.size_bytes, 20);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn concurrent_lookups_of_a_pending_key_block_on_the_first_writer() {
        let cache = Cache::<Counting>::new(CacheConfig::new(1024));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    let client = cache.create_client();
                    client.get(42, 1)
                })
            })
            .collect();

        let refs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &refs[1..] {
            assert_eq!(&refs[0], r);
        }
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 7);
    }

    #[test]
    fn empty_drops_entries_with_no_external_holders() {
        let cache = Cache::<Counting>::new(CacheConfig::new(1024));
        let client = cache.create_client();
        client.get(1, 5);
        assert_eq!(cache.stats().items, 1);
        cache.empty();
        assert_eq!(cache.stats().items, 0);
        assert_eq!(cache.stats().size_bytes, 0);
    }

    #[test]
    fn external_holder_keeps_value_alive_past_eviction() {
        let cache = Cache::<Counting>::new(CacheConfig::new(1024));
        let client = cache.create_client();

        let held = client.get(1, 10);
        cache.trim(1024);
        cache.trim(0); // evict everything not touched this frame

        assert_eq!(cache.stats().items, 0);
        // The cache no longer tracks it, but our handle still works.
        assert_eq!(*held.value(), 1);
    }
}
