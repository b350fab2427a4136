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

use parking_lot::{Condvar, Mutex};

use crate::cache::CacheInner;
use crate::entry::Entry;
use crate::family::Family;
use crate::refs::CachedRef;

pub type ClientId = u64;

/// The rendezvous point a pending entry's creator uses to wake up readers
/// blocked on completion. Owned by the entry itself (cloned out of the
/// creating client at insertion time) so it stays valid even if the client
/// that created the entry is dropped before construction finishes.
pub(crate) struct Signal {
    lock: Mutex<()>,
    condvar: Condvar,
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            condvar: Condvar::new(),
        }
    }

    pub(crate) fn wait_while(&self, mut still_pending: impl FnMut() -> bool) {
        let mut guard = self.lock.lock();
        while still_pending() {
            self.condvar.wait(&mut guard);
        }
    }

    pub(crate) fn notify_all(&self) {
        let _guard = self.lock.lock();
        self.condvar.notify_all();
    }
}

/// Per-client bookkeeping held by the cache's roster. Kept separate from
/// the public `Client` handle so the coordinator can reach a client's
/// promotion list during `trim` without needing the handle itself to be
/// `Clone`.
pub(crate) struct ClientState<F: Family> {
    pub(crate) id: ClientId,
    pub(crate) signal: Arc<Signal>,
    pub(crate) promote: Mutex<Vec<Arc<Entry<F>>>>,
}

impl<F: Family> ClientState<F> {
    pub(crate) fn new(id: ClientId) -> Arc<Self> {
        Arc::new(Self {
            id,
            signal: Arc::new(Signal::new()),
            promote: Mutex::new(Vec::new()),
        })
    }
}

/// A producer's handle into a [`crate::Cache`]. Not `Sync`-shared in
/// practice: each rendering thread creates its own client and drives it
/// single-threadedly, the way a frame's renderer owns one cache client for
/// the frame's duration.
pub struct Client<F: Family, L = crate::listener::DefaultCacheEventListener, S = ahash::RandomState>
{
    pub(crate) state: Arc<ClientState<F>>,
    pub(crate) cache: Arc<CacheInner<F, L, S>>,
}

impl<F, L, S> Client<F, L, S>
where
    F: Family,
    L: crate::listener::CacheEventListener<F>,
    S: std::hash::BuildHasher + Clone,
{
    /// Looks up `key`, constructing it via `F::construct(key, args)` on a
    /// cache miss. Blocks if another client is already constructing the
    /// same key.
    pub fn get(&self, key: F::Key, args: F::Args) -> CachedRef<F> {
        self.cache.get(&self.state, key, args)
    }
}

impl<F: Family, L, S> Drop for Client<F, L, S> {
    fn drop(&mut self) {
        self.cache.deregister_client(self.state.id);
    }
}
