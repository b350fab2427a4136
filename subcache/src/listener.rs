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

use crate::family::Family;

/// Notified when an entry is actually destroyed as a result of eviction or
/// `Cache::empty`. Fires after the entry has been dropped from the cache's
/// own bucketed map and eviction queue but while it is still otherwise
/// intact, and always outside the coordinator lock.
///
/// If external `CachedRef` holders keep the entry alive past its removal
/// from the cache, this does not fire for their eventual release: the hook
/// answers "is this cache still charging its budget for this entry's
/// bytes", not "has every last reference to it anywhere vanished".
pub trait CacheEventListener<F: Family>: Send + Sync + 'static {
    fn on_evict(&self, key: &F::Key, value: &F::Value) {
        let _ = (key, value);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCacheEventListener;

impl<F: Family> CacheEventListener<F> for DefaultCacheEventListener {}
