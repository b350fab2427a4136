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

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::entry::Entry;
use crate::family::Family;

/// An opaque strong reference to one cached entry. `Clone` is the cache's
/// `inc_ref`, `Drop` is its `dec_ref` — both are simply `Arc`'s own
/// machinery, since an `Entry` is only ever reached through `Arc<Entry<F>>`.
///
/// `CachedRef` fields embedded inside another family's key are exactly the
/// cross-cache strong references described by the DAG: cloning one bumps
/// the referenced entry's strong count, dropping one (when it's the last
/// holder of an entry no longer reachable from its own cache's map) runs
/// that entry's destructor, which may itself drop further `CachedRef`
/// fields recursively.
pub struct CachedRef<F: Family> {
    pub(crate) entry: Arc<Entry<F>>,
}

impl<F: Family> CachedRef<F> {
    pub(crate) fn new(entry: Arc<Entry<F>>) -> Self {
        Self { entry }
    }

    pub fn key(&self) -> &F::Key {
        &self.entry.key
    }

    pub fn value(&self) -> &F::Value {
        self.entry.value()
    }

    /// Number of strong references currently held on this entry, including
    /// this one. Diagnostic only; not part of the cache's functional
    /// contract.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.entry)
    }
}

impl<F: Family> Clone for CachedRef<F> {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
        }
    }
}

impl<F: Family> PartialEq for CachedRef<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl<F: Family> Eq for CachedRef<F> {}

impl<F: Family> Hash for CachedRef<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.entry) as *const () as usize).hash(state);
    }
}

impl<F: Family> std::fmt::Debug for CachedRef<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedRef")
            .field("entry", &Arc::as_ptr(&self.entry))
            .finish()
    }
}
