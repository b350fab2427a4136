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
use std::marker::PhantomData;

use crate::family::Family;
use crate::refs::CachedRef;

use super::{BitmapFamily, OutlineFamily, RenderTypes};

/// A composite raster assembled from a filter and an ordered set of
/// (bitmap, bitmap-outline) layers. Dropping a `CompositeKey` drops the
/// layer vector, which drops each pair, decrementing both referenced
/// entries — there is no separate teardown routine to write.
pub struct CompositeKey<T: RenderTypes> {
    pub filter: T::Filter,
    pub layers: Vec<(CachedRef<BitmapFamily<T>>, CachedRef<OutlineFamily<T>>)>,
}

impl<T: RenderTypes> Clone for CompositeKey<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            layers: self.layers.clone(),
        }
    }
}

impl<T: RenderTypes> PartialEq for CompositeKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.filter == other.filter && self.layers == other.layers
    }
}

impl<T: RenderTypes> Eq for CompositeKey<T> {}

impl<T: RenderTypes> Hash for CompositeKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.filter.hash(state);
        self.layers.hash(state);
    }
}

pub struct CompositeFamily<T>(PhantomData<T>);

impl<T: RenderTypes> Family for CompositeFamily<T> {
    type Key = CompositeKey<T>;
    type Value = T::Composite;
    type Args = T::CompositeArgs;

    fn construct(key: &Self::Key, args: Self::Args) -> (Self::Value, usize) {
        T::construct_composite(key, args)
    }
}
