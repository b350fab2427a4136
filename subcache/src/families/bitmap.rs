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

use super::{OutlineFamily, RenderTypes};

/// A rasterized outline, subpixel-bucketed so that glyphs differing only by
/// a fraction of a pixel of subpixel positioning still share a bitmap when
/// the bucketing is coarser than full subpixel precision.
pub struct BitmapKey<T: RenderTypes> {
    pub outline: CachedRef<OutlineFamily<T>>,
    pub subpixel_bucket: u8,
}

impl<T: RenderTypes> Clone for BitmapKey<T> {
    fn clone(&self) -> Self {
        Self {
            outline: self.outline.clone(),
            subpixel_bucket: self.subpixel_bucket,
        }
    }
}

impl<T: RenderTypes> PartialEq for BitmapKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.outline == other.outline && self.subpixel_bucket == other.subpixel_bucket
    }
}

impl<T: RenderTypes> Eq for BitmapKey<T> {}

impl<T: RenderTypes> Hash for BitmapKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.outline.hash(state);
        self.subpixel_bucket.hash(state);
    }
}

pub struct BitmapFamily<T>(PhantomData<T>);

impl<T: RenderTypes> Family for BitmapFamily<T> {
    type Key = BitmapKey<T>;
    type Value = T::Bitmap;
    type Args = T::BitmapArgs;

    fn construct(key: &Self::Key, args: Self::Args) -> (Self::Value, usize) {
        T::construct_bitmap(key, args)
    }
}
