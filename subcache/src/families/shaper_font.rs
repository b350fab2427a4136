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
use crate::fixed::Fixed6;
use crate::refs::CachedRef;

use super::{FontFamily, RenderTypes};

/// A font prepared for text shaping at one fixed point size.
pub struct ShaperFontKey<T: RenderTypes> {
    pub font: CachedRef<FontFamily<T>>,
    pub point_size: Fixed6,
}

impl<T: RenderTypes> Clone for ShaperFontKey<T> {
    fn clone(&self) -> Self {
        Self {
            font: self.font.clone(),
            point_size: self.point_size,
        }
    }
}

impl<T: RenderTypes> PartialEq for ShaperFontKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.font == other.font && self.point_size == other.point_size
    }
}

impl<T: RenderTypes> Eq for ShaperFontKey<T> {}

impl<T: RenderTypes> Hash for ShaperFontKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.point_size.hash(state);
    }
}

pub struct ShaperFontFamily<T>(PhantomData<T>);

impl<T: RenderTypes> Family for ShaperFontFamily<T> {
    type Key = ShaperFontKey<T>;
    type Value = T::ShaperFont;
    type Args = T::ShaperFontArgs;

    fn construct(key: &Self::Key, args: Self::Args) -> (Self::Value, usize) {
        T::construct_shaper_font(key, args)
    }
}
