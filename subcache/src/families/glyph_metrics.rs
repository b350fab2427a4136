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

/// Metrics for one font at one size/DPI. Two lookups at different sizes of
/// the same font must land on distinct entries, hence the scalar fields
/// alongside the font reference.
pub struct GlyphMetricsKey<T: RenderTypes> {
    pub font: CachedRef<FontFamily<T>>,
    pub point_size: Fixed6,
    pub dpi: u32,
}

impl<T: RenderTypes> Clone for GlyphMetricsKey<T> {
    fn clone(&self) -> Self {
        Self {
            font: self.font.clone(),
            point_size: self.point_size,
            dpi: self.dpi,
        }
    }
}

impl<T: RenderTypes> PartialEq for GlyphMetricsKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.font == other.font && self.point_size == other.point_size && self.dpi == other.dpi
    }
}

impl<T: RenderTypes> Eq for GlyphMetricsKey<T> {}

impl<T: RenderTypes> Hash for GlyphMetricsKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.point_size.hash(state);
        self.dpi.hash(state);
    }
}

pub struct GlyphMetricsFamily<T>(PhantomData<T>);

impl<T: RenderTypes> Family for GlyphMetricsFamily<T> {
    type Key = GlyphMetricsKey<T>;
    type Value = T::GlyphMetrics;
    type Args = T::GlyphMetricsArgs;

    fn construct(key: &Self::Key, args: Self::Args) -> (Self::Value, usize) {
        T::construct_glyph_metrics(key, args)
    }
}
