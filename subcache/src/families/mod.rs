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

//! The six concrete families that make up the rendering pipeline's
//! memoization DAG: fonts at the root, then glyph metrics, shaped fonts and
//! outlines hanging off a font, bitmaps hanging off an outline, and
//! composites hanging off a set of bitmap/outline pairs.
//!
//! Each family is a zero-sized marker type parameterized by one
//! [`RenderTypes`] bundle, which collects the value types and constructors
//! the embedding application supplies for all six families at once. A
//! bundle rather than six independent generic parameters per cache because
//! the families reference each other (an outline's key embeds
//! `CachedRef<FontFamily<T>>`); without the bundle, every family's type
//! would need every other family's type parameters threaded through it.

mod bitmap;
mod composite;
mod font;
mod glyph_metrics;
mod outline;
mod shaper_font;

pub use bitmap::{BitmapFamily, BitmapKey};
pub use composite::{CompositeFamily, CompositeKey};
pub use font::{FontFamily, FontKey};
pub use glyph_metrics::{GlyphMetricsFamily, GlyphMetricsKey};
pub use outline::{OutlineFamily, OutlineKey};
pub use shaper_font::{ShaperFontFamily, ShaperFontKey};

/// Bundles the value/argument types and constructors for every family in
/// the pipeline. One implementation of this trait stands in for what the
/// source expresses as six separately-registered family descriptors.
pub trait RenderTypes: Send + Sync + Sized + 'static {
    type Font: Send + Sync + 'static;
    type Outline: Send + Sync + 'static;
    type GlyphMetrics: Send + Sync + 'static;
    type ShaperFont: Send + Sync + 'static;
    type Bitmap: Send + Sync + 'static;
    type Composite: Send + Sync + 'static;

    /// Opaque to the cache; supplied by whatever assembles composite
    /// rasters (blend mode, clip, color transform, ...).
    type Filter: std::hash::Hash + Eq + Clone + Send + Sync + 'static;

    type FontArgs;
    type OutlineArgs;
    type GlyphMetricsArgs;
    type ShaperFontArgs;
    type BitmapArgs;
    type CompositeArgs;

    fn construct_font(key: &FontKey, args: Self::FontArgs) -> (Self::Font, usize);

    fn construct_outline(
        key: &OutlineKey<Self>,
        args: Self::OutlineArgs,
    ) -> (Self::Outline, usize);

    fn construct_glyph_metrics(
        key: &GlyphMetricsKey<Self>,
        args: Self::GlyphMetricsArgs,
    ) -> (Self::GlyphMetrics, usize);

    fn construct_shaper_font(
        key: &ShaperFontKey<Self>,
        args: Self::ShaperFontArgs,
    ) -> (Self::ShaperFont, usize);

    fn construct_bitmap(key: &BitmapKey<Self>, args: Self::BitmapArgs) -> (Self::Bitmap, usize);

    fn construct_composite(
        key: &CompositeKey<Self>,
        args: Self::CompositeArgs,
    ) -> (Self::Composite, usize);
}
