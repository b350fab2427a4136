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

//! Concurrent, generational memoization caches for a subtitle rendering
//! pipeline: parsed fonts, glyph outlines, glyph metrics, shaped fonts,
//! rasterized bitmaps and composite rasters all live in one of six
//! [`Cache`] instances, each keyed by its own [`Family`] and forming a DAG
//! through `CachedRef` fields embedded in downstream keys.

mod cache;
mod client;
mod entry;
mod family;
mod families;
mod fixed;
mod indexer;
mod listener;
mod metrics;
mod queue;
mod refs;

pub mod prelude;

pub use cache::{Cache, CacheConfig, DEFAULT_INITIAL_BUCKETS};
pub use client::Client;
pub use families::{
    BitmapFamily, BitmapKey, CompositeFamily, CompositeKey, FontFamily, FontKey,
    GlyphMetricsFamily, GlyphMetricsKey, OutlineFamily, OutlineKey, RenderTypes, ShaperFontFamily,
    ShaperFontKey,
};
pub use family::Family;
pub use fixed::Fixed6;
pub use listener::{CacheEventListener, DefaultCacheEventListener};
pub use metrics::CacheStats;
pub use refs::CachedRef;
