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

//! End-to-end exercise of the six families wired together the way a real
//! embedder would: fonts at the root, outlines and glyph metrics hanging
//! off a font, bitmaps off an outline, composites off a set of bitmap/
//! outline pairs. Unlike `cache.rs`'s unit tests (one `Family` in
//! isolation), these drive `CachedRef` fields across cache boundaries to
//! check the cross-cache reference-counting DAG described in the base
//! design's cross-cache invariant.
//!
//! `strong_count` assertions below are always expressed as a delta against
//! a count captured just before the operation under test, never as an
//! absolute number: the cache itself holds an implementation-defined
//! number of internal strong references to a live entry (at least one from
//! the index, plus one from the eviction queue), and that count is not
//! part of this crate's contract.

use std::sync::{Arc, Mutex};

use subcache::prelude::*;

/// Shared by every family's value type so destruction order across the DAG
/// can be observed from outside.
type Log = Arc<Mutex<Vec<&'static str>>>;

/// A value that records its own label into a shared log when dropped, so
/// the tests below can assert on cross-cache teardown order instead of
/// only on refcounts.
struct Recorder {
    label: &'static str,
    log: Log,
}

impl Recorder {
    fn new(label: &'static str, log: Log) -> Self {
        Self { label, log }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.log.lock().unwrap().push(self.label);
    }
}

struct Types;

impl RenderTypes for Types {
    type Font = Recorder;
    type Outline = Recorder;
    type GlyphMetrics = Recorder;
    type ShaperFont = Recorder;
    type Bitmap = Recorder;
    type Composite = Recorder;

    type Filter = u8;

    type FontArgs = Log;
    type OutlineArgs = Log;
    type GlyphMetricsArgs = Log;
    type ShaperFontArgs = Log;
    type BitmapArgs = Log;
    type CompositeArgs = Log;

    fn construct_font(_key: &FontKey, args: Log) -> (Recorder, usize) {
        (Recorder::new("font", args), 1)
    }

    fn construct_outline(_key: &OutlineKey<Self>, args: Log) -> (Recorder, usize) {
        (Recorder::new("outline", args), 1)
    }

    fn construct_glyph_metrics(_key: &GlyphMetricsKey<Self>, args: Log) -> (Recorder, usize) {
        (Recorder::new("glyph_metrics", args), 1)
    }

    fn construct_shaper_font(_key: &ShaperFontKey<Self>, args: Log) -> (Recorder, usize) {
        (Recorder::new("shaper_font", args), 1)
    }

    fn construct_bitmap(_key: &BitmapKey<Self>, args: Log) -> (Recorder, usize) {
        (Recorder::new("bitmap", args), 1)
    }

    fn construct_composite(_key: &CompositeKey<Self>, args: Log) -> (Recorder, usize) {
        (Recorder::new("composite", args), 1)
    }
}

fn font_key(name: &str) -> FontKey {
    FontKey {
        family_name: name.to_string(),
        weight: 400,
        italic: false,
    }
}

/// A full chain — font, a glyph outline referencing it, a bitmap
/// referencing the outline, and a composite layering that bitmap over its
/// own outline — torn down by dropping only the outermost handle, with
/// every intermediate cache already `empty()`-ed. Mirrors base-spec
/// scenario 4 (cross-cache dec_ref cascades: the referencing entry's
/// destructor runs, then the referenced one's).
#[test]
fn dag_cascades_destruction_in_dependency_order() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let fonts = Cache::<FontFamily<Types>>::new(CacheConfig::new(1 << 20));
    let outlines = Cache::<OutlineFamily<Types>>::new(CacheConfig::new(1 << 20));
    let bitmaps = Cache::<BitmapFamily<Types>>::new(CacheConfig::new(1 << 20));
    let composites = Cache::<CompositeFamily<Types>>::new(CacheConfig::new(1 << 20));

    let font_client = fonts.create_client();
    let outline_client = outlines.create_client();
    let bitmap_client = bitmaps.create_client();
    let composite_client = composites.create_client();

    let font = font_client.get(font_key("Noto Sans"), log.clone());
    let font_base = font.strong_count();

    let outline = outline_client.get(
        OutlineKey::Glyph {
            font: font.clone(),
            glyph_index: 7,
        },
        log.clone(),
    );
    // The outline key's embedded reference is the only net-new hold font
    // picks up here; our own `.clone()` above accounts for it exactly.
    assert_eq!(font.strong_count(), font_base + 1);

    let outline_base = outline.strong_count();
    let bitmap = bitmap_client.get(
        BitmapKey {
            outline: outline.clone(),
            subpixel_bucket: 0,
        },
        log.clone(),
    );
    assert_eq!(outline.strong_count(), outline_base + 1);

    let bitmap_base = bitmap.strong_count();
    let outline_base = outline.strong_count();
    let composite = composite_client.get(
        CompositeKey {
            filter: 0,
            layers: vec![(bitmap.clone(), outline.clone())],
        },
        log.clone(),
    );
    // composite's layer entry adds one more hold on both bitmap and outline.
    assert_eq!(bitmap.strong_count(), bitmap_base + 1);
    assert_eq!(outline.strong_count(), outline_base + 1);

    drop(font);
    drop(outline);
    drop(bitmap);

    // Each cache forgets its own entries; they stay alive purely through
    // composite's key, which is the only thing still pinning the chain.
    fonts.empty();
    outlines.empty();
    bitmaps.empty();
    assert_eq!(fonts.stats().items, 0);
    assert_eq!(outlines.stats().items, 0);
    assert_eq!(bitmaps.stats().items, 0);
    assert!(log.lock().unwrap().is_empty());

    drop(composite);
    composites.empty();

    // Composite's value drops first, then its key drops the bitmap hold
    // (dropping the bitmap's value, then its key's outline hold), then the
    // key's own direct outline hold (destroying outline: value then font
    // hold, destroying font).
    assert_eq!(
        *log.lock().unwrap(),
        vec!["composite", "bitmap", "outline", "font"]
    );
}

/// Glyph metrics and shaped fonts both reference the font cache; looking
/// both up for the same font must not re-run `construct_font`.
#[test]
fn glyph_metrics_and_shaper_font_share_one_font_entry() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let fonts = Cache::<FontFamily<Types>>::new(CacheConfig::new(1 << 20));
    let metrics = Cache::<GlyphMetricsFamily<Types>>::new(CacheConfig::new(1 << 20));
    let shaped = Cache::<ShaperFontFamily<Types>>::new(CacheConfig::new(1 << 20));

    let font_client = fonts.create_client();
    let metrics_client = metrics.create_client();
    let shaped_client = shaped.create_client();

    let font = font_client.get(font_key("Inter"), log.clone());
    assert_eq!(fonts.stats().misses, 1);

    let font_base = font.strong_count();
    let gm = metrics_client.get(
        GlyphMetricsKey {
            font: font.clone(),
            point_size: Fixed6::from_int(12),
            dpi: 96,
        },
        log.clone(),
    );
    assert_eq!(font.strong_count(), font_base + 1);

    let font_base = font.strong_count();
    let sf = shaped_client.get(
        ShaperFontKey {
            font: font.clone(),
            point_size: Fixed6::from_int(12),
        },
        log.clone(),
    );
    assert_eq!(font.strong_count(), font_base + 1);

    // Neither downstream lookup re-constructed the font.
    assert_eq!(fonts.stats().misses, 1);
    assert_eq!(fonts.stats().hits, 0);

    assert_eq!(gm.key().font, font);
    assert_eq!(sf.key().font, font);
}

/// `OutlineKey::Border` references another outline entry, exercising the
/// one self-referential edge in the DAG (outline-on-outline) without
/// introducing a cycle: a border can only name an outline that was already
/// looked up.
#[test]
fn border_outline_references_another_outline() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let fonts = Cache::<FontFamily<Types>>::new(CacheConfig::new(1 << 20));
    let outlines = Cache::<OutlineFamily<Types>>::new(CacheConfig::new(1 << 20));

    let font_client = fonts.create_client();
    let outline_client = outlines.create_client();

    let font = font_client.get(font_key("Noto Sans"), log.clone());
    let glyph = outline_client.get(
        OutlineKey::Glyph {
            font: font.clone(),
            glyph_index: 3,
        },
        log.clone(),
    );

    let glyph_base = glyph.strong_count();
    let bordered = outline_client.get(
        OutlineKey::Border {
            source: glyph.clone(),
            width: Fixed6::from_f64(1.5),
        },
        log.clone(),
    );
    assert_eq!(glyph.strong_count(), glyph_base + 1); // the border key's own hold
    assert_ne!(glyph, bordered);

    // Re-requesting the same border key returns the same entry rather than
    // constructing a second one.
    let again = outline_client.get(
        OutlineKey::Border {
            source: glyph.clone(),
            width: Fixed6::from_f64(1.5),
        },
        log.clone(),
    );
    assert_eq!(bordered, again);
    assert_eq!(outlines.stats().misses, 2);
    assert_eq!(outlines.stats().hits, 1);
}

/// Base-spec scenario 3: touching two of three entries in the frame a trim
/// ends pins them against eviction; the untouched third is evicted.
#[test]
fn frame_touches_pin_entries_against_the_trim_that_follows() {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let fonts = Cache::<FontFamily<Types>>::new(CacheConfig::new(1 << 20));
    let client = fonts.create_client();

    let _a = client.get(font_key("A"), log.clone());
    let _b = client.get(font_key("B"), log.clone());
    let _c = client.get(font_key("C"), log.clone());
    fonts.trim(usize::MAX); // advance past the frame all three were created in

    client.get(font_key("A"), log.clone());
    client.get(font_key("B"), log.clone());
    fonts.trim(0); // budget of zero: only entries untouched this frame go

    assert_eq!(fonts.stats().items, 2);
    assert_eq!(fonts.stats().evictions, 1);
}
