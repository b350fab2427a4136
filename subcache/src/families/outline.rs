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

/// A vector outline, sourced one of four ways. `Border` and `Glyph` hold
/// strong references into the font and (recursively) outline caches; the
/// DAG stays acyclic because a `Border` can only ever name an outline that
/// was already looked up, never itself.
///
/// Manually implemented rather than derived: `#[derive(Hash, ...)]` on a
/// struct generic over `T` adds a spurious `T: Hash` bound on the marker
/// type itself, even though every field that actually needs hashing goes
/// through `CachedRef`'s own identity-based impl.
pub enum OutlineKey<T: RenderTypes> {
    Glyph {
        font: CachedRef<FontFamily<T>>,
        glyph_index: u32,
    },
    Drawing {
        commands: String,
    },
    Border {
        source: CachedRef<OutlineFamily<T>>,
        width: Fixed6,
    },
    Box {
        width: Fixed6,
        height: Fixed6,
    },
}

impl<T: RenderTypes> Clone for OutlineKey<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Glyph { font, glyph_index } => Self::Glyph {
                font: font.clone(),
                glyph_index: *glyph_index,
            },
            Self::Drawing { commands } => Self::Drawing {
                commands: commands.clone(),
            },
            Self::Border { source, width } => Self::Border {
                source: source.clone(),
                width: *width,
            },
            Self::Box { width, height } => Self::Box {
                width: *width,
                height: *height,
            },
        }
    }
}

impl<T: RenderTypes> PartialEq for OutlineKey<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Glyph { font, glyph_index },
                Self::Glyph {
                    font: of,
                    glyph_index: oi,
                },
            ) => font == of && glyph_index == oi,
            (Self::Drawing { commands }, Self::Drawing { commands: oc }) => commands == oc,
            (
                Self::Border { source, width },
                Self::Border {
                    source: os,
                    width: ow,
                },
            ) => source == os && width == ow,
            (
                Self::Box { width, height },
                Self::Box {
                    width: ow,
                    height: oh,
                },
            ) => width == ow && height == oh,
            _ => false,
        }
    }
}

impl<T: RenderTypes> Eq for OutlineKey<T> {}

impl<T: RenderTypes> Hash for OutlineKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Glyph { font, glyph_index } => {
                font.hash(state);
                glyph_index.hash(state);
            }
            Self::Drawing { commands } => commands.hash(state),
            Self::Border { source, width } => {
                source.hash(state);
                width.hash(state);
            }
            Self::Box { width, height } => {
                width.hash(state);
                height.hash(state);
            }
        }
    }
}

pub struct OutlineFamily<T>(PhantomData<T>);

impl<T: RenderTypes> Family for OutlineFamily<T> {
    type Key = OutlineKey<T>;
    type Value = T::Outline;
    type Args = T::OutlineArgs;

    fn construct(key: &Self::Key, args: Self::Args) -> (Self::Value, usize) {
        T::construct_outline(key, args)
    }
}
