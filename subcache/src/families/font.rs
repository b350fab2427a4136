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

use std::marker::PhantomData;

use crate::family::Family;

use super::RenderTypes;

/// Identifies a parsed font by the selection criteria used to find it, not
/// by anything about its contents. The family name is owned; there is no
/// destructor to write by hand, `String`'s own `Drop` is the whole story.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FontKey {
    pub family_name: String,
    pub weight: u16,
    pub italic: bool,
}

/// The root of the memoization DAG: parsed fonts, referenced by outline,
/// glyph-metrics and shaped-font keys.
pub struct FontFamily<T>(PhantomData<T>);

impl<T: RenderTypes> Family for FontFamily<T> {
    type Key = FontKey;
    type Value = T::Font;
    type Args = T::FontArgs;

    fn construct(key: &Self::Key, args: Self::Args) -> (Self::Value, usize) {
        T::construct_font(key, args)
    }
}
