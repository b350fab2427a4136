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

//! Internal invariant checks. `strict_assert!` and friends compile to
//! nothing unless the `strict_assertions` feature is enabled; they exist
//! for catching coordinator/entry state-machine bugs in debug builds
//! without paying for the checks in release.

#[macro_export]
macro_rules! strict_assert {
    ($($arg:tt)*) => {
        if cfg!(feature = "strict_assertions") {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! strict_assert_eq {
    ($($arg:tt)*) => {
        if cfg!(feature = "strict_assertions") {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! strict_assert_ne {
    ($($arg:tt)*) => {
        if cfg!(feature = "strict_assertions") {
            assert_ne!($($arg)*);
        }
    };
}
