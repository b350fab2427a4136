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

//! Small helpers shared by the `subcache` crate. Kept deliberately thin:
//! most of what a "common" crate usually carries (metrics, intrusive
//! links, async runtime glue) is either owned directly by `subcache` or
//! does not apply to a single in-process, synchronous cache.

pub mod assertions;

pub use assertions::*;
