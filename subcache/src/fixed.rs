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

//! A minimal 26.6 fixed-point type for the scalar fields (point size, DPI
//! scale, border widths) that appear inside cache keys. Keys must be
//! `Hash`/`Eq`/`Ord`, which floats are not; a fixed-point representation
//! sidesteps that without pulling in an external fixed-point crate for one
//! field's worth of arithmetic.

/// A 26.6 fixed-point number: 26 integer bits, 6 fractional bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fixed6(i32);

impl Fixed6 {
    pub const ZERO: Self = Self(0);
    const FRAC_BITS: u32 = 6;

    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> i32 {
        self.0
    }

    pub const fn from_int(v: i32) -> Self {
        Self(v << Self::FRAC_BITS)
    }

    pub fn from_f64(v: f64) -> Self {
        Self((v * (1i32 << Self::FRAC_BITS) as f64).round() as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / (1i32 << Self::FRAC_BITS) as f64
    }
}

impl std::ops::Add for Fixed6 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Fixed6 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}
