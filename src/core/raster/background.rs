// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Star-field clear image
//!
//! Each frame starts from a copy of this image rather than a flat colour. It
//! is generated once per viewport size from a fixed seed, so both backends and
//! every frame see the same stars.

use serde::{Deserialize, Serialize};

use super::color::pack_argb;

/// Base colour behind the stars (blue-black)
pub const SPACE_COLOR: u32 = 0xFF00_0008;

/// Xorshift32 generator
///
/// Deterministic for a given seed, which is all the star field needs.
#[derive(Debug, Clone)]
struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    fn new(seed: u32) -> Self {
        // Zero is a fixed point of xorshift
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Star-field parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarField {
    pub count: u32,
    pub seed: u32,
}

impl Default for StarField {
    fn default() -> Self {
        Self {
            count: 300,
            seed: 42,
        }
    }
}

impl StarField {
    /// Render a `width × height` background image
    pub fn render(&self, width: u32, height: u32) -> Vec<u32> {
        let mut pixels = vec![SPACE_COLOR; width as usize * height as usize];
        if width == 0 || height == 0 {
            return pixels;
        }

        let mut rng = Xorshift32::new(self.seed);
        for _ in 0..self.count {
            let x = rng.next() % width;
            let y = rng.next() % height;
            let brightness = 100 + (rng.next() % 156) as u8;
            let dim = |scale: f32| (brightness as f32 * scale) as u8;
            let color = match rng.next() % 3 {
                0 => pack_argb(0xFF, brightness, brightness, brightness),
                1 => pack_argb(0xFF, dim(0.7), dim(0.8), brightness),
                _ => pack_argb(0xFF, brightness, dim(0.9), dim(0.6)),
            };
            pixels[(y * width + x) as usize] = color;
        }

        log::debug!(
            "Generated {}x{} star field ({} stars, seed {})",
            width,
            height,
            self.count,
            self.seed
        );
        pixels
    }
}
