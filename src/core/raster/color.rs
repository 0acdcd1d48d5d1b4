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

//! Packed colour helpers
//!
//! Every colour inside the renderer is a `u32` packed as `0xAARRGGBB`:
//!
//! - Bits 24-31: Alpha
//! - Bits 16-23: Red
//! - Bits 8-15: Green
//! - Bits 0-7: Blue
//!
//! Textures are converted into this layout when they are decoded, and the
//! frame buffer is converted out of it exactly once, by [`argb_to_rgba8`],
//! when it is handed to the window or written to disk.

use crate::core::math::Vec3;

/// Opaque black
pub const BLACK: u32 = 0xFF00_0000;
/// Opaque white
pub const WHITE: u32 = 0xFFFF_FFFF;

#[inline(always)]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split into `(a, r, g, b)`
#[inline(always)]
pub const fn unpack_argb(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

/// Opaque colour from floating point channels in `[0, 1]`
///
/// Channels outside the range are clamped.
pub fn from_rgb_f32(rgb: Vec3) -> u32 {
    let to_byte = |c: f32| (c * 255.0).clamp(0.0, 255.0) as u8;
    pack_argb(0xFF, to_byte(rgb.x), to_byte(rgb.y), to_byte(rgb.z))
}

/// Per-channel linear blend between two packed colours
pub fn lerp_color(a: u32, b: u32, t: f32) -> u32 {
    let (aa, ar, ag, ab) = unpack_argb(a);
    let (ba, br, bg, bb) = unpack_argb(b);
    let mix = |x: u8, y: u8| {
        (x as f32 + (y as f32 - x as f32) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    pack_argb(mix(aa, ba), mix(ar, br), mix(ag, bg), mix(ab, bb))
}

/// Scale the RGB channels by `lighting * tint`, keeping alpha
///
/// Each channel becomes `min(255, trunc(c * lighting * tint_c))`. The compute
/// kernel applies the same formula.
#[inline]
pub fn modulate(color: u32, lighting: f32, tint: Vec3) -> u32 {
    let (a, r, g, b) = unpack_argb(color);
    let scale = |c: u8, t: f32| ((c as f32 * lighting * t) as u32).min(255) as u8;
    pack_argb(a, scale(r, tint.x), scale(g, tint.y), scale(b, tint.z))
}

/// Convert packed ARGB pixels into RGBA8 bytes for presentation
///
/// # Examples
///
/// ```
/// use twinraster::core::raster::color::argb_to_rgba8;
///
/// let rgba = argb_to_rgba8(&[0xFF102030, 0x80FFFFFF]);
/// assert_eq!(rgba, [0x10, 0x20, 0x30, 0xFF, 0xFF, 0xFF, 0xFF, 0x80]);
/// ```
pub fn argb_to_rgba8(pixels: &[u32]) -> Vec<u8> {
    pixels
        .iter()
        .flat_map(|&color| {
            let (a, r, g, b) = unpack_argb(color);
            [r, g, b, a]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let c = pack_argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c, 0x1234_5678);
        assert_eq!(unpack_argb(c), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn test_from_rgb_f32_clamps() {
        assert_eq!(from_rgb_f32(Vec3::new(1.0, 0.0, 0.5)), 0xFFFF_007F);
        assert_eq!(from_rgb_f32(Vec3::new(2.0, -1.0, 1.0)), 0xFFFF_00FF);
    }

    #[test]
    fn test_modulate_preserves_alpha_and_saturates() {
        let c = modulate(0x80FF_8040, 1.0, Vec3::new(1.0, 2.0, 0.5));
        assert_eq!(c, 0x80FF_FF20);
    }

    #[test]
    fn test_modulate_truncates() {
        let c = modulate(pack_argb(255, 200, 100, 10), 0.5, Vec3::ONE);
        assert_eq!(unpack_argb(c), (255, 100, 50, 5));
    }

    #[test]
    fn test_lerp_color_midpoint() {
        assert_eq!(lerp_color(0xFF00_0000, 0xFFFF_FFFF, 0.5), 0xFF80_8080);
        assert_eq!(lerp_color(0xFF10_2030, 0xFF40_5060, 0.0), 0xFF10_2030);
    }

    #[test]
    fn test_argb_to_rgba8_order() {
        assert_eq!(argb_to_rgba8(&[BLACK]), [0, 0, 0, 255]);
        assert_eq!(argb_to_rgba8(&[0xFFFF_0000]), [255, 0, 0, 255]);
    }
}
