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

//! Colour and depth buffers
//!
//! # Layout
//!
//! Both buffers are `width × height`, row-major, top row first. Pixel `(x, y)`
//! lives at index `y * width + x`.
//!
//! # Depth
//!
//! Depth is the NDC depth produced by the projection matrix, `0.0` at the near
//! plane and `1.0` at the far plane. Every entry is reset to [`DEPTH_FAR`] when
//! the frame is cleared, so anything beyond the far plane never lands, and an
//! entry still equal to [`DEPTH_FAR`] after the geometry pass marks a pixel no
//! primitive covered.

use std::path::Path;

use super::color::{argb_to_rgba8, BLACK};
use crate::core::error::{RenderError, Result};

/// Depth value of a cleared pixel
pub const DEPTH_FAR: f32 = 1.0;

/// Frame buffer holding colour (`0xAARRGGBB`) and depth per pixel
///
/// # Examples
///
/// ```
/// use twinraster::core::raster::{FrameBuffer, DEPTH_FAR};
///
/// let mut fb = FrameBuffer::new(4, 4);
/// assert!(fb.write_pixel(1, 1, 0.5, 0xFFFF0000));
/// // Farther fragment is rejected
/// assert!(!fb.write_pixel(1, 1, 0.7, 0xFF00FF00));
/// assert_eq!(fb.color_at(1, 1), Some(0xFFFF0000));
/// assert_eq!(fb.depth_at(0, 0), Some(DEPTH_FAR));
/// ```
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    color: Vec<u32>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            color: vec![BLACK; len],
            depth: vec![DEPTH_FAR; len],
        }
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate both buffers for a new viewport size
    ///
    /// Contents are discarded. Does nothing if the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!(
            "Resizing frame buffer {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        *self = Self::new(width, height);
    }

    /// Fill colour with a single value and reset depth
    pub fn clear(&mut self, color: u32) {
        self.color.fill(color);
        self.depth.fill(DEPTH_FAR);
    }

    /// Copy a pre-rendered background image and reset depth
    ///
    /// A background of the wrong size clears to black instead.
    pub fn clear_with(&mut self, background: &[u32]) {
        if background.len() == self.color.len() {
            self.color.copy_from_slice(background);
        } else {
            log::warn!(
                "Background has {} pixels, frame buffer has {}; clearing to black",
                background.len(),
                self.color.len()
            );
            self.color.fill(BLACK);
        }
        self.depth.fill(DEPTH_FAR);
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Depth-tested write
    ///
    /// This is the only way geometry reaches the frame buffer. Coordinates
    /// outside the viewport are dropped silently, then the fragment lands only
    /// if `z` is strictly nearer than the stored depth.
    ///
    /// # Returns
    ///
    /// `true` if the pixel was written
    #[inline(always)]
    pub fn write_pixel(&mut self, x: i32, y: i32, z: f32, color: u32) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        if z < self.depth[index] {
            self.depth[index] = z;
            self.color[index] = color;
            true
        } else {
            false
        }
    }

    /// Colour-only write, leaving depth untouched
    ///
    /// Used by background passes such as the skybox.
    #[inline(always)]
    pub fn write_color(&mut self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.color[index] = color;
        }
    }

    pub fn color_at(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Whether no primitive has written this pixel since the last clear
    pub fn is_uncovered(&self, x: i32, y: i32) -> bool {
        self.depth_at(x, y).is_some_and(|d| d >= DEPTH_FAR)
    }

    /// Colour buffer, row-major, top row first
    #[inline(always)]
    pub fn pixels(&self) -> &[u32] {
        &self.color
    }

    #[inline(always)]
    pub fn depths(&self) -> &[f32] {
        &self.depth
    }

    /// Both buffers for bulk replacement (GPU readback)
    pub(crate) fn buffers_mut(&mut self) -> (&mut [u32], &mut [f32]) {
        (&mut self.color, &mut self.depth)
    }

    /// Colour buffer as RGBA8 bytes
    pub fn to_rgba8(&self) -> Vec<u8> {
        argb_to_rgba8(&self.color)
    }

    /// Write the colour buffer to an image file (format from the extension)
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let image = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
            .ok_or_else(|| RenderError::ImageSave {
                path: path.display().to_string(),
                reason: "buffer size mismatch".to_string(),
            })?;
        image.save(path).map_err(|e| RenderError::ImageSave {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::info!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}
