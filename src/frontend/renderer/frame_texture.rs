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

//! Frame buffer texture
//!
//! Holds the GPU copy of the last rendered frame. Pixels are stored ARGB in
//! the frame buffer and uploaded as RGBA8 through
//! [`argb_to_rgba8`](crate::core::raster::color::argb_to_rgba8).

use crate::core::raster::color::argb_to_rgba8;
use crate::core::raster::FrameBuffer;

/// Fraction of a `dst` viewport covered by a `src` image scaled to fit
///
/// The image keeps its aspect ratio and touches two opposite edges. The
/// uncovered band is split evenly between both sides.
///
/// # Examples
///
/// ```
/// use twinraster::frontend::renderer::fit_scale;
///
/// // 4:3 frame in a 16:9 window is pillarboxed
/// let [sx, sy] = fit_scale(640, 480, 1600, 900);
/// assert!((sx - 0.75).abs() < 1e-6);
/// assert_eq!(sy, 1.0);
/// ```
pub fn fit_scale(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> [f32; 2] {
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return [1.0, 1.0];
    }
    let src_aspect = src_width as f32 / src_height as f32;
    let dst_aspect = dst_width as f32 / dst_height as f32;
    if dst_aspect > src_aspect {
        [src_aspect / dst_aspect, 1.0]
    } else {
        [1.0, dst_aspect / src_aspect]
    }
}

/// Texture mirroring a [`FrameBuffer`]
///
/// Recreated whenever the frame buffer changes size.
pub struct FrameTexture {
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl FrameTexture {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Frame colours are already sRGB encoded
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!("Created frame texture {}x{}", width, height);
        Self {
            texture,
            view,
            width,
            height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn matches(&self, fb: &FrameBuffer) -> bool {
        self.width == fb.width() && self.height == fb.height()
    }

    /// Upload `fb`'s colour buffer
    ///
    /// Returns `false` without uploading if the sizes differ.
    pub fn update(&mut self, queue: &wgpu::Queue, fb: &FrameBuffer) -> bool {
        if !self.matches(fb) {
            return false;
        }
        let rgba = argb_to_rgba8(fb.pixels());
        queue.write_texture(
            self.texture.as_image_copy(),
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.width * 4),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        true
    }
}
