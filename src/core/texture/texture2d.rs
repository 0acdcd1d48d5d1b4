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

//! 2D textures and the texture store
//!
//! A [`Texture`] only exists once its pixels are in memory, so there is no
//! "unloaded" state to check. Scene objects never own textures: they keep a
//! [`TextureHandle`] into the [`TextureStore`], which the renderer owns.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::error::{RenderError, Result};
use crate::core::raster::color::pack_argb;

/// Where a texture's pixels came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// Decoded from an image file
    File(PathBuf),
    /// Built in memory (procedural or embedded data)
    Embedded(String),
}

/// Nearest-neighbour sampled texture, pixels packed `0xAARRGGBB`
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    source: TextureSource,
}

impl Texture {
    /// Build a texture from packed pixels
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidTexture`] if either dimension is zero or the
    /// buffer length is not `width * height`.
    pub fn from_pixels(
        name: impl Into<String>,
        width: u32,
        height: u32,
        pixels: Vec<u32>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(RenderError::InvalidTexture {
                width,
                height,
                expected,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            source: TextureSource::Embedded(name.into()),
        })
    }

    /// Build a texture by evaluating `f(x, y)` for every pixel
    pub fn from_fn(
        name: impl Into<String>,
        width: u32,
        height: u32,
        f: impl Fn(u32, u32) -> u32,
    ) -> Result<Self> {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::from_pixels(name, width, height, pixels)
    }

    /// Two-colour checkerboard with `cells × cells` squares
    pub fn checkerboard(size: u32, cells: u32, a: u32, b: u32) -> Result<Self> {
        let cell = (size / cells.max(1)).max(1);
        Self::from_fn("checkerboard", size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                a
            } else {
                b
            }
        })
    }

    /// Decode an image file
    ///
    /// Fully transparent pixels are made opaque, since the rasterizer does not
    /// blend.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| RenderError::TextureLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
            .to_rgba8();
        let (width, height) = image.dimensions();

        let pixels = image
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                pack_argb(if a == 0 { 0xFF } else { a }, r, g, b)
            })
            .collect();

        log::info!("Loaded texture {} ({}x{})", path.display(), width, height);
        let mut texture = Self::from_pixels("", width, height, pixels)?;
        texture.source = TextureSource::File(path.to_path_buf());
        Ok(texture)
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn source(&self) -> &TextureSource {
        &self.source
    }

    /// Nearest-neighbour sample
    ///
    /// UV is clamped to `[0, 1]` and mapped to pixel
    /// `(trunc(u * (w - 1)), trunc(v * (h - 1)))`.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let x = (u * (self.width - 1) as f32) as u32;
        let y = (v * (self.height - 1) as f32) as u32;
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Index of a texture in a [`TextureStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owner of every texture used by the scene
///
/// Textures are append-only, so handles stay valid for the store's lifetime.
/// Files are cached by path.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: Vec<Texture>,
    by_path: HashMap<PathBuf, TextureHandle>,
    fallback: Option<TextureHandle>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle(self.textures.len() as u32);
        if let TextureSource::File(path) = texture.source() {
            self.by_path.insert(path.clone(), handle);
        }
        self.textures.push(texture);
        handle
    }

    /// Load a texture file, reusing the cached copy if the path was seen before
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<TextureHandle> {
        let path = path.as_ref();
        if let Some(&handle) = self.by_path.get(path) {
            return Ok(handle);
        }
        let texture = Texture::load(path)?;
        Ok(self.insert(texture))
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.index())
    }

    /// Texture used by meshes that have none of their own
    pub fn fallback(&self) -> Option<TextureHandle> {
        self.fallback
    }

    pub fn set_fallback(&mut self, handle: Option<TextureHandle>) {
        self.fallback = handle;
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Texture {
        // 4x2, pixel value = y * 4 + x
        Texture::from_fn("gradient", 4, 2, |x, y| y * 4 + x).expect("valid texture")
    }

    #[test]
    fn test_sample_corners() {
        let tex = gradient();
        assert_eq!(tex.sample(0.0, 0.0), 0);
        assert_eq!(tex.sample(1.0, 0.0), 3);
        assert_eq!(tex.sample(0.0, 1.0), 4);
        assert_eq!(tex.sample(1.0, 1.0), 7);
    }

    #[test]
    fn test_sample_truncates_and_clamps() {
        let tex = gradient();
        // 0.5 * 3 = 1.5 -> 1
        assert_eq!(tex.sample(0.5, 0.0), 1);
        assert_eq!(tex.sample(-3.0, 2.0), 4);
        assert_eq!(tex.sample(9.0, -1.0), 3);
    }

    #[test]
    fn test_from_pixels_rejects_bad_sizes() {
        assert!(matches!(
            Texture::from_pixels("bad", 2, 2, vec![0; 3]),
            Err(RenderError::InvalidTexture { expected: 4, len: 3, .. })
        ));
        assert!(Texture::from_pixels("empty", 0, 4, vec![]).is_err());
    }

    #[test]
    fn test_checkerboard_alternates() {
        let tex = Texture::checkerboard(8, 2, 0xFFFF_FFFF, 0xFF00_0000).expect("valid");
        assert_eq!(tex.pixels()[0], 0xFFFF_FFFF);
        assert_eq!(tex.pixels()[4], 0xFF00_0000);
        assert_eq!(tex.pixels()[4 * 8 + 4], 0xFFFF_FFFF);
    }

    #[test]
    fn test_load_converts_to_argb_and_fixes_alpha() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tex.png");
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([0x10, 0x20, 0x30, 0x40]));
        img.put_pixel(1, 0, image::Rgba([0xAA, 0xBB, 0xCC, 0x00]));
        img.save(&path).expect("write png");

        let tex = Texture::load(&path).expect("load");
        assert_eq!(tex.pixels(), &[0x4010_2030, 0xFFAA_BBCC]);
        assert_eq!(tex.source(), &TextureSource::File(path));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(matches!(
            Texture::load("/no/such/texture.png"),
            Err(RenderError::TextureLoad { .. })
        ));
    }

    #[test]
    fn test_store_caches_by_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a.png");
        image::RgbaImage::new(1, 1).save(&path).expect("write png");

        let mut store = TextureStore::new();
        let a = store.load(&path).expect("load");
        let b = store.load(&path).expect("load again");
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_fallback() {
        let mut store = TextureStore::new();
        assert!(store.fallback().is_none());
        let h = store.insert(gradient());
        store.set_fallback(Some(h));
        assert_eq!(store.fallback(), Some(h));
        assert_eq!(store.get(h).map(Texture::width), Some(4));
    }
}
