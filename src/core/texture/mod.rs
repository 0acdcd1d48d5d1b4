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

//! Textures and environment maps
//!
//! - [`Texture`]: 2D image in packed `0xAARRGGBB`, nearest-neighbour sampled
//! - [`TextureStore`]: owns every texture; meshes refer to them by
//!   [`TextureHandle`]
//! - [`Cubemap`]: six-face environment map, used for the sky and for
//!   reflective or refractive materials
//! - [`Skybox`]: fills uncovered pixels from a cube map

mod cubemap;
mod skybox;
mod texture2d;

pub use cubemap::{face_uv, reflect, refract, CubeFace, Cubemap};
pub use skybox::Skybox;
pub use texture2d::{Texture, TextureHandle, TextureSource, TextureStore};
