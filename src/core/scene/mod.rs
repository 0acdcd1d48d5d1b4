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

//! Scene graph
//!
//! Objects own their geometry and placement and push triangles into a
//! [`RenderBackend`] when rendered. They never see frame buffers, shaders or
//! the GPU directly, so the same scene renders unchanged on either backend.
//!
//! # Object kinds
//!
//! - [`MaterialMesh`]: one mesh with tint, optional texture, environment
//!   reflection and auto-rotation
//! - [`Model`]: a group of material meshes imported from an OBJ file,
//!   placed by one shared transform
//!
//! # Ownership
//!
//! [`ObjectManager`] owns every top-level object and hands out
//! [`ObjectHandle`]s that go stale when the object is removed.

mod backend;
mod manager;
mod material_mesh;
mod mesh;
mod model;
mod transform;

#[cfg(test)]
mod tests;

pub use backend::{BackendKind, RenderBackend};
pub use manager::{ObjectHandle, ObjectManager};
pub use material_mesh::MaterialMesh;
pub use mesh::{cube_indices, cube_vertices, Mesh};
pub use model::Model;
pub use transform::Transform;

use crate::core::math::Mat4;
use crate::core::raster::FrameContext;
use crate::core::texture::{Cubemap, TextureStore};

/// Read-only state handed to [`SceneObject::render`]
#[derive(Debug, Clone, Copy)]
pub struct SceneContext<'a> {
    pub frame: &'a FrameContext,
    pub textures: &'a TextureStore,
    /// Environment for reflective meshes
    pub environment: Option<&'a Cubemap>,
    /// World matrix of the enclosing object, identity at the top level
    pub parent_world: Mat4,
}

impl<'a> SceneContext<'a> {
    pub fn new(frame: &'a FrameContext, textures: &'a TextureStore) -> Self {
        Self {
            frame,
            textures,
            environment: None,
            parent_world: Mat4::identity(),
        }
    }

    pub fn with_environment(mut self, environment: Option<&'a Cubemap>) -> Self {
        self.environment = environment;
        self
    }

    /// Context for the children of an object placed at `world`
    pub fn with_parent(&self, world: Mat4) -> Self {
        Self {
            parent_world: world,
            ..*self
        }
    }
}

/// Anything the scene can update and draw
pub trait SceneObject {
    fn name(&self) -> &str;

    fn transform(&self) -> &Transform;

    fn transform_mut(&mut self) -> &mut Transform;

    /// Advance animation by `dt` seconds
    fn update(&mut self, dt: f32);

    /// Submit every triangle of the object
    ///
    /// Hidden objects submit nothing.
    fn render(&mut self, ctx: &SceneContext<'_>, backend: &mut dyn RenderBackend);

    fn triangle_count(&self) -> usize;
}
