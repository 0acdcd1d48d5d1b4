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

//! Backend seam between the scene graph and the rasterizers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::RenderError;
use crate::core::math::Mat4;
use crate::core::raster::Vertex;
use crate::core::texture::TextureHandle;

/// Which rasterizer fills the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Scalar fill on the calling thread
    #[default]
    Cpu,
    /// Compute-shader fill through wgpu
    Gpu,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cpu => write!(f, "cpu"),
            BackendKind::Gpu => write!(f, "gpu"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(BackendKind::Cpu),
            "gpu" => Ok(BackendKind::Gpu),
            other => Err(RenderError::Config(format!(
                "unknown backend '{}', expected 'cpu' or 'gpu'",
                other
            ))),
        }
    }
}

/// Sink for model-space primitives
///
/// Implementations run the shared geometry stage and then fill, either
/// immediately or after batching.
pub trait RenderBackend {
    fn kind(&self) -> BackendKind;

    /// Submit one model-space triangle
    ///
    /// Without a texture the triangle is filled with the colour of
    /// `vertices[0]`.
    fn submit_triangle(
        &mut self,
        world: &Mat4,
        vertices: [Vertex; 3],
        texture: Option<TextureHandle>,
    );

    /// Submit one model-space line
    fn submit_line(&mut self, world: &Mat4, start: Vertex, end: Vertex, color: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parse_and_display() {
        assert_eq!("GPU".parse::<BackendKind>().ok(), Some(BackendKind::Gpu));
        assert_eq!("cpu".parse::<BackendKind>().ok(), Some(BackendKind::Cpu));
        assert!("vulkan".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::Gpu.to_string(), "gpu");
    }
}
