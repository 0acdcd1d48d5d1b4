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

//! Error types for the renderer
//!
//! Every fallible operation in the crate returns [`Result<T>`], an alias for
//! `std::result::Result<T, RenderError>`. None of these errors abort a frame:
//! asset failures fall back to tint colours, and a failed GPU initialisation
//! leaves the renderer on the CPU path.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RenderError>;

/// Renderer error
#[derive(Error, Debug)]
pub enum RenderError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Texture file could not be opened or decoded
    #[error("Failed to load texture '{path}': {reason}")]
    TextureLoad { path: String, reason: String },

    /// Model file could not be imported
    #[error("Failed to load model '{path}': {reason}")]
    ModelLoad { path: String, reason: String },

    /// Pixel buffer does not match the declared dimensions
    #[error("Invalid texture data: {width}x{height} needs {expected} pixels, got {len}")]
    InvalidTexture {
        width: u32,
        height: u32,
        expected: usize,
        len: usize,
    },

    /// Compute backend could not be created
    #[error("GPU initialisation failed: {0}")]
    GpuInit(String),

    /// Results of a compute dispatch could not be read back
    #[error("GPU readback failed: {0}")]
    GpuReadback(String),

    /// Configuration file could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// Presentation surface failure
    #[error("Surface error: {0}")]
    Surface(String),

    /// Screenshot encoding failure
    #[error("Failed to save image '{path}': {reason}")]
    ImageSave { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_texture_message_reports_expected_size() {
        let err = RenderError::InvalidTexture {
            width: 4,
            height: 2,
            expected: 8,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid texture data: 4x2 needs 8 pixels, got 3"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.obj")?)
        }
        assert!(matches!(open_missing(), Err(RenderError::Io(_))));
    }
}
