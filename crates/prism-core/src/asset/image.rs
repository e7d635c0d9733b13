// Copyright 2025 eraflo
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

//! Defines the CPU-side image reference used by material maps.

use super::Asset;
use crate::math::Extent2D;
use crate::renderer::{ImageFormat, PlatformImage, TextureId};

/// An image that has already been registered with a renderer.
///
/// Decoding pixels is not the concern of this type: whoever loads the image
/// registers it with a backend and receives the [`TextureId`] stored here.
/// Materials reference images through [`AssetHandle<Image>`](super::AssetHandle)
/// and only call [`Image::platform_image`] while synchronizing.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    label: String,
    extent: Extent2D,
    format: ImageFormat,
    texture: TextureId,
}

impl Image {
    /// Creates an image reference for an already allocated texture.
    pub fn new(
        label: impl Into<String>,
        extent: Extent2D,
        format: ImageFormat,
        texture: TextureId,
    ) -> Self {
        Self {
            label: label.into(),
            extent,
            format,
            texture,
        }
    }

    /// A human-readable name, usually the source path.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The image dimensions in pixels.
    pub fn extent(&self) -> Extent2D {
        self.extent
    }

    /// The texel format of the backing texture.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Returns the renderer-side representation of this image.
    pub fn platform_image(&self) -> PlatformImage {
        PlatformImage {
            texture: self.texture,
            extent: self.extent,
            format: self.format,
        }
    }
}

impl Asset for Image {}
