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

//! Texture bookkeeping for the headless backend.

use prism_core::asset::{AssetHandle, Image};
use prism_core::math::Extent2D;
use prism_core::renderer::{ImageFormat, ResourceError, TextureId};

/// What the backend knows about a registered texture.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRecord {
    /// The label the image was registered with.
    pub label: String,
    /// Dimensions in pixels.
    pub extent: Extent2D,
    /// Texel format.
    pub format: ImageFormat,
}

/// Allocates [`TextureId`]s for registered images.
#[derive(Debug)]
pub struct TextureRegistry {
    records: Vec<TextureRecord>,
    limit: usize,
    bytes: u64,
}

impl TextureRegistry {
    /// Creates an empty registry holding at most `limit` textures.
    pub fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit,
            bytes: 0,
        }
    }

    /// Registers an image and returns a shareable handle to it.
    /// ## Errors
    /// * `ResourceError::BackendError` - If `extent` has a zero side.
    /// * `ResourceError::LimitExceeded` - If the registry is full.
    pub fn register(
        &mut self,
        label: &str,
        extent: Extent2D,
        format: ImageFormat,
    ) -> Result<AssetHandle<Image>, ResourceError> {
        if extent.is_empty() {
            return Err(ResourceError::BackendError(format!(
                "Texture '{label}' has zero size ({}x{})",
                extent.width, extent.height
            )));
        }
        if self.records.len() >= self.limit {
            log::warn!("Texture limit of {} reached, '{label}' rejected.", self.limit);
            return Err(ResourceError::LimitExceeded {
                resource: "texture",
                limit: self.limit,
            });
        }

        let id = TextureId(self.records.len());
        self.records.push(TextureRecord {
            label: label.to_string(),
            extent,
            format,
        });
        let image = AssetHandle::new(Image::new(label, extent, format, id));
        let size = image.platform_image().byte_size();
        self.bytes += size;
        log::debug!(
            "Registered texture {id:?} '{label}' ({}x{}, {size} bytes).",
            extent.width,
            extent.height
        );

        Ok(image)
    }

    /// Looks up a registered texture.
    pub fn get(&self, id: TextureId) -> Option<&TextureRecord> {
        self.records.get(id.0)
    }

    /// Bytes a tightly packed copy of every registered texture would occupy.
    pub fn memory_bytes(&self) -> u64 {
        self.bytes
    }

    /// Number of registered textures.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing was registered yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
