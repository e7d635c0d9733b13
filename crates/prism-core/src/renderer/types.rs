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

//! Platform representations handed to renderer peers.

use crate::math::Extent2D;
use serde::{Deserialize, Serialize};

/// An opaque handle to a texture allocated by a renderer backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub usize);

/// Texel formats an image may be registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    /// 8-bit RGBA, sRGB encoded. The usual format for color maps.
    #[default]
    Rgba8UnormSrgb,
    /// 8-bit RGBA, linear. Used for data maps such as bump or specular maps.
    Rgba8Unorm,
    /// 8-bit single channel, linear.
    R8Unorm,
}

impl ImageFormat {
    /// Size of one texel in bytes.
    pub const fn bytes_per_texel(&self) -> u32 {
        match self {
            ImageFormat::Rgba8UnormSrgb | ImageFormat::Rgba8Unorm => 4,
            ImageFormat::R8Unorm => 1,
        }
    }
}

/// A color as consumed by a renderer: **linear** RGB premultiplied by alpha.
///
/// `#[repr(C)]` keeps the layout stable so peers can copy it straight into
/// uniform buffers.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct PlatformPaint {
    /// Premultiplied linear red.
    pub r: f32,
    /// Premultiplied linear green.
    pub g: f32,
    /// Premultiplied linear blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl PlatformPaint {
    /// Returns the components as an array, in RGBA order.
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// An image as consumed by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformImage {
    /// The backing texture.
    pub texture: TextureId,
    /// The texture dimensions in pixels.
    pub extent: Extent2D,
    /// The texel format.
    pub format: ImageFormat,
}

impl PlatformImage {
    /// Number of bytes a tightly packed copy of the image occupies.
    pub fn byte_size(&self) -> u64 {
        self.extent.width as u64 * self.extent.height as u64 * self.format.bytes_per_texel() as u64
    }
}
