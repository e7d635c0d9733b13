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

//! GPU-ready layout of Phong material state.

use prism_core::renderer::PlatformPaint;

/// Bits of [`PhongUniforms::feature_mask`].
pub mod feature {
    /// A diffuse color is set.
    pub const DIFFUSE_COLOR: u32 = 1 << 0;
    /// A specular color is set.
    pub const SPECULAR_COLOR: u32 = 1 << 1;
    /// A diffuse map is bound.
    pub const DIFFUSE_MAP: u32 = 1 << 2;
    /// A specular map is bound.
    pub const SPECULAR_MAP: u32 = 1 << 3;
    /// A bump map is bound.
    pub const BUMP_MAP: u32 = 1 << 4;
    /// A self-illumination map is bound.
    pub const SELF_ILLUMINATION_MAP: u32 = 1 << 5;
}

/// Material data for the Phong shader, laid out for a uniform buffer.
///
/// Absent colors are stored as transparent black with their feature bit
/// cleared, so a shader can tell "black" from "not set".
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PhongUniforms {
    /// Premultiplied linear diffuse color.
    pub diffuse: [f32; 4],
    /// Premultiplied linear specular color.
    pub specular: [f32; 4],
    /// The specular exponent.
    pub specular_power: f32,
    /// Which optional inputs are present, see [`feature`].
    pub feature_mask: u32,
    /// Pads the block to a multiple of 16 bytes.
    pub _padding: [u32; 2],
}

impl Default for PhongUniforms {
    fn default() -> Self {
        Self {
            diffuse: [0.0; 4],
            specular: [0.0; 4],
            specular_power: 1.0,
            feature_mask: 0,
            _padding: [0; 2],
        }
    }
}

impl PhongUniforms {
    /// Returns `true` if every bit of `bits` is set in the feature mask.
    pub fn has(&self, bits: u32) -> bool {
        self.feature_mask & bits == bits
    }

    pub(crate) fn set_feature(&mut self, bit: u32, present: bool) {
        if present {
            self.feature_mask |= bit;
        } else {
            self.feature_mask &= !bit;
        }
    }

    pub(crate) fn write_color(slot: &mut [f32; 4], paint: Option<PlatformPaint>) -> bool {
        match paint {
            Some(paint) => {
                *slot = paint.to_array();
                true
            }
            None => {
                *slot = [0.0; 4];
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_uniform_aligned() {
        assert_eq!(std::mem::size_of::<PhongUniforms>(), 48);
        assert_eq!(std::mem::size_of::<PhongUniforms>() % 16, 0);
    }

    #[test]
    fn feature_bits_toggle() {
        let mut uniforms = PhongUniforms::default();
        uniforms.set_feature(feature::BUMP_MAP, true);
        uniforms.set_feature(feature::DIFFUSE_COLOR, true);
        assert!(uniforms.has(feature::BUMP_MAP | feature::DIFFUSE_COLOR));

        uniforms.set_feature(feature::BUMP_MAP, false);
        assert!(!uniforms.has(feature::BUMP_MAP));
        assert!(uniforms.has(feature::DIFFUSE_COLOR));
    }

    #[test]
    fn absent_color_writes_zeros() {
        let mut slot = [1.0; 4];
        assert!(!PhongUniforms::write_color(&mut slot, None));
        assert_eq!(slot, [0.0; 4]);
    }
}
