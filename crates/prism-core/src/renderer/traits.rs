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

//! Traits implemented by renderer backends.

use super::error::ResourceError;
use super::types::{PlatformImage, PlatformPaint};
use crate::asset::AsAny;
use std::fmt::Debug;

/// The factory side of a renderer backend.
///
/// A backend creates one peer per material descriptor. The descriptor owns the
/// returned peer exclusively and drops it together with itself.
pub trait MaterialBackend {
    /// Creates a new renderer-side material resource.
    /// ## Returns
    /// A boxed peer with no state pushed to it yet.
    /// ## Errors
    /// * `ResourceError` - If the backend cannot allocate another material.
    fn create_material_peer(&mut self) -> Result<Box<dyn MaterialPeer>, ResourceError>;
}

/// The renderer-side counterpart of a material descriptor.
///
/// Every setter receives a value that was already converted to its platform
/// representation. `None` is a real state meaning "no color" or "no texture",
/// and must replace whatever the peer held before; it is never a request to
/// leave the value unchanged.
///
/// Setters are infallible. A backend that can fail while applying state is
/// responsible for recording or reporting that failure itself.
pub trait MaterialPeer: AsAny + Debug + Send {
    /// Sets the diffuse color, or clears it with `None`.
    fn set_diffuse_color(&mut self, paint: Option<PlatformPaint>);

    /// Sets the specular color, or clears it with `None`.
    fn set_specular_color(&mut self, paint: Option<PlatformPaint>);

    /// Sets the specular exponent.
    fn set_specular_power(&mut self, power: f32);

    /// Binds the diffuse map, or unbinds it with `None`.
    fn set_diffuse_map(&mut self, image: Option<PlatformImage>);

    /// Binds the specular map, or unbinds it with `None`.
    fn set_specular_map(&mut self, image: Option<PlatformImage>);

    /// Binds the bump map, or unbinds it with `None`.
    fn set_bump_map(&mut self, image: Option<PlatformImage>);

    /// Binds the self-illumination map, or unbinds it with `None`.
    fn set_self_illumination_map(&mut self, image: Option<PlatformImage>);
}
