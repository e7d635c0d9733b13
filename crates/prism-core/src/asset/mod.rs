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

//! Foundational asset traits and the shared handle used to reference assets.
//!
//! Materials never own the images they reference. They hold an
//! [`AssetHandle`], the same handle held by whatever loaded the image, and ask
//! the image for its platform representation only when a material is
//! synchronized.

mod handle;
mod image;

pub use handle::*;
pub use image::*;

use std::any::Any;

/// A marker trait for types that can be managed by the asset system.
///
/// - `Send` + `Sync`: the asset can be shared with loader threads.
/// - `'static`: the asset holds no borrowed data.
pub trait Asset: Send + Sync + 'static {}

/// Helper trait to allow downcasting trait objects to their concrete types.
pub trait AsAny {
    /// Returns a reference to the inner value as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
