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

//! The renderer boundary.
//!
//! This module defines what a renderer backend must provide to receive
//! material state: a factory ([`MaterialBackend`]) that creates renderer-side
//! peers, and the peer interface ([`MaterialPeer`]) that accepts already
//! converted values. How a backend stores or uploads that state is its own
//! business.

pub mod error;
pub mod traits;
pub mod types;

pub use self::error::ResourceError;
pub use self::traits::{MaterialBackend, MaterialPeer};
pub use self::types::{ImageFormat, PlatformImage, PlatformPaint, TextureId};
