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

//! # Prism Core
//!
//! Backend-agnostic material descriptors and the contracts a renderer backend
//! implements to receive them.
//!
//! A [`PhongMaterial`](material::PhongMaterial) holds CPU-side material
//! parameters, remembers which of them changed, and mirrors only those changes
//! onto a renderer-side peer created through a
//! [`MaterialBackend`](renderer::MaterialBackend).

#![warn(missing_docs)]

pub mod asset;
pub mod material;
pub mod math;
pub mod renderer;

pub use material::{MaterialChange, MaterialProperty, PhongMaterial};
pub use renderer::{MaterialBackend, MaterialPeer};
