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

//! A renderer backend without a GPU.
//!
//! The headless backend keeps material state exactly as a GPU backend would
//! lay it out (a `Pod` uniform block plus texture bindings) but never submits
//! it anywhere. It is used by tools, tests and the sandbox.

mod backend;
mod material;
mod textures;
mod uniforms;

pub use backend::*;
pub use material::*;
pub use textures::*;
pub use uniforms::*;
