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

//! Errors raised at the renderer boundary.

use std::fmt;

/// An error related to the creation or use of a renderer-side resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// A backend-imposed limit on live resources was reached.
    LimitExceeded {
        /// The kind of resource, e.g. `"material"`.
        resource: &'static str,
        /// The configured limit.
        limit: usize,
    },
    /// An error originating from the specific backend implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::LimitExceeded { resource, limit } => {
                write!(f, "Cannot create another {resource}: limit of {limit} reached")
            }
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}
