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

//! Defines the asset type handed to a [`VisualFactory`](crate::view::VisualFactory).

use super::Asset;

/// A loaded view prefab, ready to be instantiated.
///
/// The layer never looks inside `data`; it only forwards the prefab to the
/// factory that knows how to turn it into a visual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefab {
    /// The bundle the prefab was fetched from.
    pub bundle: String,
    /// The asset path inside the bundle, e.g. `ui/Confirm`.
    pub path: String,
    /// The raw prefab payload.
    pub data: Vec<u8>,
}

impl Prefab {
    /// Creates a prefab from its origin and payload.
    pub fn new(bundle: impl Into<String>, path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            bundle: bundle.into(),
            path: path.into(),
            data,
        }
    }
}

impl Asset for Prefab {}
