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

use serde::{Deserialize, Serialize};

/// The arbitrary key-value payload a caller attaches to a view.
///
/// The layer stores it on the record and hands it to the callbacks; it never
/// interprets it.
pub type ViewParams = serde_json::Map<String, serde_json::Value>;

/// Describes which prefab a view is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// The prefab's asset path, e.g. `ui/Confirm`.
    pub prefab: String,
    /// The bundle to load from. The layer's default bundle is used when absent.
    #[serde(default)]
    pub bundle: Option<String>,
}

impl ViewConfig {
    /// Creates a config for `prefab`, loaded from the layer's default bundle.
    pub fn new(prefab: impl Into<String>) -> Self {
        Self {
            prefab: prefab.into(),
            bundle: None,
        }
    }

    /// Loads the prefab from `bundle` instead of the layer's default.
    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = Some(bundle.into());
        self
    }
}

impl From<&str> for ViewConfig {
    fn from(prefab: &str) -> Self {
        Self::new(prefab)
    }
}
