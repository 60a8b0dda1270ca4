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
use std::fmt;

/// The deterministic identifier of a view inside a layer.
///
/// It is derived from the layer name and the prefab path, so adding the same
/// path twice to the same layer always yields the same identifier. That is what
/// makes duplicate claims detectable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(String);

impl ViewId {
    /// The character joining the layer name and the path.
    pub const SEPARATOR: char = '_';

    /// Derives the identifier for `path` inside the layer called `layer`.
    ///
    /// Path separators are rewritten to the join character, so
    /// `derive("Dialog", "ui/Confirm")` gives `Dialog_ui_Confirm`.
    ///
    /// ```
    /// use lamina_core::view::ViewId;
    ///
    /// assert_eq!(ViewId::derive("Dialog", "ui/Confirm").as_str(), "Dialog_ui_Confirm");
    /// ```
    pub fn derive(layer: &str, path: &str) -> Self {
        let mut id = String::with_capacity(layer.len() + path.len() + 1);
        id.push_str(layer);
        id.push(Self::SEPARATOR);
        id.extend(path.chars().map(|c| match c {
            '/' | '\\' => Self::SEPARATOR,
            other => other,
        }));
        Self(id)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ViewId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ViewId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ViewId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
