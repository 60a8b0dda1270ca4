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

//! Per-layer configuration.

use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// The bundle prefabs are loaded from when a view does not name one.
pub const DEFAULT_BUNDLE: &str = "resources";

/// Errors raised while reading [`LayerSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read layer settings")]
    Io(#[from] std::io::Error),
    /// The settings text is not valid RON.
    #[error("invalid layer settings")]
    Parse(#[from] ron::error::SpannedError),
}

/// The configuration of one layer.
///
/// Settings are usually kept in a small RON file:
///
/// ```text
/// (
///     name: "Dialog",
///     default_bundle: "ui",
///     cache_capacity: Some(8),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerSettings {
    /// The layer's name. It prefixes every view identifier.
    pub name: String,
    /// The bundle used for views whose config names none.
    #[serde(default = "default_bundle")]
    pub default_bundle: String,
    /// How many removed views may wait in the cache. `None` keeps every one of them.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

fn default_bundle() -> String {
    DEFAULT_BUNDLE.to_owned()
}

impl LayerSettings {
    /// Settings for a layer called `name`, with every other field defaulted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_bundle: default_bundle(),
            cache_capacity: None,
        }
    }

    /// Sets the default bundle.
    pub fn with_default_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.default_bundle = bundle.into();
        self
    }

    /// Bounds the cache.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Parses settings from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads settings from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_settings() {
        let settings = LayerSettings::from_ron_str(
            r#"(name: "Dialog", default_bundle: "ui", cache_capacity: Some(4))"#,
        )
        .expect("Settings should parse");

        assert_eq!(
            settings,
            LayerSettings::new("Dialog")
                .with_default_bundle("ui")
                .with_cache_capacity(4)
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings =
            LayerSettings::from_ron_str(r#"(name: "Hud")"#).expect("Settings should parse");

        assert_eq!(settings.default_bundle, DEFAULT_BUNDLE);
        assert_eq!(settings.cache_capacity, None);
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let result = LayerSettings::from_ron_str("(name: 42");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = LayerSettings::load(dir.path().join("layer.ron"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
