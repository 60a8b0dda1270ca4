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

//! # Lamina UI
//!
//! A UI [`Layer`]: a container that asynchronously loads prefabricated views,
//! tracks their lifecycle, and keeps removed views in a cache for fast reuse.
//!
//! ```no_run
//! use lamina_core::{ViewConfig, Visual};
//! use lamina_io::DirectoryAssetProvider;
//! use lamina_ui::{Layer, LayerSettings};
//! use std::sync::Arc;
//! # fn make_visual(_: &lamina_core::AssetHandle<lamina_core::Prefab>) -> anyhow::Result<Box<dyn Visual>> { unimplemented!() }
//!
//! # fn main() -> anyhow::Result<()> {
//! let provider = Arc::new(DirectoryAssetProvider::new("assets")?);
//! let mut layer = Layer::new(LayerSettings::new("Dialog"), provider, make_visual);
//!
//! let id = layer.add(&ViewConfig::new("ui/Confirm"), None, None);
//! assert_eq!(id.map(|id| id.to_string()).as_deref(), Some("Dialog_ui_Confirm"));
//!
//! // Later, on the same thread: attach whatever finished loading.
//! layer.update();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod layer;
pub mod settings;
pub mod stats;

pub use layer::{Layer, NodeId, ViewBinding, ViewRecord, ViewState};
pub use regex::Regex;
pub use settings::{LayerSettings, SettingsError, DEFAULT_BUNDLE};
pub use stats::LayerStats;
