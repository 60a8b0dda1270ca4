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

//! Provides the foundational traits and primitive types for loading view prefabs.
//!
//! This module defines the "common language" between a layer and whatever fetches
//! its content. It contains the contracts that providers implement, but it has no
//! knowledge of bundles, files, or caching of raw assets.
//!
//! The key components are:
//! - The [`Asset`] trait: a marker for all types that can travel through a handle.
//! - [`Prefab`]: the loaded, not yet instantiated description of a view.
//! - [`AssetProvider`] and [`LoadReply`]: a single-shot asynchronous fetch whose
//!   completion is delivered back to the requesting layer.

mod error;
mod handle;
mod prefab;
mod provider;

pub use error::*;
pub use handle::*;
pub use prefab::*;
pub use provider::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits allow providers to decode assets on a background thread and
/// send the resulting handle back to the layer that asked for it.
///
/// # Examples
///
/// ```
/// use lamina_core::asset::Asset;
///
/// struct Atlas {
///     // ... fields
/// }
///
/// impl Asset for Atlas {}
/// ```
pub trait Asset: Send + Sync + 'static {}
