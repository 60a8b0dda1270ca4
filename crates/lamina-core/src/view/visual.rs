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

use crate::asset::{AssetHandle, Prefab};
use std::any::Any;

/// Instantiated view content living under a layer.
///
/// The layer treats a visual as opaque. It only forwards lifecycle notifications
/// and checks liveness before reporting the visual from a query.
pub trait Visual: 'static {
    /// Called once the visual has been parented under the layer.
    fn on_insert(&mut self) {}

    /// Called when the visual leaves the layer.
    ///
    /// With `destroy == false` the visual is only detached and kept in the layer's
    /// cache; it may later be inserted again, or receive `on_remove(true)` when the
    /// cache entry is evicted.
    fn on_remove(&mut self, destroy: bool) {
        let _ = destroy;
    }

    /// Whether the underlying content is still usable. Dead visuals are skipped by
    /// every query.
    fn is_alive(&self) -> bool {
        true
    }

    /// Allows downcasting to the concrete visual type.
    fn as_any(&self) -> &dyn Any;

    /// Allows mutable downcasting to the concrete visual type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Turns a loaded prefab into a visual.
///
/// Any `FnMut(&AssetHandle<Prefab>) -> anyhow::Result<Box<dyn Visual>>` is a factory.
pub trait VisualFactory {
    /// Creates a new visual from `prefab`.
    fn instantiate(&mut self, prefab: &AssetHandle<Prefab>) -> anyhow::Result<Box<dyn Visual>>;
}

impl<F> VisualFactory for F
where
    F: FnMut(&AssetHandle<Prefab>) -> anyhow::Result<Box<dyn Visual>>,
{
    fn instantiate(&mut self, prefab: &AssetHandle<Prefab>) -> anyhow::Result<Box<dyn Visual>> {
        self(prefab)
    }
}
