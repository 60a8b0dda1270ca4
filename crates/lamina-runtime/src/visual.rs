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

//! The visual the runtime instantiates for every prefab.

use lamina_core::{AssetHandle, Prefab, Visual};
use std::any::Any;

/// Stands in for real view content: it only remembers what it was built from.
#[derive(Debug)]
pub struct PrefabVisual {
    pub bundle: String,
    pub path: String,
    pub bytes: usize,
}

impl PrefabVisual {
    pub fn instantiate(prefab: &AssetHandle<Prefab>) -> anyhow::Result<Box<dyn Visual>> {
        if prefab.data.is_empty() {
            anyhow::bail!("prefab '{}' is empty", prefab.path);
        }
        Ok(Box::new(Self {
            bundle: prefab.bundle.clone(),
            path: prefab.path.clone(),
            bytes: prefab.data.len(),
        }))
    }
}

impl Visual for PrefabVisual {
    fn on_insert(&mut self) {
        log::info!("+ {} ({} bytes from '{}')", self.path, self.bytes, self.bundle);
    }

    fn on_remove(&mut self, destroy: bool) {
        let how = if destroy { "destroyed" } else { "cached" };
        log::info!("- {} ({how})", self.path);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
