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

use super::{ViewId, ViewParams};
use std::fmt;

type AddedHook = Box<dyn FnMut(&ViewId, &ViewParams)>;
type RemovedHook = Box<dyn FnMut(&ViewId, bool)>;

/// Optional lifecycle hooks supplied by the caller of `add`.
///
/// The layer stores them on the view's record; the view's binding fires them when
/// the visual is inserted under the layer or removed from it.
#[derive(Default)]
pub struct ViewCallbacks {
    on_added: Option<AddedHook>,
    on_removed: Option<RemovedHook>,
}

impl ViewCallbacks {
    /// Creates an empty set of hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hook fired once the visual is attached under the layer.
    pub fn on_added(mut self, hook: impl FnMut(&ViewId, &ViewParams) + 'static) -> Self {
        self.on_added = Some(Box::new(hook));
        self
    }

    /// Sets the hook fired when the visual leaves the layer.
    ///
    /// The flag tells whether the visual is destroyed (`true`) or kept in the cache.
    pub fn on_removed(mut self, hook: impl FnMut(&ViewId, bool) + 'static) -> Self {
        self.on_removed = Some(Box::new(hook));
        self
    }

    /// Fires the `on_added` hook, if any.
    pub fn notify_added(&mut self, id: &ViewId, params: &ViewParams) {
        if let Some(hook) = self.on_added.as_mut() {
            hook(id, params);
        }
    }

    /// Fires the `on_removed` hook, if any.
    pub fn notify_removed(&mut self, id: &ViewId, destroy: bool) {
        if let Some(hook) = self.on_removed.as_mut() {
            hook(id, destroy);
        }
    }
}

impl fmt::Debug for ViewCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewCallbacks")
            .field("on_added", &self.on_added.is_some())
            .field("on_removed", &self.on_removed.is_some())
            .finish()
    }
}
