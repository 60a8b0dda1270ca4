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

use super::node::NodeId;
use lamina_core::{ViewCallbacks, ViewConfig, ViewId, ViewParams};
use serde::Serialize;

/// Where a view is in its lifecycle.
///
/// ```text
/// absent -> Pending -> Attached -> Cached -> Attached ...
///              |           \-> (destroyed)
///              \-> Failed -> Pending (re-added)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViewState {
    /// The path is claimed and its prefab is being loaded.
    Pending,
    /// The visual is parented under the layer.
    Attached,
    /// The visual is detached and held in the layer's cache.
    Cached,
    /// The load or the instantiation failed. The path is no longer claimed and a
    /// new `add` retries it.
    Failed,
}

impl ViewState {
    /// Whether the record blocks a new `add` of the same path.
    pub fn is_claimed(self) -> bool {
        matches!(self, ViewState::Pending | ViewState::Attached)
    }
}

/// The bookkeeping entry for one logical view of a layer.
#[derive(Debug)]
pub struct ViewRecord {
    pub(crate) id: ViewId,
    pub(crate) path: String,
    pub(crate) bundle: Option<String>,
    pub(crate) params: ViewParams,
    pub(crate) callbacks: ViewCallbacks,
    pub(crate) state: ViewState,
    pub(crate) node: Option<NodeId>,
    pub(crate) generation: u64,
}

impl ViewRecord {
    pub(crate) fn new(id: ViewId, config: &ViewConfig) -> Self {
        Self {
            id,
            path: config.prefab.clone(),
            bundle: config.bundle.clone(),
            params: ViewParams::new(),
            callbacks: ViewCallbacks::default(),
            state: ViewState::Pending,
            node: None,
            generation: 0,
        }
    }

    /// Overwrites what the caller supplied on the latest `add`.
    pub(crate) fn reclaim(
        &mut self,
        config: &ViewConfig,
        params: ViewParams,
        callbacks: ViewCallbacks,
    ) {
        self.bundle = config.bundle.clone();
        self.params = params;
        self.callbacks = callbacks;
        self.state = ViewState::Pending;
    }

    /// The record's identifier.
    pub fn id(&self) -> &ViewId {
        &self.id
    }

    /// The prefab path the record was added with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The bundle requested for this record, if it overrides the layer default.
    pub fn bundle(&self) -> Option<&str> {
        self.bundle.as_deref()
    }

    /// The caller's payload from the latest `add`.
    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    /// The record's lifecycle state.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// The record's visual, once instantiated.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}
