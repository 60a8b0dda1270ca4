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

//! Read-only queries over a layer.
//!
//! Every view query is answered from the bound children of the layer, in child
//! order. A child counts only if its binding points at a record that is attached
//! to that very node and its visual is still alive; pending loads, cached views
//! and unbound children are never reported.

use super::{Layer, NodeId, ViewRecord, ViewState};
use lamina_core::{ViewId, ViewParams, Visual};
use regex::Regex;

/// A currently visible view: the node and the record bound to it.
pub(crate) struct BoundView<'a> {
    pub(crate) node: NodeId,
    pub(crate) record: &'a ViewRecord,
}

impl Layer {
    pub(crate) fn enumerate_bindings(&self) -> impl Iterator<Item = BoundView<'_>> + '_ {
        self.nodes.children().iter().filter_map(move |&node_id| {
            let node = self.nodes.get(node_id)?;
            let binding = node.binding.as_ref()?;
            let record = self.active.get(binding.record())?;
            let visible = record.state == ViewState::Attached
                && record.node == Some(node_id)
                && node.visual.is_alive();
            visible.then_some(BoundView {
                node: node_id,
                record,
            })
        })
    }

    /// The visual of the view with identifier `id`, if it is attached.
    ///
    /// A view that is still loading reports `None`, exactly like an absent one.
    pub fn get_by_id(&self, id: &ViewId) -> Option<NodeId> {
        self.enumerate_bindings()
            .find(|view| view.record.id == *id)
            .map(|view| view.node)
    }

    /// Every attached visual added with `path`, in child order.
    pub fn get(&self, path: &str) -> Vec<NodeId> {
        self.enumerate_bindings()
            .filter(|view| view.record.path == path)
            .map(|view| view.node)
            .collect()
    }

    /// Whether `path_or_id` names an attached view, by identifier or by path, or a
    /// view waiting in the cache.
    pub fn has(&self, path_or_id: &str) -> bool {
        let attached = self
            .enumerate_bindings()
            .any(|view| view.record.id == *path_or_id || view.record.path == path_or_id);
        attached
            || self.cache.contains_key(path_or_id)
            || self.cache.values().any(|r| r.id == *path_or_id)
    }

    /// Every attached visual whose path matches `pattern`, in child order.
    pub fn find(&self, pattern: &Regex) -> Vec<NodeId> {
        self.enumerate_bindings()
            .filter(|view| pattern.is_match(&view.record.path))
            .map(|view| view.node)
            .collect()
    }

    /// Number of children parented under the layer, bound to a view or not.
    pub fn size(&self) -> usize {
        self.nodes.children().len()
    }

    /// The attached views, in child order.
    pub fn attached(&self) -> impl Iterator<Item = (NodeId, &ViewRecord)> + '_ {
        self.enumerate_bindings().map(|view| (view.node, view.record))
    }

    /// The record claimed under `id`, pending, attached or failed.
    pub fn record(&self, id: &ViewId) -> Option<&ViewRecord> {
        self.active.get(id)
    }

    /// Every claimed record, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &ViewRecord> + '_ {
        self.active.values()
    }

    /// The cache entry for `path`.
    pub fn cached(&self, path: &str) -> Option<&ViewRecord> {
        self.cache.get(path)
    }

    /// Cached paths, oldest first.
    pub fn cached_paths(&self) -> Vec<&str> {
        self.cache_order.iter().map(String::as_str).collect()
    }

    /// Where the view `id` is in its lifecycle, or `None` if the layer does not know it.
    pub fn state(&self, id: &ViewId) -> Option<ViewState> {
        self.active
            .get(id)
            .or_else(|| self.cache.values().find(|r| r.id == *id))
            .map(ViewRecord::state)
    }

    /// The payload supplied with the latest `add` of `id`.
    pub fn params(&self, id: &ViewId) -> Option<&ViewParams> {
        self.active
            .get(id)
            .or_else(|| self.cache.values().find(|r| r.id == *id))
            .map(ViewRecord::params)
    }

    /// Number of claims still waiting for their prefab.
    pub fn pending_count(&self) -> usize {
        self.active
            .values()
            .filter(|r| r.state == ViewState::Pending)
            .count()
    }

    /// Whether no load is in flight.
    pub fn is_settled(&self) -> bool {
        self.pending_count() == 0
    }

    /// Number of visuals owned by the layer, attached or cached.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The visual behind `node`.
    pub fn visual(&self, node: NodeId) -> Option<&dyn Visual> {
        self.nodes.get(node).map(|n| n.visual.as_ref())
    }

    /// Mutable access to the visual behind `node`.
    pub fn visual_mut(&mut self, node: NodeId) -> Option<&mut dyn Visual> {
        self.nodes.get_mut(node).map(|n| n.visual.as_mut())
    }

    /// The visual behind `node`, downcast to its concrete type.
    pub fn downcast<T: Visual>(&self, node: NodeId) -> Option<&T> {
        self.visual(node)?.as_any().downcast_ref::<T>()
    }

    /// Mutable access to the visual behind `node`, downcast to its concrete type.
    pub fn downcast_mut<T: Visual>(&mut self, node: NodeId) -> Option<&mut T> {
        self.visual_mut(node)?.as_any_mut().downcast_mut::<T>()
    }
}
