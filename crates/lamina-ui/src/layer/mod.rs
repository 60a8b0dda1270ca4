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

//! The layer: record bookkeeping, the asynchronous load flow, and removal.
//!
//! A layer owns two mappings. `active` holds every claimed record, whether its
//! prefab is still loading or its visual is attached. `cache` holds records removed
//! without destruction, one per path. A record lives in at most one of them; when
//! it is in neither, its visual has been destroyed.
//!
//! Loading is the only asynchronous step. A request carries a [`LoadTicket`] and
//! its completion is queued on the layer's channel until [`Layer::update`] drains
//! it. A completion is only honoured if the ticket still matches a pending record.

mod binding;
mod node;
mod query;
mod record;

pub use binding::ViewBinding;
pub use node::NodeId;
pub use record::{ViewRecord, ViewState};

use crate::settings::LayerSettings;
use crate::stats::LayerStats;
use lamina_core::{
    AssetProvider, LoadCompletion, LoadReply, LoadRequest, LoadTicket, ViewCallbacks, ViewConfig,
    ViewId, ViewParams, Visual, VisualFactory,
};
use node::{Node, NodeTree};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

/// A container managing the views of one z-order tier.
pub struct Layer {
    settings: LayerSettings,
    provider: Arc<dyn AssetProvider>,
    factory: Box<dyn VisualFactory>,
    completion_sender: flume::Sender<LoadCompletion>,
    completions: flume::Receiver<LoadCompletion>,
    active: HashMap<ViewId, ViewRecord>,
    cache: HashMap<String, ViewRecord>,
    /// Cached paths, oldest first.
    cache_order: VecDeque<String>,
    nodes: NodeTree,
    next_generation: u64,
    stats: LayerStats,
}

impl Layer {
    /// Creates an empty layer.
    ///
    /// `provider` fetches prefabs, `factory` turns them into visuals. Both are
    /// injected so a layer can run without a live asset system.
    pub fn new(
        settings: LayerSettings,
        provider: Arc<dyn AssetProvider>,
        factory: impl VisualFactory + 'static,
    ) -> Self {
        let (completion_sender, completions) = flume::unbounded();
        log::debug!("Layer '{}' created.", settings.name);
        Self {
            settings,
            provider,
            factory: Box::new(factory),
            completion_sender,
            completions,
            active: HashMap::new(),
            cache: HashMap::new(),
            cache_order: VecDeque::new(),
            nodes: NodeTree::default(),
            next_generation: 0,
            stats: LayerStats::default(),
        }
    }

    /// The layer's name.
    pub fn name(&self) -> &str {
        &self.settings.name
    }

    /// The layer's settings.
    pub fn settings(&self) -> &LayerSettings {
        &self.settings
    }

    /// Counters describing the layer's activity so far.
    pub fn stats(&self) -> LayerStats {
        self.stats
    }

    /// Claims `config.prefab` for this layer and starts loading it.
    ///
    /// Returns the view's identifier right away, before the load completes. If the
    /// path is already pending or attached, nothing happens and `None` is returned.
    /// A path sitting in the cache is re-attached immediately without a new request.
    pub fn add(
        &mut self,
        config: &ViewConfig,
        params: Option<ViewParams>,
        callbacks: Option<ViewCallbacks>,
    ) -> Option<ViewId> {
        let id = ViewId::derive(&self.settings.name, &config.prefab);

        if self.active.get(&id).is_some_and(|r| r.state.is_claimed()) {
            log::warn!(
                "Layer '{}': '{}' is already loaded or loading, ignoring duplicate add.",
                self.settings.name,
                config.prefab
            );
            self.stats.duplicates_rejected += 1;
            return None;
        }

        let mut record = match self.active.remove(&id) {
            Some(stale) => stale,
            None => self
                .take_cached(&config.prefab)
                .unwrap_or_else(|| ViewRecord::new(id.clone(), config)),
        };
        record.reclaim(
            config,
            params.unwrap_or_default(),
            callbacks.unwrap_or_default(),
        );
        log::debug!("Layer '{}': claimed '{}'.", self.settings.name, id);

        self.active.insert(id.clone(), record);
        self.load(&id);
        Some(id)
    }

    /// Attaches every completed load. Returns how many completions were handled.
    ///
    /// Must be called from the layer's own control flow, typically once per frame.
    pub fn update(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(completion) = self.completions.try_recv() {
            self.complete_load(completion);
            handled += 1;
        }
        handled
    }

    /// Removes every view added with `path`.
    ///
    /// With `destroy` the visuals are destroyed and any cache entry for the path is
    /// released. Without it, loaded visuals are detached and kept in the cache,
    /// except visuals that are no longer alive, which are destroyed.
    /// Claims still waiting for their prefab are dropped either way. Removing a
    /// path that is not present does nothing.
    pub fn remove(&mut self, path: &str, destroy: bool) {
        if destroy {
            self.remove_cache(path);
        }

        let mut targets: Vec<ViewId> = self
            .enumerate_bindings()
            .filter(|view| view.record.path == path)
            .map(|view| view.record.id.clone())
            .collect();
        let mut unattached: Vec<ViewId> = self
            .active
            .values()
            .filter(|r| r.path == path && !targets.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();
        unattached.sort();
        targets.extend(unattached);

        for id in &targets {
            self.remove_by_id(id, destroy);
        }
    }

    /// Removes the view with identifier `id`, with the same semantics as
    /// [`remove`](Self::remove). Unknown identifiers are ignored.
    pub fn remove_by_id(&mut self, id: &ViewId, destroy: bool) {
        let Some(mut record) = self.active.remove(id) else {
            log::trace!("Layer '{}': nothing to remove for '{}'.", self.settings.name, id);
            return;
        };

        let Some(node_id) = record.node else {
            // A late completion for this claim will find no record and be discarded.
            log::debug!(
                "Layer '{}': dropped {:?} claim on '{}'.",
                self.settings.name,
                record.state,
                record.path
            );
            return;
        };

        // Dead visuals are never cached.
        let destroy = destroy || !self.nodes.get(node_id).is_some_and(|n| n.visual.is_alive());
        self.nodes.detach(node_id);
        if destroy {
            self.remove_cache(&record.path);
            if let Some(mut node) = self.nodes.despawn(node_id) {
                notify_remove(&mut node, &mut record, true);
            }
            log::debug!("Layer '{}': destroyed '{}'.", self.settings.name, id);
        } else {
            if let Some(node) = self.nodes.get_mut(node_id) {
                notify_remove(node, &mut record, false);
            }
            record.state = ViewState::Cached;
            log::debug!("Layer '{}': cached '{}'.", self.settings.name, id);
            self.insert_cache(record);
        }
    }

    /// Destroys the cached visual for `path`, if there is one.
    ///
    /// Returns whether an entry was released. Cached visuals have already been
    /// detached, so only the visual's own `on_remove(true)` hook runs.
    pub fn remove_cache(&mut self, path: &str) -> bool {
        let Some(mut record) = self.cache.remove(path) else {
            return false;
        };
        self.cache_order.retain(|cached| cached != path);
        if let Some(mut node) = record.node.take().and_then(|id| self.nodes.despawn(id)) {
            node.visual.on_remove(true);
        }
        self.stats.cache_evictions += 1;
        log::debug!("Layer '{}': released cached '{}'.", self.settings.name, path);
        true
    }

    /// Removes every view.
    ///
    /// Without `destroy`, loaded visuals move to the cache and existing cache
    /// entries are kept. With `destroy`, everything, the cache included, is released.
    pub fn clear(&mut self, destroy: bool) {
        let mut ids: Vec<ViewId> = self
            .enumerate_bindings()
            .map(|view| view.record.id.clone())
            .collect();
        let mut rest: Vec<ViewId> = self
            .active
            .keys()
            .filter(|id| !ids.contains(id))
            .cloned()
            .collect();
        rest.sort();
        ids.extend(rest);

        for id in &ids {
            self.remove_by_id(id, destroy);
        }
        self.active.clear();

        if destroy {
            let paths: Vec<String> = self.cache_order.iter().cloned().collect();
            for path in &paths {
                self.remove_cache(path);
            }
        }
        log::debug!(
            "Layer '{}' cleared (destroy: {destroy}), {} cached.",
            self.settings.name,
            self.cache.len()
        );
    }

    /// Parents a visual that is not backed by a view record, e.g. a backdrop.
    ///
    /// Such children count toward [`size`](Self::size) but never show up in view
    /// queries.
    pub fn add_child(&mut self, visual: Box<dyn Visual>) -> NodeId {
        let id = self.nodes.spawn(Node::new(visual, None));
        if let Some(node) = self.nodes.get_mut(id) {
            node.visual.on_insert();
        }
        self.nodes.attach(id);
        id
    }

    /// Takes back a child added with [`add_child`](Self::add_child).
    ///
    /// Visuals that belong to a view must be removed through [`remove`](Self::remove);
    /// for them this returns `None` and changes nothing.
    pub fn remove_child(&mut self, node: NodeId) -> Option<Box<dyn Visual>> {
        if self.nodes.get(node)?.binding.is_some() {
            log::warn!(
                "Layer '{}': node {node:?} belongs to a view, use remove() instead.",
                self.settings.name
            );
            return None;
        }
        let mut removed = self.nodes.despawn(node)?;
        removed.visual.on_remove(false);
        Some(removed.visual)
    }

    fn take_cached(&mut self, path: &str) -> Option<ViewRecord> {
        let record = self.cache.remove(path)?;
        self.cache_order.retain(|cached| cached != path);
        Some(record)
    }

    fn insert_cache(&mut self, record: ViewRecord) {
        let path = record.path.clone();
        // Only one entry per path: the previous one is released first.
        self.remove_cache(&path);
        self.cache.insert(path.clone(), record);
        self.cache_order.push_back(path);

        if let Some(capacity) = self.settings.cache_capacity {
            while self.cache.len() > capacity {
                let Some(oldest) = self.cache_order.front().cloned() else {
                    break;
                };
                log::debug!(
                    "Layer '{}': cache over capacity ({capacity}), evicting '{}'.",
                    self.settings.name,
                    oldest
                );
                self.remove_cache(&oldest);
            }
        }
    }

    fn load(&mut self, id: &ViewId) {
        let Some(record) = self.active.get_mut(id) else {
            return;
        };

        if record.node.is_some() {
            self.stats.cache_hits += 1;
            log::debug!("Layer '{}': reusing cached '{}'.", self.settings.name, id);
            self.create_node(id);
            return;
        }

        self.next_generation += 1;
        record.generation = self.next_generation;
        let bundle = record
            .bundle
            .clone()
            .unwrap_or_else(|| self.settings.default_bundle.clone());
        let ticket = LoadTicket {
            view: id.clone(),
            generation: record.generation,
        };
        let reply = LoadReply::new(ticket, record.path.clone(), self.completion_sender.clone());
        let request = LoadRequest {
            bundle,
            path: record.path.clone(),
        };

        log::trace!(
            "Layer '{}': requesting '{}' from bundle '{}'.",
            self.settings.name,
            request.path,
            request.bundle
        );
        self.stats.loads_requested += 1;
        self.provider.request(request, reply);
    }

    fn complete_load(&mut self, completion: LoadCompletion) {
        let LoadCompletion { ticket, result } = completion;

        let Some(record) = self
            .active
            .get_mut(&ticket.view)
            .filter(|r| r.state == ViewState::Pending && r.generation == ticket.generation)
        else {
            log::debug!(
                "Layer '{}': discarding load for '{}', its claim is gone.",
                self.settings.name,
                ticket.view
            );
            self.stats.completions_discarded += 1;
            return;
        };

        let prefab = match result {
            Ok(prefab) => prefab,
            Err(e) => {
                log::error!(
                    "Layer '{}': failed to load '{}': {e}",
                    self.settings.name,
                    record.path
                );
                record.state = ViewState::Failed;
                self.stats.loads_failed += 1;
                return;
            }
        };

        let visual = match self.factory.instantiate(&prefab) {
            Ok(visual) => visual,
            Err(e) => {
                log::error!(
                    "Layer '{}': failed to instantiate '{}': {e:#}",
                    self.settings.name,
                    record.path
                );
                record.state = ViewState::Failed;
                self.stats.loads_failed += 1;
                return;
            }
        };

        let binding = ViewBinding::new(record.id.clone());
        record.node = Some(self.nodes.spawn(Node::new(visual, Some(binding))));
        self.stats.loads_completed += 1;

        let id = ticket.view;
        self.create_node(&id);
    }

    /// Marks the record attached, notifies its binding, and parents the visual.
    fn create_node(&mut self, id: &ViewId) -> Option<NodeId> {
        let record = self.active.get_mut(id)?;
        let node_id = record.node?;
        record.state = ViewState::Attached;

        if let Some(node) = self.nodes.get_mut(node_id) {
            if let Some(binding) = &node.binding {
                binding.on_insert(node.visual.as_mut(), record);
            }
        }
        self.nodes.attach(node_id);
        Some(node_id)
    }
}

fn notify_remove(node: &mut Node, record: &mut ViewRecord, destroy: bool) {
    match &node.binding {
        Some(binding) => binding.on_remove(node.visual.as_mut(), record, destroy),
        None => node.visual.on_remove(destroy),
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.settings.name)
            .field("active", &self.active.len())
            .field("cached", &self.cache.len())
            .field("children", &self.nodes.children().len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
