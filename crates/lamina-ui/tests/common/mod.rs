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

//! Shared fixtures for the layer integration tests.

#![allow(dead_code)]

use lamina_core::{AssetHandle, Prefab, Visual};
use lamina_io::DeferredAssetProvider;
use lamina_ui::{Layer, LayerSettings, DEFAULT_BUNDLE};
use std::{
    any::Any,
    cell::{Cell, RefCell},
    rc::Rc,
    sync::Arc,
};

pub type EventLog = Rc<RefCell<Vec<String>>>;

/// A visual that records every lifecycle notification it receives.
pub struct TestVisual {
    pub path: String,
    pub alive: Rc<Cell<bool>>,
    events: EventLog,
}

impl TestVisual {
    pub fn new(path: &str, events: EventLog) -> Self {
        events.borrow_mut().push(format!("create {path}"));
        Self {
            path: path.to_owned(),
            alive: Rc::new(Cell::new(true)),
            events,
        }
    }
}

impl Visual for TestVisual {
    fn on_insert(&mut self) {
        self.events.borrow_mut().push(format!("insert {}", self.path));
    }

    fn on_remove(&mut self, destroy: bool) {
        self.events
            .borrow_mut()
            .push(format!("remove {} {destroy}", self.path));
    }

    fn is_alive(&self) -> bool {
        self.alive.get()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A layer wired to a deferred provider and a recording factory.
pub struct Harness {
    pub provider: Arc<DeferredAssetProvider>,
    pub layer: Layer,
    pub events: EventLog,
}

impl Harness {
    pub fn new(name: &str) -> Self {
        Self::with_settings(LayerSettings::new(name))
    }

    pub fn with_settings(settings: LayerSettings) -> Self {
        let provider = Arc::new(DeferredAssetProvider::new());
        Self::with_provider(settings, provider)
    }

    pub fn with_provider(settings: LayerSettings, provider: Arc<DeferredAssetProvider>) -> Self {
        let events: EventLog = Rc::default();
        let factory_events = events.clone();
        let factory = move |prefab: &AssetHandle<Prefab>| -> anyhow::Result<Box<dyn Visual>> {
            if prefab.data == b"broken" {
                anyhow::bail!("prefab '{}' is corrupt", prefab.path);
            }
            Ok(Box::new(TestVisual::new(&prefab.path, factory_events.clone())))
        };
        let layer = Layer::new(settings, provider.clone(), factory);
        Self {
            provider,
            layer,
            events,
        }
    }

    /// Registers a prefab in the default bundle.
    pub fn register(&self, path: &str) {
        self.provider.insert(DEFAULT_BUNDLE, path, path.as_bytes().to_vec());
    }

    /// Resolves every queued request and lets the layer attach the results.
    pub fn settle(&mut self) -> usize {
        self.provider.resolve_all();
        self.layer.update()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn count_events(&self, event: &str) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }
}
