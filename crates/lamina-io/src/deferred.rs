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

//! A provider whose requests complete only when told to.

use lamina_core::{AssetHandle, AssetProvider, LoadError, LoadReply, LoadRequest, Prefab};
use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Queues every request until it is resolved explicitly.
///
/// Prefab data is registered up front with [`insert`](Self::insert) and loaded
/// once: every request for the same prefab receives a handle to the same asset.
/// Resolving a request for a path that was never registered completes it with
/// [`LoadError::NotFound`]. Requests can be completed in any order, which is how
/// out-of-order asynchronous completions are reproduced.
#[derive(Debug, Default)]
pub struct DeferredAssetProvider {
    prefabs: Mutex<HashMap<(String, String), AssetHandle<Prefab>>>,
    queue: Mutex<VecDeque<(LoadRequest, LoadReply)>>,
    history: Mutex<Vec<LoadRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DeferredAssetProvider {
    /// Creates a provider with no registered prefabs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the payload served for `path` in `bundle`.
    ///
    /// Replacing a payload does not affect handles already delivered.
    pub fn insert(&self, bundle: impl Into<String>, path: impl Into<String>, data: Vec<u8>) {
        let (bundle, path) = (bundle.into(), path.into());
        let prefab = AssetHandle::new(Prefab::new(bundle.clone(), path.clone(), data));
        lock(&self.prefabs).insert((bundle, path), prefab);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_prefab(self, bundle: &str, path: &str, data: Vec<u8>) -> Self {
        self.insert(bundle, path, data);
        self
    }

    /// Number of requests received so far, resolved or not.
    pub fn request_count(&self) -> usize {
        lock(&self.history).len()
    }

    /// Number of requests received so far for `path`.
    pub fn request_count_for(&self, path: &str) -> usize {
        lock(&self.history).iter().filter(|r| r.path == path).count()
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<LoadRequest> {
        lock(&self.history).clone()
    }

    /// Number of requests still waiting to be resolved.
    pub fn pending_count(&self) -> usize {
        lock(&self.queue).len()
    }

    /// Resolves the oldest queued request. Returns `false` if none was queued.
    pub fn resolve_next(&self) -> bool {
        let next = lock(&self.queue).pop_front();
        match next {
            Some((request, reply)) => {
                self.complete(request, reply);
                true
            }
            None => false,
        }
    }

    /// Resolves the newest queued request. Returns `false` if none was queued.
    pub fn resolve_last(&self) -> bool {
        let last = lock(&self.queue).pop_back();
        match last {
            Some((request, reply)) => {
                self.complete(request, reply);
                true
            }
            None => false,
        }
    }

    /// Resolves every queued request for `path`. Returns how many were resolved.
    pub fn resolve_path(&self, path: &str) -> usize {
        let taken = self.take_matching(path);
        let count = taken.len();
        for (request, reply) in taken {
            self.complete(request, reply);
        }
        count
    }

    /// Resolves every queued request in arrival order. Returns how many were resolved.
    pub fn resolve_all(&self) -> usize {
        let taken: Vec<_> = lock(&self.queue).drain(..).collect();
        let count = taken.len();
        for (request, reply) in taken {
            self.complete(request, reply);
        }
        count
    }

    /// Fails every queued request for `path` with `reason`.
    pub fn fail_path(&self, path: &str, reason: &str) -> usize {
        let taken = self.take_matching(path);
        let count = taken.len();
        for (request, reply) in taken {
            reply.resolve(Err(LoadError::Provider {
                path: request.path,
                reason: reason.to_owned(),
            }));
        }
        count
    }

    fn take_matching(&self, path: &str) -> Vec<(LoadRequest, LoadReply)> {
        let mut queue = lock(&self.queue);
        let (matching, rest): (Vec<_>, Vec<_>) =
            queue.drain(..).partition(|(request, _)| request.path == path);
        queue.extend(rest);
        matching
    }

    fn complete(&self, request: LoadRequest, reply: LoadReply) {
        let prefab = lock(&self.prefabs)
            .get(&(request.bundle.clone(), request.path.clone()))
            .cloned();
        let result = match prefab {
            Some(prefab) => Ok(prefab),
            None => Err(LoadError::NotFound {
                bundle: request.bundle,
                path: request.path,
            }),
        };
        reply.resolve(result);
    }
}

impl AssetProvider for DeferredAssetProvider {
    fn request(&self, request: LoadRequest, reply: LoadReply) {
        log::trace!("Deferring '{}' from bundle '{}'.", request.path, request.bundle);
        lock(&self.history).push(request.clone());
        lock(&self.queue).push_back((request, reply));
    }
}
