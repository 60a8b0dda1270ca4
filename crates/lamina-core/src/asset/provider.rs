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

//! The asynchronous fetch contract between a layer and an asset provider.

use super::{AssetHandle, LoadError, Prefab};
use crate::view::ViewId;

/// Identifies one in-flight request issued by a layer.
///
/// The generation changes every time a record issues a new request, which lets
/// the layer tell a fresh completion from one that belongs to a claim that was
/// removed or re-issued in the meantime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    /// The view the request was issued for.
    pub view: ViewId,
    /// The request generation for that view.
    pub generation: u64,
}

/// What a layer asks a provider for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadRequest {
    /// The bundle to load from.
    pub bundle: String,
    /// The prefab path inside the bundle.
    pub path: String,
}

/// The result of a request, as delivered back to the layer.
#[derive(Debug)]
pub struct LoadCompletion {
    /// The ticket the request was issued with.
    pub ticket: LoadTicket,
    /// The loaded prefab, or why it could not be loaded.
    pub result: Result<AssetHandle<Prefab>, LoadError>,
}

/// The single-shot continuation of a [`LoadRequest`].
///
/// A provider resolves it exactly once, from any thread. The completion is queued
/// on the requesting layer's channel and only acted upon when that layer pumps its
/// completions, so no layer state is ever touched from the provider's side.
///
/// Dropping an unresolved reply delivers [`LoadError::Abandoned`].
#[derive(Debug)]
pub struct LoadReply {
    ticket: LoadTicket,
    path: String,
    sender: Option<flume::Sender<LoadCompletion>>,
}

impl LoadReply {
    /// Creates a reply that will deliver its completion on `sender`.
    pub fn new(
        ticket: LoadTicket,
        path: impl Into<String>,
        sender: flume::Sender<LoadCompletion>,
    ) -> Self {
        Self {
            ticket,
            path: path.into(),
            sender: Some(sender),
        }
    }

    /// Returns the ticket this reply answers.
    pub fn ticket(&self) -> &LoadTicket {
        &self.ticket
    }

    /// Delivers the outcome of the request, consuming the reply.
    pub fn resolve(mut self, result: Result<AssetHandle<Prefab>, LoadError>) {
        self.deliver(result);
    }

    fn deliver(&mut self, result: Result<AssetHandle<Prefab>, LoadError>) {
        let Some(sender) = self.sender.take() else {
            return;
        };
        let completion = LoadCompletion {
            ticket: self.ticket.clone(),
            result,
        };
        if sender.send(completion).is_err() {
            log::trace!(
                "Layer for view '{}' is gone; dropping completion.",
                self.ticket.view
            );
        }
    }
}

impl Drop for LoadReply {
    fn drop(&mut self) {
        if self.sender.is_some() {
            log::warn!("Load reply for '{}' dropped without resolving.", self.path);
            let path = self.path.clone();
            self.deliver(Err(LoadError::Abandoned { path }));
        }
    }
}

/// A source of view prefabs.
///
/// Implementations decide how bundles are resolved, whether raw assets are cached,
/// and on which thread the work happens. The only obligation is to consume the
/// reply, once, when the outcome is known.
pub trait AssetProvider: Send + Sync {
    /// Starts fetching `request`. The outcome goes through `reply`.
    fn request(&self, request: LoadRequest, reply: LoadReply);
}
