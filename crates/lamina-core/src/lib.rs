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

//! # Lamina Core
//!
//! Foundational crate containing the traits, core types, and interface contracts
//! shared between the UI layer and the systems that feed it.
//!
//! It knows nothing about how assets are fetched or how views are drawn: the
//! [`asset`] module describes what a loaded prefab looks like and how a provider
//! hands it back, the [`view`] module describes what the layer manages.

#![warn(missing_docs)]

pub mod asset;
pub mod view;

pub use asset::{
    Asset, AssetHandle, AssetProvider, LoadCompletion, LoadError, LoadReply, LoadRequest,
    LoadTicket, Prefab,
};
pub use view::{ViewCallbacks, ViewConfig, ViewId, ViewParams, Visual, VisualFactory};
