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

//! # Lamina IO
//!
//! Concrete [`AssetProvider`](lamina_core::AssetProvider) implementations.
//!
//! - [`DirectoryAssetProvider`] reads prefab files from a directory tree on a
//!   background worker.
//! - [`DeferredAssetProvider`] keeps every request queued until it is explicitly
//!   resolved, which makes the asynchronous window of a layer easy to drive.

#![warn(missing_docs)]

mod deferred;
mod directory;
mod error;

pub use deferred::DeferredAssetProvider;
pub use directory::{DirectoryAssetProvider, DEFAULT_PREFAB_EXTENSION};
pub use error::ProviderError;
