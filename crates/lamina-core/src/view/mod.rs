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

//! Contracts for the views a layer manages.
//!
//! A view starts as a [`ViewConfig`] naming a prefab, becomes a record keyed by a
//! [`ViewId`], and ends up as a [`Visual`] produced by a [`VisualFactory`].

mod callbacks;
mod config;
mod id;
mod visual;

pub use callbacks::*;
pub use config::*;
pub use id::*;
pub use visual::*;
