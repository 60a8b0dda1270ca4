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

//! Counters a layer keeps about its own activity.

use serde::Serialize;

/// Running counters describing what a layer has done since it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayerStats {
    /// Requests sent to the asset provider.
    pub loads_requested: u64,
    /// Loads that produced an attached visual.
    pub loads_completed: u64,
    /// Loads or instantiations that failed.
    pub loads_failed: u64,
    /// Adds served from the cache without a new request.
    pub cache_hits: u64,
    /// Adds rejected because the path was already claimed.
    pub duplicates_rejected: u64,
    /// Completions that arrived for a claim that no longer existed.
    pub completions_discarded: u64,
    /// Cache entries released to make room or on destructive removal.
    pub cache_evictions: u64,
}
