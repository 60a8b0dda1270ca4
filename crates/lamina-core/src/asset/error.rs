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

use thiserror::Error;

/// The reasons a prefab request can fail.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The provider has no prefab at this location.
    #[error("prefab '{path}' not found in bundle '{bundle}'")]
    NotFound {
        /// The bundle that was searched.
        bundle: String,
        /// The requested asset path.
        path: String,
    },
    /// Reading the prefab data failed.
    #[error("failed to read prefab '{path}'")]
    Io {
        /// The requested asset path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The provider dropped the reply without resolving it.
    #[error("request for prefab '{path}' was abandoned by the provider")]
    Abandoned {
        /// The requested asset path.
        path: String,
    },
    /// Any other provider-specific failure.
    #[error("provider failed to load '{path}': {reason}")]
    Provider {
        /// The requested asset path.
        path: String,
        /// A human-readable reason.
        reason: String,
    },
}

impl LoadError {
    /// Returns the asset path the failed request was for.
    pub fn path(&self) -> &str {
        match self {
            LoadError::NotFound { path, .. }
            | LoadError::Io { path, .. }
            | LoadError::Abandoned { path }
            | LoadError::Provider { path, .. } => path,
        }
    }
}
