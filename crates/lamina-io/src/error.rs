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

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The asset root does not exist or is not a directory.
    #[error("asset root '{}' is not a directory", .0.display())]
    InvalidRoot(PathBuf),
    /// The background worker could not be started.
    #[error("failed to spawn the asset worker thread")]
    Worker(#[source] std::io::Error),
}
