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

//! A provider that reads prefabs from a directory tree.

use crate::error::ProviderError;
use crossbeam_channel::{Receiver, Sender};
use lamina_core::{AssetHandle, AssetProvider, LoadError, LoadReply, LoadRequest, Prefab};
use std::{
    fs,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
    thread::{self, JoinHandle},
};
use walkdir::WalkDir;

/// The extension prefab files carry when none is configured.
pub const DEFAULT_PREFAB_EXTENSION: &str = "prefab";

struct LoadJob {
    request: LoadRequest,
    reply: LoadReply,
}

/// Loads `<root>/<bundle>/<path>.<extension>` on a background worker.
///
/// Each bundle is a sub-directory of the root. Requests are served in the order
/// they were issued; the completion reaches the requesting layer through its
/// [`LoadReply`].
pub struct DirectoryAssetProvider {
    root: PathBuf,
    extension: String,
    jobs: Option<Sender<LoadJob>>,
    worker: Option<JoinHandle<()>>,
}

impl DirectoryAssetProvider {
    /// Creates a provider rooted at `root`, using the default prefab extension.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ProviderError> {
        Self::with_extension(root, DEFAULT_PREFAB_EXTENSION)
    }

    /// Creates a provider rooted at `root` whose prefab files end in `extension`.
    pub fn with_extension(
        root: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ProviderError::InvalidRoot(root));
        }
        let extension = extension.into();

        let (jobs, receiver) = crossbeam_channel::unbounded();
        let worker_root = root.clone();
        let worker_extension = extension.clone();
        let worker = thread::Builder::new()
            .name("lamina-asset-worker".into())
            .spawn(move || run_worker(receiver, &worker_root, &worker_extension))
            .map_err(ProviderError::Worker)?;

        log::info!("DirectoryAssetProvider serving '{}'.", root.display());
        Ok(Self {
            root,
            extension,
            jobs: Some(jobs),
            worker: Some(worker),
        })
    }

    /// Returns the asset root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file location a request resolves to.
    ///
    /// Returns `None` when the bundle or path would leave the asset root.
    pub fn prefab_file(&self, request: &LoadRequest) -> Option<PathBuf> {
        prefab_file(&self.root, &self.extension, request)
    }

    /// Lists the prefab paths available in `bundle`, sorted, with `/` separators.
    pub fn list_prefabs(&self, bundle: &str) -> Vec<String> {
        let bundle_root = self.root.join(bundle);
        let mut prefabs: Vec<String> = WalkDir::new(&bundle_root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry.path().extension().and_then(|ext| ext.to_str())
                    == Some(self.extension.as_str())
            })
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&bundle_root).ok()?;
                let stem = relative.with_extension("");
                let parts: Vec<String> = stem
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                Some(parts.join("/"))
            })
            .collect();
        prefabs.sort();
        prefabs
    }
}

impl AssetProvider for DirectoryAssetProvider {
    fn request(&self, request: LoadRequest, reply: LoadReply) {
        log::trace!("Queueing '{}' from bundle '{}'.", request.path, request.bundle);
        let Some(jobs) = &self.jobs else {
            reply.resolve(Err(worker_gone(request.path)));
            return;
        };
        if let Err(crossbeam_channel::SendError(job)) = jobs.send(LoadJob { request, reply }) {
            job.reply.resolve(Err(worker_gone(job.request.path)));
        }
    }
}

impl Drop for DirectoryAssetProvider {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain what is left and exit.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Asset worker for '{}' panicked.", self.root.display());
            }
        }
    }
}

impl std::fmt::Debug for DirectoryAssetProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryAssetProvider")
            .field("root", &self.root)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

fn run_worker(jobs: Receiver<LoadJob>, root: &Path, extension: &str) {
    for LoadJob { request, reply } in jobs {
        let result = read_prefab(root, extension, &request);
        if let Err(e) = &result {
            log::debug!("Worker failed to load '{}': {e}", request.path);
        }
        reply.resolve(result);
    }
    log::trace!("Asset worker for '{}' stopped.", root.display());
}

fn read_prefab(
    root: &Path,
    extension: &str,
    request: &LoadRequest,
) -> Result<AssetHandle<Prefab>, LoadError> {
    let Some(file) = prefab_file(root, extension, request) else {
        log::warn!(
            "Rejected prefab '{}' from bundle '{}': not a path under the asset root.",
            request.path,
            request.bundle
        );
        return Err(not_found(request));
    };
    match fs::read(&file) {
        Ok(data) => Ok(AssetHandle::new(Prefab::new(
            request.bundle.clone(),
            request.path.clone(),
            data,
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(not_found(request)),
        Err(source) => Err(LoadError::Io {
            path: request.path.clone(),
            source,
        }),
    }
}

fn prefab_file(root: &Path, extension: &str, request: &LoadRequest) -> Option<PathBuf> {
    let mut file = root.to_path_buf();
    push_segments(&mut file, &request.bundle)?;
    let (parent, name) = request
        .path
        .rsplit_once(|c| c == '/' || c == '\\')
        .unwrap_or(("", request.path.as_str()));
    push_segments(&mut file, parent)?;
    if !is_plain_segment(name) {
        return None;
    }
    // Appended, not substituted: `Confirm.v2` maps to `Confirm.v2.<extension>`.
    file.push(format!("{name}.{extension}"));
    Some(file)
}

fn push_segments(file: &mut PathBuf, part: &str) -> Option<()> {
    for segment in part.split(['/', '\\']).filter(|s| !s.is_empty()) {
        if !is_plain_segment(segment) {
            return None;
        }
        file.push(segment);
    }
    Some(())
}

fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn not_found(request: &LoadRequest) -> LoadError {
    LoadError::NotFound {
        bundle: request.bundle.clone(),
        path: request.path.clone(),
    }
}

fn worker_gone(path: String) -> LoadError {
    LoadError::Provider {
        path,
        reason: "asset worker is not running".into(),
    }
}
