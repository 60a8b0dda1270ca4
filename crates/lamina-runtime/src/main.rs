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

//! Opens prefab views from a directory into a single layer, applies removals,
//! and prints what the layer ended up holding.

mod visual;

use anyhow::{Context, Result};
use clap::Parser;
use lamina_core::ViewConfig;
use lamina_io::DirectoryAssetProvider;
use lamina_ui::{Layer, LayerSettings, LayerStats};
use serde::Serialize;
use std::{
    path::PathBuf,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};
use visual::PrefabVisual;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding one sub-directory per bundle.
    #[arg(long)]
    assets: PathBuf,

    /// Layer settings in RON. Defaults to a layer named after --layer.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Layer name, used when no settings file is given.
    #[arg(long, default_value = "Main")]
    layer: String,

    /// Bundle to load every view from, instead of the layer default.
    #[arg(long)]
    bundle: Option<String>,

    /// Paths to remove once every view has loaded.
    #[arg(long = "remove", value_name = "PATH")]
    removals: Vec<String>,

    /// Destroy removed views instead of caching them.
    #[arg(long)]
    destroy: bool,

    /// Give up waiting for loads after this many milliseconds.
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// List the prefabs of the default bundle and exit.
    #[arg(long)]
    list: bool,

    /// Prefab paths to open, in order.
    views: Vec<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    layer: &'a str,
    children: Vec<&'a str>,
    cached: Vec<&'a str>,
    pending: usize,
    stats: LayerStats,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => LayerSettings::load(path)
            .with_context(|| format!("Failed to load layer settings from {}", path.display()))?,
        None => LayerSettings::new(cli.layer.clone()),
    };
    let provider = Arc::new(
        DirectoryAssetProvider::new(&cli.assets).context("Failed to open the asset directory")?,
    );

    if cli.list {
        for prefab in provider.list_prefabs(&settings.default_bundle) {
            println!("{prefab}");
        }
        return Ok(());
    }

    let mut layer = Layer::new(settings, provider, PrefabVisual::instantiate);

    for path in &cli.views {
        let mut config = ViewConfig::new(path.as_str());
        config.bundle = cli.bundle.clone();
        if layer.add(&config, None, None).is_none() {
            log::warn!("Skipped '{path}': already open.");
        }
    }

    let deadline = Instant::now() + Duration::from_millis(cli.timeout_ms);
    while !layer.is_settled() {
        layer.update();
        if Instant::now() >= deadline {
            log::warn!("Timed out with {} load(s) still pending.", layer.pending_count());
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    for path in &cli.removals {
        layer.remove(path, cli.destroy);
    }

    let report = Report {
        layer: layer.name(),
        children: layer.attached().map(|(_, record)| record.path()).collect(),
        cached: layer.cached_paths(),
        pending: layer.pending_count(),
        stats: layer.stats(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize the report")?
    );
    Ok(())
}
