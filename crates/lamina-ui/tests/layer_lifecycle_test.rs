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

mod common;

use common::{Harness, TestVisual};
use lamina_core::{ViewCallbacks, ViewConfig, ViewId, ViewParams};
use lamina_ui::{LayerSettings, LayerStats, ViewState};
use std::{cell::RefCell, rc::Rc};

#[test]
fn test_dialog_confirm_scenario() {
    // --- 1. ARRANGE ---
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let config = ViewConfig::new("ui/Confirm");

    // --- 2. ACT & ASSERT ---
    let id = h.layer.add(&config, None, None);
    assert_eq!(id, Some(ViewId::from("Dialog_ui_Confirm")));

    let second = h.layer.add(&config, None, None);
    assert_eq!(second, None, "A second add before the load resolves is rejected");

    h.settle();
    assert_eq!(h.layer.get("ui/Confirm").len(), 1);

    h.layer.remove("ui/Confirm", false);
    assert!(
        h.layer.has("ui/Confirm"),
        "A cached view is still reported by has()"
    );
    assert!(
        h.layer.get("ui/Confirm").is_empty(),
        "A cached view is not attached, so get() must not return it"
    );
}

#[test]
fn test_duplicate_add_keeps_a_single_record_and_request() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let config = ViewConfig::new("ui/Confirm");

    assert!(h.layer.add(&config, None, None).is_some());
    assert!(h.layer.add(&config, None, None).is_none());

    assert_eq!(h.layer.records().count(), 1);
    assert_eq!(h.provider.request_count(), 1);
    assert_eq!(h.layer.stats().duplicates_rejected, 1);

    // The claim still blocks once the view is attached.
    h.settle();
    assert!(h.layer.add(&config, None, None).is_none());
    assert_eq!(h.layer.stats().duplicates_rejected, 2);
    assert_eq!(h.count_events("create ui/Confirm"), 1);
}

#[test]
fn test_cached_view_is_reused_without_reloading() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let config = ViewConfig::new("ui/Confirm");
    let id = h.layer.add(&config, None, None).expect("First add succeeds");
    h.settle();
    let node = h.layer.get_by_id(&id).expect("View should be attached");

    h.layer.remove("ui/Confirm", false);
    assert_eq!(h.layer.state(&id), Some(ViewState::Cached));
    assert_eq!(h.layer.cached_paths(), vec!["ui/Confirm"]);
    assert_eq!(h.layer.size(), 0);

    let again = h.layer.add(&config, None, None);

    assert_eq!(again.as_ref(), Some(&id));
    assert_eq!(h.provider.request_count_for("ui/Confirm"), 1, "No second load");
    assert_eq!(h.layer.get_by_id(&id), Some(node), "The same visual is re-attached");
    assert_eq!(h.layer.state(&id), Some(ViewState::Attached));
    assert!(h.layer.cached_paths().is_empty());
    assert_eq!(h.layer.stats().cache_hits, 1);
    assert_eq!(
        h.events(),
        vec![
            "create ui/Confirm",
            "insert ui/Confirm",
            "remove ui/Confirm false",
            "insert ui/Confirm",
        ]
    );
}

#[test]
fn test_destructive_removal_is_final() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    h.layer.add(&ViewConfig::new("ui/Confirm"), None, None);
    h.settle();

    h.layer.remove("ui/Confirm", true);

    assert!(!h.layer.has("ui/Confirm"));
    assert!(!h.layer.has("Dialog_ui_Confirm"));
    assert!(h.layer.get("ui/Confirm").is_empty());
    assert!(h.layer.cached("ui/Confirm").is_none());
    assert_eq!(h.layer.records().count(), 0);
    assert_eq!(h.layer.node_count(), 0, "The visual must be released");
    assert_eq!(h.count_events("remove ui/Confirm true"), 1);
}

#[test]
fn test_destructive_remove_evicts_cached_entry() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    h.layer.add(&ViewConfig::new("ui/Confirm"), None, None);
    h.settle();
    h.layer.remove("ui/Confirm", false);

    h.layer.remove("ui/Confirm", true);

    assert!(!h.layer.has("ui/Confirm"));
    assert!(h.layer.cached_paths().is_empty());
    assert_eq!(h.layer.node_count(), 0);
    assert_eq!(h.layer.stats().cache_evictions, 1);
    assert_eq!(
        h.events().last().map(String::as_str),
        Some("remove ui/Confirm true")
    );
}

#[test]
fn test_clear_without_destroy_keeps_cache() {
    let mut h = Harness::new("Dialog");
    for path in ["ui/Confirm", "ui/Alert", "ui/Toast"] {
        h.register(path);
    }
    h.layer.add(&ViewConfig::new("ui/Confirm"), None, None);
    h.layer.add(&ViewConfig::new("ui/Alert"), None, None);
    h.settle();
    h.layer.remove("ui/Confirm", false);
    h.layer.add(&ViewConfig::new("ui/Toast"), None, None);

    h.layer.clear(false);

    assert_eq!(h.layer.records().count(), 0, "Active must be empty");
    assert_eq!(h.layer.size(), 0);
    assert!(h.layer.cached("ui/Confirm").is_some(), "Prior cache entry survives");
    assert!(h.layer.cached("ui/Alert").is_some(), "Attached views are cached");
    assert!(h.layer.cached("ui/Toast").is_none(), "Pending claims have nothing to cache");

    // The cached entry is reused by a later add.
    let requests = h.provider.request_count();
    h.layer.add(&ViewConfig::new("ui/Confirm"), None, None);
    assert_eq!(h.provider.request_count(), requests);
    assert_eq!(h.layer.get("ui/Confirm").len(), 1);

    // The Toast completion arrives after its claim was cleared.
    h.settle();
    assert_eq!(h.layer.stats().completions_discarded, 1);
    assert_eq!(h.count_events("create ui/Toast"), 0);
}

#[test]
fn test_clear_with_destroy_empties_everything() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    h.register("ui/Alert");
    h.layer.add(&ViewConfig::new("ui/Confirm"), None, None);
    h.layer.add(&ViewConfig::new("ui/Alert"), None, None);
    h.settle();
    h.layer.remove("ui/Confirm", false);

    h.layer.clear(true);

    assert_eq!(h.layer.records().count(), 0);
    assert!(h.layer.cached_paths().is_empty());
    assert_eq!(h.layer.node_count(), 0);
    assert!(!h.layer.has("ui/Confirm"));
    assert!(!h.layer.has("ui/Alert"));

    // With nothing cached, a new add goes back to the provider.
    h.layer.add(&ViewConfig::new("ui/Confirm"), None, None);
    assert_eq!(h.provider.request_count_for("ui/Confirm"), 2);
}

#[test]
fn test_remove_during_load_discards_late_visual() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let id = h
        .layer
        .add(&ViewConfig::new("ui/Confirm"), None, None)
        .expect("Add succeeds");
    assert_eq!(h.layer.state(&id), Some(ViewState::Pending));

    h.layer.remove("ui/Confirm", true);
    assert_eq!(h.layer.state(&id), None);

    h.settle();

    assert_eq!(h.layer.stats().completions_discarded, 1);
    assert_eq!(h.count_events("create ui/Confirm"), 0);
    assert_eq!(h.layer.node_count(), 0);
    assert!(h.layer.get("ui/Confirm").is_empty());
}

#[test]
fn test_stale_completion_does_not_attach_to_new_claim() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let config = ViewConfig::new("ui/Confirm");

    let id = h.layer.add(&config, None, None).expect("First claim");
    h.layer.remove_by_id(&id, false);
    h.layer.add(&config, None, None).expect("Second claim");
    assert_eq!(h.provider.pending_count(), 2);

    // The first request completes while the second claim is pending.
    h.provider.resolve_next();
    h.layer.update();
    assert_eq!(h.layer.stats().completions_discarded, 1);
    assert_eq!(h.layer.state(&id), Some(ViewState::Pending));
    assert!(h.layer.get_by_id(&id).is_none());

    h.provider.resolve_next();
    h.layer.update();
    assert!(h.layer.get_by_id(&id).is_some());
    assert_eq!(h.count_events("create ui/Confirm"), 1);
}

#[test]
fn test_failed_load_releases_claim_and_can_be_retried() {
    let mut h = Harness::new("Dialog");
    let config = ViewConfig::new("ui/Confirm");
    let id = h.layer.add(&config, None, None).expect("Add succeeds");

    // Nothing is registered yet, so the load fails.
    h.settle();
    assert_eq!(h.layer.state(&id), Some(ViewState::Failed));
    assert_eq!(h.layer.stats().loads_failed, 1);
    assert!(!h.layer.has("ui/Confirm"));
    assert!(h.layer.is_settled());

    h.register("ui/Confirm");
    let retried = h.layer.add(&config, None, None);
    assert_eq!(retried.as_ref(), Some(&id), "A failed claim does not block");
    assert_eq!(h.layer.records().count(), 1, "The failed record is reused");

    h.settle();
    assert_eq!(h.layer.state(&id), Some(ViewState::Attached));
    assert_eq!(h.provider.request_count_for("ui/Confirm"), 2);
}

#[test]
fn test_instantiation_failure_is_a_failed_load() {
    let mut h = Harness::new("Dialog");
    h.provider.insert("resources", "ui/Broken", b"broken".to_vec());
    let id = h
        .layer
        .add(&ViewConfig::new("ui/Broken"), None, None)
        .expect("Add succeeds");

    h.settle();

    assert_eq!(h.layer.state(&id), Some(ViewState::Failed));
    assert_eq!(h.layer.size(), 0);
    assert_eq!(h.layer.node_count(), 0);

    h.layer.remove("ui/Broken", false);
    assert!(h.layer.record(&id).is_none(), "remove() drops failed records");
}

#[test]
fn test_callbacks_and_params_follow_the_view() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let added = seen.clone();
    let removed = seen.clone();
    let callbacks = ViewCallbacks::new()
        .on_added(move |id, params| {
            let title = params.get("title").and_then(|v| v.as_str()).unwrap_or("");
            added.borrow_mut().push(format!("added {id} {title}"));
        })
        .on_removed(move |id, destroy| {
            removed.borrow_mut().push(format!("removed {id} {destroy}"));
        });
    let mut params = ViewParams::new();
    params.insert("title".into(), serde_json::json!("Quit?"));

    let id = h
        .layer
        .add(&ViewConfig::new("ui/Confirm"), Some(params), Some(callbacks))
        .expect("Add succeeds");
    assert!(seen.borrow().is_empty(), "Nothing fires before the visual is attached");

    h.settle();
    h.layer.remove("ui/Confirm", true);

    assert_eq!(
        *seen.borrow(),
        vec![
            "added Dialog_ui_Confirm Quit?".to_string(),
            "removed Dialog_ui_Confirm true".to_string(),
        ]
    );
    assert!(h.layer.params(&id).is_none());
}

#[test]
fn test_readd_overwrites_params_and_callbacks() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let config = ViewConfig::new("ui/Confirm");
    let mut first = ViewParams::new();
    first.insert("step".into(), 1.into());
    let id = h
        .layer
        .add(&config, Some(first), None)
        .expect("Add succeeds");
    h.settle();
    h.layer.remove("ui/Confirm", false);

    let mut second = ViewParams::new();
    second.insert("step".into(), 2.into());
    h.layer.add(&config, Some(second), None);

    let step = h.layer.params(&id).and_then(|p| p.get("step")).cloned();
    assert_eq!(step, Some(serde_json::json!(2)));
}

#[test]
fn test_cache_capacity_evicts_oldest_entry() {
    let mut h = Harness::with_settings(LayerSettings::new("Dialog").with_cache_capacity(1));
    h.register("ui/A");
    h.register("ui/B");
    h.layer.add(&ViewConfig::new("ui/A"), None, None);
    h.layer.add(&ViewConfig::new("ui/B"), None, None);
    h.settle();

    h.layer.remove("ui/A", false);
    h.layer.remove("ui/B", false);

    assert_eq!(h.layer.cached_paths(), vec!["ui/B"]);
    assert_eq!(h.layer.node_count(), 1);
    assert_eq!(h.count_events("remove ui/A true"), 1);
    assert!(!h.layer.has("ui/A"));
    assert!(h.layer.has("ui/B"));
}

#[test]
fn test_view_bundle_overrides_layer_default() {
    let mut h = Harness::with_settings(LayerSettings::new("Dialog").with_default_bundle("common"));
    h.provider.insert("shop", "ui/Items", b"items".to_vec());
    h.layer.add(&ViewConfig::new("ui/Items").with_bundle("shop"), None, None);
    h.layer.add(&ViewConfig::new("ui/Other"), None, None);

    let bundles: Vec<String> = h.provider.requests().into_iter().map(|r| r.bundle).collect();
    assert_eq!(bundles, vec!["shop".to_string(), "common".to_string()]);

    h.settle();
    assert_eq!(h.layer.get("ui/Items").len(), 1);
}

#[test]
fn test_retry_without_bundle_uses_layer_default() {
    // --- 1. ARRANGE: a view that fails in its override bundle ---
    let mut h = Harness::new("Dialog");
    let id = h
        .layer
        .add(&ViewConfig::new("ui/Items").with_bundle("shop"), None, None)
        .expect("Add succeeds");
    h.settle();
    assert_eq!(h.layer.state(&id), Some(ViewState::Failed));

    // --- 2. ACT: retry with no bundle ---
    h.register("ui/Items");
    h.layer.add(&ViewConfig::new("ui/Items"), None, None);

    // --- 3. ASSERT ---
    let bundles: Vec<String> = h.provider.requests().into_iter().map(|r| r.bundle).collect();
    assert_eq!(bundles, vec!["shop".to_string(), "resources".to_string()]);
    assert_eq!(h.layer.record(&id).and_then(|r| r.bundle()), None);
    h.settle();
    assert_eq!(h.layer.state(&id), Some(ViewState::Attached));
}

#[test]
fn test_dead_visual_is_destroyed_instead_of_cached() {
    let mut h = Harness::new("Dialog");
    h.register("ui/A");
    let config = ViewConfig::new("ui/A");
    let id = h.layer.add(&config, None, None).expect("Add succeeds");
    h.settle();
    let node = h.layer.get_by_id(&id).expect("Attached");
    h.layer
        .downcast::<TestVisual>(node)
        .expect("TestVisual")
        .alive
        .set(false);

    h.layer.remove("ui/A", false);

    assert!(h.layer.cached_paths().is_empty(), "A dead visual is not cached");
    assert!(h.layer.record(&id).is_none());
    assert_eq!(h.layer.node_count(), 0);
    assert_eq!(h.count_events("remove ui/A true"), 1);

    // The next add loads a fresh visual that queries can see.
    assert_eq!(h.layer.add(&config, None, None).as_ref(), Some(&id));
    h.settle();
    assert_eq!(h.provider.request_count_for("ui/A"), 2);
    assert_eq!(h.layer.get("ui/A").len(), 1);
}

#[test]
fn test_removing_unknown_views_is_a_no_op() {
    let mut h = Harness::new("Dialog");
    h.layer.remove("ui/Nothing", true);
    h.layer.remove("ui/Nothing", false);
    h.layer.remove_by_id(&ViewId::from("Dialog_ui_Nothing"), true);
    assert!(!h.layer.remove_cache("ui/Nothing"));
    h.layer.clear(true);
    assert_eq!(h.layer.stats(), LayerStats::default());
}

#[test]
fn test_downcast_reaches_concrete_visual() {
    let mut h = Harness::new("Dialog");
    h.register("ui/Confirm");
    let id = h
        .layer
        .add(&ViewConfig::new("ui/Confirm"), None, None)
        .expect("Add succeeds");
    h.settle();
    let node = h.layer.get_by_id(&id).expect("Attached");

    let visual = h.layer.downcast::<TestVisual>(node).expect("TestVisual");
    assert_eq!(visual.path, "ui/Confirm");
}
