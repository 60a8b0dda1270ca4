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

use super::record::ViewRecord;
use lamina_core::{ViewId, Visual};

/// Links an instantiated visual back to the record it was loaded for.
///
/// Exactly one binding exists per loaded visual and it lives as long as the
/// visual does. The back-reference is the record's identifier, so the binding
/// never keeps a record alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBinding {
    record: ViewId,
}

impl ViewBinding {
    pub(crate) fn new(record: ViewId) -> Self {
        Self { record }
    }

    /// The identifier of the record this visual belongs to.
    pub fn record(&self) -> &ViewId {
        &self.record
    }

    /// The visual has just been parented under the layer.
    pub(crate) fn on_insert(&self, visual: &mut dyn Visual, record: &mut ViewRecord) {
        debug_assert_eq!(record.id, self.record);
        visual.on_insert();
        record.callbacks.notify_added(&record.id, &record.params);
    }

    /// The visual is leaving the layer; `destroy` tells whether it will be dropped.
    pub(crate) fn on_remove(&self, visual: &mut dyn Visual, record: &mut ViewRecord, destroy: bool) {
        debug_assert_eq!(record.id, self.record);
        visual.on_remove(destroy);
        record.callbacks.notify_removed(&record.id, destroy);
    }
}
