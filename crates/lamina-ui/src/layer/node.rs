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

//! The layer's node tree: an arena of visuals plus the ordered list of the ones
//! currently parented under the layer.

use super::binding::ViewBinding;
use lamina_core::Visual;
use serde::Serialize;

/// A handle to a visual owned by a layer.
///
/// It combines an index with a generation count. When a node is destroyed its
/// slot can be recycled, but the generation is incremented, so a stale handle
/// never resolves to the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId {
    /// The slot of the node in the arena.
    pub index: u32,
    /// A generation counter incremented each time the slot is recycled.
    pub generation: u32,
}

/// A visual and, when it was produced by a view load, its binding.
pub(crate) struct Node {
    pub(crate) visual: Box<dyn Visual>,
    pub(crate) binding: Option<ViewBinding>,
}

impl Node {
    pub(crate) fn new(visual: Box<dyn Visual>, binding: Option<ViewBinding>) -> Self {
        Self { visual, binding }
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owns every visual of a layer, attached or not.
#[derive(Default)]
pub(crate) struct NodeTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Attached nodes, in child order.
    children: Vec<NodeId>,
}

impl NodeTree {
    /// Stores `node` without attaching it.
    pub(crate) fn spawn(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Detaches and removes a node, handing it back to the caller.
    pub(crate) fn despawn(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.children.retain(|child| *child != id);
        Some(node)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Appends the node to the child list. Attaching twice is a no-op.
    pub(crate) fn attach(&mut self, id: NodeId) -> bool {
        if self.get(id).is_none() || self.is_attached(id) {
            return false;
        }
        self.children.push(id);
        true
    }

    /// Removes the node from the child list, keeping it alive.
    pub(crate) fn detach(&mut self, id: NodeId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| *child != id);
        self.children.len() != before
    }

    pub(crate) fn is_attached(&self, id: NodeId) -> bool {
        self.children.contains(&id)
    }

    pub(crate) fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Number of live nodes, attached or not.
    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    struct Dummy;

    impl Visual for Dummy {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn node() -> Node {
        Node::new(Box::new(Dummy), None)
    }

    #[test]
    fn spawned_nodes_are_detached_until_attached() {
        let mut tree = NodeTree::default();
        let id = tree.spawn(node());

        assert!(tree.children().is_empty());
        assert!(tree.attach(id));
        assert!(!tree.attach(id), "Attaching twice must not duplicate the child");
        assert_eq!(tree.children(), &[id]);
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = NodeTree::default();
        let a = tree.spawn(node());
        let b = tree.spawn(node());
        let c = tree.spawn(node());
        tree.attach(b);
        tree.attach(a);
        tree.attach(c);

        tree.detach(a);
        tree.attach(a);

        assert_eq!(tree.children(), &[b, c, a]);
    }

    #[test]
    fn recycled_slot_invalidates_stale_handle() {
        let mut tree = NodeTree::default();
        let old = tree.spawn(node());
        tree.attach(old);
        assert!(tree.despawn(old).is_some());

        let new = tree.spawn(node());

        assert_eq!(new.index, old.index);
        assert_ne!(new.generation, old.generation);
        assert!(tree.get(old).is_none());
        assert!(tree.despawn(old).is_none());
        assert!(tree.children().is_empty(), "Despawn must detach");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn detach_keeps_node_alive() {
        let mut tree = NodeTree::default();
        let id = tree.spawn(node());
        tree.attach(id);

        assert!(tree.detach(id));
        assert!(!tree.detach(id));
        assert!(tree.get(id).is_some());
        assert!(!tree.is_attached(id));
    }
}
