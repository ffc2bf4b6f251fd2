use std::collections::HashMap;

use crate::bodies::{BodyFlags, BodyKind, KinematicPath};
use crate::core::BodyHandle;
use crate::math::Pose;
use crate::scene::graph::NodeId;

/// Everything the scene remembers about one body after setup
#[derive(Debug, Clone)]
pub struct BodyEntry {
    pub handle: BodyHandle,
    pub name: String,
    pub kind: BodyKind,
    pub flags: BodyFlags,

    /// Visual node paired with the body, if it has one
    pub node: Option<NodeId>,

    /// Wireframe collider outlines with their offsets from the body, present in debug scenes
    pub debug_nodes: Vec<(NodeId, Pose)>,

    pub path: Option<KinematicPath>,
}

/// Pairing between physics bodies and visual nodes.
///
/// Filled once by the composer; lives as long as the scene.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    entries: Vec<BodyEntry>,
    by_node: HashMap<NodeId, BodyHandle>,
    by_handle: HashMap<BodyHandle, usize>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a body; its node and debug outlines become resolvable to it
    pub fn register(&mut self, entry: BodyEntry) {
        if let Some(node) = entry.node {
            self.by_node.insert(node, entry.handle);
        }
        for (node, _) in &entry.debug_nodes {
            self.by_node.insert(*node, entry.handle);
        }
        self.by_handle.insert(entry.handle, self.entries.len());
        self.entries.push(entry);
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&BodyEntry> {
        self.by_handle.get(&handle).map(|&i| &self.entries[i])
    }

    /// Finds the body owning a visual node
    pub fn body_for_node(&self, node: NodeId) -> Option<&BodyEntry> {
        self.by_node.get(&node).and_then(|handle| self.get(*handle))
    }

    /// Finds the node paired with a body
    pub fn node_for_body(&self, handle: BodyHandle) -> Option<NodeId> {
        self.get(handle).and_then(|entry| entry.node)
    }

    /// Finds the first body declared with `name`
    pub fn find(&self, name: &str) -> Option<&BodyEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Iterates over bodies in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &BodyEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
