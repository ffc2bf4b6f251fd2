use std::fmt;

use crate::math::{Pose, Vector3};
use crate::scene::geometry::{Color, Geometry};

/// Identifier of a visual node in a scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A renderable mesh with a transform
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub name: String,
    pub geometry: Geometry,
    pub color: Color,
    pub scale: Vector3,
    pub transform: Pose,
    pub cast_shadow: bool,
    pub receive_shadow: bool,

    /// Drawn as an outline (collider debug view)
    pub wireframe: bool,
}

impl VisualNode {
    pub fn new(name: impl Into<String>, geometry: Geometry, color: Color) -> Self {
        Self {
            name: name.into(),
            geometry,
            color,
            scale: Vector3::repeat(1.0),
            transform: Pose::identity(),
            cast_shadow: false,
            receive_shadow: false,
            wireframe: false,
        }
    }
}

/// Scene lighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional {
        position: Vector3,
        intensity: f32,
        cast_shadow: bool,
    },
    Ambient {
        intensity: f32,
    },
}

/// The renderer-facing side of a scene
pub trait SceneGraph {
    /// Adds a node and returns its id
    fn create_node(&mut self, node: VisualNode) -> NodeId;

    /// Moves a node; unknown ids are ignored
    fn set_transform(&mut self, node: NodeId, transform: Pose);

    /// Current transform of a node
    fn transform(&self, node: NodeId) -> Option<Pose>;

    fn add_light(&mut self, light: Light);
}

/// In-memory scene graph; renderers mirror it, tests inspect it
#[derive(Debug, Default, Clone)]
pub struct NodeStore {
    nodes: Vec<VisualNode>,
    lights: Vec<Light>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Iterates over nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &VisualNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, node)| node.name == name).map(|(id, _)| id)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneGraph for NodeStore {
    fn create_node(&mut self, node: VisualNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn set_transform(&mut self, node: NodeId, transform: Pose) {
        if let Some(node) = self.nodes.get_mut(node.0 as usize) {
            node.transform = transform;
        }
    }

    fn transform(&self, node: NodeId) -> Option<Pose> {
        self.node(node).map(|node| node.transform)
    }

    fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }
}
