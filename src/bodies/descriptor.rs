use crate::bodies::{BodyFlags, BodyKind, ColliderDesc, ColliderSource, AutoCollider, KinematicPath, Material};
use crate::math::{Pose, Vector3};
use crate::scene::geometry::{Color, Geometry};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Where a visual node gets its geometry from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum GeometrySource {
    /// A built-in primitive
    Primitive(Geometry),

    /// An externally authored mesh, resolved through the asset loader
    Asset(String),
}

/// The rendered half of a body
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VisualDesc {
    pub geometry: GeometrySource,
    pub color: Color,

    /// Uniform or per-axis scale of the node; auto colliders follow it
    pub scale: Vector3,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl VisualDesc {
    pub fn new(geometry: Geometry, color: Color) -> Self {
        Self {
            geometry: GeometrySource::Primitive(geometry),
            color,
            scale: Vector3::repeat(1.0),
            cast_shadow: true,
            receive_shadow: false,
        }
    }

    pub fn asset(path: impl Into<String>) -> Self {
        Self {
            geometry: GeometrySource::Asset(path.into()),
            color: Color::WHITE,
            scale: Vector3::repeat(1.0),
            cast_shadow: true,
            receive_shadow: false,
        }
    }

    pub fn scaled(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    /// Receives shadows instead of casting them (floors)
    pub fn receiving_shadow(mut self) -> Self {
        self.cast_shadow = false;
        self.receive_shadow = true;
        self
    }
}

/// One row of the scene table: a body, its colliders and its visual
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BodyDescriptor {
    pub name: String,
    pub kind: BodyKind,

    /// Initial pose
    pub pose: Pose,
    pub material: Material,
    pub colliders: ColliderSource,
    pub visual: Option<VisualDesc>,
    pub flags: BodyFlags,

    /// Motion law for kinematic-position bodies
    pub path: Option<KinematicPath>,
}

impl BodyDescriptor {
    /// Creates a descriptor of the given kind at the origin
    pub fn new(name: impl Into<String>, kind: BodyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            pose: Pose::identity(),
            material: Material::default(),
            colliders: ColliderSource::default(),
            visual: None,
            flags: BodyFlags::CAN_SLEEP,
            path: None,
        }
    }

    pub fn dynamic(name: impl Into<String>) -> Self {
        Self::new(name, BodyKind::Dynamic)
    }

    pub fn fixed(name: impl Into<String>) -> Self {
        Self::new(name, BodyKind::Fixed)
    }

    /// A kinematic-position body driven by `path`, starting at its pose for t = 0
    pub fn kinematic(name: impl Into<String>, path: KinematicPath) -> Self {
        let mut desc = Self::new(name, BodyKind::KinematicPosition);
        desc.pose = path.pose_at(0.0);
        desc.path = Some(path);
        desc
    }

    pub fn at(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_visual(mut self, visual: VisualDesc) -> Self {
        self.visual = Some(visual);
        self
    }

    /// Derives the collider from the visual geometry with the given strategy
    pub fn auto_collider(mut self, auto: AutoCollider) -> Self {
        self.colliders = ColliderSource::Auto(Some(auto));
        self
    }

    /// Replaces automatic colliders with an explicit list
    pub fn with_colliders(mut self, colliders: Vec<ColliderDesc>) -> Self {
        self.colliders = ColliderSource::Explicit(colliders);
        self
    }

    pub fn without_colliders(mut self) -> Self {
        self.colliders = ColliderSource::None;
        self
    }

    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags |= flags;
        self
    }
}
