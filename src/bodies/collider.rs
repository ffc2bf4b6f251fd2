use crate::math::{Point3, Pose, Real, Vector3};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Collision shape attached to a body, independent of its rendered geometry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ColliderShape {
    /// Sphere centred on the collider origin
    Ball { radius: Real },

    /// Box given by its half-extents
    Cuboid { half_extents: Vector3 },

    /// Y-aligned cylinder
    Cylinder { half_height: Real, radius: Real },

    /// Convex hull of a point cloud
    ConvexHull { points: Vec<Point3> },

    /// Exact triangle mesh; only reliable on bodies that never move freely
    Trimesh {
        vertices: Vec<Point3>,
        indices: Vec<[u32; 3]>,
    },
}

impl ColliderShape {
    pub fn ball(radius: Real) -> Self {
        ColliderShape::Ball { radius }
    }

    pub fn cuboid(hx: Real, hy: Real, hz: Real) -> Self {
        ColliderShape::Cuboid {
            half_extents: Vector3::new(hx, hy, hz),
        }
    }

    pub fn cylinder(half_height: Real, radius: Real) -> Self {
        ColliderShape::Cylinder { half_height, radius }
    }

    /// Short lowercase name used in logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            ColliderShape::Ball { .. } => "ball",
            ColliderShape::Cuboid { .. } => "cuboid",
            ColliderShape::Cylinder { .. } => "cylinder",
            ColliderShape::ConvexHull { .. } => "convex-hull",
            ColliderShape::Trimesh { .. } => "trimesh",
        }
    }
}

/// A collider as declared on a body
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ColliderDesc {
    pub shape: ColliderShape,

    /// Placement relative to the owning body
    pub offset: Pose,

    /// Explicit mass; replaces the density-derived mass of this collider
    pub mass: Option<Real>,
}

impl ColliderDesc {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Pose::identity(),
            mass: None,
        }
    }

    /// Places the collider at `offset` relative to its body
    pub fn at(mut self, offset: Pose) -> Self {
        self.offset = offset;
        self
    }

    /// Overrides the collider's mass
    pub fn with_mass(mut self, mass: Real) -> Self {
        self.mass = Some(mass);
        self
    }
}

/// Collider derived automatically from a body's visual geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum AutoCollider {
    /// Bounding sphere of the geometry
    Ball,

    /// Axis-aligned bounding box of the geometry
    Cuboid,

    /// Y-aligned cylinder enclosing the geometry
    Cylinder,

    /// Convex hull of the geometry's vertices
    Hull,

    /// The geometry's triangles as-is
    Trimesh,
}

/// Where a body's colliders come from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ColliderSource {
    /// Derived from the visual geometry; `None` picks per geometry
    Auto(Option<AutoCollider>),

    /// Exactly these colliders, ignoring the visual geometry
    Explicit(Vec<ColliderDesc>),

    /// No collider at all
    None,
}

impl Default for ColliderSource {
    fn default() -> Self {
        ColliderSource::Auto(None)
    }
}
