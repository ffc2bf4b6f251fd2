//! Scene setup: turns a table of body descriptors into engine bodies and
//! scene-graph nodes, and records how they pair up.

use rapier3d::parry::transformation::convex_hull;
use tracing::{debug, info, warn};

use crate::bodies::{AutoCollider, BodyDescriptor, ColliderDesc, ColliderShape, ColliderSource, GeometrySource};
use crate::core::{BodyEntry, BodyRegistry, PhysicsWorld, SceneConfig};
use crate::error::SceneError;
use crate::math::{Pose, Vector3};
use crate::scene::assets::AssetLoader;
use crate::scene::geometry::{Color, Geometry};
use crate::scene::graph::{Light, SceneGraph, VisualNode};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

const DEBUG_OUTLINE: Color = Color::rgb(0.1, 0.9, 0.9);

/// A whole scene as data: global parameters, lights and the body table
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SceneDescriptor {
    pub config: SceneConfig,
    pub lights: Vec<LightDesc>,
    pub bodies: Vec<BodyDescriptor>,
}

/// Serializable form of a scene light
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum LightDesc {
    Directional {
        position: Vector3,
        intensity: f32,
        cast_shadow: bool,
    },
    Ambient {
        intensity: f32,
    },
}

impl From<LightDesc> for Light {
    fn from(desc: LightDesc) -> Self {
        match desc {
            LightDesc::Directional { position, intensity, cast_shadow } => Light::Directional {
                position,
                intensity,
                cast_shadow,
            },
            LightDesc::Ambient { intensity } => Light::Ambient { intensity },
        }
    }
}

impl AutoCollider {
    /// Collider picked when a body asks for an automatic one without naming it.
    ///
    /// Shapes with an exact analytic counterpart get it; everything else
    /// (torus, loaded meshes) is approximated by its convex hull.
    pub fn default_for(geometry: &Geometry) -> AutoCollider {
        if !geometry.has_analytic_collider() {
            return AutoCollider::Hull;
        }
        match geometry {
            Geometry::Sphere { .. } => AutoCollider::Ball,
            Geometry::Cylinder { .. } => AutoCollider::Cylinder,
            _ => AutoCollider::Cuboid,
        }
    }
}

/// Builds a scene once from its descriptor
pub struct SceneComposer;

impl SceneComposer {
    /// Creates every body, collider, node and light of `descriptor`.
    ///
    /// Fails on the first malformed collider or missing asset; the scene is
    /// not usable after a failure.
    pub fn compose<G, L>(
        descriptor: &SceneDescriptor,
        world: &mut PhysicsWorld,
        graph: &mut G,
        loader: &mut L,
    ) -> Result<BodyRegistry>
    where
        G: SceneGraph + ?Sized,
        L: AssetLoader + ?Sized,
    {
        let mut registry = BodyRegistry::new();
        let outlines = descriptor.config.debug;
        let mut collider_count = 0;

        for light in &descriptor.lights {
            graph.add_light((*light).into());
        }

        for desc in &descriptor.bodies {
            let geometry = match desc.visual.as_ref().map(|v| &v.geometry) {
                Some(GeometrySource::Primitive(geometry)) => Some(geometry.clone()),
                Some(GeometrySource::Asset(path)) => Some(loader.load_mesh(path)?),
                None => None,
            };

            let colliders = resolve_colliders(desc, geometry.as_ref())?;
            let handle = world.insert_body(desc.kind, desc.pose, &desc.material, desc.flags, &colliders)?;
            collider_count += colliders.len();

            let node = match (&desc.visual, geometry) {
                (Some(visual), Some(geometry)) => Some(graph.create_node(VisualNode {
                    name: desc.name.clone(),
                    geometry,
                    color: visual.color,
                    scale: visual.scale,
                    transform: desc.pose,
                    cast_shadow: visual.cast_shadow,
                    receive_shadow: visual.receive_shadow,
                    wireframe: false,
                })),
                _ => None,
            };

            let debug_nodes = if outlines {
                colliders
                    .iter()
                    .enumerate()
                    .map(|(i, collider)| {
                        let mut outline = VisualNode::new(
                            format!("{}/collider{}", desc.name, i),
                            outline_geometry(&collider.shape),
                            DEBUG_OUTLINE,
                        );
                        outline.transform = desc.pose.compose(&collider.offset);
                        outline.wireframe = true;
                        (graph.create_node(outline), collider.offset)
                    })
                    .collect()
            } else {
                Vec::new()
            };

            debug!(name = %desc.name, %handle, kind = ?desc.kind, colliders = colliders.len(), "composed body");
            registry.register(BodyEntry {
                handle,
                name: desc.name.clone(),
                kind: desc.kind,
                flags: desc.flags,
                node,
                debug_nodes,
                path: desc.path,
            });
        }

        info!(
            bodies = registry.len(),
            colliders = collider_count,
            lights = descriptor.lights.len(),
            debug_outlines = outlines,
            "scene composed"
        );
        Ok(registry)
    }
}

/// Works out the final collider list of a body
fn resolve_colliders(desc: &BodyDescriptor, geometry: Option<&Geometry>) -> Result<Vec<ColliderDesc>> {
    let colliders = match &desc.colliders {
        ColliderSource::None => Vec::new(),
        ColliderSource::Explicit(colliders) => colliders.clone(),
        ColliderSource::Auto(choice) => {
            let geometry = geometry.ok_or_else(|| {
                SceneError::InvalidCollider(format!("{}: automatic collider needs a visual", desc.name))
            })?;
            let scale = desc
                .visual
                .as_ref()
                .map(|v| v.scale)
                .unwrap_or_else(|| Vector3::repeat(1.0));
            let auto = choice.unwrap_or_else(|| AutoCollider::default_for(geometry));
            vec![auto_collider(auto, geometry, &scale)]
        }
    };

    if desc.kind.never_moves() {
        return Ok(colliders);
    }

    // Mesh colliders miss contacts against moving bodies; fall back to the hull
    Ok(colliders
        .into_iter()
        .map(|collider| {
            if let ColliderShape::Trimesh { vertices, .. } = &collider.shape {
                warn!(name = %desc.name, kind = ?desc.kind, "trimesh collider on a moving body, using its convex hull");
                return ColliderDesc {
                    shape: ColliderShape::ConvexHull { points: vertices.clone() },
                    offset: collider.offset,
                    mass: collider.mass,
                };
            }
            collider
        })
        .collect())
}

fn auto_collider(auto: AutoCollider, geometry: &Geometry, scale: &Vector3) -> ColliderDesc {
    match auto {
        AutoCollider::Ball => ColliderDesc::new(ColliderShape::ball(geometry.bounding_radius(scale))),
        AutoCollider::Cuboid => {
            let bounds = geometry.bounds(scale);
            ColliderDesc::new(ColliderShape::Cuboid {
                half_extents: bounds.half_extents(),
            })
            .at(Pose::from_position(bounds.center()))
        }
        AutoCollider::Cylinder => {
            let bounds = geometry.bounds(scale);
            let half = bounds.half_extents();
            ColliderDesc::new(ColliderShape::cylinder(half.y, half.x.max(half.z)))
                .at(Pose::from_position(bounds.center()))
        }
        AutoCollider::Hull => {
            let (points, _) = geometry.triangulate(scale);
            ColliderDesc::new(ColliderShape::ConvexHull { points })
        }
        AutoCollider::Trimesh => {
            let (vertices, indices) = geometry.triangulate(scale);
            ColliderDesc::new(ColliderShape::Trimesh { vertices, indices })
        }
    }
}

/// Geometry drawn for a collider in debug scenes
fn outline_geometry(shape: &ColliderShape) -> Geometry {
    match shape {
        ColliderShape::Ball { radius } => Geometry::Sphere {
            radius: *radius,
            width_segments: 16,
            height_segments: 8,
        },
        ColliderShape::Cuboid { half_extents } => {
            Geometry::cuboid(half_extents.x * 2.0, half_extents.y * 2.0, half_extents.z * 2.0)
        }
        ColliderShape::Cylinder { half_height, radius } => Geometry::Cylinder {
            radius: *radius,
            height: half_height * 2.0,
            radial_segments: 16,
        },
        ColliderShape::ConvexHull { points } => {
            let (vertices, indices) = convex_hull(points);
            Geometry::Mesh { vertices, indices }
        }
        ColliderShape::Trimesh { vertices, indices } => Geometry::Mesh {
            vertices: vertices.clone(),
            indices: indices.clone(),
        },
    }
}
