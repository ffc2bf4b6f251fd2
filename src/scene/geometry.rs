//! Renderable primitives and their triangle meshes.
//!
//! Tessellation here serves two purposes: it gives renderers a mesh to draw,
//! and it gives the composer vertices to derive automatic colliders from.

use std::f32::consts::{PI, TAU};

use crate::math::{Point3, Real, Vector3};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Linear RGB colour
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.647, 0.0);
    pub const MEDIUM_PURPLE: Color = Color::rgb(0.576, 0.439, 0.859);
    pub const GREEN_YELLOW: Color = Color::rgb(0.678, 1.0, 0.184);
    pub const TOMATO: Color = Color::rgb(1.0, 0.388, 0.278);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A renderable shape
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Geometry {
    /// UV sphere centred on the origin
    Sphere {
        radius: Real,
        width_segments: u32,
        height_segments: u32,
    },

    /// Axis-aligned box centred on the origin, given by full dimensions
    Box { width: Real, height: Real, depth: Real },

    /// Torus in the XY plane around the Z axis
    Torus {
        radius: Real,
        tube: Real,
        radial_segments: u32,
        tubular_segments: u32,
    },

    /// Y-aligned cylinder centred on the origin
    Cylinder {
        radius: Real,
        height: Real,
        radial_segments: u32,
    },

    /// Arbitrary triangle mesh, usually produced by an asset loader
    Mesh {
        vertices: Vec<Point3>,
        indices: Vec<[u32; 3]>,
    },
}

/// Axis-aligned bounds of a geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector3,
    pub max: Vector3,
}

impl Bounds {
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vector3 {
        (self.max - self.min) * 0.5
    }
}

impl Geometry {
    /// UV sphere with the default 32x16 resolution
    pub fn sphere(radius: Real) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: 32,
            height_segments: 16,
        }
    }

    pub fn cuboid(width: Real, height: Real, depth: Real) -> Self {
        Geometry::Box { width, height, depth }
    }

    pub fn torus(radius: Real, tube: Real, radial_segments: u32, tubular_segments: u32) -> Self {
        Geometry::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn cylinder(radius: Real, height: Real) -> Self {
        Geometry::Cylinder {
            radius,
            height,
            radial_segments: 32,
        }
    }

    /// Whether an analytic collider matches this shape exactly
    pub fn has_analytic_collider(&self) -> bool {
        matches!(
            self,
            Geometry::Sphere { .. } | Geometry::Box { .. } | Geometry::Cylinder { .. }
        )
    }

    /// Triangulates the geometry, scaled per axis
    pub fn triangulate(&self, scale: &Vector3) -> (Vec<Point3>, Vec<[u32; 3]>) {
        let (mut vertices, indices) = match self {
            Geometry::Sphere { radius, width_segments, height_segments } => {
                sphere_mesh(*radius, (*width_segments).max(3), (*height_segments).max(2))
            }
            Geometry::Box { width, height, depth } => box_mesh(*width, *height, *depth),
            Geometry::Torus { radius, tube, radial_segments, tubular_segments } => {
                torus_mesh(*radius, *tube, (*radial_segments).max(3), (*tubular_segments).max(3))
            }
            Geometry::Cylinder { radius, height, radial_segments } => {
                cylinder_mesh(*radius, *height, (*radial_segments).max(3))
            }
            Geometry::Mesh { vertices, indices } => (vertices.clone(), indices.clone()),
        };

        for v in vertices.iter_mut() {
            v.coords.component_mul_assign(scale);
        }

        (vertices, indices)
    }

    /// Axis-aligned bounds after scaling
    pub fn bounds(&self, scale: &Vector3) -> Bounds {
        let (vertices, _) = self.triangulate(scale);
        let mut min = Vector3::repeat(Real::MAX);
        let mut max = Vector3::repeat(Real::MIN);
        for v in &vertices {
            min = min.inf(&v.coords);
            max = max.sup(&v.coords);
        }
        if vertices.is_empty() {
            min = Vector3::zeros();
            max = Vector3::zeros();
        }
        Bounds { min, max }
    }

    /// Radius of the smallest origin-centred sphere enclosing the scaled geometry
    pub fn bounding_radius(&self, scale: &Vector3) -> Real {
        let (vertices, _) = self.triangulate(scale);
        vertices
            .iter()
            .map(|v| v.coords.norm())
            .fold(0.0, Real::max)
    }
}

fn sphere_mesh(radius: Real, width: u32, height: u32) -> (Vec<Point3>, Vec<[u32; 3]>) {
    let mut vertices = Vec::with_capacity(((width + 1) * (height + 1)) as usize);
    for iy in 0..=height {
        let v = iy as Real / height as Real;
        for ix in 0..=width {
            let u = ix as Real / width as Real;
            vertices.push(Point3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            ));
        }
    }

    let row = width + 1;
    let mut indices = Vec::new();
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // poles collapse to a single triangle
            if iy != 0 {
                indices.push([a, b, d]);
            }
            if iy != height - 1 {
                indices.push([b, c, d]);
            }
        }
    }

    (vertices, indices)
}

fn box_mesh(width: Real, height: Real, depth: Real) -> (Vec<Point3>, Vec<[u32; 3]>) {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    let vertices = vec![
        Point3::new(-hx, -hy, -hz),
        Point3::new(hx, -hy, -hz),
        Point3::new(hx, hy, -hz),
        Point3::new(-hx, hy, -hz),
        Point3::new(-hx, -hy, hz),
        Point3::new(hx, -hy, hz),
        Point3::new(hx, hy, hz),
        Point3::new(-hx, hy, hz),
    ];
    let indices = vec![
        [0, 3, 2], [0, 2, 1], // -z
        [4, 5, 6], [4, 6, 7], // +z
        [0, 4, 7], [0, 7, 3], // -x
        [1, 2, 6], [1, 6, 5], // +x
        [0, 1, 5], [0, 5, 4], // -y
        [3, 7, 6], [3, 6, 2], // +y
    ];
    (vertices, indices)
}

fn torus_mesh(radius: Real, tube: Real, radial: u32, tubular: u32) -> (Vec<Point3>, Vec<[u32; 3]>) {
    let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    for j in 0..=radial {
        let v = j as Real / radial as Real * TAU;
        for i in 0..=tubular {
            let u = i as Real / tubular as Real * TAU;
            let ring = radius + tube * v.cos();
            vertices.push(Point3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()));
        }
    }

    let row = tubular + 1;
    let mut indices = Vec::with_capacity((radial * tubular * 2) as usize);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            indices.push([a, b, d]);
            indices.push([b, c, d]);
        }
    }

    (vertices, indices)
}

fn cylinder_mesh(radius: Real, height: Real, segments: u32) -> (Vec<Point3>, Vec<[u32; 3]>) {
    let half = height * 0.5;
    let mut vertices = Vec::with_capacity((segments * 2 + 2) as usize);
    for y in [-half, half] {
        for i in 0..segments {
            let theta = i as Real / segments as Real * TAU;
            vertices.push(Point3::new(radius * theta.cos(), y, radius * theta.sin()));
        }
    }
    let bottom_center = segments * 2;
    let top_center = bottom_center + 1;
    vertices.push(Point3::new(0.0, -half, 0.0));
    vertices.push(Point3::new(0.0, half, 0.0));

    let mut indices = Vec::with_capacity((segments * 4) as usize);
    for i in 0..segments {
        let next = (i + 1) % segments;
        let (b0, b1) = (i, next);
        let (t0, t1) = (i + segments, next + segments);
        indices.push([b0, t1, b1]);
        indices.push([b0, t0, t1]);
        indices.push([bottom_center, b0, b1]);
        indices.push([top_center, t1, t0]);
    }

    (vertices, indices)
}
