mod pose;

pub use pose::Pose;

/// Scalar type shared with the physics engine
pub type Real = f32;

/// 3D vector used for positions, velocities and impulses
pub type Vector3 = nalgebra::Vector3<Real>;

/// 3D point used for mesh vertices and ray origins
pub type Point3 = nalgebra::Point3<Real>;

/// Unit quaternion used for orientations
pub type Rotation = nalgebra::UnitQuaternion<Real>;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f32) -> bool {
    a.abs() < EPSILON
}

/// Builds a rotation from XYZ Euler angles (radians), applied X first
#[inline]
pub fn rotation_from_euler(x: Real, y: Real, z: Real) -> Rotation {
    Rotation::from_euler_angles(x, y, z)
}

/// Converts a scaled-axis vector (axis * angle) into a rotation
#[inline]
pub fn rotation_from_scaled_axis(axis_angle: Vector3) -> Rotation {
    Rotation::from_scaled_axis(axis_angle)
}
