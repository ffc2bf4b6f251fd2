use approx::AbsDiffEq;
use nalgebra::{Isometry3, Translation3};

use crate::math::{Real, Rotation, Vector3};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A rigid placement in 3D space (position and orientation, no scale)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Position in world space
    pub position: Vector3,

    /// Orientation as a unit quaternion
    pub rotation: Rotation,
}

impl Pose {
    /// Creates a new pose with the given position and rotation
    #[inline]
    pub fn new(position: Vector3, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Creates the identity pose (origin, no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Rotation::identity(),
        }
    }

    /// Creates a pose from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            rotation: Rotation::identity(),
        }
    }

    /// Creates a pose at `(x, y, z)` with no rotation
    #[inline]
    pub fn from_xyz(x: Real, y: Real, z: Real) -> Self {
        Self::from_position(Vector3::new(x, y, z))
    }

    /// Returns a copy of this pose with the rotation replaced
    #[inline]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Composes two poses: `self` applied after `local`
    #[inline]
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose::from_isometry(&(self.to_isometry() * local.to_isometry()))
    }

    /// Converts into the engine's isometry representation
    #[inline]
    pub fn to_isometry(&self) -> Isometry3<Real> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    /// Converts from the engine's isometry representation
    #[inline]
    pub fn from_isometry(iso: &Isometry3<Real>) -> Self {
        Self {
            position: iso.translation.vector,
            rotation: iso.rotation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Isometry3<Real>> for Pose {
    fn from(iso: Isometry3<Real>) -> Self {
        Self::from_isometry(&iso)
    }
}

impl From<Pose> for Isometry3<Real> {
    fn from(pose: Pose) -> Self {
        pose.to_isometry()
    }
}

impl AbsDiffEq for Pose {
    type Epsilon = Real;

    fn default_epsilon() -> Real {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Real) -> bool {
        // q and -q are the same orientation
        self.position.abs_diff_eq(&other.position, epsilon)
            && self.rotation.angle_to(&other.rotation) <= epsilon
    }
}
