use crate::math::{Pose, Real, Rotation, Vector3};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A parametric motion law for kinematic-position bodies
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum KinematicPath {
    /// Circles the vertical axis while spinning about its own vertical axis
    Orbit {
        /// Radius of the circular translation
        radius: Real,

        /// Constant height of the body
        height: Real,

        /// Angular speed of the circular translation (rad/s)
        orbit_speed: Real,

        /// Angular speed of the spin about +Y (rad/s)
        spin_speed: Real,
    },
}

impl KinematicPath {
    /// The twister's motion: a slow orbit and a fast spin
    pub fn twister(radius: Real, height: Real) -> Self {
        KinematicPath::Orbit {
            radius,
            height,
            orbit_speed: 0.5,
            spin_speed: 3.0,
        }
    }

    /// Target pose at simulation time `t`
    pub fn pose_at(&self, t: Real) -> Pose {
        match *self {
            KinematicPath::Orbit { radius, height, orbit_speed, spin_speed } => {
                let angle = orbit_speed * t;
                let position = Vector3::new(radius * angle.cos(), height, radius * angle.sin());
                let rotation = Rotation::from_axis_angle(&Vector3::y_axis(), spin_speed * t);
                Pose::new(position, rotation)
            }
        }
    }
}
