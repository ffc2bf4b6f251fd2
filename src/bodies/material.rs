#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Material properties for physics objects
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of friction
    pub friction: f32,

    /// Coefficient of restitution (bounciness), 0-1
    pub restitution: f32,

    /// Multiplier applied to the world gravity for this body
    pub gravity_scale: f32,

    /// Density used to derive collider mass when no override is given
    pub density: f32,
}

impl Material {
    /// Creates a new material with the specified contact properties
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction,
            restitution,
            ..Self::default()
        }
    }

    /// Returns a copy with the given gravity scale
    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    /// Returns a copy with the given density
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Grippy, dead surface (floor and cube)
    pub fn grippy() -> Self {
        Self::new(0.7, 0.0)
    }

    /// No friction at all (the twister sweeps bodies instead of dragging them)
    pub fn frictionless() -> Self {
        Self::new(0.0, 0.0)
    }

    /// High restitution
    pub fn bouncy() -> Self {
        Self::new(0.5, 0.8)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.0,
            gravity_scale: 1.0,
            density: 1.0,
        }
    }
}
