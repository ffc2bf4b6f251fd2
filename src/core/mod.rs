pub mod world;
pub mod config;
pub mod events;
pub mod registry;

pub use self::world::{PhysicsWorld, RaycastHit};
pub use self::config::SceneConfig;
pub use self::events::{EventQueue, CollisionEvent, CollisionEventType};
pub use self::registry::{BodyEntry, BodyRegistry};

use std::fmt;

/// A unique identifier for a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Returns the raw index of this handle
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}
