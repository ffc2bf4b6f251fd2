mod body_type;
mod material;
mod collider;
mod descriptor;
mod kinematic;

pub use self::body_type::{BodyKind, SyncMode};
pub use self::material::Material;
pub use self::collider::{AutoCollider, ColliderDesc, ColliderShape, ColliderSource};
pub use self::descriptor::{BodyDescriptor, GeometrySource, VisualDesc};
pub use self::kinematic::KinematicPath;
pub use self::body_flags::BodyFlags;

/// Flags for controlling how a body takes part in the scene
pub mod body_flags {
    use bitflags::bitflags;

    #[cfg(feature = "serialize")]
    use serde::{Serialize, Deserialize};

    bitflags! {
        /// Flags for controlling the behavior of scene bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        pub struct BodyFlags: u32 {
            /// A pointer click on the body's node applies the jump impulse
            const INTERACTIVE = 0x01;

            /// Contacts starting on this body play a collision cue
            const COLLISION_CUE = 0x02;

            /// Body is enabled for continuous collision detection
            const CCD = 0x04;

            /// Body can go to sleep when inactive
            const CAN_SLEEP = 0x08;
        }
    }
}
