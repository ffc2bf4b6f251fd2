use rapier3d::prelude::RigidBodyType;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Type of rigid body, determining who owns its pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyKind {
    /// Never moves after creation
    Fixed,

    /// Fully simulated (affected by gravity, impulses and contacts)
    #[default]
    Dynamic,

    /// Moved by submitting the next pose; the engine infers its velocity
    KinematicPosition,

    /// Moved by setting a velocity that the engine integrates
    KinematicVelocity,
}

/// How the frame synchronizer treats a body of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Visual transform was set at creation and is never touched again
    Static,

    /// Simulated pose is copied onto the visual node every frame
    ReadBack,

    /// A target pose is computed and pushed into the simulation
    DriveTarget,
}

impl BodyKind {
    /// Returns the matching engine body type
    pub fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Fixed => RigidBodyType::Fixed,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
            BodyKind::KinematicPosition => RigidBodyType::KinematicPositionBased,
            BodyKind::KinematicVelocity => RigidBodyType::KinematicVelocityBased,
        }
    }

    /// Returns how the frame synchronizer handles bodies of this kind
    pub fn sync_mode(self) -> SyncMode {
        match self {
            BodyKind::Fixed => SyncMode::Static,
            BodyKind::Dynamic | BodyKind::KinematicVelocity => SyncMode::ReadBack,
            BodyKind::KinematicPosition => SyncMode::DriveTarget,
        }
    }

    /// Whether the body keeps its creation pose forever
    pub fn never_moves(self) -> bool {
        self == BodyKind::Fixed
    }
}
