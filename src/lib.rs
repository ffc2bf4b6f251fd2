pub mod math;
pub mod core;
pub mod bodies;
pub mod scene;

/// Re-export common types for easier usage
pub use crate::core::{PhysicsWorld, SceneConfig, BodyHandle, BodyRegistry};
pub use crate::bodies::{BodyDescriptor, BodyFlags, BodyKind, ColliderDesc, ColliderShape, KinematicPath, Material};
pub use crate::scene::{SceneApp, SceneDescriptor, NodeId, NodeStore};
pub use crate::math::{Pose, Vector3};

/// Error types for scene setup and body access
pub mod error {
    use thiserror::Error;

    use crate::core::BodyHandle;

    #[derive(Error, Debug)]
    pub enum SceneError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Invalid collider: {0}")]
        InvalidCollider(String),

        #[error("Asset not found: {0}")]
        AssetNotFound(String),

        #[error("Body not found: {0}")]
        BodyNotFound(BodyHandle),

        #[error("Node not found: {0}")]
        NodeNotFound(String),
    }
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, error::SceneError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
