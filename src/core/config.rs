use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for a scene and its simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SceneConfig {
    /// World gravity vector
    pub gravity: Vector3,

    /// The fixed time step for the simulation
    pub time_step: f32,

    /// The maximum number of substeps for a variable frame time
    pub max_substeps: u32,

    /// Adds a wireframe outline node for every body with colliders
    pub debug: bool,

    /// Upward velocity change (m/s) applied when an interactive body is clicked
    pub jump_strength: f32,

    /// Name of the sound played when a contact starts on a cue body
    pub cue: String,

    /// Seconds between performance reports
    pub perf_report_interval: f32,
}

impl SceneConfig {
    /// Returns a copy with the given gravity
    pub fn with_gravity(mut self, gravity: Vector3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Returns a copy with debug outlines enabled or disabled
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, -9.81, 0.0),
            time_step: 1.0 / 60.0,
            max_substeps: 4,
            debug: false,
            jump_strength: 5.0,
            cue: "hit.mp3".to_string(),
            perf_report_interval: 5.0,
        }
    }
}
