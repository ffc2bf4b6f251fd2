use std::collections::HashMap;

use crate::error::SceneError;
use crate::scene::geometry::Geometry;
use crate::Result;

/// Resolves externally authored meshes by path
pub trait AssetLoader {
    fn load_mesh(&mut self, path: &str) -> Result<Geometry>;
}

/// Loader backed by meshes registered up front
#[derive(Debug, Default, Clone)]
pub struct MeshLibrary {
    meshes: HashMap<String, Geometry>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, geometry: Geometry) {
        self.meshes.insert(path.into(), geometry);
    }

    pub fn with(mut self, path: impl Into<String>, geometry: Geometry) -> Self {
        self.insert(path, geometry);
        self
    }
}

impl AssetLoader for MeshLibrary {
    fn load_mesh(&mut self, path: &str) -> Result<Geometry> {
        self.meshes
            .get(path)
            .cloned()
            .ok_or_else(|| SceneError::AssetNotFound(path.to_string()))
    }
}
