//! Per-frame pose synchronization between bodies and their visual nodes.
//!
//! Dynamic bodies are read-only here: their simulated pose is copied onto the
//! node as-is. Kinematic-position bodies are write-only: a target pose is
//! computed from simulation time and handed to the engine, and the node is
//! placed from the same law instead of reading the body back. Fixed bodies
//! are never touched after setup.

use tracing::trace;

use crate::bodies::SyncMode;
use crate::core::{BodyEntry, BodyRegistry, PhysicsWorld};
use crate::math::Pose;
use crate::scene::graph::SceneGraph;
use crate::Result;

/// Counters from one synchronization pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Nodes updated from a simulated pose
    pub read_back: usize,

    /// Nodes placed from a kinematic law
    pub driven: usize,

    /// Bodies skipped because they have nothing to pair with
    pub skipped: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameSynchronizer;

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self
    }

    /// Submits next poses for kinematic bodies.
    ///
    /// `target_time` is the simulation time at the end of the substep that is
    /// about to run; the engine moves each body there during that substep.
    pub fn drive_kinematic(&self, world: &mut PhysicsWorld, registry: &BodyRegistry, target_time: f32) -> Result<usize> {
        let mut driven = 0;
        for entry in registry.iter() {
            if entry.kind.sync_mode() != SyncMode::DriveTarget {
                continue;
            }
            let Some(path) = entry.path else {
                continue;
            };
            world.set_next_kinematic_pose(entry.handle, path.pose_at(target_time))?;
            driven += 1;
        }
        Ok(driven)
    }

    /// Copies poses onto visual nodes after a step
    pub fn synchronize<G>(&self, world: &PhysicsWorld, graph: &mut G, registry: &BodyRegistry) -> Result<SyncReport>
    where
        G: SceneGraph + ?Sized,
    {
        let mut report = SyncReport::default();

        for entry in registry.iter() {
            let pose = match entry.kind.sync_mode() {
                SyncMode::Static => continue,
                SyncMode::ReadBack => {
                    if !has_nodes(entry) {
                        report.skipped += 1;
                        continue;
                    }
                    report.read_back += 1;
                    world.pose(entry.handle)?
                }
                SyncMode::DriveTarget => {
                    let Some(path) = entry.path.filter(|_| has_nodes(entry)) else {
                        report.skipped += 1;
                        continue;
                    };
                    report.driven += 1;
                    path.pose_at(world.time())
                }
            };
            write_nodes(graph, entry, &pose);
        }

        trace!(?report, "synchronized");
        Ok(report)
    }
}

fn has_nodes(entry: &BodyEntry) -> bool {
    entry.node.is_some() || !entry.debug_nodes.is_empty()
}

fn write_nodes<G: SceneGraph + ?Sized>(graph: &mut G, entry: &BodyEntry, pose: &Pose) {
    if let Some(node) = entry.node {
        graph.set_transform(node, *pose);
    }
    for (node, offset) in &entry.debug_nodes {
        graph.set_transform(*node, pose.compose(offset));
    }
}
