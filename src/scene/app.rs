use tracing::trace;

use crate::core::{BodyHandle, BodyRegistry, CollisionEventType, PhysicsWorld};
use crate::error::SceneError;
use crate::math::{Point3, Real, Vector3};
use crate::scene::assets::AssetLoader;
use crate::scene::audio::AudioSink;
use crate::scene::composer::{SceneComposer, SceneDescriptor};
use crate::scene::graph::{NodeId, SceneGraph};
use crate::scene::interaction::InteractionController;
use crate::scene::perf::PerfMonitor;
use crate::scene::sync::{FrameSynchronizer, SyncReport};
use crate::Result;

/// Furthest distance a pointer ray is tested against
const PICK_DISTANCE: Real = 1000.0;

/// What happened during one tick
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub sync: SyncReport,

    /// Contacts that started during the step
    pub contacts_started: usize,

    /// Cues played in response
    pub cues: usize,
}

/// A running scene: the physics world, the scene graph and the logic tying them together
pub struct SceneApp<G, A> {
    world: PhysicsWorld,
    graph: G,
    registry: BodyRegistry,
    sync: FrameSynchronizer,
    controller: InteractionController<A>,
    perf: PerfMonitor,
}

impl<G: SceneGraph, A: AudioSink> SceneApp<G, A> {
    /// Composes `descriptor` into `graph` and a fresh physics world
    pub fn new<L>(descriptor: &SceneDescriptor, graph: G, loader: &mut L, audio: A) -> Result<Self>
    where
        L: AssetLoader + ?Sized,
    {
        let config = &descriptor.config;
        let controller = InteractionController::new(audio, config.jump_strength, config.cue.clone());
        Self::with_controller(descriptor, graph, loader, controller)
    }

    /// Like `new`, with a caller-built controller (e.g. seeded)
    pub fn with_controller<L>(
        descriptor: &SceneDescriptor,
        mut graph: G,
        loader: &mut L,
        controller: InteractionController<A>,
    ) -> Result<Self>
    where
        L: AssetLoader + ?Sized,
    {
        let mut world = PhysicsWorld::with_config(descriptor.config.clone());
        let registry = SceneComposer::compose(descriptor, &mut world, &mut graph, loader)?;

        Ok(Self {
            world,
            graph,
            registry,
            sync: FrameSynchronizer::new(),
            controller,
            perf: PerfMonitor::new(descriptor.config.perf_report_interval),
        })
    }

    /// Runs one frame: kinematic targets per substep, physics step, contact cues, pose copy
    pub fn tick(&mut self, frame_time: f32) -> Result<TickReport> {
        let (sync, registry) = (&self.sync, &self.registry);
        self.world.step_with(frame_time, |world, target_time| {
            sync.drive_kinematic(world, registry, target_time).map(|_| ())
        })?;

        let mut report = TickReport::default();
        for event in self.world.events().iter() {
            if event.event_type != CollisionEventType::Begin {
                continue;
            }
            report.contacts_started += 1;
            if self.controller.on_collision_enter(&self.registry, event) {
                report.cues += 1;
            }
        }

        report.sync = self.sync.synchronize(&self.world, &mut self.graph, &self.registry)?;
        self.perf.record(frame_time);

        trace!(time = self.world.time(), ?report, "tick");
        Ok(report)
    }

    /// Pointer click on a visual node
    pub fn click(&mut self, node: NodeId) -> Result<Option<BodyHandle>> {
        self.controller.on_click(&mut self.world, &self.registry, node)
    }

    /// Pointer click given as a world-space ray; picks the first body hit
    pub fn click_ray(&mut self, origin: Point3, direction: Vector3) -> Result<Option<BodyHandle>> {
        let Some(hit) = self.world.cast_ray(origin, direction, PICK_DISTANCE) else {
            return Ok(None);
        };
        match self.registry.node_for_body(hit.body) {
            Some(node) => self.click(node),
            None => Ok(None),
        }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn controller(&self) -> &InteractionController<A> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController<A> {
        &mut self.controller
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    /// Body declared under `name`
    pub fn body(&self, name: &str) -> Option<BodyHandle> {
        self.registry.find(name).map(|entry| entry.handle)
    }

    /// Visual node of the body declared under `name`
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.registry.find(name).and_then(|entry| entry.node)
    }

    /// Like `node`, for callers that cannot go on without it
    pub fn require_node(&self, name: &str) -> Result<NodeId> {
        self.node(name).ok_or_else(|| SceneError::NodeNotFound(name.to_string()))
    }
}
