use std::sync::Mutex;

use rapier3d::geometry::CollisionEvent as EngineCollisionEvent;
use rapier3d::prelude::{
    ActiveEvents, BroadPhase, CCDSolver, Collider, ColliderBuilder, ColliderSet, ContactPair,
    EventHandler, ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet,
    NarrowPhase, PhysicsPipeline, QueryFilter, QueryPipeline, Ray, RigidBodyBuilder,
    RigidBodyHandle, RigidBodySet,
};
use tracing::trace;

use crate::bodies::{BodyFlags, BodyKind, ColliderDesc, ColliderShape, Material};
use crate::core::{BodyHandle, CollisionEvent, CollisionEventType, EventQueue, SceneConfig};
use crate::error::SceneError;
use crate::math::{Point3, Pose, Real, Vector3};
use crate::Result;

/// Buffers the engine's collision events during a step.
///
/// The engine requires `Send + Sync` handlers and calls them through `&self`,
/// so the buffer sits behind a mutex even though stepping is single-threaded.
#[derive(Default)]
struct CollisionCollector {
    events: Mutex<Vec<EngineCollisionEvent>>,
}

impl CollisionCollector {
    fn drain(&self) -> Vec<EngineCollisionEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

impl EventHandler for CollisionCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: EngineCollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// The physics side of a scene: a rapier pipeline and the bodies living in it
pub struct PhysicsWorld {
    config: SceneConfig,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    collector: CollisionCollector,

    /// Engine handle for each scene body, indexed by `BodyHandle - 1`
    handles: Vec<RigidBodyHandle>,

    /// Collision events produced by the last call to `step`
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SceneConfig) -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = config.time_step;

        Self {
            config,
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collector: CollisionCollector::default(),
            handles: Vec::new(),
            events: EventQueue::new(),
            time: 0.0,
        }
    }

    /// Returns the current simulation time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.handles.len()
    }

    /// Creates a body and its colliders, returning the new handle.
    ///
    /// Mass comes from the colliders: each one contributes its volume times
    /// `material.density`, unless it carries an explicit mass.
    pub fn insert_body(
        &mut self,
        kind: BodyKind,
        pose: Pose,
        material: &Material,
        flags: BodyFlags,
        colliders: &[ColliderDesc],
    ) -> Result<BodyHandle> {
        // Build every collider first so a bad shape leaves the world untouched
        let built = colliders
            .iter()
            .map(|desc| build_collider(desc, material))
            .collect::<Result<Vec<Collider>>>()?;

        let handle = BodyHandle(self.handles.len() as u32 + 1);
        let body = RigidBodyBuilder::new(kind.to_rapier())
            .position(pose.to_isometry())
            .gravity_scale(material.gravity_scale)
            .ccd_enabled(flags.contains(BodyFlags::CCD))
            .can_sleep(flags.contains(BodyFlags::CAN_SLEEP))
            .user_data(handle.0 as u128)
            .build();
        let rb_handle = self.bodies.insert(body);

        for collider in built {
            self.colliders.insert_with_parent(collider, rb_handle, &mut self.bodies);
        }
        if let Some(body) = self.bodies.get_mut(rb_handle) {
            body.recompute_mass_properties_from_colliders(&self.colliders);
        }

        self.handles.push(rb_handle);
        trace!(%handle, ?kind, colliders = colliders.len(), "inserted body");
        Ok(handle)
    }

    fn engine_handle(&self, handle: BodyHandle) -> Result<RigidBodyHandle> {
        (handle.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.handles.get(index))
            .copied()
            .ok_or(SceneError::BodyNotFound(handle))
    }

    fn body(&self, handle: BodyHandle) -> Result<&rapier3d::prelude::RigidBody> {
        let rb_handle = self.engine_handle(handle)?;
        self.bodies.get(rb_handle).ok_or(SceneError::BodyNotFound(handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut rapier3d::prelude::RigidBody> {
        let rb_handle = self.engine_handle(handle)?;
        self.bodies.get_mut(rb_handle).ok_or(SceneError::BodyNotFound(handle))
    }

    /// Reads the simulated pose of a body
    pub fn pose(&self, handle: BodyHandle) -> Result<Pose> {
        Ok(Pose::from_isometry(self.body(handle)?.position()))
    }

    /// Returns the body's mass, derived from its colliders
    pub fn mass(&self, handle: BodyHandle) -> Result<Real> {
        Ok(self.body(handle)?.mass())
    }

    pub fn linear_velocity(&self, handle: BodyHandle) -> Result<Vector3> {
        Ok(*self.body(handle)?.linvel())
    }

    pub fn angular_velocity(&self, handle: BodyHandle) -> Result<Vector3> {
        Ok(*self.body(handle)?.angvel())
    }

    /// Submits the pose a kinematic-position body must reach at the end of the next step
    pub fn set_next_kinematic_pose(&mut self, handle: BodyHandle, pose: Pose) -> Result<()> {
        let body = self.body_mut(handle)?;
        if body.body_type() != BodyKind::KinematicPosition.to_rapier() {
            return Err(SceneError::InvalidParameter(format!(
                "{handle} is not a kinematic-position body"
            )));
        }
        body.set_next_kinematic_position(pose.to_isometry());
        Ok(())
    }

    /// Sets the velocities of a kinematic-velocity body
    pub fn set_kinematic_velocity(&mut self, handle: BodyHandle, linear: Vector3, angular: Vector3) -> Result<()> {
        let body = self.body_mut(handle)?;
        if body.body_type() != BodyKind::KinematicVelocity.to_rapier() {
            return Err(SceneError::InvalidParameter(format!(
                "{handle} is not a kinematic-velocity body"
            )));
        }
        body.set_linvel(linear, true);
        body.set_angvel(angular, true);
        Ok(())
    }

    /// Applies an instantaneous change of linear momentum; repeated calls add up
    pub fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vector3) -> Result<()> {
        self.body_mut(handle)?.apply_impulse(impulse, true);
        Ok(())
    }

    /// Applies an instantaneous change of angular momentum; repeated calls add up
    pub fn apply_torque_impulse(&mut self, handle: BodyHandle, torque_impulse: Vector3) -> Result<()> {
        self.body_mut(handle)?.apply_torque_impulse(torque_impulse, true);
        Ok(())
    }

    /// Advances the simulation by `frame_time`, split into fixed substeps
    pub fn step(&mut self, frame_time: f32) {
        let _ = self.step_with(frame_time, |_, _| Ok(()));
    }

    /// Like `step`, calling `before_substep` ahead of every substep with the
    /// simulation time that substep ends at.
    ///
    /// Kinematic targets must be submitted here: the engine reaches a
    /// submitted pose within a single substep.
    pub fn step_with<F>(&mut self, frame_time: f32, mut before_substep: F) -> Result<()>
    where
        F: FnMut(&mut PhysicsWorld, f32) -> Result<()>,
    {
        // Clear events from previous step
        self.events.clear();

        let fixed_step = self.config.time_step;
        let max_steps = self.config.max_substeps.max(1);

        let mut remaining_time = frame_time;
        let mut steps = 0;

        while remaining_time > 0.0 && steps < max_steps {
            let dt = fixed_step.min(remaining_time);

            before_substep(self, self.time + dt)?;
            self.step_simulation(dt);

            remaining_time -= dt;
            steps += 1;
            self.time += dt;
        }
        Ok(())
    }

    /// Performs a single step of the physics simulation
    fn step_simulation(&mut self, dt: f32) {
        self.params.dt = dt;

        self.pipeline.step(
            &self.config.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collector,
        );

        for event in self.collector.drain() {
            let event_type = if event.started() {
                CollisionEventType::Begin
            } else {
                CollisionEventType::End
            };
            let (Some(body_a), Some(body_b)) = (
                self.collider_owner(event.collider1()),
                self.collider_owner(event.collider2()),
            ) else {
                continue;
            };
            trace!(%body_a, %body_b, ?event_type, "collision");
            self.events.add_collision_event(CollisionEvent {
                event_type,
                body_a,
                body_b,
            });
        }
    }

    fn collider_owner(&self, collider: rapier3d::prelude::ColliderHandle) -> Option<BodyHandle> {
        let parent = self.colliders.get(collider)?.parent()?;
        let body = self.bodies.get(parent)?;
        Some(BodyHandle(body.user_data as u32))
    }

    /// Returns the events produced by the last step
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Casts a ray against every collider and returns the first body hit.
    ///
    /// Uses the acceleration structure refreshed by `step`, so bodies become
    /// pickable after the first step.
    pub fn cast_ray(&self, origin: Point3, direction: Vector3, max_distance: Real) -> Option<RaycastHit> {
        if direction.norm_squared() <= crate::math::EPSILON {
            return None;
        }
        let direction = direction.normalize();
        let ray = Ray::new(origin, direction);
        let (collider, toi) = self.query_pipeline.cast_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            QueryFilter::default(),
        )?;
        let body = self.collider_owner(collider)?;

        Some(RaycastHit {
            body,
            position: ray.point_at(toi),
            distance: toi,
        })
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a raycast
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The handle of the body that was hit
    pub body: BodyHandle,

    /// The position of the hit in world space
    pub position: Point3,

    /// The distance from the ray origin to the hit point
    pub distance: Real,
}

fn invalid(shape: &ColliderShape, reason: &str) -> SceneError {
    SceneError::InvalidCollider(format!("{}: {reason}", shape.kind_name()))
}

fn build_collider(desc: &ColliderDesc, material: &Material) -> Result<Collider> {
    let shape = &desc.shape;
    let builder = match shape {
        ColliderShape::Ball { radius } => {
            if *radius <= 0.0 {
                return Err(invalid(shape, "radius must be positive"));
            }
            ColliderBuilder::ball(*radius)
        }
        ColliderShape::Cuboid { half_extents } => {
            if half_extents.iter().any(|h| *h <= 0.0) {
                return Err(invalid(shape, "half-extents must be positive"));
            }
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
        ColliderShape::Cylinder { half_height, radius } => {
            if *half_height <= 0.0 || *radius <= 0.0 {
                return Err(invalid(shape, "dimensions must be positive"));
            }
            ColliderBuilder::cylinder(*half_height, *radius)
        }
        ColliderShape::ConvexHull { points } => ColliderBuilder::convex_hull(points)
            .ok_or_else(|| invalid(shape, "points do not span a volume"))?,
        ColliderShape::Trimesh { vertices, indices } => {
            if indices.is_empty() {
                return Err(invalid(shape, "mesh has no triangles"));
            }
            let vertex_count = vertices.len() as u32;
            if indices.iter().flatten().any(|i| *i >= vertex_count) {
                return Err(invalid(shape, "triangle index out of range"));
            }
            ColliderBuilder::trimesh(vertices.clone(), indices.clone())
        }
    };

    let builder = builder
        .position(desc.offset.to_isometry())
        .friction(material.friction)
        .restitution(material.restitution)
        .active_events(ActiveEvents::COLLISION_EVENTS);

    let builder = match desc.mass {
        Some(mass) if mass > 0.0 => builder.mass(mass),
        Some(_) => return Err(invalid(shape, "mass override must be positive")),
        None => builder.density(material.density),
    };

    Ok(builder.build())
}
