use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::bodies::BodyFlags;
use crate::core::{BodyHandle, BodyRegistry, CollisionEvent, CollisionEventType, PhysicsWorld};
use crate::math::Vector3;
use crate::scene::audio::AudioSink;
use crate::scene::graph::NodeId;
use crate::Result;

/// Turns clicks and contact notifications into impulses and sound cues
pub struct InteractionController<A> {
    audio: A,
    rng: StdRng,

    /// Upward velocity change given to a clicked body
    jump_strength: f32,
    cue: String,
}

impl<A: AudioSink> InteractionController<A> {
    pub fn new(audio: A, jump_strength: f32, cue: impl Into<String>) -> Self {
        Self::with_rng(audio, jump_strength, cue, StdRng::from_entropy())
    }

    /// Same as `new`, with a reproducible random sequence
    pub fn with_seed(audio: A, jump_strength: f32, cue: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(audio, jump_strength, cue, StdRng::seed_from_u64(seed))
    }

    fn with_rng(audio: A, jump_strength: f32, cue: impl Into<String>, rng: StdRng) -> Self {
        Self {
            audio,
            rng,
            jump_strength,
            cue: cue.into(),
        }
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// One-shot linear impulse; integrated by the next step
    pub fn apply_impulse(&mut self, world: &mut PhysicsWorld, body: BodyHandle, impulse: Vector3) -> Result<()> {
        world.apply_impulse(body, impulse)
    }

    /// One-shot angular impulse; integrated by the next step
    pub fn apply_torque_impulse(&mut self, world: &mut PhysicsWorld, body: BodyHandle, torque_impulse: Vector3) -> Result<()> {
        world.apply_torque_impulse(body, torque_impulse)
    }

    /// Handles a pointer click on a visual node.
    ///
    /// An interactive body jumps by `jump_strength` m/s whatever its mass and
    /// starts tumbling in a random direction. Returns the body that reacted,
    /// or `None` when the click had no effect.
    pub fn on_click(&mut self, world: &mut PhysicsWorld, registry: &BodyRegistry, node: NodeId) -> Result<Option<BodyHandle>> {
        let Some(entry) = registry.body_for_node(node) else {
            return Ok(None);
        };
        if !entry.flags.contains(BodyFlags::INTERACTIVE) {
            return Ok(None);
        }

        let mass = world.mass(entry.handle)?;
        let impulse = Vector3::new(0.0, self.jump_strength * mass, 0.0);
        let torque = Vector3::new(
            self.rng.gen_range(-0.5..0.5),
            self.rng.gen_range(-0.5..0.5),
            self.rng.gen_range(-0.5..0.5),
        );
        self.apply_impulse(world, entry.handle, impulse)?;
        self.apply_torque_impulse(world, entry.handle, torque)?;

        debug!(name = %entry.name, body = %entry.handle, mass, "jump");
        Ok(Some(entry.handle))
    }

    /// Reacts to a contact notification with a sound cue.
    ///
    /// Only contacts that just started count, so a resting contact stays
    /// silent. The simulation is never touched from here.
    pub fn on_collision_enter(&mut self, registry: &BodyRegistry, event: &CollisionEvent) -> bool {
        if event.event_type != CollisionEventType::Begin {
            return false;
        }
        let cue_body = [event.body_a, event.body_b].into_iter().any(|handle| {
            registry
                .get(handle)
                .is_some_and(|entry| entry.flags.contains(BodyFlags::COLLISION_CUE))
        });
        if !cue_body {
            return false;
        }

        let volume = self.rng.gen::<f32>();
        self.audio.play(&self.cue, volume);
        true
    }
}
