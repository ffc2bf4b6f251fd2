use crate::core::BodyHandle;
use std::collections::VecDeque;

/// Types of collision events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEventType {
    /// Bodies have just started touching after being separate
    Begin,

    /// Bodies have just stopped touching
    End,
}

/// A collision event between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// The type of collision event
    pub event_type: CollisionEventType,

    /// The first body in the collision
    pub body_a: BodyHandle,

    /// The second body in the collision
    pub body_b: BodyHandle,
}

impl CollisionEvent {
    /// Returns whether the event involves `body`
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// Returns the other body of the pair, if `body` is part of it
    pub fn other(&self, body: BodyHandle) -> Option<BodyHandle> {
        if self.body_a == body {
            Some(self.body_b)
        } else if self.body_b == body {
            Some(self.body_a)
        } else {
            None
        }
    }
}

/// A queue of collision events produced by the last step
#[derive(Debug, Default)]
pub struct EventQueue {
    collision_events: VecDeque<CollisionEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self {
            collision_events: VecDeque::new(),
        }
    }

    /// Adds a collision event to the queue
    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.collision_events.len()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
    }

    /// Gets all collision events of a specific type
    pub fn get_collision_events_of_type(&self, event_type: CollisionEventType) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Iterates over queued events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter()
    }
}
