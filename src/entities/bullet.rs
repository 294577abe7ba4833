use glam::Vec2;

use super::Entity;
use crate::geometry;
use crate::surface::{Handle, Visual};

#[derive(Debug, Clone)]
pub struct Bullet {
    pub handle: Handle,
    pub position: Vec2,
    /// Fixed at firing time
    pub velocity: Vec2,
    /// Cleared when the bullet is removed from play
    pub alive: bool,
}

impl Bullet {
    /// Fires from `origin` toward `target` at `speed` units per tick.
    pub fn fire(handle: Handle, origin: Vec2, target: Vec2, speed: f32) -> Self {
        let angle = geometry::angle_between(origin, target);
        Self {
            handle,
            position: origin,
            velocity: geometry::velocity_from_angle(angle, speed),
            alive: true,
        }
    }

    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    pub fn is_out_of_bounds(&self, playfield: Vec2) -> bool {
        !geometry::in_bounds(self.position, playfield)
    }
}

impl Entity for Bullet {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn visual(&self) -> Visual {
        Visual::Bullet
    }
}
