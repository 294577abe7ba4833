use glam::Vec2;

use super::Entity;
use crate::geometry;
use crate::surface::{Handle, Visual};

#[derive(Debug, Clone)]
pub struct Enemy {
    pub handle: Handle,
    pub position: Vec2,
    pub speed: f32,
}

impl Enemy {
    pub fn new(handle: Handle, position: Vec2, speed: f32) -> Self {
        Self {
            handle,
            position,
            speed,
        }
    }

    /// Steps `speed` units straight at the target.
    pub fn move_towards(&mut self, target: Vec2) {
        self.position = geometry::step_towards(self.position, target, self.speed);
    }

    /// True when a point (a bullet or the player) is within `radius` of this enemy.
    pub fn is_hit(&self, point: Vec2, radius: f32) -> bool {
        geometry::within_radius(self.position, point, radius)
    }
}

impl Entity for Enemy {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn visual(&self) -> Visual {
        Visual::Enemy
    }
}
