use glam::Vec2;

use super::Entity;
use crate::surface::{Handle, Visual};

#[derive(Debug, Clone)]
pub struct Player {
    pub handle: Handle,
    pub position: Vec2,
    pub speed: f32,
    pub health: u8,
}

impl Player {
    pub fn new(handle: Handle, position: Vec2, speed: f32, health: u8) -> Self {
        Self {
            handle,
            position,
            speed,
            health,
        }
    }

    /// Moves by one step per axis; `dx` and `dy` are each -1, 0 or 1.
    ///
    /// Always applies. Freezing the player after game over is the caller's job.
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.position.x += f32::from(dx) * self.speed;
        self.position.y += f32::from(dy) * self.speed;
    }

    /// Takes one hit. Returns true when this hit emptied the health bar.
    pub fn take_hit(&mut self) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(1);
        was_alive && !self.is_alive()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Entity for Player {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn visual(&self) -> Visual {
        Visual::Player
    }
}
