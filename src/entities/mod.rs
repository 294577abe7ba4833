mod bullet;
mod enemy;
mod player;

use glam::Vec2;

use crate::surface::{Handle, Visual};

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use player::Player;

/// Anything that sits on the playfield and is mirrored by one surface primitive.
pub trait Entity {
    fn handle(&self) -> Handle;
    fn position(&self) -> Vec2;
    fn visual(&self) -> Visual;
}
