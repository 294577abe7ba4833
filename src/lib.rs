// Library exports for testing
pub use clock::{Scheduler, Simulation, Task};
pub use config::GameConfig;
pub use entities::{Bullet, Enemy, Entity, Player};
pub use game::{Game, InputEvent, Phase, Step};
pub use surface::{Canvas, Handle, Label, Surface, Visual};

pub mod app;
pub mod clock;
pub mod config;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod surface;
