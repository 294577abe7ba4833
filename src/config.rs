use glam::Vec2;

/// Tunables for a single game. The defaults are the only values the binary uses.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield size in world units
    pub width: f32,
    pub height: f32,
    pub player_start: Vec2,
    pub player_speed: f32,
    pub player_health: u8,
    pub enemy_speed: f32,
    pub bullet_speed: f32,
    /// Player-enemy and bullet-enemy contact distance (strict)
    pub hit_radius: f32,
    /// Enemies created per spawner tick
    pub spawn_count: usize,
    /// Spawn positions keep this far from every playfield edge
    pub spawn_margin: f32,
    /// Scheduler periods, in milliseconds
    pub update_period_ms: u64,
    pub bullet_period_ms: u64,
    pub shoot_period_ms: u64,
    pub spawn_period_ms: u64,
    /// Delay between game over and the close prompt
    pub close_prompt_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            player_start: Vec2::new(100.0, 100.0),
            player_speed: 5.0,
            player_health: 3,
            enemy_speed: 2.0,
            bullet_speed: 10.0,
            hit_radius: 20.0,
            spawn_count: 3,
            spawn_margin: 50.0,
            update_period_ms: 50,
            bullet_period_ms: 50,
            shoot_period_ms: 500,
            spawn_period_ms: 5000,
            close_prompt_delay_ms: 5000,
        }
    }
}

impl GameConfig {
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}
