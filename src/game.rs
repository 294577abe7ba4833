//! Game state: owns every entity, the score and the game-over state machine.
//!
//! Each periodic task of the simulation clock maps to one method here
//! (`update`, `move_bullets`, `shoot`, `spawn_wave`, `show_close_prompt`). Every
//! one of them checks the terminal flag itself and becomes a no-op once the
//! game is over.

use std::collections::HashSet;

use glam::Vec2;
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, Entity, Player};
use crate::surface::{Handle, Label, Surface, Visual};

/// Game-over state machine. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
    ClosePrompt,
}

/// Outcome of one tick of a periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The game was already over; nothing changed and the task should stop
    Frozen,
    /// The tick ran (it may still have produced nothing)
    Advanced,
    /// This tick ended the game
    GameOver,
}

/// Input reported by the platform adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(char),
    KeyUp(char),
    PointerMoved(Vec2),
}

pub struct Game<S: Surface> {
    config: GameConfig,
    surface: S,
    rng: StdRng,
    player: Player,
    /// Kept in spawn order
    enemies: Vec<Enemy>,
    /// Kept in firing order
    bullets: Vec<Bullet>,
    score: u32,
    phase: Phase,
    pressed_keys: HashSet<char>,
    /// None until the first pointer motion
    pointer: Option<Vec2>,
    input_attached: bool,
    next_handle: u64,
}

impl<S: Surface> Game<S> {
    pub fn new(config: GameConfig, mut surface: S, rng: StdRng) -> Self {
        let player = Player::new(
            Handle(0),
            config.player_start,
            config.player_speed,
            config.player_health,
        );
        place(&mut surface, &player);

        let mut game = Self {
            config,
            surface,
            rng,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            phase: Phase::Running,
            pressed_keys: HashSet::new(),
            pointer: None,
            input_attached: true,
            next_handle: 1,
        };
        game.refresh_score();
        game.refresh_lives();
        game
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase != Phase::Running
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn is_pressed(&self, key: char) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Applies one input event. Returns false once input has been detached.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.input_attached {
            return false;
        }
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(&key);
            }
            InputEvent::PointerMoved(at) => self.pointer = Some(at),
        }
        true
    }

    /// Movement and contact tick: player, then enemies, then collisions.
    pub fn update(&mut self) -> Step {
        if self.is_game_over() {
            return Step::Frozen;
        }

        let (dx, dy) = self.direction();
        self.player.move_by(dx, dy);
        self.surface.update(self.player.handle, self.player.position);

        let target = self.player.position;
        for enemy in &mut self.enemies {
            enemy.move_towards(target);
            self.surface.update(enemy.handle, enemy.position);
        }

        let radius = self.config.hit_radius;
        let touching: Vec<Handle> = self
            .enemies
            .iter()
            .filter(|enemy| enemy.is_hit(target, radius))
            .map(|enemy| enemy.handle)
            .collect();

        for handle in touching {
            self.remove_enemy(handle);
            self.player.take_hit();
            self.refresh_lives();
            log::debug!(
                "enemy {:?} reached the player, health {}",
                handle,
                self.player.health
            );
            if !self.player.is_alive() {
                self.enter_game_over();
                return Step::GameOver;
            }
        }

        Step::Advanced
    }

    /// Bullet tick: every live bullet moves, leaves the playfield or hits one enemy.
    pub fn move_bullets(&mut self) -> Step {
        if self.is_game_over() {
            return Step::Frozen;
        }

        let playfield = self.surface.dimensions();
        let radius = self.config.hit_radius;

        // Spent bullets are marked dead in place and compacted after the pass
        for index in 0..self.bullets.len() {
            let bullet = &mut self.bullets[index];
            bullet.advance();
            let (handle, position) = (bullet.handle, bullet.position);

            if bullet.is_out_of_bounds(playfield) {
                bullet.alive = false;
                self.surface.delete(handle);
                continue;
            }
            self.surface.update(handle, position);

            // First enemy in spawn order wins; a bullet never kills twice
            let struck = self
                .enemies
                .iter()
                .find(|enemy| enemy.is_hit(position, radius))
                .map(|enemy| enemy.handle);
            if let Some(enemy) = struck {
                self.remove_enemy(enemy);
                self.bullets[index].alive = false;
                self.surface.delete(handle);
                self.score += 1;
                self.refresh_score();
                log::debug!("bullet {:?} hit enemy {:?}, score {}", handle, enemy, self.score);
            }
        }
        self.bullets.retain(|bullet| bullet.alive);

        Step::Advanced
    }

    /// Fire tick: one bullet toward the last pointer position, if there is one.
    pub fn shoot(&mut self) -> Step {
        if self.is_game_over() {
            return Step::Frozen;
        }
        if let Some(target) = self.pointer {
            let handle = self.next_handle();
            let bullet = Bullet::fire(
                handle,
                self.player.position,
                target,
                self.config.bullet_speed,
            );
            place(&mut self.surface, &bullet);
            log::trace!("fired {:?} toward {:?}", handle, target);
            self.bullets.push(bullet);
        }
        Step::Advanced
    }

    /// Spawner tick: a batch of enemies at random spots inside the margin.
    pub fn spawn_wave(&mut self) -> Step {
        if self.is_game_over() {
            return Step::Frozen;
        }

        let size = self.surface.dimensions();
        let margin = self.config.spawn_margin;
        let x_range = margin_range(margin, size.x);
        let y_range = margin_range(margin, size.y);

        for _ in 0..self.config.spawn_count {
            let x = self.rng.random_range(x_range.0..=x_range.1);
            let y = self.rng.random_range(y_range.0..=y_range.1);
            self.spawn_enemy_at(Vec2::new(x as f32, y as f32));
        }
        log::debug!("spawned wave, {} enemies alive", self.enemies.len());
        Step::Advanced
    }

    /// Adds one enemy at `position` and draws it.
    pub fn spawn_enemy_at(&mut self, position: Vec2) -> Handle {
        let handle = self.next_handle();
        let enemy = Enemy::new(handle, position, self.config.enemy_speed);
        place(&mut self.surface, &enemy);
        self.enemies.push(enemy);
        handle
    }

    /// Removes an enemy and its visual. Unknown handles are ignored.
    pub fn remove_enemy(&mut self, handle: Handle) -> bool {
        match self.enemies.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.enemies.remove(index);
                self.surface.delete(handle);
                true
            }
            None => false,
        }
    }

    /// Takes a bullet out of play and deletes its visual, handing back the dead
    /// bullet. Unknown handles are ignored.
    pub fn remove_bullet(&mut self, handle: Handle) -> Option<Bullet> {
        let index = self.bullets.iter().position(|b| b.handle == handle)?;
        let mut bullet = self.bullets.remove(index);
        bullet.alive = false;
        self.surface.delete(handle);
        Some(bullet)
    }

    /// Delayed one-shot after game over. Returns false if it does not apply.
    pub fn show_close_prompt(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.phase = Phase::ClosePrompt;
        self.surface
            .set_text(Label::ClosePrompt, "Close the window to exit.".to_string());
        log::info!("showing close prompt");
        true
    }

    fn enter_game_over(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::GameOver;
        self.input_attached = false;

        let overlay = self.next_handle();
        self.surface.create(overlay, Visual::Overlay, Vec2::ZERO);
        self.surface.set_text(
            Label::FinalScore,
            format!("Game Over! Final Score: {}", self.score),
        );
        log::info!("game over, final score {}", self.score);
    }

    fn direction(&self) -> (i8, i8) {
        let axis = |positive: char, negative: char| {
            i8::from(self.is_pressed(positive)) - i8::from(self.is_pressed(negative))
        };
        (axis('d', 'a'), axis('s', 'w'))
    }

    fn refresh_score(&mut self) {
        self.surface
            .set_text(Label::Score, format!("Score: {}", self.score));
    }

    fn refresh_lives(&mut self) {
        self.surface
            .set_text(Label::Lives, format!("Lives: {}", self.player.health));
    }

    fn next_handle(&mut self) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

fn place<S: Surface>(surface: &mut S, entity: &impl Entity) {
    surface.create(entity.handle(), entity.visual(), entity.position());
}

/// Inclusive integer range `[margin, extent - margin]`, collapsed when the
/// playfield is narrower than both margins.
fn margin_range(margin: f32, extent: f32) -> (i32, i32) {
    let low = margin.round() as i32;
    let high = (extent - margin).round() as i32;
    (low, high.max(low))
}
