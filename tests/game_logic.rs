/// Integration tests for game logic
///
/// These drive the game through the simulation clock the way the terminal
/// loop does, and check the lifecycle rules that span several ticks.
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use swarm_shooter::{
    Canvas, Game, GameConfig, InputEvent, Label, Phase, Simulation, Step, Task, Visual,
};

fn quiet_config() -> GameConfig {
    // No random waves, so scenarios control every enemy
    GameConfig {
        spawn_count: 0,
        ..GameConfig::default()
    }
}

fn new_game(config: GameConfig, seed: u64) -> Game<Canvas> {
    let canvas = Canvas::new(config.playfield());
    Game::new(config, canvas, StdRng::seed_from_u64(seed))
}

#[test]
fn test_enemy_converges_and_collides_at_threshold() {
    let mut game = new_game(quiet_config(), 1);
    game.spawn_enemy_at(Vec2::new(100.0, 130.0));

    game.update();
    assert_eq!(game.enemies()[0].position, Vec2::new(100.0, 128.0));

    // 126, 124, 122, 120: still 20 or more away
    for _ in 0..4 {
        game.update();
    }
    assert_eq!(game.enemies()[0].position, Vec2::new(100.0, 120.0));
    assert_eq!(game.player().health, 3);

    // 118 is inside the radius
    game.update();
    assert!(game.enemies().is_empty());
    assert_eq!(game.player().health, 2);
}

#[test]
fn test_bullet_travels_five_ticks() {
    let mut sim = Simulation::new(new_game(quiet_config(), 1));
    sim.game_mut()
        .handle_input(InputEvent::PointerMoved(Vec2::new(200.0, 100.0)));

    // Fired at t=0, moved at 50, 100, 150, 200 and 250
    sim.advance_to(250);
    let bullets = sim.game().bullets();
    assert_eq!(bullets.len(), 1);
    assert_eq!(bullets[0].velocity, Vec2::new(10.0, 0.0));
    assert_eq!(bullets[0].position, Vec2::new(150.0, 100.0));
}

#[test]
fn test_shoot_period_is_half_a_second() {
    let mut sim = Simulation::new(new_game(quiet_config(), 1));
    sim.game_mut()
        .handle_input(InputEvent::PointerMoved(Vec2::new(700.0, 500.0)));

    sim.advance_to(499);
    assert_eq!(sim.game().bullets().len(), 1);
    sim.advance_to(500);
    assert_eq!(sim.game().bullets().len(), 2);
    sim.advance_to(1000);
    assert_eq!(sim.game().bullets().len(), 3);
}

#[test]
fn test_no_bullets_before_pointer_is_seen() {
    let mut sim = Simulation::new(new_game(quiet_config(), 1));
    sim.advance_to(2000);
    assert!(sim.game().bullets().is_empty());
    // Shooting keeps its slot even while it has nothing to aim at
    assert!(sim.scheduler().is_scheduled(Task::Shoot));

    sim.game_mut()
        .handle_input(InputEvent::PointerMoved(Vec2::new(300.0, 300.0)));
    sim.advance_to(2500);
    assert_eq!(sim.game().bullets().len(), 1);
}

#[test]
fn test_spawner_waves_every_five_seconds() {
    // Still enemies and a player outside the spawn rectangle, so nothing collides
    let config = GameConfig {
        player_start: Vec2::new(10.0, 10.0),
        enemy_speed: 0.0,
        ..GameConfig::default()
    };
    let mut sim = Simulation::new(new_game(config, 7));
    sim.advance_to(0);
    assert_eq!(sim.game().enemies().len(), 3);
    sim.advance_to(4999);
    assert_eq!(sim.game().enemies().len(), 3);
    sim.advance_to(5000);
    assert_eq!(sim.game().enemies().len(), 6);
    assert_eq!(sim.game().surface().count(Visual::Enemy), 6);
}

#[test]
fn test_each_hit_scores_one() {
    let mut sim = Simulation::new(new_game(quiet_config(), 1));
    sim.game_mut().spawn_enemy_at(Vec2::new(400.0, 100.0));
    sim.game_mut().spawn_enemy_at(Vec2::new(700.0, 100.0));
    sim.game_mut()
        .handle_input(InputEvent::PointerMoved(Vec2::new(800.0, 100.0)));

    let mut last_score = 0;
    for now in (0..3000).step_by(50) {
        sim.advance_to(now);
        let score = sim.game().score();
        assert!(score == last_score || score == last_score + 1);
        last_score = score;
    }
    assert_eq!(sim.game().score(), 2);
    assert!(sim.game().enemies().is_empty());
    assert_eq!(
        sim.game().surface().label(Label::Score),
        Some("Score: 2")
    );
}

#[test]
fn test_game_over_freezes_every_task() {
    let mut game = new_game(quiet_config(), 1);
    for _ in 0..3 {
        game.spawn_enemy_at(Vec2::new(100.0, 110.0));
    }
    let survivor = game.spawn_enemy_at(Vec2::new(600.0, 500.0));
    game.handle_input(InputEvent::PointerMoved(Vec2::new(300.0, 300.0)));

    assert_eq!(game.update(), Step::GameOver);
    assert_eq!(game.player().health, 0);

    let survivor_at = game
        .enemies()
        .iter()
        .find(|e| e.handle == survivor)
        .map(|e| e.position);

    assert_eq!(game.spawn_wave(), Step::Frozen);
    assert_eq!(game.shoot(), Step::Frozen);
    assert_eq!(game.move_bullets(), Step::Frozen);
    assert_eq!(game.update(), Step::Frozen);

    assert_eq!(game.enemies().len(), 1);
    assert!(game.bullets().is_empty());
    assert_eq!(
        game.enemies().iter().find(|e| e.handle == survivor).map(|e| e.position),
        survivor_at
    );
}

#[test]
fn test_game_over_deregisters_tasks_and_shows_prompt_later() {
    let mut sim = Simulation::new(new_game(quiet_config(), 1));
    for _ in 0..3 {
        sim.game_mut().spawn_enemy_at(Vec2::new(100.0, 110.0));
    }

    sim.advance_to(0);
    assert_eq!(sim.game().phase(), Phase::GameOver);
    assert_eq!(sim.game().surface().count(Visual::Overlay), 1);
    assert_eq!(
        sim.game().surface().label(Label::FinalScore),
        Some("Game Over! Final Score: 0")
    );

    // Only the close prompt is left on the clock
    assert_eq!(sim.scheduler().len(), 1);
    assert!(sim.scheduler().is_scheduled(Task::ClosePrompt));

    sim.advance_to(4999);
    assert_eq!(sim.game().phase(), Phase::GameOver);
    assert_eq!(sim.game().surface().label(Label::ClosePrompt), None);

    sim.advance_to(5000);
    assert_eq!(sim.game().phase(), Phase::ClosePrompt);
    assert_eq!(
        sim.game().surface().label(Label::ClosePrompt),
        Some("Close the window to exit.")
    );
    assert!(sim.scheduler().is_empty());

    sim.advance_to(60_000);
    assert_eq!(sim.game().phase(), Phase::ClosePrompt);
}

#[test]
fn test_input_ignored_after_game_over() {
    let mut sim = Simulation::new(new_game(quiet_config(), 1));
    for _ in 0..3 {
        sim.game_mut().spawn_enemy_at(Vec2::new(100.0, 110.0));
    }
    sim.advance_to(0);

    let at = sim.game().player().position;
    assert!(!sim.game_mut().handle_input(InputEvent::KeyDown('d')));
    sim.advance_to(1000);
    assert_eq!(sim.game().player().position, at);
}

#[test]
fn test_player_moves_once_per_update_tick() {
    let mut sim = Simulation::new(new_game(quiet_config(), 1));
    sim.game_mut().handle_input(InputEvent::KeyDown('d'));

    // Updates at 0, 50, 100, 150
    sim.advance_to(150);
    assert_eq!(sim.game().player().position, Vec2::new(120.0, 100.0));

    sim.game_mut().handle_input(InputEvent::KeyUp('d'));
    sim.advance_to(400);
    assert_eq!(sim.game().player().position, Vec2::new(120.0, 100.0));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Spawn(f32, f32),
        Aim(f32, f32),
        Shoot,
        Update,
        MoveBullets,
        RemoveEnemy(usize),
        RemoveBullet(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f32..800.0, 0.0f32..600.0).prop_map(|(x, y)| Op::Spawn(x, y)),
            (0.0f32..800.0, 0.0f32..600.0).prop_map(|(x, y)| Op::Aim(x, y)),
            Just(Op::Shoot),
            Just(Op::Update),
            Just(Op::MoveBullets),
            (0usize..8).prop_map(Op::RemoveEnemy),
            (0usize..8).prop_map(Op::RemoveBullet),
        ]
    }

    proptest! {
        #[test]
        fn test_every_entity_has_exactly_one_visual(ops in prop::collection::vec(op(), 0..80)) {
            let mut game = new_game(quiet_config(), 3);
            for op in ops {
                match op {
                    Op::Spawn(x, y) => {
                        game.spawn_enemy_at(Vec2::new(x, y));
                    }
                    Op::Aim(x, y) => {
                        game.handle_input(InputEvent::PointerMoved(Vec2::new(x, y)));
                    }
                    Op::Shoot => {
                        game.shoot();
                    }
                    Op::Update => {
                        game.update();
                    }
                    Op::MoveBullets => {
                        game.move_bullets();
                    }
                    Op::RemoveEnemy(i) => {
                        if let Some(handle) = game.enemies().get(i).map(|e| e.handle) {
                            prop_assert!(game.remove_enemy(handle));
                            let before = game.enemies().len();
                            prop_assert!(!game.remove_enemy(handle));
                            prop_assert_eq!(game.enemies().len(), before);
                        }
                    }
                    Op::RemoveBullet(i) => {
                        if let Some(handle) = game.bullets().get(i).map(|b| b.handle) {
                            let removed = game.remove_bullet(handle);
                            prop_assert!(removed.is_some_and(|bullet| !bullet.alive));
                            let before = game.bullets().len();
                            prop_assert!(game.remove_bullet(handle).is_none());
                            prop_assert_eq!(game.bullets().len(), before);
                        }
                    }
                }

                let canvas = game.surface();
                prop_assert_eq!(canvas.count(Visual::Enemy), game.enemies().len());
                prop_assert_eq!(canvas.count(Visual::Bullet), game.bullets().len());
                for enemy in game.enemies() {
                    prop_assert!(canvas.contains(enemy.handle));
                }
                for bullet in game.bullets() {
                    prop_assert!(bullet.alive);
                    prop_assert!(canvas.contains(bullet.handle));
                }
            }
        }

        #[test]
        fn test_health_monotonic_and_single_game_over(
            seed in any::<u64>(),
            aim_x in 0.0f32..800.0,
            aim_y in 0.0f32..600.0,
        ) {
            let mut sim = Simulation::new(new_game(GameConfig::default(), seed));
            sim.game_mut().handle_input(InputEvent::PointerMoved(Vec2::new(aim_x, aim_y)));

            let mut health = sim.game().player().health;
            let mut score = 0;
            let mut transitions = 0;
            let mut was_over = false;
            for now in (0..40_000).step_by(50) {
                sim.advance_to(now);
                let game = sim.game();
                prop_assert!(game.player().health <= health);
                prop_assert!(game.score() >= score);
                health = game.player().health;
                score = game.score();

                if game.is_game_over() && !was_over {
                    transitions += 1;
                    prop_assert_eq!(health, 0);
                }
                prop_assert!(!was_over || game.is_game_over());
                was_over = game.is_game_over();
            }
            prop_assert!(transitions <= 1);
            prop_assert_eq!(transitions == 1, health == 0);
            prop_assert!(sim.game().surface().count(Visual::Overlay) <= 1);
        }
    }
}
