use color_eyre::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::time::{Duration, Instant};

use crate::clock::Simulation;
use crate::config::GameConfig;
use crate::game::Game;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView, Viewport};
use crate::surface::Canvas;

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    simulation: Simulation<Canvas>,
    /// Playfield placement in the terminal, refreshed every frame
    viewport: Viewport,
    /// Wall-clock origin of the simulation's virtual milliseconds
    started: Instant,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, release_events: bool) -> Self {
        let world = config.playfield();
        let canvas = Canvas::new(world);
        let game = Game::new(config, canvas, StdRng::from_os_rng());

        Self {
            running: true,
            simulation: Simulation::new(game),
            viewport: Viewport::new(Rect::default(), world),
            started: Instant::now(),
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Update the playfield mapping before rendering
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            self.viewport = Viewport::for_terminal(area, self.viewport.world);

            terminal.draw(|frame| {
                let view = RenderView {
                    canvas: self.simulation.game().surface(),
                    viewport: self.viewport,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            let actions = self.input_manager.poll_events(&self.viewport)?;
            self.process_actions(&actions);

            let elapsed_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
            self.simulation.advance_to(elapsed_ms);

            // Small sleep to prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        log::info!(
            "quit at {} ms, score {}",
            self.simulation.now_ms(),
            self.simulation.game().score()
        );
        Ok(())
    }

    /// Feed input to the game; quitting works in every phase
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Game(event) => {
                    self.simulation.game_mut().handle_input(*event);
                }
            }
        }
    }
}
