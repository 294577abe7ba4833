use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::game::InputEvent;
use crate::renderer::Viewport;

/// How long a freshly pressed key counts as held before the OS auto-repeat
/// kicks in, on terminals that never report key releases
const FIRST_REPEAT_GRACE: Duration = Duration::from_millis(700);
/// Gap between repeats after which a repeating key counts as released
const REPEAT_TIMEOUT: Duration = Duration::from_millis(150);

/// A key seen down on a terminal without release events
#[derive(Debug, Clone, Copy)]
struct HeldKey {
    last_seen: Instant,
    repeating: bool,
}

impl HeldKey {
    fn expired(&self, now: Instant) -> bool {
        let timeout = if self.repeating {
            REPEAT_TIMEOUT
        } else {
            FIRST_REPEAT_GRACE
        };
        now.duration_since(self.last_seen) >= timeout
    }
}

/// What the terminal asked for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Game(InputEvent),
    /// Closing the window; honoured in every phase
    Quit,
}

/// Translates crossterm events into game input
pub struct InputManager {
    /// Whether the terminal reports key releases (keyboard enhancement)
    release_events: bool,
    /// Last press or repeat per key, only used without release events
    held: HashMap<char, HeldKey>,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            held: HashMap::new(),
        }
    }

    /// Drains every pending terminal event without blocking
    pub fn poll_events(&mut self, viewport: &Viewport) -> color_eyre::Result<Vec<InputAction>> {
        let mut actions = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            actions.extend(self.translate(event, viewport, Instant::now()));
        }
        actions.extend(self.expire_held(Instant::now()));
        Ok(actions)
    }

    pub fn translate(&mut self, event: Event, viewport: &Viewport, now: Instant) -> Vec<InputAction> {
        match event {
            Event::Key(key) => self.translate_key(key, now),
            Event::Mouse(mouse) => translate_mouse(mouse, viewport).into_iter().collect(),
            _ => Vec::new(),
        }
    }

    fn translate_key(&mut self, key: KeyEvent, now: Instant) -> Vec<InputAction> {
        if key.kind == KeyEventKind::Press && is_quit(&key) {
            return vec![InputAction::Quit];
        }
        let Some(symbol) = key_symbol(key.code) else {
            return Vec::new();
        };

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if !self.release_events {
                    // Without enhancement flags repeats also arrive as presses
                    let repeating = self.held.contains_key(&symbol);
                    self.held.insert(
                        symbol,
                        HeldKey {
                            last_seen: now,
                            repeating,
                        },
                    );
                }
                vec![InputAction::Game(InputEvent::KeyDown(symbol))]
            }
            KeyEventKind::Release => {
                self.held.remove(&symbol);
                vec![InputAction::Game(InputEvent::KeyUp(symbol))]
            }
        }
    }

    /// Synthesises releases for keys that stopped repeating
    pub fn expire_held(&mut self, now: Instant) -> Vec<InputAction> {
        let mut expired: Vec<char> = self
            .held
            .iter()
            .filter(|(_, held)| held.expired(now))
            .map(|(symbol, _)| *symbol)
            .collect();
        expired.sort_unstable();

        expired
            .into_iter()
            .map(|symbol| {
                self.held.remove(&symbol);
                InputAction::Game(InputEvent::KeyUp(symbol))
            })
            .collect()
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Symbolic key name; arrows alias the WASD keys
fn key_symbol(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Up => Some('w'),
        KeyCode::Left => Some('a'),
        KeyCode::Down => Some('s'),
        KeyCode::Right => Some('d'),
        KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent, viewport: &Viewport) -> Option<InputAction> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
            let at = viewport.to_world(mouse.column, mouse.row);
            Some(InputAction::Game(InputEvent::PointerMoved(at)))
        }
        _ => None,
    }
}
