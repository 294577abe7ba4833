//! The drawing surface the simulation talks to.
//!
//! The game never draws directly. It creates, moves and deletes visual
//! primitives by [`Handle`] and sets text on a handful of [`Label`]s. The
//! terminal renderer reads the retained [`Canvas`] every frame.

use std::collections::BTreeMap;

use glam::Vec2;

/// Stable identifier shared by an entity and its on-screen primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

/// What a primitive looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Player,
    Enemy,
    Bullet,
    /// Covers the whole playfield, drawn above every other primitive
    Overlay,
}

/// Text slots on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Score,
    Lives,
    FinalScore,
    ClosePrompt,
}

/// Operations the simulation needs from whatever displays it.
pub trait Surface {
    fn create(&mut self, handle: Handle, visual: Visual, at: Vec2);
    fn update(&mut self, handle: Handle, at: Vec2);
    /// Deleting a handle that is not on the surface does nothing.
    fn delete(&mut self, handle: Handle);
    /// Current playfield size, used for bounds checks.
    fn dimensions(&self) -> Vec2;
    fn set_text(&mut self, label: Label, text: String);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub visual: Visual,
    pub position: Vec2,
}

/// In-memory scene: every live primitive and the current label texts.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: Vec2,
    primitives: BTreeMap<Handle, Primitive>,
    labels: BTreeMap<Label, String>,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            primitives: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&Primitive> {
        self.primitives.get(&handle)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.primitives.contains_key(&handle)
    }

    /// Primitives in creation order (handles are allocated monotonically).
    pub fn primitives(&self) -> impl Iterator<Item = (Handle, &Primitive)> {
        self.primitives.iter().map(|(handle, p)| (*handle, p))
    }

    pub fn count(&self, visual: Visual) -> usize {
        self.primitives
            .values()
            .filter(|p| p.visual == visual)
            .count()
    }

    pub fn label(&self, label: Label) -> Option<&str> {
        self.labels.get(&label).map(String::as_str)
    }
}

impl Surface for Canvas {
    fn create(&mut self, handle: Handle, visual: Visual, at: Vec2) {
        self.primitives.insert(
            handle,
            Primitive {
                visual,
                position: at,
            },
        );
    }

    fn update(&mut self, handle: Handle, at: Vec2) {
        match self.primitives.get_mut(&handle) {
            Some(primitive) => primitive.position = at,
            None => log::warn!("update for unknown handle {:?}", handle),
        }
    }

    fn delete(&mut self, handle: Handle) {
        self.primitives.remove(&handle);
    }

    fn dimensions(&self) -> Vec2 {
        self.size
    }

    fn set_text(&mut self, label: Label, text: String) {
        self.labels.insert(label, text);
    }
}
