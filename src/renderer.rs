use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::surface::{Canvas, Label, Primitive, Visual};

/// Maps playfield coordinates onto the terminal cells that show them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Cells the playfield is drawn into
    pub area: Rect,
    /// Playfield size in world units
    pub world: Vec2,
}

impl Viewport {
    pub fn new(area: Rect, world: Vec2) -> Self {
        Self { area, world }
    }

    /// Playfield area for a full terminal: one HUD row on top, one hint row at
    /// the bottom, and a border around the board.
    pub fn for_terminal(terminal: Rect, world: Vec2) -> Self {
        Self::new(board_block().inner(board_area(terminal)), world)
    }

    /// Cell containing `point`, or None when the point is off the playfield.
    pub fn to_cell(&self, point: Vec2) -> Option<(u16, u16)> {
        if self.area.is_empty()
            || !(0.0..=self.world.x).contains(&point.x)
            || !(0.0..=self.world.y).contains(&point.y)
        {
            return None;
        }
        let column = scale_to_cells(point.x, self.world.x, self.area.width);
        let row = scale_to_cells(point.y, self.world.y, self.area.height);
        Some((self.area.x + column, self.area.y + row))
    }

    /// World position at the centre of a terminal cell, clamped to the playfield.
    pub fn to_world(&self, column: u16, row: u16) -> Vec2 {
        if self.area.is_empty() {
            return Vec2::ZERO;
        }
        let column = column.clamp(self.area.left(), self.area.right() - 1) - self.area.x;
        let row = row.clamp(self.area.top(), self.area.bottom() - 1) - self.area.y;
        Vec2::new(
            (f32::from(column) + 0.5) / f32::from(self.area.width) * self.world.x,
            (f32::from(row) + 0.5) / f32::from(self.area.height) * self.world.y,
        )
    }
}

fn scale_to_cells(value: f32, extent: f32, cells: u16) -> u16 {
    let scaled = (value / extent * f32::from(cells)).floor() as u16;
    scaled.min(cells - 1)
}

fn board_area(terminal: Rect) -> Rect {
    Rect {
        x: terminal.x,
        y: terminal.y + 1,
        width: terminal.width,
        height: terminal.height.saturating_sub(2),
    }
}

fn board_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// View struct that holds everything needed to draw one frame
pub struct RenderView<'a> {
    pub canvas: &'a Canvas,
    pub viewport: Viewport,
    pub area: Rect,
}

/// Draws the retained canvas into a ratatui frame
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        frame.render_widget(board_block(), board_area(view.area));

        let buffer = frame.buffer_mut();
        let mut overlay = false;
        for (_, primitive) in view.canvas.primitives() {
            if primitive.visual == Visual::Overlay {
                overlay = true;
                continue;
            }
            let Some((column, row)) = view.viewport.to_cell(primitive.position) else {
                continue;
            };
            let (sprite, style) = sprite_for(primitive);
            let column = centered_column(column, sprite, view.viewport.area);
            buffer.set_string(column, row, sprite, style);
        }

        self.render_hud(frame, view);

        if overlay {
            self.render_game_over(frame, view);
        }
    }

    /// Score and lives on the top row, key hints on the bottom row
    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let label = |label: Label| view.canvas.label(label).unwrap_or_default().to_string();

        let stats = Line::from(vec![
            Span::styled(
                label(Label::Score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                label(Label::Lives),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1.min(area.height),
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Mouse: Aim] [Q/Esc: Close]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1.min(area.height),
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Black overlay over everything with the final score and, later, the close prompt
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Black)),
            area,
        );

        let mut text = vec![
            Line::from(view.canvas.label(Label::FinalScore).unwrap_or_default().to_string())
                .centered()
                .red()
                .bold(),
            Line::from(""),
        ];
        if let Some(prompt) = view.canvas.label(Label::ClosePrompt) {
            text.push(Line::from(prompt.to_string()).centered().blue());
        }

        let text_area = Rect {
            x: area.x,
            y: area.y + area.height / 2,
            width: area.width,
            height: 3.min(area.height - area.height / 2),
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().bg(Color::Black))
                .alignment(Alignment::Center),
            text_area,
        );
    }
}

fn sprite_for(primitive: &Primitive) -> (&'static str, Style) {
    match primitive.visual {
        Visual::Player => (
            "<A>",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Visual::Enemy => (
            "}o{",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Visual::Bullet => ("•", Style::default().fg(Color::Yellow)),
        Visual::Overlay => ("", Style::default()),
    }
}

/// Left column for a sprite centred on `column`, kept inside `area`.
fn centered_column(column: u16, sprite: &str, area: Rect) -> u16 {
    let width = sprite.chars().count() as u16;
    let start = column.saturating_sub(width / 2).max(area.left());
    start.min(area.right().saturating_sub(width))
}
