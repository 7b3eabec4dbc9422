use std::io;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};

use crate::apple::Apple;
use crate::config::{
    Palette, GLYPH_APPLE, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, TERMINAL_COLUMNS_PER_CELL,
    WINDOW_TITLE,
};
use crate::game::{GameOverCause, GameSession, SessionState};
use crate::grid::{Cell, GridGeometry};
use crate::snake::Snake;
use crate::ui::overlay::render_game_over_overlay;

/// Output side of the game loop. Implementations draw but never simulate.
pub trait Presentation {
    fn clear(&mut self);
    /// Draws every segment, with the head distinguished from the body.
    fn draw_actor(&mut self, snake: &Snake);
    fn draw_target(&mut self, apple: Apple);
    fn draw_game_over_overlay(&mut self, cause: Option<GameOverCause>);
    /// Flushes everything drawn since the last `clear`.
    fn present(&mut self) -> io::Result<()>;
}

/// Draws one frame of `session` through `presenter`.
pub fn draw_session<P: Presentation + ?Sized>(
    presenter: &mut P,
    session: &GameSession,
) -> io::Result<()> {
    presenter.clear();
    presenter.draw_actor(session.snake());
    presenter.draw_target(session.apple());

    if session.state() == SessionState::GameOver {
        presenter.draw_game_over_overlay(session.game_over_cause());
    }

    presenter.present()
}

/// Read-only picture of one frame, accumulated between `clear` and `present`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Scene {
    /// Snake segments, head first.
    pub actor: Vec<Cell>,
    pub target: Option<Cell>,
    pub game_over: bool,
    pub game_over_cause: Option<GameOverCause>,
}

/// Ratatui-backed presenter drawing the grid into a bordered field.
pub struct TerminalPresenter<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    grid: GridGeometry,
    palette: Palette,
    scene: Scene,
}

impl<'a, B: Backend> TerminalPresenter<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, grid: GridGeometry, palette: Palette) -> Self {
        Self {
            terminal,
            grid,
            palette,
            scene: Scene::default(),
        }
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn terminal(&self) -> &Terminal<B> {
        &*self.terminal
    }
}

impl<B: Backend> Presentation for TerminalPresenter<'_, B> {
    fn clear(&mut self) {
        self.scene = Scene::default();
    }

    fn draw_actor(&mut self, snake: &Snake) {
        self.scene.actor = snake.segments().copied().collect();
    }

    fn draw_target(&mut self, apple: Apple) {
        self.scene.target = Some(apple.position());
    }

    fn draw_game_over_overlay(&mut self, cause: Option<GameOverCause>) {
        self.scene.game_over = true;
        self.scene.game_over_cause = cause;
    }

    fn present(&mut self) -> io::Result<()> {
        let (grid, palette, scene) = (self.grid, self.palette, &self.scene);
        self.terminal
            .draw(|frame| render(frame, grid, palette, scene))?;
        Ok(())
    }
}

/// Renders a full frame from an immutable scene.
pub fn render(frame: &mut Frame<'_>, grid: GridGeometry, palette: Palette, scene: &Scene) {
    let field = field_area(frame.area(), grid);

    let block = Block::bordered()
        .title(format!(" {WINDOW_TITLE} "))
        .border_style(Style::new().fg(palette.snake_border));
    let inner = block.inner(field);
    frame.render_widget(block, field);
    frame.render_widget(Block::new().style(Style::new().bg(palette.field_bg)), inner);

    render_snake(frame, inner, grid, palette, &scene.actor);
    if let Some(target) = scene.target {
        render_apple(frame, inner, grid, palette, target);
    }

    if scene.game_over {
        render_game_over_overlay(frame, field, scene.game_over_cause, palette);
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, grid: GridGeometry, palette: Palette, actor: &[Cell]) {
    let buffer = frame.buffer_mut();

    for (index, segment) in actor.iter().enumerate() {
        let Some((x, y)) = cell_to_terminal(inner, grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(palette.snake_head)
                    .bg(palette.snake_border)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        buffer.set_string(
            x,
            y,
            GLYPH_SNAKE_BODY,
            Style::new().fg(palette.snake_body).bg(palette.snake_border),
        );
    }
}

fn render_apple(frame: &mut Frame<'_>, inner: Rect, grid: GridGeometry, palette: Palette, target: Cell) {
    let Some((x, y)) = cell_to_terminal(inner, grid, target) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_APPLE,
        Style::new().fg(palette.apple).bg(palette.field_bg),
    );
}

/// Centers the bordered field for `grid` inside `area`, clipped to `area`.
#[must_use]
pub fn field_area(area: Rect, grid: GridGeometry) -> Rect {
    let columns = u16::try_from(grid.columns()).unwrap_or(u16::MAX);
    let rows = u16::try_from(grid.rows()).unwrap_or(u16::MAX);

    let width = columns
        .saturating_mul(TERMINAL_COLUMNS_PER_CELL)
        .saturating_add(2);
    let height = rows.saturating_add(2);

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;

    Rect::new(x, y, width, height).intersection(area)
}

fn cell_to_terminal(inner: Rect, grid: GridGeometry, cell: Cell) -> Option<(u16, u16)> {
    if !grid.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.column)
        .ok()?
        .checked_mul(TERMINAL_COLUMNS_PER_CELL)?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
