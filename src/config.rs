use std::time::Duration;

use ratatui::style::Color;

use crate::error::ConfigError;

/// Play-field width in pixel units.
pub const FIELD_WIDTH: u32 = 720;

/// Play-field length (height) in pixel units.
pub const FIELD_LENGTH: u32 = FIELD_WIDTH;

/// Edge length of one grid cell in pixel units.
pub const CELL_SIZE: u32 = 72;

/// Minimum time between two snake advances.
pub const TICK_INTERVAL_MS: u64 = 500;

/// Upper bound on loop iterations per second.
pub const FRAME_RATE: u32 = 60;

/// How long the game-over overlay stays up before the session ends.
pub const GAME_OVER_DISPLAY_SECS: u64 = 5;

/// Random samples tried before falling back to a free-cell scan.
pub const MAX_RELOCATION_ATTEMPTS: u32 = 1024;

/// Title shown by the terminal window and the play-field border.
pub const WINDOW_TITLE: &str = "Snake Game";

/// Read-only tunables shared by every component of a session.
///
/// Built once at startup and passed by reference; nothing mutates it afterwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub field_width: u32,
    pub field_length: u32,
    pub cell_size: u32,
    pub tick_interval: Duration,
    pub frame_rate: u32,
    pub game_over_duration: Duration,
    pub max_relocation_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_length: FIELD_LENGTH,
            cell_size: CELL_SIZE,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            frame_rate: FRAME_RATE,
            game_over_duration: Duration::from_secs(GAME_OVER_DISPLAY_SECS),
            max_relocation_attempts: MAX_RELOCATION_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Checks that the tunables describe a usable grid and loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        for (axis, extent) in [("width", self.field_width), ("length", self.field_length)] {
            if extent == 0 || extent % self.cell_size != 0 {
                return Err(ConfigError::MisalignedField {
                    axis,
                    extent,
                    cell_size: self.cell_size,
                });
            }
        }

        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        if self.max_relocation_attempts == 0 {
            return Err(ConfigError::ZeroRelocationAttempts);
        }

        Ok(())
    }

    /// Returns `self` after validation, for use in constructor chains.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Time budget of one loop iteration at the configured frame rate.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

/// Colors used to draw the field and its entities.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub field_bg: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_border: Color,
    pub apple: Color,
    pub game_over_text: Color,
}

/// Green field, blue snake, red apple.
pub const PALETTE_CLASSIC: Palette = Palette {
    field_bg: Color::Rgb(0, 255, 120),
    snake_head: Color::Rgb(50, 50, 150),
    snake_body: Color::Rgb(0, 0, 255),
    snake_border: Color::Rgb(100, 100, 255),
    apple: Color::Rgb(255, 0, 0),
    game_over_text: Color::Rgb(255, 0, 0),
};

/// Glyph for one cell of the snake's head (two terminal columns wide).
pub const GLYPH_SNAKE_HEAD: &str = "██";

/// Glyph for one body segment.
pub const GLYPH_SNAKE_BODY: &str = "▓▓";

/// Glyph for the apple.
pub const GLYPH_APPLE: &str = "●●";

/// Terminal columns used per grid cell.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;
