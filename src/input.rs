use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order used when several directions are asserted in the same poll.
    pub const PRIORITY: [Self; 4] = [Self::Right, Self::Up, Self::Down, Self::Left];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Directional and quit intents observed during one poll.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub quit: bool,
}

impl InputSnapshot {
    /// Snapshot with exactly one direction asserted.
    #[must_use]
    pub fn pressing(direction: Direction) -> Self {
        let mut snapshot = Self::default();
        snapshot.press(direction);
        snapshot
    }

    /// Snapshot carrying only the quit signal.
    #[must_use]
    pub fn quit_signal() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }

    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }

    #[must_use]
    pub fn is_pressed(self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Picks the direction to apply against `current`, if any.
    ///
    /// Directions are scanned in [`Direction::PRIORITY`] order and the first
    /// asserted one that does not reverse `current` wins.
    #[must_use]
    pub fn requested_direction(self, current: Direction) -> Option<Direction> {
        Direction::PRIORITY
            .into_iter()
            .find(|&direction| self.is_pressed(direction) && direction_change_is_valid(current, direction))
    }
}

/// Supplies the latest input intents once per loop iteration.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputSnapshot>;
}

/// Terminal keyboard input read through crossterm.
///
/// Terminals report key presses rather than held state, so a direction counts
/// as asserted when it was pressed (or auto-repeated) since the previous poll.
/// A failing event stream (hangup, lost tty) is reported as quit.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> io::Result<InputSnapshot> {
        Ok(drain_events(|| {
            if event::poll(Duration::ZERO)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        }))
    }
}

/// Folds pending events into one snapshot until `next_event` runs dry.
///
/// A read error stops draining and marks quit.
fn drain_events<F>(mut next_event: F) -> InputSnapshot
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    let mut snapshot = InputSnapshot::default();

    loop {
        match next_event() {
            Ok(Some(Event::Key(key))) => apply_key(&mut snapshot, key),
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(error) => {
                warn!(%error, "terminal input failed, quitting");
                snapshot.quit = true;
                break;
            }
        }
    }

    snapshot
}

fn apply_key(snapshot: &mut InputSnapshot, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        snapshot.quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => snapshot.quit = true,
        code => {
            if let Some(direction) = direction_for_key(code) {
                snapshot.press(direction);
            }
        }
    }
}

fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Direction::Right),
        _ => None,
    }
}
