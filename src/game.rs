use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::apple::Apple;
use crate::clock::SimulationClock;
use crate::config::GameConfig;
use crate::grid::{Cell, GridGeometry};
use crate::input::{Direction, InputSnapshot};
use crate::snake::Snake;

/// Session lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    Playing,
    GameOver,
    Terminated,
}

/// What ended play.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverCause {
    /// The head left the play field.
    Boundary,
    /// The snake covers every cell, so the apple had nowhere to go.
    NoFreeCell,
}

#[derive(Debug, Clone, Copy)]
struct GameOver {
    entered_at: Instant,
    cause: GameOverCause,
}

/// Authoritative state for one play-through.
///
/// The snake never dies by running into its own body, and at most one heading
/// change is taken per poll, so two quick turns between advances can fold the
/// head back onto the neck.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: GridGeometry,
    snake: Snake,
    apple: Apple,
    clock: SimulationClock,
    state: SessionState,
    game_over: Option<GameOver>,
    advances: u64,
    rng: StdRng,
}

impl GameSession {
    /// Starts a session with an entropy-seeded apple sequence.
    #[must_use]
    pub fn new(config: &GameConfig, now: Instant) -> Self {
        Self::start(config, StdRng::from_entropy(), now)
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: &GameConfig, seed: u64, now: Instant) -> Self {
        Self::start(config, StdRng::seed_from_u64(seed), now)
    }

    /// Creates a session from an explicit snake and apple layout.
    #[must_use]
    pub fn with_layout(config: &GameConfig, snake: Snake, apple: Apple, seed: u64, now: Instant) -> Self {
        Self {
            config: *config,
            grid: GridGeometry::new(config),
            snake,
            apple,
            clock: SimulationClock::new(config.tick_interval, now),
            state: SessionState::Playing,
            game_over: None,
            advances: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn start(config: &GameConfig, mut rng: StdRng, now: Instant) -> Self {
        let grid = GridGeometry::new(config);
        let snake = Snake::new(Cell::new(0, 0), Direction::Right);
        let spawned = Apple::spawn(&mut rng, grid, &snake, config.max_relocation_attempts);

        let mut session = Self {
            config: *config,
            grid,
            snake,
            apple: spawned.unwrap_or(Apple::at(Cell::new(0, 0))),
            clock: SimulationClock::new(config.tick_interval, now),
            state: SessionState::Playing,
            game_over: None,
            advances: 0,
            rng,
        };

        if spawned.is_err() {
            session.enter_game_over(now, GameOverCause::NoFreeCell);
        } else {
            info!(
                columns = grid.columns(),
                rows = grid.rows(),
                apple = ?session.apple.position(),
                "session started"
            );
        }

        session
    }

    /// Runs one loop iteration's worth of state transitions.
    ///
    /// A quit signal ends the session immediately from any state.
    pub fn poll(&mut self, now: Instant, input: InputSnapshot) -> SessionState {
        if input.quit {
            self.terminate("quit requested");
            return self.state;
        }

        match self.state {
            SessionState::Playing => self.step_playing(now, input),
            SessionState::GameOver => self.step_game_over(now),
            SessionState::Terminated => {}
        }

        self.state
    }

    fn step_playing(&mut self, now: Instant, input: InputSnapshot) {
        if let Some(direction) = input.requested_direction(self.snake.heading()) {
            self.snake.set_heading(direction);
        }

        if self.clock.is_tick_due(now) {
            self.snake.advance();
            self.clock.mark_advanced(now);
            self.advances += 1;
        }

        let head = self.snake.head();
        if self.grid.is_out_of_field(head) {
            self.enter_game_over(now, GameOverCause::Boundary);
        }

        if self.apple.consumed_by(head) {
            let relocated = self.apple.relocate(
                &mut self.rng,
                self.grid,
                &self.snake,
                self.config.max_relocation_attempts,
            );

            match relocated {
                Ok(()) => debug!(
                    length = self.snake.len() + 1,
                    apple = ?self.apple.position(),
                    "apple consumed"
                ),
                Err(error) => {
                    warn!(%error, "apple could not be relocated");
                    self.enter_game_over(now, GameOverCause::NoFreeCell);
                }
            }

            self.snake.mark_growth();
        }
    }

    fn step_game_over(&mut self, now: Instant) {
        let Some(game_over) = self.game_over else {
            return;
        };

        if now.saturating_duration_since(game_over.entered_at) > self.config.game_over_duration {
            self.terminate("game-over display elapsed");
        }
    }

    fn enter_game_over(&mut self, now: Instant, cause: GameOverCause) {
        if self.state != SessionState::Playing {
            return;
        }

        self.state = SessionState::GameOver;
        self.game_over = Some(GameOver {
            entered_at: now,
            cause,
        });

        info!(
            ?cause,
            length = self.snake.len(),
            advances = self.advances,
            head = ?self.snake.head(),
            "game over"
        );
    }

    fn terminate(&mut self, reason: &'static str) {
        if self.state == SessionState::Terminated {
            return;
        }

        self.state = SessionState::Terminated;
        info!(reason, "session terminated");
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn apple(&self) -> Apple {
        self.apple
    }

    #[must_use]
    pub fn grid(&self) -> GridGeometry {
        self.grid
    }

    /// When the session entered game over, if it has.
    #[must_use]
    pub fn game_over_entered_at(&self) -> Option<Instant> {
        self.game_over.map(|game_over| game_over.entered_at)
    }

    #[must_use]
    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.game_over.map(|game_over| game_over.cause)
    }

    /// Time of the most recent snake advance (session start before the first).
    #[must_use]
    pub fn last_advance(&self) -> Instant {
        self.clock.last_advance()
    }

    /// Number of advances applied so far.
    #[must_use]
    pub fn advances(&self) -> u64 {
        self.advances
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{GameOverCause, GameSession, SessionState};
    use crate::apple::Apple;
    use crate::config::GameConfig;
    use crate::grid::Cell;
    use crate::input::{Direction, InputSnapshot};
    use crate::snake::Snake;

    const TICK: Duration = Duration::from_millis(501);

    fn session_with(snake: Snake, apple: Cell, now: Instant) -> GameSession {
        GameSession::with_layout(&GameConfig::default(), snake, Apple::at(apple), 9, now)
    }

    #[test]
    fn new_session_starts_at_origin_heading_right() {
        let now = Instant::now();
        let session = GameSession::new_with_seed(&GameConfig::default(), 1, now);

        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.snake().head(), Cell::new(0, 0));
        assert_eq!(session.snake().heading(), Direction::Right);
        assert_ne!(session.apple().position(), Cell::new(0, 0));
        assert_eq!(session.last_advance(), now);
    }

    #[test]
    fn snake_does_not_move_before_tick_is_due() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(2, 2), Direction::Right), Cell::new(7, 7), start);

        session.poll(start + Duration::from_millis(500), InputSnapshot::default());
        assert_eq!(session.snake().head(), Cell::new(2, 2));

        session.poll(start + TICK, InputSnapshot::default());
        assert_eq!(session.snake().head(), Cell::new(3, 2));
        assert_eq!(session.last_advance(), start + TICK);
        assert_eq!(session.advances(), 1);
    }

    #[test]
    fn eating_apple_grows_on_next_advance() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(1, 1), Direction::Right), Cell::new(2, 1), start);

        session.poll(start + TICK, InputSnapshot::default());
        assert_eq!(session.snake().len(), 1);
        assert_ne!(session.apple().position(), Cell::new(2, 1));
        assert!(!session.snake().occupies(session.apple().position()));
        assert!(session.snake().has_pending_growth());

        session.poll(start + TICK * 2, InputSnapshot::default());
        assert_eq!(session.snake().len(), 2);
    }

    #[test]
    fn leaving_left_edge_ends_play() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(0, 3), Direction::Left), Cell::new(5, 5), start);
        let hit = start + TICK;

        let state = session.poll(hit, InputSnapshot::default());

        assert_eq!(state, SessionState::GameOver);
        assert_eq!(session.game_over_entered_at(), Some(hit));
        assert_eq!(session.game_over_cause(), Some(GameOverCause::Boundary));
    }

    #[test]
    fn reaching_last_column_ends_play() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(8, 3), Direction::Right), Cell::new(5, 5), start);

        session.poll(start + TICK, InputSnapshot::default());

        assert_eq!(session.state(), SessionState::GameOver);
    }

    #[test]
    fn game_over_freezes_simulation() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(0, 3), Direction::Left), Cell::new(5, 5), start);
        session.poll(start + TICK, InputSnapshot::default());
        let frozen_head = session.snake().head();

        session.poll(start + TICK * 3, InputSnapshot::pressing(Direction::Up));

        assert_eq!(session.snake().head(), frozen_head);
        assert_eq!(session.snake().heading(), Direction::Left);
        assert_eq!(session.game_over_entered_at(), Some(start + TICK));
    }

    #[test]
    fn game_over_times_out_to_terminated() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(0, 3), Direction::Left), Cell::new(5, 5), start);
        let hit = start + TICK;
        session.poll(hit, InputSnapshot::default());

        assert_eq!(
            session.poll(hit + Duration::from_secs(5), InputSnapshot::default()),
            SessionState::GameOver
        );
        assert_eq!(
            session.poll(hit + Duration::from_millis(5_100), InputSnapshot::default()),
            SessionState::Terminated
        );
    }

    #[test]
    fn quit_terminates_from_playing_without_moving() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(2, 2), Direction::Right), Cell::new(7, 7), start);

        let state = session.poll(start + TICK, InputSnapshot::quit_signal());

        assert_eq!(state, SessionState::Terminated);
        assert_eq!(session.snake().head(), Cell::new(2, 2));
        assert!(session.is_terminated());
    }

    #[test]
    fn terminated_is_final() {
        let start = Instant::now();
        let mut session = session_with(Snake::new(Cell::new(2, 2), Direction::Right), Cell::new(7, 7), start);
        session.poll(start, InputSnapshot::quit_signal());

        session.poll(start + TICK, InputSnapshot::pressing(Direction::Down));

        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(session.snake().head(), Cell::new(2, 2));
    }

    #[test]
    fn full_board_forces_game_over() {
        let config = GameConfig {
            field_width: 30,
            field_length: 30,
            cell_size: 10,
            ..GameConfig::default()
        };
        let start = Instant::now();
        let mut snake = Snake::from_segments(
            vec![
                Cell::new(1, 0),
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
                Cell::new(2, 2),
                Cell::new(2, 1),
                Cell::new(2, 0),
            ],
            Direction::Down,
        );
        snake.mark_growth();
        let mut session = GameSession::with_layout(&config, snake, Apple::at(Cell::new(1, 1)), 4, start);

        session.poll(start + TICK, InputSnapshot::default());

        assert_eq!(session.snake().head(), Cell::new(1, 1));
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.game_over_cause(), Some(GameOverCause::NoFreeCell));
    }
}
