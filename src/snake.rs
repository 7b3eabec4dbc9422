use std::collections::VecDeque;

use crate::grid::Cell;
use crate::input::{direction_change_is_valid, Direction};

/// Segmented snake body, heading, and pending growth.
///
/// The body is never empty: it starts with one segment and `advance` always
/// pushes a new head before it may pop the tail.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    heading: Direction,
    pending_growth: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided heading.
    #[must_use]
    pub fn new(start: Cell, heading: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            heading,
            pending_growth: false,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Falls back to a single segment at the origin when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, heading: Direction) -> Self {
        if segments.is_empty() {
            return Self::new(Cell::new(0, 0), heading);
        }

        Self {
            body: VecDeque::from(segments),
            heading,
            pending_growth: false,
        }
    }

    /// Changes heading unless `requested` reverses the current one.
    pub fn set_heading(&mut self, requested: Direction) {
        if direction_change_is_valid(self.heading, requested) {
            self.heading = requested;
        }
    }

    /// Moves one cell along the heading, keeping the tail if growth is pending.
    pub fn advance(&mut self) {
        let next_head = self.next_head_position();

        self.body.push_front(next_head);
        if !self.pending_growth {
            let _ = self.body.pop_back();
        }
        self.pending_growth = false;
    }

    /// Queues growth on the next advance.
    pub fn mark_growth(&mut self) {
        self.pending_growth = true;
    }

    /// Returns the head cell for the next advance.
    #[must_use]
    pub fn next_head_position(&self) -> Cell {
        let head = self.head();
        match self.heading {
            Direction::Up => Cell::new(head.column, head.row - 1),
            Direction::Down => Cell::new(head.column, head.row + 1),
            Direction::Left => Cell::new(head.column - 1, head.row),
            Direction::Right => Cell::new(head.column + 1, head.row),
        }
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        // `body` is constructed non-empty and `advance` pushes before popping.
        self.body.front().copied().unwrap_or(Cell::new(0, 0))
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Cell;
    use crate::input::Direction;

    use super::Snake;

    #[test]
    fn snake_moves_one_cell_per_advance() {
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Right);

        snake.advance();

        assert_eq!(snake.head(), Cell::new(1, 0));
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn advance_offsets_per_heading() {
        for (heading, expected) in [
            (Direction::Up, Cell::new(4, 3)),
            (Direction::Down, Cell::new(4, 5)),
            (Direction::Left, Cell::new(3, 4)),
            (Direction::Right, Cell::new(5, 4)),
        ] {
            let mut snake = Snake::new(Cell::new(4, 4), heading);
            snake.advance();
            assert_eq!(snake.head(), expected, "heading {heading:?}");
        }
    }

    #[test]
    fn advance_drops_old_tail() {
        let mut snake = Snake::from_segments(
            vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)],
            Direction::Right,
        );

        snake.advance();

        let body: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(body, vec![Cell::new(3, 0), Cell::new(2, 0), Cell::new(1, 0)]);
    }

    #[test]
    fn growth_keeps_previous_tail_once() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.mark_growth();
        snake.mark_growth();
        assert!(snake.has_pending_growth());

        snake.advance();
        assert_eq!(snake.len(), 2);
        assert!(!snake.has_pending_growth());

        snake.advance();
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn set_heading_rejects_reverse() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Up);

        snake.set_heading(Direction::Down);
        assert_eq!(snake.heading(), Direction::Up);

        snake.set_heading(Direction::Left);
        assert_eq!(snake.heading(), Direction::Left);

        snake.set_heading(Direction::Left);
        assert_eq!(snake.heading(), Direction::Left);
    }

    #[test]
    fn two_turns_between_advances_reverse_the_snake() {
        let mut snake = Snake::from_segments(vec![Cell::new(5, 5), Cell::new(4, 5)], Direction::Right);

        snake.set_heading(Direction::Up);
        snake.set_heading(Direction::Left);
        snake.advance();

        assert_eq!(snake.head(), Cell::new(4, 5));
        assert!(snake.occupies(Cell::new(5, 5)));
    }

    #[test]
    fn empty_segments_fall_back_to_single_cell() {
        let snake = Snake::from_segments(Vec::new(), Direction::Down);

        assert_eq!(snake.len(), 1);
        assert!(!snake.is_empty());
    }
}
