use crate::config::GameConfig;

/// Discrete grid coordinate; the unit of movement and collision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }
}

/// Pixel-aligned rectangle covered by one cell.
///
/// `right` and `bottom` are exclusive edges (`left + size`, `top + size`).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

/// Play-field dimensions and the cell-to-pixel mapping.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridGeometry {
    width: u32,
    length: u32,
    cell_size: u32,
}

impl GridGeometry {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            width: config.field_width,
            length: config.field_length,
            cell_size: config.cell_size.max(1),
        }
    }

    /// Number of cells along one row.
    #[must_use]
    pub fn columns(self) -> i32 {
        i32::try_from(self.width / self.cell_size).unwrap_or(i32::MAX)
    }

    /// Number of cells along one column.
    #[must_use]
    pub fn rows(self) -> i32 {
        i32::try_from(self.length / self.cell_size).unwrap_or(i32::MAX)
    }

    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::try_from(self.columns()).unwrap_or(0) * usize::try_from(self.rows()).unwrap_or(0)
    }

    /// Returns true when `cell` is one of the sampled grid cells.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.column >= 0 && cell.row >= 0 && cell.column < self.columns() && cell.row < self.rows()
    }

    /// Iterates over every grid cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let columns = self.columns();
        (0..self.rows()).flat_map(move |row| (0..columns).map(move |column| Cell { column, row }))
    }

    #[must_use]
    pub fn cell_rect(self, cell: Cell) -> PixelRect {
        let size = i64::from(self.cell_size);
        let left = i64::from(cell.column) * size;
        let top = i64::from(cell.row) * size;

        PixelRect {
            left,
            top,
            right: left + size,
            bottom: top + size,
        }
    }

    /// Returns true when the cell's rectangle breaks a field-boundary inequality.
    ///
    /// The right and bottom field edges count as outside, so the last column
    /// and last row are already out of play.
    #[must_use]
    pub fn is_out_of_field(self, cell: Cell) -> bool {
        let rect = self.cell_rect(cell);

        rect.left < 0
            || rect.right >= i64::from(self.width)
            || rect.top < 0
            || rect.bottom >= i64::from(self.length)
    }
}
