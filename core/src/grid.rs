//! Dense row-major maze storage shared by every system.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CellCoord, Direction, GridError, SEARCH_ORDER};

/// Smallest side length accepted for a maze grid.
pub const MIN_DIMENSION: u32 = 5;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Impassable cell.
    Wall,
    /// Traversable cell.
    Path,
}

/// Verifies that the provided dimensions describe a valid maze.
///
/// Both sides must be odd and at least [`MIN_DIMENSION`] so that the start
/// cell `(1, 1)` and the exit `(width - 2, height - 2)` land on the room lattice.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), GridError> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION || width % 2 == 0 || height % 2 == 0 {
        return Err(GridError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Immutable maze produced once per generation.
///
/// Cells outside the grid are reported as walls so callers never need to
/// bounds-check before asking about adjacency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl MazeGrid {
    /// Parses a grid from text rows where `#` marks a wall and `.` or a space marks a path.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let first_width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let width = u32::try_from(first_width).unwrap_or(u32::MAX);
        validate_dimensions(width, height)?;

        let mut cells = Vec::with_capacity(first_width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != first_width {
                return Err(GridError::RaggedRow {
                    row: row_index,
                    expected: first_width,
                    found,
                });
            }

            for (column, glyph) in row.chars().enumerate() {
                let state = match glyph {
                    '#' => CellState::Wall,
                    '.' | ' ' => CellState::Path,
                    other => {
                        return Err(GridError::UnknownGlyph {
                            glyph: other,
                            row: row_index,
                            column,
                        })
                    }
                };
                cells.push(state);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell where the player starts.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        CellCoord::new(1, 1)
    }

    /// Cell the player must reach to escape.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        CellCoord::new(self.width - 2, self.height - 2)
    }

    /// Total number of cells, walls included.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// State of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is a wall. Out-of-bounds cells count as walls.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        self.state(cell) != Some(CellState::Path)
    }

    /// Coordinate-pair form of [`MazeGrid::is_wall`].
    #[must_use]
    pub fn is_wall_at(&self, x: u32, y: u32) -> bool {
        self.is_wall(CellCoord::new(x, y))
    }

    /// Reports whether the cell is traversable.
    #[must_use]
    pub fn is_path(&self, cell: CellCoord) -> bool {
        !self.is_wall(cell)
    }

    /// Row-major offset of the cell, if it lies within the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        dense_index(self.width, self.height, cell)
    }

    /// Inverse of [`MazeGrid::index`].
    #[must_use]
    pub fn coord_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cells.len() {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let column = u32::try_from(index % width).ok()?;
        let row = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(column, row))
    }

    /// Adjacent in-bounds cell in the given direction, regardless of its state.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction).filter(|next| self.contains(*next))
    }

    /// Traversable neighbours of `cell` in canonical search order.
    #[must_use]
    pub fn open_neighbors(&self, cell: CellCoord) -> Neighbors {
        self.open_neighbors_in(cell, SEARCH_ORDER)
    }

    /// Traversable neighbours of `cell`, visited in the supplied direction order.
    #[must_use]
    pub fn open_neighbors_in(&self, cell: CellCoord, order: [Direction; 4]) -> Neighbors {
        let mut neighbors = Neighbors::default();
        for direction in order {
            if let Some(next) = self.neighbor(cell, direction) {
                if self.is_path(next) {
                    neighbors.push(next);
                }
            }
        }
        neighbors
    }

    /// Iterator over every traversable cell in row-major order.
    pub fn path_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Path)
            .filter_map(|(index, _)| self.coord_at(index))
    }

    /// Iterator over every room cell (odd column and odd row) that is traversable.
    pub fn room_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.path_cells()
            .filter(|cell| cell.column() % 2 == 1 && cell.row() % 2 == 1)
    }
}

/// Mutable grid used while a maze is being carved.
///
/// Consumed by [`GridCanvas::finish`]; the resulting [`MazeGrid`] is never
/// modified again.
#[derive(Clone, Debug)]
pub struct GridCanvas {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl GridCanvas {
    /// Creates a canvas of the given dimensions where every cell is a wall.
    pub fn walled(width: u32, height: u32) -> Result<Self, GridError> {
        validate_dimensions(width, height)?;
        let capacity = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| GridError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Wall; capacity],
        })
    }

    /// Number of columns in the canvas.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the canvas.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell lies strictly inside the border.
    #[must_use]
    pub const fn is_interior(&self, cell: CellCoord) -> bool {
        cell.column() > 0
            && cell.row() > 0
            && cell.column() < self.width - 1
            && cell.row() < self.height - 1
    }

    /// Reports whether the cell is a wall. Out-of-bounds cells count as walls.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        dense_index(self.width, self.height, cell)
            .and_then(|index| self.cells.get(index))
            .map_or(true, |state| *state == CellState::Wall)
    }

    /// Turns the cell into a path. Out-of-bounds cells are ignored.
    pub fn carve(&mut self, cell: CellCoord) {
        if let Some(index) = dense_index(self.width, self.height, cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = CellState::Path;
            }
        }
    }

    /// Copies the current canvas into an immutable grid without consuming it.
    #[must_use]
    pub fn snapshot(&self) -> MazeGrid {
        self.clone().finish()
    }

    /// Freezes the canvas into an immutable grid.
    #[must_use]
    pub fn finish(self) -> MazeGrid {
        MazeGrid {
            width: self.width,
            height: self.height,
            cells: self.cells,
        }
    }
}

/// Set of cells that searches must treat as impassable in addition to walls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockedCells {
    cells: HashSet<CellCoord>,
}

impl BlockedCells {
    /// Creates an empty blocked set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether the cell is blocked.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Blocks the cell, returning `false` if it was already blocked.
    pub fn insert(&mut self, cell: CellCoord) -> bool {
        self.cells.insert(cell)
    }

    /// Number of blocked cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is blocked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterator over the blocked cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<CellCoord> for BlockedCells {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<CellCoord> for BlockedCells {
    fn extend<I: IntoIterator<Item = CellCoord>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

/// Fixed-capacity iterator over up to four neighbouring cells.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<CellCoord>; 4],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }
}

fn dense_index(width: u32, height: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= width || cell.row() >= height {
        return None;
    }
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    let width = usize::try_from(width).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
