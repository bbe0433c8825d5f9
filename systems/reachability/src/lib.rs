#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first reachability queries over immutable maze grids.
//!
//! The traversal treats walls and any caller-supplied blocked cells as
//! impassable. The start cell is always admitted, even when it appears in the
//! blocked set, so a player standing on a hazard can still be routed away from
//! it.

use std::collections::VecDeque;

use maze_escape_core::{BlockedCells, CellCoord, MazeGrid};

/// Dense visited flags indexed by grid position.
#[derive(Clone, Debug)]
pub struct Visited {
    width: u32,
    height: u32,
    marks: Vec<bool>,
}

impl Visited {
    /// Creates an empty visited set sized to the grid.
    #[must_use]
    pub fn new(grid: &MazeGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            marks: vec![false; grid.cell_count()],
        }
    }

    /// Marks the cell, returning `true` if it had not been visited before.
    ///
    /// Out-of-bounds cells are never recorded.
    pub fn insert(&mut self, cell: CellCoord) -> bool {
        match slot(self.width, self.height, cell).and_then(|index| self.marks.get_mut(index)) {
            Some(mark) if !*mark => {
                *mark = true;
                true
            }
            _ => false,
        }
    }

    /// Clears the mark on the cell.
    pub fn remove(&mut self, cell: CellCoord) {
        if let Some(mark) =
            slot(self.width, self.height, cell).and_then(|index| self.marks.get_mut(index))
        {
            *mark = false;
        }
    }

    /// Reports whether the cell has been visited.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        slot(self.width, self.height, cell)
            .and_then(|index| self.marks.get(index))
            .copied()
            .unwrap_or(false)
    }
}

/// Dense parent links recorded while a search discovers cells.
#[derive(Clone, Debug)]
pub struct Predecessors {
    width: u32,
    height: u32,
    links: Vec<Option<CellCoord>>,
}

impl Predecessors {
    /// Creates an empty predecessor map sized to the grid.
    #[must_use]
    pub fn new(grid: &MazeGrid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            links: vec![None; grid.cell_count()],
        }
    }

    /// Records `parent` as the cell from which `cell` was reached.
    pub fn link(&mut self, cell: CellCoord, parent: CellCoord) {
        if let Some(entry) =
            slot(self.width, self.height, cell).and_then(|index| self.links.get_mut(index))
        {
            *entry = Some(parent);
        }
    }

    /// Cell from which `cell` was reached, if any.
    #[must_use]
    pub fn parent(&self, cell: CellCoord) -> Option<CellCoord> {
        slot(self.width, self.height, cell)
            .and_then(|index| self.links.get(index))
            .copied()
            .flatten()
    }

    /// Follows parent links back to the root and returns the chain root-first.
    ///
    /// The walk is bounded by the grid size so a corrupted map cannot loop forever.
    #[must_use]
    pub fn trace(&self, cell: CellCoord) -> Vec<CellCoord> {
        let mut chain = vec![cell];
        let mut current = cell;
        while let Some(parent) = self.parent(current) {
            if chain.len() > self.links.len() {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }
}

/// Breadth-first traversal yielding cells in dequeue order.
///
/// Cells are marked visited when enqueued, so each reachable cell is yielded
/// exactly once. Neighbours are expanded in canonical search order.
#[derive(Debug)]
pub struct BreadthFirst<'a> {
    grid: &'a MazeGrid,
    blocked: &'a BlockedCells,
    queue: VecDeque<CellCoord>,
    visited: Visited,
    predecessors: Predecessors,
}

impl<'a> BreadthFirst<'a> {
    /// Starts a traversal from `start`. Out-of-bounds starts yield nothing.
    #[must_use]
    pub fn new(grid: &'a MazeGrid, start: CellCoord, blocked: &'a BlockedCells) -> Self {
        let mut visited = Visited::new(grid);
        let mut queue = VecDeque::new();
        if visited.insert(start) {
            queue.push_back(start);
        }

        Self {
            grid,
            blocked,
            queue,
            visited,
            predecessors: Predecessors::new(grid),
        }
    }

    /// Parent links discovered so far.
    #[must_use]
    pub fn predecessors(&self) -> &Predecessors {
        &self.predecessors
    }

    /// Consumes the traversal, yielding its parent links.
    #[must_use]
    pub fn into_predecessors(self) -> Predecessors {
        self.predecessors
    }
}

impl Iterator for BreadthFirst<'_> {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.queue.pop_front()?;
        for next in self.grid.open_neighbors(cell) {
            if self.blocked.contains(next) {
                continue;
            }
            if self.visited.insert(next) {
                self.predecessors.link(next, cell);
                self.queue.push_back(next);
            }
        }
        Some(cell)
    }
}

/// Reports whether `goal` can be reached from `start` without crossing walls or blocked cells.
#[must_use]
pub fn is_reachable(
    grid: &MazeGrid,
    start: CellCoord,
    goal: CellCoord,
    blocked: &BlockedCells,
) -> bool {
    if !grid.contains(start) || !grid.contains(goal) {
        return false;
    }
    BreadthFirst::new(grid, start, blocked).any(|cell| cell == goal)
}

/// Every cell reachable from `start`, in breadth-first order.
#[must_use]
pub fn reachable_cells(
    grid: &MazeGrid,
    start: CellCoord,
    blocked: &BlockedCells,
) -> Vec<CellCoord> {
    if !grid.contains(start) {
        return Vec::new();
    }
    BreadthFirst::new(grid, start, blocked).collect()
}

/// Number of steps on a shortest route from `start` to `goal`.
#[must_use]
pub fn shortest_distance(
    grid: &MazeGrid,
    start: CellCoord,
    goal: CellCoord,
    blocked: &BlockedCells,
) -> Option<u32> {
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }

    let mut walk = BreadthFirst::new(grid, start, blocked);
    if !walk.by_ref().any(|cell| cell == goal) {
        return None;
    }
    let cells = walk.predecessors().trace(goal).len();
    u32::try_from(cells.saturating_sub(1)).ok()
}

fn slot(width: u32, height: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= width || cell.row() >= height {
        return None;
    }
    let width = usize::try_from(width).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
