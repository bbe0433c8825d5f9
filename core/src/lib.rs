#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Escape engine.
//!
//! This crate defines the value types that connect the pure systems, the
//! authoritative world, and adapters. Generation produces a [`MazeGrid`],
//! placement decorates it with a [`FeatureSet`], and the pathfinding engine
//! answers queries with [`PathResult`] values. None of these types hold
//! behaviour that mutates a grid after it has been generated.

mod grid;

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use grid::{
    validate_dimensions, BlockedCells, CellState, GridCanvas, MazeGrid, Neighbors, MIN_DIMENSION,
};

/// Canonical neighbour order used by every search strategy: down, right, up, left.
pub const SEARCH_ORDER: [Direction; 4] = [
    Direction::South,
    Direction::East,
    Direction::North,
    Direction::West,
];

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (the `x` coordinate).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (the `y` coordinate).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Adjacent cell in the given direction, or `None` when it would underflow.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Direction::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }

    /// Direction leading from `self` to an orthogonally adjacent `other`.
    #[must_use]
    pub fn direction_to(self, other: CellCoord) -> Option<Direction> {
        let column_diff = self.column.abs_diff(other.column);
        let row_diff = self.row.abs_diff(other.row);
        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if other.column > self.column {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if other.row > self.row {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Returns the candidate closest to `origin` by Manhattan distance.
///
/// Ties resolve to the earliest candidate in slice order.
#[must_use]
pub fn nearest_by_manhattan(origin: CellCoord, candidates: &[CellCoord]) -> Option<CellCoord> {
    candidates
        .iter()
        .copied()
        .min_by_key(|candidate| origin.manhattan_distance(*candidate))
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::North => "up",
            Self::East => "right",
            Self::South => "down",
            Self::West => "left",
        };
        f.write_str(label)
    }
}

/// Two teleporter pads that send the player to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeleporterPair {
    first: CellCoord,
    second: CellCoord,
}

impl TeleporterPair {
    /// Links two distinct cells.
    #[must_use]
    pub const fn new(first: CellCoord, second: CellCoord) -> Self {
        Self { first, second }
    }

    /// First pad of the pair.
    #[must_use]
    pub const fn first(&self) -> CellCoord {
        self.first
    }

    /// Second pad of the pair.
    #[must_use]
    pub const fn second(&self) -> CellCoord {
        self.second
    }

    /// Destination reached by stepping on `cell`, if `cell` is one of the pads.
    #[must_use]
    pub fn partner(&self, cell: CellCoord) -> Option<CellCoord> {
        if cell == self.first {
            Some(self.second)
        } else if cell == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Ordered sequence of adjacent cells an enemy walks, one step per tick.
///
/// The walk is cyclic: after the last cell the enemy returns to the first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolPath {
    cells: Vec<CellCoord>,
}

impl PatrolPath {
    /// Creates a patrol path starting at its first cell.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>) -> Self {
        Self { cells }
    }

    /// Cells of the patrol in walking order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Cell where the enemy spawns.
    #[must_use]
    pub fn spawn(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Number of cells in the patrol.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the patrol holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index that follows `index` on the cyclic walk.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        (index + 1) % self.cells.len()
    }

    /// Cell stored at `index`, if any.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        self.cells.get(index).copied()
    }

    /// Reports whether the patrol passes through `cell`.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }
}

/// Collectibles and hazards placed on a maze.
///
/// Keys, traps, and teleporter pads are pairwise disjoint and never occupy the
/// start or exit cell. Key pickup mutates the set; everything else is replaced
/// wholesale when a new placement is produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    keys: Vec<CellCoord>,
    traps: Vec<CellCoord>,
    teleporters: Vec<TeleporterPair>,
    patrol: Option<PatrolPath>,
}

impl FeatureSet {
    /// Assembles a feature set from its parts.
    #[must_use]
    pub fn new(
        keys: Vec<CellCoord>,
        traps: Vec<CellCoord>,
        teleporters: Vec<TeleporterPair>,
        patrol: Option<PatrolPath>,
    ) -> Self {
        Self {
            keys,
            traps,
            teleporters,
            patrol,
        }
    }

    /// Keys still waiting to be collected.
    #[must_use]
    pub fn keys(&self) -> &[CellCoord] {
        &self.keys
    }

    /// Trap cells.
    #[must_use]
    pub fn traps(&self) -> &[CellCoord] {
        &self.traps
    }

    /// Teleporter pairs.
    #[must_use]
    pub fn teleporters(&self) -> &[TeleporterPair] {
        &self.teleporters
    }

    /// Enemy patrol, absent when the maze had no room for an enemy.
    #[must_use]
    pub fn patrol(&self) -> Option<&PatrolPath> {
        self.patrol.as_ref()
    }

    /// Reports whether a key lies on `cell`.
    #[must_use]
    pub fn has_key(&self, cell: CellCoord) -> bool {
        self.keys.contains(&cell)
    }

    /// Reports whether `cell` is a trap.
    #[must_use]
    pub fn is_trap(&self, cell: CellCoord) -> bool {
        self.traps.contains(&cell)
    }

    /// Destination reached by stepping onto a teleporter pad at `cell`.
    #[must_use]
    pub fn teleport_destination(&self, cell: CellCoord) -> Option<CellCoord> {
        self.teleporters.iter().find_map(|pair| pair.partner(cell))
    }

    /// Removes the key at `cell`, returning whether one was present.
    pub fn remove_key(&mut self, cell: CellCoord) -> bool {
        match self.keys.iter().position(|key| *key == cell) {
            Some(index) => {
                let _ = self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    /// Every cell on the enemy patrol as a blocked set.
    #[must_use]
    pub fn patrol_cells(&self) -> BlockedCells {
        self.patrol
            .iter()
            .flat_map(|patrol| patrol.cells().iter().copied())
            .collect()
    }

    /// Every trap cell as a blocked set.
    #[must_use]
    pub fn hazards(&self) -> BlockedCells {
        self.traps.iter().copied().collect()
    }
}

/// Search strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchAlgorithm {
    /// Breadth-first search.
    Bfs,
    /// Uniform-cost search.
    Ucs,
    /// Depth-first search with shuffled expansion order.
    Dfs,
    /// Depth-limited search.
    Dls,
    /// Iterative-deepening search.
    Ids,
    /// Bidirectional breadth-first search.
    Bidirectional,
}

impl SearchAlgorithm {
    /// Every strategy, in comparison order.
    pub const ALL: [SearchAlgorithm; 6] = [
        Self::Bfs,
        Self::Ucs,
        Self::Dfs,
        Self::Dls,
        Self::Ids,
        Self::Bidirectional,
    ];

    /// Display name of the strategy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Ucs => "UCS",
            Self::Dfs => "DFS",
            Self::Dls => "DLS",
            Self::Ids => "IDS",
            Self::Bidirectional => "Bidirectional",
        }
    }

    /// Reports whether the strategy always returns a shortest path when one exists.
    #[must_use]
    pub const fn guarantees_shortest(self) -> bool {
        matches!(self, Self::Bfs | Self::Ucs | Self::Ids | Self::Bidirectional)
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownAlgorithm(trimmed.to_owned()))
    }
}

/// How a search terminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// A path to the goal was found.
    Found,
    /// The frontier emptied without reaching the goal.
    Unreachable,
    /// A depth-bounded search hit its cap before finding the goal.
    SearchExhausted {
        /// Depth ceiling that cut the search short.
        depth_cap: u32,
    },
}

/// Result of a single pathfinding query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    path: Option<Vec<CellCoord>>,
    nodes_explored: u64,
    elapsed: Duration,
    outcome: SearchOutcome,
}

impl PathResult {
    /// Assembles a path result.
    #[must_use]
    pub fn new(
        path: Option<Vec<CellCoord>>,
        nodes_explored: u64,
        elapsed: Duration,
        outcome: SearchOutcome,
    ) -> Self {
        Self {
            path,
            nodes_explored,
            elapsed,
            outcome,
        }
    }

    /// Cells from start to goal inclusive, or `None` when no path was found.
    #[must_use]
    pub fn path(&self) -> Option<&[CellCoord]> {
        self.path.as_deref()
    }

    /// Number of cells on the path, or `None` when no path was found.
    #[must_use]
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }

    /// Number of nodes dequeued or expanded by the search.
    #[must_use]
    pub const fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    /// Wall-clock time spent inside the search.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// How the search terminated.
    #[must_use]
    pub const fn outcome(&self) -> SearchOutcome {
        self.outcome
    }

    /// Consumes the result, yielding the path.
    #[must_use]
    pub fn into_path(self) -> Option<Vec<CellCoord>> {
        self.path
    }
}

/// Commands that mutate the authoritative game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Attempts to move the player one cell.
    MovePlayer {
        /// Direction of travel.
        direction: Direction,
    },
    /// Advances the game clock by one tick.
    Tick,
    /// Spends moves to learn which way the current objective lies.
    RequestHint,
    /// Restarts on the same maze with freshly placed features.
    Reset,
    /// Generates a new maze and places features on it.
    NewMaze,
}

/// Reason a game was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossCause {
    /// The player stepped on a trap.
    Trap,
    /// The player and the enemy occupied the same cell.
    Caught,
    /// The move budget ran out.
    OutOfMoves,
}

/// Progress of the current game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The player is still inside the maze.
    #[default]
    Playing,
    /// The player reached the exit holding every key.
    Won,
    /// The game ended in defeat.
    Lost {
        /// What ended the game.
        cause: LossCause,
    },
}

/// Events emitted by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// The player moved to an adjacent cell.
    PlayerMoved {
        /// Cell the player left.
        from: CellCoord,
        /// Cell the player entered.
        to: CellCoord,
    },
    /// A move was refused because the target cell is not traversable.
    MoveRejected {
        /// Direction that was refused.
        direction: Direction,
    },
    /// The player picked up a key.
    KeyCollected {
        /// Cell that held the key.
        cell: CellCoord,
        /// Keys still on the board.
        remaining: usize,
    },
    /// A teleporter pad moved the player to its partner.
    Teleported {
        /// Pad the player stepped on.
        from: CellCoord,
        /// Partner pad the player arrived at.
        to: CellCoord,
    },
    /// The player stepped on a trap.
    TrapTriggered {
        /// Trap cell.
        cell: CellCoord,
    },
    /// The enemy and the player met.
    PlayerCaught {
        /// Cell where they met.
        cell: CellCoord,
    },
    /// The enemy advanced one patrol step.
    EnemyAdvanced {
        /// Cell the enemy left.
        from: CellCoord,
        /// Cell the enemy entered.
        to: CellCoord,
    },
    /// The player reached the exit with every key.
    Escaped {
        /// Moves spent, hints included.
        moves: u32,
    },
    /// A hint was granted.
    HintGiven {
        /// Dominant direction toward the objective.
        direction: Direction,
        /// Objective the hint points at.
        target: CellCoord,
    },
    /// A hint was refused because the budget cannot cover it.
    HintRejected {
        /// Moves a hint costs.
        cost: u32,
        /// Moves left in the budget.
        remaining: u32,
    },
    /// The move budget was used up.
    MoveBudgetExhausted {
        /// Moves spent, hints included.
        moves: u32,
    },
    /// A new maze replaced the previous one.
    MazeGenerated {
        /// Width of the new maze.
        width: u32,
        /// Height of the new maze.
        height: u32,
    },
    /// Features were re-placed on the current maze and the player restarted.
    GameReset,
}

/// Errors raised while constructing or validating a grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width and height must both be odd and at least five.
    #[error("maze dimensions {width}x{height} must be odd and at least {MIN_DIMENSION}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A text row did not match the width of the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A text row contained a character that is neither wall nor path.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
}

/// Errors raised while placing features onto a maze.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The maze has fewer free cells than keys requested.
    #[error("requested {requested} keys but only {available} free cells exist")]
    InsufficientCells {
        /// Number of keys requested.
        requested: usize,
        /// Number of free cells available.
        available: usize,
    },
    /// Even the degraded keys-and-enemy configuration could not be made solvable.
    #[error("maze is unsolvable after {attempts} placement attempts")]
    MazeUnsolvable {
        /// Number of placement attempts made before giving up.
        attempts: u32,
    },
}

/// A search strategy name that does not match any known algorithm.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown search algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);
