#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Instrumented pathfinding strategies over immutable maze grids.
//!
//! Every strategy answers the same [`SearchQuery`] and reports the path, the
//! number of nodes it explored, and the wall-clock time spent inside the
//! search body. Searches treat walls and the query's blocked cells as
//! impassable; the start cell is always admitted.

mod bfs;
mod bidirectional;
mod depth_limited;
mod dfs;
mod ucs;

use std::time::{Duration, Instant};

use log::debug;
use maze_escape_core::{
    BlockedCells, CellCoord, Direction, MazeGrid, PathResult, SearchAlgorithm, SearchOutcome,
    UnknownAlgorithm,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Depth ceilings and seeding for the search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of steps explored by depth-limited search.
    pub dls_depth_limit: u32,
    /// Iterative deepening runs depth limits `0..ids_max_depth`.
    pub ids_max_depth: u32,
    /// Seed for the generator that shuffles depth-first expansion order.
    pub dfs_seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dls_depth_limit: 50,
            ids_max_depth: 100,
            dfs_seed: 0,
        }
    }
}

/// Endpoints and obstacles for a single search.
#[derive(Clone, Copy, Debug)]
pub struct SearchQuery<'a> {
    grid: &'a MazeGrid,
    start: CellCoord,
    goal: CellCoord,
    blocked: &'a BlockedCells,
}

impl<'a> SearchQuery<'a> {
    /// Creates a query from `start` to `goal` avoiding walls and `blocked`.
    #[must_use]
    pub const fn new(
        grid: &'a MazeGrid,
        start: CellCoord,
        goal: CellCoord,
        blocked: &'a BlockedCells,
    ) -> Self {
        Self {
            grid,
            start,
            goal,
            blocked,
        }
    }

    /// Grid being searched.
    #[must_use]
    pub const fn grid(&self) -> &'a MazeGrid {
        self.grid
    }

    /// Cell the search starts from.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell the search is looking for.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Cells treated as impassable in addition to walls.
    #[must_use]
    pub const fn blocked(&self) -> &'a BlockedCells {
        self.blocked
    }

    fn is_open(&self, cell: CellCoord) -> bool {
        self.grid.is_path(cell) && !self.blocked.contains(cell)
    }

    fn open_step(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        self.grid
            .neighbor(cell, direction)
            .filter(|next| self.is_open(*next))
    }

    fn open_neighbors_in(
        &self,
        cell: CellCoord,
        order: [Direction; 4],
    ) -> impl Iterator<Item = CellCoord> + 'a {
        let blocked = self.blocked;
        self.grid
            .open_neighbors_in(cell, order)
            .filter(move |next| !blocked.contains(*next))
    }
}

/// Raw outcome of a strategy before timing is attached.
#[derive(Debug)]
struct Search {
    path: Option<Vec<CellCoord>>,
    nodes: u64,
    outcome: SearchOutcome,
}

impl Search {
    fn found(path: Vec<CellCoord>, nodes: u64) -> Self {
        Self {
            path: Some(path),
            nodes,
            outcome: SearchOutcome::Found,
        }
    }

    fn unreachable(nodes: u64) -> Self {
        Self {
            path: None,
            nodes,
            outcome: SearchOutcome::Unreachable,
        }
    }

    fn exhausted(nodes: u64, depth_cap: u32) -> Self {
        Self {
            path: None,
            nodes,
            outcome: SearchOutcome::SearchExhausted { depth_cap },
        }
    }
}

/// Result of running one strategy as part of a comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// Strategy that produced the result.
    pub algorithm: SearchAlgorithm,
    /// Path, node count, and timing reported by the strategy.
    pub result: PathResult,
}

/// Runs search strategies and measures them.
///
/// The engine holds only its configuration. Depth-first search seeds a fresh
/// generator from [`SearchConfig::dfs_seed`] on every run, so a query always
/// explores the same way regardless of earlier calls.
#[derive(Clone, Copy, Debug)]
pub struct PathfindingEngine {
    config: SearchConfig,
}

impl Default for PathfindingEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl PathfindingEngine {
    /// Creates an engine using the supplied configuration.
    #[must_use]
    pub const fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Configuration driving this engine.
    #[must_use]
    pub const fn config(&self) -> SearchConfig {
        self.config
    }

    /// Runs `algorithm` on the query.
    ///
    /// Endpoints outside the grid yield an unreachable result without exploring.
    pub fn find(&self, algorithm: SearchAlgorithm, query: &SearchQuery<'_>) -> PathResult {
        let grid = query.grid();
        if !grid.contains(query.start()) || !grid.contains(query.goal()) {
            return PathResult::new(None, 0, Duration::ZERO, SearchOutcome::Unreachable);
        }

        let started = Instant::now();
        let search = match algorithm {
            SearchAlgorithm::Bfs => bfs::search(query),
            SearchAlgorithm::Ucs => ucs::search(query),
            SearchAlgorithm::Dfs => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.dfs_seed);
                dfs::search(query, &mut rng)
            }
            SearchAlgorithm::Dls => depth_limited::search(query, self.config.dls_depth_limit),
            SearchAlgorithm::Ids => depth_limited::deepen(query, self.config.ids_max_depth),
            SearchAlgorithm::Bidirectional => bidirectional::search(query),
        };
        let elapsed = started.elapsed();

        debug!(
            "{} from {} to {}: {:?} after {} nodes in {:?}",
            algorithm,
            query.start(),
            query.goal(),
            search.outcome,
            search.nodes,
            elapsed
        );
        PathResult::new(search.path, search.nodes, elapsed, search.outcome)
    }

    /// Resolves `name` to a strategy and runs it.
    pub fn find_named(
        &self,
        name: &str,
        query: &SearchQuery<'_>,
    ) -> Result<PathResult, UnknownAlgorithm> {
        let algorithm: SearchAlgorithm = name.parse()?;
        Ok(self.find(algorithm, query))
    }

    /// Runs every strategy on the same query, in [`SearchAlgorithm::ALL`] order.
    pub fn compare(&self, query: &SearchQuery<'_>) -> Vec<Comparison> {
        SearchAlgorithm::ALL
            .into_iter()
            .map(|algorithm| Comparison {
                algorithm,
                result: self.find(algorithm, query),
            })
            .collect()
    }
}
