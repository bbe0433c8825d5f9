#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Feature placement system that decorates a maze with keys and hazards.
//!
//! Every accepted placement is proven solvable: walking from the start to the
//! nearest remaining key, repeatedly, and finally to the exit must succeed
//! while the enemy patrol cells are treated as impassable.

use log::{debug, info, warn};
use maze_escape_core::{
    nearest_by_manhattan, BlockedCells, CellCoord, FeatureSet, MazeGrid, PatrolPath,
    PlacementError, TeleporterPair, SEARCH_ORDER,
};
use maze_escape_system_reachability::is_reachable;
use rand::{seq::SliceRandom, Rng};

const TRAP_DENSITY_DIVISOR: usize = 10;
const MIN_TELEPORTER_CANDIDATES: usize = 4;
const MIN_PATROL_LEN: usize = 3;

/// Whether traps count as impassable while proving a placement solvable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrapPolicy {
    /// Only enemy patrol cells block the proof; traps may lie on the route.
    #[default]
    Passable,
    /// Traps are avoided as well, so the proven route never crosses one.
    Blocking,
}

/// Tuning for feature placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Number of keys the player must collect.
    pub required_keys: usize,
    /// Upper bound on traps; the effective count is also capped by free space.
    pub max_trap_count: usize,
    /// Number of teleporter pairs to place when space allows.
    pub teleporter_pair_count: usize,
    /// Full placement attempts before falling back to keys and enemy only.
    pub max_attempts: u32,
    /// Maximum number of steps in the enemy patrol walk.
    pub patrol_steps: usize,
    /// Treatment of traps during the solvability proof.
    pub trap_policy: TrapPolicy,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            required_keys: 3,
            max_trap_count: 8,
            teleporter_pair_count: 2,
            max_attempts: 20,
            patrol_steps: 10,
            trap_policy: TrapPolicy::Passable,
        }
    }
}

/// How a placement was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A full configuration passed the solvability proof on the given attempt (1-based).
    Accepted {
        /// Attempt number that succeeded.
        attempt: u32,
    },
    /// Every full attempt failed; traps and teleporters were dropped.
    Degraded,
}

/// Features placed on a maze together with how they were obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Placed features.
    pub features: FeatureSet,
    /// Whether the full or the degraded configuration was used.
    pub outcome: PlacementOutcome,
}

/// Pure system that samples feature layouts until one is provably solvable.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeaturePlacer {
    config: PlacementConfig,
}

impl FeaturePlacer {
    /// Creates a placer using the supplied configuration.
    #[must_use]
    pub const fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Configuration driving this placer.
    #[must_use]
    pub const fn config(&self) -> PlacementConfig {
        self.config
    }

    /// Places keys, traps, teleporters, and an enemy patrol on `grid`.
    ///
    /// Fails with [`PlacementError::InsufficientCells`] when there is no room
    /// for the requested keys and with [`PlacementError::MazeUnsolvable`] when
    /// even the degraded configuration cannot be proven solvable.
    pub fn place<R>(&self, grid: &MazeGrid, rng: &mut R) -> Result<Placement, PlacementError>
    where
        R: Rng + ?Sized,
    {
        let candidates = candidate_cells(grid);
        if candidates.len() < self.config.required_keys {
            return Err(PlacementError::InsufficientCells {
                requested: self.config.required_keys,
                available: candidates.len(),
            });
        }

        for attempt in 1..=self.config.max_attempts {
            let features = self.sample_full(grid, &candidates, rng);
            if is_solvable(grid, &features, self.config.trap_policy) {
                info!(
                    "placed {} keys, {} traps, {} teleporter pairs on attempt {}",
                    features.keys().len(),
                    features.traps().len(),
                    features.teleporters().len(),
                    attempt
                );
                return Ok(Placement {
                    features,
                    outcome: PlacementOutcome::Accepted { attempt },
                });
            }
            debug!("placement attempt {attempt} rejected: route blocked");
        }

        warn!(
            "no solvable placement after {} attempts, dropping traps and teleporters",
            self.config.max_attempts
        );
        self.place_degraded(grid, &candidates, rng)
    }

    fn sample_full<R>(&self, grid: &MazeGrid, candidates: &[CellCoord], rng: &mut R) -> FeatureSet
    where
        R: Rng + ?Sized,
    {
        let mut pool = candidates.to_vec();
        let keys = take_many(&mut pool, self.config.required_keys, rng);

        let trap_count = self
            .config
            .max_trap_count
            .min(pool.len() / TRAP_DENSITY_DIVISOR);
        let traps = take_many(&mut pool, trap_count, rng);

        let spawn = pool.choose(rng).copied();

        let mut teleporters = Vec::new();
        if pool.len() >= MIN_TELEPORTER_CANDIDATES {
            let pairs = self.config.teleporter_pair_count.min(pool.len() / 2);
            for _ in 0..pairs {
                if let (Some(first), Some(second)) =
                    (take_random(&mut pool, rng), take_random(&mut pool, rng))
                {
                    teleporters.push(TeleporterPair::new(first, second));
                }
            }
        }

        let patrol = spawn.map(|spawn| build_patrol_path(grid, spawn, self.config.patrol_steps, rng));
        FeatureSet::new(keys, traps, teleporters, patrol)
    }

    fn place_degraded<R>(
        &self,
        grid: &MazeGrid,
        candidates: &[CellCoord],
        rng: &mut R,
    ) -> Result<Placement, PlacementError>
    where
        R: Rng + ?Sized,
    {
        let samplings = self.config.max_attempts.max(1);
        for sampling in 1..=samplings {
            let mut pool = candidates.to_vec();
            let keys = take_many(&mut pool, self.config.required_keys, rng);

            if pool.is_empty() {
                let features = FeatureSet::new(keys, Vec::new(), Vec::new(), None);
                if is_solvable(grid, &features, self.config.trap_policy) {
                    return Ok(degraded(features));
                }
                continue;
            }

            pool.shuffle(rng);
            for spawn in pool {
                let patrol = build_patrol_path(grid, spawn, self.config.patrol_steps, rng);
                let features = FeatureSet::new(keys.clone(), Vec::new(), Vec::new(), Some(patrol));
                if is_solvable(grid, &features, self.config.trap_policy) {
                    return Ok(degraded(features));
                }
            }
            debug!("degraded sampling {sampling} found no safe enemy spawn");
        }

        Err(PlacementError::MazeUnsolvable {
            attempts: self.config.max_attempts.saturating_add(samplings),
        })
    }
}

fn degraded(features: FeatureSet) -> Placement {
    Placement {
        features,
        outcome: PlacementOutcome::Degraded,
    }
}

/// Builds the cyclic walk an enemy follows from `spawn`.
///
/// Each step shuffles the four directions and moves to the first unvisited
/// open neighbour, stopping early at a dead end. Walks shorter than three
/// cells are replaced by a two-cell shuttle between the spawn and its first
/// open neighbour.
pub fn build_patrol_path<R>(grid: &MazeGrid, spawn: CellCoord, steps: usize, rng: &mut R) -> PatrolPath
where
    R: Rng + ?Sized,
{
    let mut cells = vec![spawn];
    let mut current = spawn;
    let mut order = SEARCH_ORDER;

    for _ in 0..steps {
        order.shuffle(rng);
        let next = grid
            .open_neighbors_in(current, order)
            .find(|candidate| !cells.contains(candidate));
        match next {
            Some(next) => {
                cells.push(next);
                current = next;
            }
            None => break,
        }
    }

    if cells.len() < MIN_PATROL_LEN {
        cells.truncate(1);
        if let Some(next) = grid.open_neighbors_in(spawn, order).next() {
            cells.push(next);
        }
    }

    PatrolPath::new(cells)
}

/// Orders keys by repeatedly picking the one nearest to the current position.
///
/// Distance is Manhattan; ties go to the key listed first.
#[must_use]
pub fn visiting_order(start: CellCoord, keys: &[CellCoord]) -> Vec<CellCoord> {
    let mut remaining = keys.to_vec();
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = start;

    while let Some(next) = nearest_by_manhattan(current, &remaining) {
        if let Some(index) = remaining.iter().position(|key| *key == next) {
            let _ = remaining.remove(index);
        }
        order.push(next);
        current = next;
    }

    order
}

/// Proves that start, every key in visiting order, and the exit are connected.
#[must_use]
pub fn is_solvable(grid: &MazeGrid, features: &FeatureSet, policy: TrapPolicy) -> bool {
    let mut blocked: BlockedCells = features.patrol_cells();
    if policy == TrapPolicy::Blocking {
        blocked.extend(features.traps().iter().copied());
    }

    let mut current = grid.start();
    for key in visiting_order(current, features.keys()) {
        if !is_reachable(grid, current, key, &blocked) {
            return false;
        }
        current = key;
    }
    is_reachable(grid, current, grid.exit(), &blocked)
}

fn candidate_cells(grid: &MazeGrid) -> Vec<CellCoord> {
    let start = grid.start();
    let exit = grid.exit();
    grid.path_cells()
        .filter(|cell| *cell != start && *cell != exit)
        .collect()
}

fn take_random<R>(pool: &mut Vec<CellCoord>, rng: &mut R) -> Option<CellCoord>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..pool.len());
    Some(pool.swap_remove(index))
}

fn take_many<R>(pool: &mut Vec<CellCoord>, count: usize, rng: &mut R) -> Vec<CellCoord>
where
    R: Rng + ?Sized,
{
    (0..count).map_while(|_| take_random(pool, rng)).collect()
}
