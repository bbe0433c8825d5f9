#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Maze Escape.
//!
//! The world owns the immutable maze, the mutable feature set, the player, the
//! enemy, and the move budget. Everything changes through [`apply`], which
//! reports what happened as [`Event`] values; read access goes through the
//! [`query`] module.

use log::{debug, info};
use maze_escape_core::{
    BlockedCells, CellCoord, Command, Direction, Event, FeatureSet, GameStatus, GridError,
    LossCause, MazeGrid, PathResult, PlacementError, SearchAlgorithm,
};
use maze_escape_system_generation::{GenerationConfig, MazeGenerator};
use maze_escape_system_pathfinding::{Comparison, PathfindingEngine, SearchConfig, SearchQuery};
use maze_escape_system_placement::{FeaturePlacer, PlacementConfig, PlacementOutcome};
use maze_escape_system_reachability::shortest_distance;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Parameters for building and running a game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Maze width in cells; odd and at least five.
    pub width: u32,
    /// Maze height in cells; odd and at least five.
    pub height: u32,
    /// Seed for every random decision the world makes.
    pub seed: u64,
    /// Maze generation tuning.
    pub generation: GenerationConfig,
    /// Feature placement tuning.
    pub placement: PlacementConfig,
    /// Search tuning for solutions and comparisons.
    pub search: SearchConfig,
    /// Ticks between enemy steps.
    pub enemy_move_interval: u32,
    /// Budget multiplier applied to the cell count of the shortest start-to-exit path.
    pub move_budget_factor: u32,
    /// Moves deducted for each hint.
    pub hint_cost: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 35,
            height: 35,
            seed: 0,
            generation: GenerationConfig::default(),
            placement: PlacementConfig::default(),
            search: SearchConfig::default(),
            enemy_move_interval: 5,
            move_budget_factor: 3,
            hint_cost: 10,
        }
    }
}

/// Errors raised while building a maze or placing its features.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The maze could not be generated.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Features could not be placed on the maze.
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Moves spent against the budget for the current game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveBudget {
    used: u32,
    limit: Option<u32>,
}

impl MoveBudget {
    /// Moves spent so far, hints included.
    #[must_use]
    pub const fn used(&self) -> u32 {
        self.used
    }

    /// Maximum number of moves, or `None` when the exit is unreachable and no limit applies.
    #[must_use]
    pub const fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Moves still available, or `None` when unlimited.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.limit.map(|limit| limit.saturating_sub(self.used))
    }

    fn can_afford(&self, cost: u32) -> bool {
        self.limit
            .map_or(true, |limit| self.used.saturating_add(cost) <= limit)
    }

    fn is_exhausted(&self) -> bool {
        self.limit.map_or(false, |limit| self.used >= limit)
    }
}

/// Represents the authoritative Maze Escape game state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    rng: ChaCha8Rng,
    engine: PathfindingEngine,
    grid: MazeGrid,
    features: FeatureSet,
    placement: Option<PlacementOutcome>,
    player: CellCoord,
    enemy_index: usize,
    ticks_since_enemy_step: u32,
    budget: MoveBudget,
    status: GameStatus,
}

impl World {
    /// Generates a maze and places features using the configuration's seed.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = MazeGenerator::new(config.generation).generate(
            config.width,
            config.height,
            &mut rng,
        )?;
        let placement = FeaturePlacer::new(config.placement).place(&grid, &mut rng)?;
        info!(
            "new {}x{} maze from seed {}",
            config.width, config.height, config.seed
        );

        let mut world = Self::with_layout(config, grid, placement.features);
        world.rng = rng;
        world.placement = Some(placement.outcome);
        Ok(world)
    }

    /// Starts a game on a prepared maze and feature set.
    ///
    /// The configuration's dimensions and placement tuning only apply to later
    /// [`Command::Reset`] and [`Command::NewMaze`] commands.
    #[must_use]
    pub fn with_layout(config: WorldConfig, grid: MazeGrid, features: FeatureSet) -> Self {
        let budget = MoveBudget {
            used: 0,
            limit: budget_limit(&grid, &features, config.move_budget_factor),
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            engine: PathfindingEngine::new(config.search),
            player: grid.start(),
            grid,
            features,
            placement: None,
            enemy_index: 0,
            ticks_since_enemy_step: 0,
            budget,
            status: GameStatus::Playing,
            config,
        }
    }

    /// Searches from the player to the current objective, avoiding traps.
    pub fn solve(&self, algorithm: SearchAlgorithm) -> PathResult {
        let hazards = self.features.hazards();
        let goal = query::objective(self);
        let search = SearchQuery::new(&self.grid, self.player, goal, &hazards);
        self.engine.find(algorithm, &search)
    }

    /// Runs every search strategy from the player to the current objective.
    pub fn compare(&self) -> Vec<Comparison> {
        let hazards = self.features.hazards();
        let goal = query::objective(self);
        let search = SearchQuery::new(&self.grid, self.player, goal, &hazards);
        self.engine.compare(&search)
    }

    fn enemy_cell(&self) -> Option<CellCoord> {
        self.features
            .patrol()
            .and_then(|patrol| patrol.cell_at(self.enemy_index))
    }

    fn lose(&mut self, cause: LossCause) {
        debug!("game lost: {cause:?}");
        self.status = GameStatus::Lost { cause };
    }

    fn restart_on(&mut self, grid: MazeGrid, features: FeatureSet, outcome: PlacementOutcome) {
        self.budget = MoveBudget {
            used: 0,
            limit: budget_limit(&grid, &features, self.config.move_budget_factor),
        };
        self.player = grid.start();
        self.grid = grid;
        self.features = features;
        self.placement = Some(outcome);
        self.enemy_index = 0;
        self.ticks_since_enemy_step = 0;
        self.status = GameStatus::Playing;
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.player;
        let Some(to) = self
            .grid
            .neighbor(from, direction)
            .filter(|cell| self.grid.is_path(*cell))
        else {
            out_events.push(Event::MoveRejected { direction });
            return;
        };

        self.player = to;
        self.budget.used = self.budget.used.saturating_add(1);
        out_events.push(Event::PlayerMoved { from, to });

        if self.features.is_trap(to) {
            out_events.push(Event::TrapTriggered { cell: to });
            self.lose(LossCause::Trap);
            return;
        }

        if self.enemy_cell() == Some(to) {
            out_events.push(Event::PlayerCaught { cell: to });
            self.lose(LossCause::Caught);
            return;
        }

        if self.features.remove_key(to) {
            out_events.push(Event::KeyCollected {
                cell: to,
                remaining: self.features.keys().len(),
            });
        } else if let Some(destination) = self.features.teleport_destination(to) {
            self.player = destination;
            out_events.push(Event::Teleported {
                from: to,
                to: destination,
            });
        }

        if self.player == self.grid.exit() && self.features.keys().is_empty() {
            info!("player escaped after {} moves", self.budget.used);
            self.status = GameStatus::Won;
            out_events.push(Event::Escaped {
                moves: self.budget.used,
            });
            return;
        }

        self.check_budget(out_events);
    }

    fn advance_enemy(&mut self, out_events: &mut Vec<Event>) {
        self.ticks_since_enemy_step = self.ticks_since_enemy_step.saturating_add(1);
        if self.ticks_since_enemy_step < self.config.enemy_move_interval {
            return;
        }
        self.ticks_since_enemy_step = 0;

        let Some(patrol) = self.features.patrol() else {
            return;
        };
        if patrol.len() < 2 {
            return;
        }

        let next_index = patrol.next_index(self.enemy_index);
        let (Some(from), Some(to)) = (patrol.cell_at(self.enemy_index), patrol.cell_at(next_index))
        else {
            return;
        };
        self.enemy_index = next_index;
        out_events.push(Event::EnemyAdvanced { from, to });

        if to == self.player {
            out_events.push(Event::PlayerCaught { cell: to });
            self.lose(LossCause::Caught);
        }
    }

    fn give_hint(&mut self, out_events: &mut Vec<Event>) {
        let cost = self.config.hint_cost;
        if !self.budget.can_afford(cost) {
            out_events.push(Event::HintRejected {
                cost,
                remaining: self.budget.remaining().unwrap_or(u32::MAX),
            });
            return;
        }

        self.budget.used = self.budget.used.saturating_add(cost);
        out_events.push(Event::HintGiven {
            direction: query::hint_direction(self),
            target: query::objective(self),
        });
        self.check_budget(out_events);
    }

    fn check_budget(&mut self, out_events: &mut Vec<Event>) {
        if self.budget.is_exhausted() {
            out_events.push(Event::MoveBudgetExhausted {
                moves: self.budget.used,
            });
            self.lose(LossCause::OutOfMoves);
        }
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let placement = FeaturePlacer::new(self.config.placement).place(&self.grid, &mut self.rng)?;
        let grid = self.grid.clone();
        self.restart_on(grid, placement.features, placement.outcome);
        out_events.push(Event::GameReset);
        Ok(())
    }

    fn regenerate(&mut self, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
        let WorldConfig { width, height, .. } = self.config;
        let grid = MazeGenerator::new(self.config.generation).generate(width, height, &mut self.rng)?;
        let placement = FeaturePlacer::new(self.config.placement).place(&grid, &mut self.rng)?;
        info!("regenerated {width}x{height} maze");
        self.restart_on(grid, placement.features, placement.outcome);
        out_events.push(Event::MazeGenerated { width, height });
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Movement, ticks, and hints are ignored once the game is won or lost.
/// Failed resets leave the previous game untouched.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) -> Result<(), WorldError> {
    let playing = world.status == GameStatus::Playing;
    match command {
        Command::MovePlayer { direction } if playing => world.move_player(direction, out_events),
        Command::Tick if playing => world.advance_enemy(out_events),
        Command::RequestHint if playing => world.give_hint(out_events),
        Command::MovePlayer { .. } | Command::Tick | Command::RequestHint => {}
        Command::Reset => world.reset(out_events)?,
        Command::NewMaze => world.regenerate(out_events)?,
    }
    Ok(())
}

/// Budget scaled from the cell count of the shortest start-to-exit route that avoids traps.
///
/// Falls back to the route through traps when they cut the exit off.
fn budget_limit(grid: &MazeGrid, features: &FeatureSet, factor: u32) -> Option<u32> {
    let (start, exit) = (grid.start(), grid.exit());
    let steps = shortest_distance(grid, start, exit, &features.hazards())
        .or_else(|| shortest_distance(grid, start, exit, &BlockedCells::new()))?;
    Some(factor.saturating_mul(steps.saturating_add(1)))
}

fn dominant_direction(from: CellCoord, to: CellCoord) -> Direction {
    let dx = i64::from(to.column()) - i64::from(from.column());
    let dy = i64::from(to.row()) - i64::from(from.row());
    if dx.abs() > dy.abs() {
        if dx > 0 {
            Direction::East
        } else {
            Direction::West
        }
    } else if dy > 0 {
        Direction::South
    } else {
        Direction::North
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_escape_core::{
        nearest_by_manhattan, BlockedCells, CellCoord, Direction, FeatureSet, GameStatus, MazeGrid,
    };
    use maze_escape_system_placement::PlacementOutcome;

    use super::{dominant_direction, MoveBudget, World};

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn grid(world: &World) -> &MazeGrid {
        &world.grid
    }

    /// Provides read-only access to the features still on the board.
    #[must_use]
    pub fn features(world: &World) -> &FeatureSet {
        &world.features
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Cell currently occupied by the enemy, if the maze has one.
    #[must_use]
    pub fn enemy_cell(world: &World) -> Option<CellCoord> {
        world.enemy_cell()
    }

    /// Progress of the current game.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }

    /// How the current features were placed; `None` for hand-built layouts.
    #[must_use]
    pub fn placement_outcome(world: &World) -> Option<PlacementOutcome> {
        world.placement
    }

    /// Nearest remaining key by Manhattan distance, or the exit once every key is held.
    #[must_use]
    pub fn objective(world: &World) -> CellCoord {
        nearest_by_manhattan(world.player, world.features.keys()).unwrap_or(world.grid.exit())
    }

    /// Trap cells that searches should avoid.
    #[must_use]
    pub fn hazards(world: &World) -> BlockedCells {
        world.features.hazards()
    }

    /// Moves spent and the budget they count against.
    #[must_use]
    pub fn move_budget(world: &World) -> MoveBudget {
        world.budget
    }

    /// Dominant axis direction from the player toward the objective.
    ///
    /// Horizontal wins only when strictly larger; ties point vertically.
    #[must_use]
    pub fn hint_direction(world: &World) -> Direction {
        dominant_direction(world.player, objective(world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::{PatrolPath, TeleporterPair};

    fn loop_grid() -> MazeGrid {
        MazeGrid::from_rows(&[
            "#########", //
            "#.......#", //
            "#.#####.#", //
            "#.......#", //
            "#########",
        ])
        .expect("fixture parses")
    }

    fn world_with(features: FeatureSet) -> World {
        World::with_layout(WorldConfig::default(), loop_grid(), features)
    }

    fn step(world: &mut World, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::MovePlayer { direction }, &mut events).expect("moves never fail");
        events
    }

    fn tick(world: &mut World, count: usize) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..count {
            apply(world, Command::Tick, &mut events).expect("ticks never fail");
        }
        events
    }

    #[test]
    fn budget_is_three_times_the_shortest_path_cells() {
        let world = world_with(FeatureSet::default());
        let budget = query::move_budget(&world);
        assert_eq!(budget.limit(), Some(27));
        assert_eq!(budget.used(), 0);
        assert_eq!(query::player(&world), CellCoord::new(1, 1));
    }

    #[test]
    fn budget_follows_the_route_around_traps() {
        let grid = MazeGrid::from_rows(&[
            "#######", //
            "#.....#", //
            "#.###.#", //
            "#.#...#", //
            "#.#.###", //
            "#.....#", //
            "#######",
        ])
        .expect("fixture parses");
        let open = World::with_layout(WorldConfig::default(), grid.clone(), FeatureSet::default());
        assert_eq!(query::move_budget(&open).limit(), Some(27));

        let trapped = World::with_layout(
            WorldConfig::default(),
            grid,
            FeatureSet::new(Vec::new(), vec![CellCoord::new(1, 3)], Vec::new(), None),
        );
        assert_eq!(query::move_budget(&trapped).limit(), Some(39));

        let sealed = World::with_layout(
            WorldConfig::default(),
            query::grid(&open).clone(),
            FeatureSet::new(
                Vec::new(),
                vec![CellCoord::new(1, 3), CellCoord::new(5, 2)],
                Vec::new(),
                None,
            ),
        );
        assert_eq!(query::move_budget(&sealed).limit(), Some(27));
    }

    #[test]
    fn walls_reject_moves_without_spending_budget() {
        let mut world = world_with(FeatureSet::default());
        let events = step(&mut world, Direction::North);
        assert_eq!(
            events,
            vec![Event::MoveRejected {
                direction: Direction::North
            }]
        );
        assert_eq!(query::move_budget(&world).used(), 0);
    }

    #[test]
    fn keys_are_collected_once() {
        let key = CellCoord::new(2, 1);
        let mut world = world_with(FeatureSet::new(vec![key], Vec::new(), Vec::new(), None));
        let events = step(&mut world, Direction::East);
        assert_eq!(
            events,
            vec![
                Event::PlayerMoved {
                    from: CellCoord::new(1, 1),
                    to: key
                },
                Event::KeyCollected {
                    cell: key,
                    remaining: 0
                },
            ]
        );
        assert!(query::features(&world).keys().is_empty());
        assert_eq!(query::objective(&world), CellCoord::new(7, 3));
    }

    #[test]
    fn traps_end_the_game() {
        let trap = CellCoord::new(1, 2);
        let mut world = world_with(FeatureSet::new(Vec::new(), vec![trap], Vec::new(), None));
        let events = step(&mut world, Direction::South);
        assert_eq!(events.last(), Some(&Event::TrapTriggered { cell: trap }));
        assert_eq!(
            query::status(&world),
            GameStatus::Lost {
                cause: LossCause::Trap
            }
        );
        assert!(step(&mut world, Direction::South).is_empty());
    }

    #[test]
    fn teleporters_jump_to_their_partner() {
        let pad = CellCoord::new(2, 1);
        let partner = CellCoord::new(6, 3);
        let mut world = world_with(FeatureSet::new(
            Vec::new(),
            Vec::new(),
            vec![TeleporterPair::new(pad, partner)],
            None,
        ));
        let events = step(&mut world, Direction::East);
        assert_eq!(
            events.last(),
            Some(&Event::Teleported {
                from: pad,
                to: partner
            })
        );
        assert_eq!(query::player(&world), partner);

        let events = step(&mut world, Direction::East);
        assert_eq!(events.last(), Some(&Event::Escaped { moves: 2 }));
        assert_eq!(query::status(&world), GameStatus::Won);
    }

    #[test]
    fn exit_requires_every_key() {
        let key = CellCoord::new(7, 1);
        let mut world = world_with(FeatureSet::new(vec![key], Vec::new(), Vec::new(), None));
        for _ in 0..2 {
            let _ = step(&mut world, Direction::South);
        }
        for _ in 0..6 {
            let _ = step(&mut world, Direction::East);
        }
        assert_eq!(query::player(&world), CellCoord::new(7, 3));
        assert_eq!(query::status(&world), GameStatus::Playing);

        let _ = step(&mut world, Direction::North);
        let _ = step(&mut world, Direction::North);
        assert!(query::features(&world).keys().is_empty());
        let _ = step(&mut world, Direction::South);
        let events = step(&mut world, Direction::South);
        assert_eq!(events.last(), Some(&Event::Escaped { moves: 12 }));
    }

    #[test]
    fn enemy_steps_every_interval_and_catches_the_player() {
        let patrol = PatrolPath::new(vec![
            CellCoord::new(3, 1),
            CellCoord::new(2, 1),
            CellCoord::new(1, 1),
        ]);
        let mut world = world_with(FeatureSet::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Some(patrol),
        ));

        assert!(tick(&mut world, 4).is_empty());
        assert_eq!(
            tick(&mut world, 1),
            vec![Event::EnemyAdvanced {
                from: CellCoord::new(3, 1),
                to: CellCoord::new(2, 1)
            }]
        );

        let events = tick(&mut world, 5);
        assert_eq!(
            events.last(),
            Some(&Event::PlayerCaught {
                cell: CellCoord::new(1, 1)
            })
        );
        assert_eq!(
            query::status(&world),
            GameStatus::Lost {
                cause: LossCause::Caught
            }
        );
    }

    #[test]
    fn walking_into_the_enemy_is_fatal() {
        let patrol = PatrolPath::new(vec![CellCoord::new(2, 1), CellCoord::new(3, 1)]);
        let mut world = world_with(FeatureSet::new(
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Some(patrol),
        ));
        let events = step(&mut world, Direction::East);
        assert_eq!(
            events.last(),
            Some(&Event::PlayerCaught {
                cell: CellCoord::new(2, 1)
            })
        );
    }

    #[test]
    fn hints_point_along_the_dominant_axis_and_cost_moves() {
        let key = CellCoord::new(7, 1);
        let mut world = world_with(FeatureSet::new(vec![key], Vec::new(), Vec::new(), None));
        let mut events = Vec::new();
        apply(&mut world, Command::RequestHint, &mut events).expect("hints never fail");
        assert_eq!(
            events,
            vec![Event::HintGiven {
                direction: Direction::East,
                target: key
            }]
        );
        assert_eq!(query::move_budget(&world).used(), 10);
    }

    #[test]
    fn ties_point_vertically() {
        assert_eq!(
            dominant_direction(CellCoord::new(1, 1), CellCoord::new(3, 3)),
            Direction::South
        );
        assert_eq!(
            dominant_direction(CellCoord::new(3, 3), CellCoord::new(1, 1)),
            Direction::North
        );
        assert_eq!(
            dominant_direction(CellCoord::new(3, 3), CellCoord::new(1, 2)),
            Direction::West
        );
    }

    #[test]
    fn unaffordable_hints_are_rejected() {
        let mut world = World::with_layout(
            WorldConfig {
                hint_cost: 30,
                ..WorldConfig::default()
            },
            loop_grid(),
            FeatureSet::default(),
        );
        let mut events = Vec::new();
        apply(&mut world, Command::RequestHint, &mut events).expect("hints never fail");
        assert_eq!(
            events,
            vec![Event::HintRejected {
                cost: 30,
                remaining: 27
            }]
        );
        assert_eq!(query::move_budget(&world).used(), 0);
    }

    #[test]
    fn running_out_of_moves_loses() {
        let mut world = World::with_layout(
            WorldConfig {
                move_budget_factor: 1,
                ..WorldConfig::default()
            },
            loop_grid(),
            FeatureSet::default(),
        );
        let mut last = Vec::new();
        for direction in [Direction::East, Direction::West]
            .into_iter()
            .cycle()
            .take(9)
        {
            last = step(&mut world, direction);
        }
        assert_eq!(last.last(), Some(&Event::MoveBudgetExhausted { moves: 9 }));
        assert_eq!(
            query::status(&world),
            GameStatus::Lost {
                cause: LossCause::OutOfMoves
            }
        );
    }

    #[test]
    fn reset_replaces_features_and_restarts_the_player() {
        let mut world = World::new(WorldConfig {
            width: 15,
            height: 15,
            seed: 7,
            ..WorldConfig::default()
        })
        .expect("world builds");
        let grid = query::grid(&world).clone();

        let mut events = Vec::new();
        apply(&mut world, Command::Reset, &mut events).expect("reset succeeds");
        assert_eq!(events, vec![Event::GameReset]);
        assert_eq!(query::grid(&world), &grid);
        assert_eq!(query::player(&world), grid.start());
        assert_eq!(query::status(&world), GameStatus::Playing);
        assert_eq!(query::move_budget(&world).used(), 0);
        assert_eq!(query::features(&world).keys().len(), 3);
    }

    #[test]
    fn new_maze_announces_its_dimensions() {
        let mut world = World::new(WorldConfig {
            width: 21,
            height: 15,
            seed: 3,
            ..WorldConfig::default()
        })
        .expect("world builds");
        let mut events = Vec::new();
        apply(&mut world, Command::NewMaze, &mut events).expect("regeneration succeeds");
        assert_eq!(
            events,
            vec![Event::MazeGenerated {
                width: 21,
                height: 15
            }]
        );
        assert_eq!(query::grid(&world).width(), 21);
        assert!(query::placement_outcome(&world).is_some());
    }

    #[test]
    fn invalid_dimensions_surface_as_grid_errors() {
        let error = World::new(WorldConfig {
            width: 8,
            ..WorldConfig::default()
        })
        .unwrap_err();
        assert_eq!(
            error,
            WorldError::Grid(GridError::InvalidDimensions {
                width: 8,
                height: 35
            })
        );
    }

    #[test]
    fn solve_routes_to_the_objective_around_traps() {
        let key = CellCoord::new(7, 1);
        let trap = CellCoord::new(4, 1);
        let world = world_with(FeatureSet::new(vec![key], vec![trap], Vec::new(), None));
        let result = world.solve(SearchAlgorithm::Bfs);
        let path = result.path().expect("detour exists");
        assert_eq!(path.first(), Some(&CellCoord::new(1, 1)));
        assert_eq!(path.last(), Some(&key));
        assert!(!path.contains(&trap));
        assert_eq!(path.len(), 11);

        let comparisons = world.compare();
        assert_eq!(comparisons.len(), SearchAlgorithm::ALL.len());
    }
}
