//! ASCII rendering of a world snapshot.

use std::fmt::Write as _;

use maze_escape_core::{CellCoord, SearchOutcome};
use maze_escape_system_pathfinding::Comparison;
use maze_escape_world::{query, World};

const WALL: char = '#';
const OPEN: char = ' ';
const PLAYER: char = '@';
const ENEMY: char = 'M';
const KEY: char = 'K';
const TRAP: char = '^';
const TELEPORTER: char = 'O';
const EXIT: char = 'E';
const PATROL: char = '~';
const ROUTE: char = '.';

/// Draws the maze with every feature and the given route overlaid.
///
/// Later layers win: route, patrol, exit, teleporters, traps, keys, enemy, player.
pub(crate) fn map(world: &World, route: &[CellCoord]) -> String {
    let grid = query::grid(world);
    let features = query::features(world);
    let width = usize::try_from(grid.width()).unwrap_or(0);
    let mut canvas: Vec<Vec<char>> = (0..grid.height())
        .map(|row| {
            (0..grid.width())
                .map(|column| {
                    if grid.is_wall_at(column, row) {
                        WALL
                    } else {
                        OPEN
                    }
                })
                .collect()
        })
        .collect();

    let mut paint = |cell: CellCoord, glyph: char| {
        let row = usize::try_from(cell.row()).ok();
        let column = usize::try_from(cell.column()).ok();
        if let (Some(row), Some(column)) = (row, column) {
            if let Some(slot) = canvas.get_mut(row).and_then(|line| line.get_mut(column)) {
                *slot = glyph;
            }
        }
    };

    for cell in route {
        paint(*cell, ROUTE);
    }
    if let Some(patrol) = features.patrol() {
        for cell in patrol.cells() {
            paint(*cell, PATROL);
        }
    }
    paint(grid.exit(), EXIT);
    for pair in features.teleporters() {
        paint(pair.first(), TELEPORTER);
        paint(pair.second(), TELEPORTER);
    }
    for trap in features.traps() {
        paint(*trap, TRAP);
    }
    for key in features.keys() {
        paint(*key, KEY);
    }
    if let Some(enemy) = query::enemy_cell(world) {
        paint(enemy, ENEMY);
    }
    paint(query::player(world), PLAYER);

    let mut out = String::with_capacity((width + 1) * canvas.len());
    for line in canvas {
        out.extend(line);
        out.push('\n');
    }
    out
}

/// Formats one row per strategy: steps, nodes explored, elapsed time, and outcome.
pub(crate) fn comparison_table(comparisons: &[Comparison]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:>6} {:>8} {:>12}  outcome",
        "algorithm", "steps", "nodes", "elapsed_us"
    );
    for comparison in comparisons {
        let result = &comparison.result;
        let steps = result
            .path_len()
            .map_or_else(|| "-".to_owned(), |len| len.saturating_sub(1).to_string());
        let outcome = match result.outcome() {
            SearchOutcome::Found => "found".to_owned(),
            SearchOutcome::Unreachable => "unreachable".to_owned(),
            SearchOutcome::SearchExhausted { depth_cap } => format!("exhausted at depth {depth_cap}"),
        };
        let _ = writeln!(
            out,
            "{:<14} {:>6} {:>8} {:>12}  {}",
            comparison.algorithm.name(),
            steps,
            result.nodes_explored(),
            result.elapsed().as_micros(),
            outcome
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::{FeatureSet, MazeGrid, PatrolPath, SearchAlgorithm};
    use maze_escape_world::WorldConfig;

    fn world() -> World {
        let grid = MazeGrid::from_rows(&["#######", "#.....#", "#.###.#", "#.....#", "#######"])
            .expect("fixture parses");
        let features = FeatureSet::new(
            vec![CellCoord::new(5, 1)],
            vec![CellCoord::new(1, 3)],
            Vec::new(),
            Some(PatrolPath::new(vec![
                CellCoord::new(3, 3),
                CellCoord::new(4, 3),
            ])),
        );
        World::with_layout(WorldConfig::default(), grid, features)
    }

    #[test]
    fn map_layers_features_over_the_maze() {
        let world = world();
        let route = [
            CellCoord::new(1, 1),
            CellCoord::new(2, 1),
            CellCoord::new(3, 1),
            CellCoord::new(4, 1),
            CellCoord::new(5, 1),
        ];
        let rendered = map(&world, &route);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec!["#######", "#@...K#", "# ### #", "#^ M~E#", "#######"]
        );
    }

    #[test]
    fn table_lists_every_strategy() {
        let world = world();
        let table = comparison_table(&world.compare());
        assert_eq!(table.lines().count(), SearchAlgorithm::ALL.len() + 1);
        assert!(table.contains("Bidirectional"));
    }
}
