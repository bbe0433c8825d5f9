//! Depth-limited and iterative-deepening search.
//!
//! The descent runs on an explicit frame stack. Only cells on the current
//! branch are marked, so a cell abandoned by one branch may be entered again
//! by a sibling with a different remaining budget.

use maze_escape_core::{CellCoord, SEARCH_ORDER};
use maze_escape_system_reachability::Visited;

use crate::{Search, SearchQuery};

#[derive(Debug)]
struct Frame {
    cell: CellCoord,
    remaining: u32,
    next_direction: usize,
}

#[derive(Debug)]
struct Pass {
    path: Option<Vec<CellCoord>>,
    nodes: u64,
    cutoff: bool,
}

/// Depth-first descent that never takes more than `limit` steps from the start.
pub(crate) fn search(query: &SearchQuery<'_>, limit: u32) -> Search {
    let pass = descend(query, limit);
    match pass.path {
        Some(path) => Search::found(path, pass.nodes),
        None if pass.cutoff => Search::exhausted(pass.nodes, limit),
        None => Search::unreachable(pass.nodes),
    }
}

/// Repeats the bounded descent with limits `0..max_depth`, summing explored nodes.
///
/// Stops early once a pass finishes without hitting its limit: the goal is then
/// reported unreachable and `nodes` covers only the passes that ran, not every
/// depth up to `max_depth`. A cutoff on the last pass reports
/// [`SearchOutcome::SearchExhausted`](maze_escape_core::SearchOutcome::SearchExhausted).
pub(crate) fn deepen(query: &SearchQuery<'_>, max_depth: u32) -> Search {
    let mut nodes = 0;
    for depth in 0..max_depth {
        let pass = descend(query, depth);
        nodes += pass.nodes;
        if let Some(path) = pass.path {
            return Search::found(path, nodes);
        }
        if !pass.cutoff {
            return Search::unreachable(nodes);
        }
    }
    Search::exhausted(nodes, max_depth)
}

fn descend(query: &SearchQuery<'_>, limit: u32) -> Pass {
    let start = query.start();
    let goal = query.goal();
    let mut nodes = 1;
    if start == goal {
        return Pass {
            path: Some(vec![start]),
            nodes,
            cutoff: false,
        };
    }

    let mut on_branch = Visited::new(query.grid());
    let _ = on_branch.insert(start);
    let mut stack = vec![Frame {
        cell: start,
        remaining: limit,
        next_direction: 0,
    }];
    let mut cutoff = false;

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = SEARCH_ORDER.get(frame.next_direction) else {
            let cell = frame.cell;
            let _ = stack.pop();
            on_branch.remove(cell);
            continue;
        };
        frame.next_direction += 1;
        let cell = frame.cell;
        let remaining = frame.remaining;

        let Some(child) = query.open_step(cell, direction) else {
            continue;
        };
        if on_branch.contains(child) {
            continue;
        }
        if remaining == 0 {
            cutoff = true;
            continue;
        }

        nodes += 1;
        if child == goal {
            let mut path: Vec<CellCoord> = stack.iter().map(|frame| frame.cell).collect();
            path.push(child);
            return Pass {
                path: Some(path),
                nodes,
                cutoff,
            };
        }

        let _ = on_branch.insert(child);
        stack.push(Frame {
            cell: child,
            remaining: remaining - 1,
            next_direction: 0,
        });
    }

    Pass {
        path: None,
        nodes,
        cutoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::{BlockedCells, MazeGrid, SearchOutcome};

    fn corridor() -> MazeGrid {
        MazeGrid::from_rows(&["#######", "#.....#", "#####.#", "#####.#", "#######"])
            .expect("fixture parses")
    }

    #[test]
    fn limit_counts_steps_not_cells() {
        let maze = corridor();
        let blocked = BlockedCells::new();
        let query = SearchQuery::new(&maze, maze.start(), maze.exit(), &blocked);

        let found = search(&query, 6);
        assert_eq!(found.path.map(|path| path.len()), Some(7));

        let short = search(&query, 5);
        assert!(short.path.is_none());
        assert_eq!(
            short.outcome,
            SearchOutcome::SearchExhausted { depth_cap: 5 }
        );
    }

    #[test]
    fn exhaustive_pass_reports_unreachable() {
        let maze = corridor();
        let blocked: BlockedCells = [CellCoord::new(5, 2)].into_iter().collect();
        let query = SearchQuery::new(&maze, maze.start(), maze.exit(), &blocked);
        let result = search(&query, 50);
        assert_eq!(result.outcome, SearchOutcome::Unreachable);
        assert_eq!(result.nodes, 5);
    }

    #[test]
    fn deepening_sums_nodes_across_passes() {
        let maze = corridor();
        let blocked = BlockedCells::new();
        let query = SearchQuery::new(&maze, maze.start(), maze.exit(), &blocked);
        let result = deepen(&query, 100);
        assert_eq!(result.path.map(|path| path.len()), Some(7));
        assert_eq!(result.nodes, (1..=7).sum::<u64>());
    }

    #[test]
    fn deepening_stops_after_the_first_pass_without_cutoff() {
        let maze = corridor();
        let blocked: BlockedCells = [CellCoord::new(5, 2)].into_iter().collect();
        let query = SearchQuery::new(&maze, maze.start(), maze.exit(), &blocked);
        let result = deepen(&query, 100);
        assert_eq!(result.outcome, SearchOutcome::Unreachable);
        // Passes at depths 0 through 4 reach 1, 2, 3, 4 and 5 cells.
        assert_eq!(result.nodes, 15);
    }

    #[test]
    fn siblings_may_reenter_abandoned_cells() {
        let maze = MazeGrid::from_rows(&["#####", "#...#", "#...#", "#...#", "#####"])
            .expect("fixture parses");
        let blocked = BlockedCells::new();
        let query = SearchQuery::new(&maze, maze.start(), CellCoord::new(3, 1), &blocked);
        let result = search(&query, 2);
        assert_eq!(
            result.path,
            Some(vec![
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
                CellCoord::new(3, 1)
            ])
        );
        // (2, 2) is entered once below (1, 2) and again below (2, 1).
        assert_eq!(result.nodes, 7);
    }
}
