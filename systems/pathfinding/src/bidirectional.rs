//! Bidirectional breadth-first search.

use std::collections::VecDeque;

use maze_escape_core::{CellCoord, MazeGrid, SEARCH_ORDER};
use maze_escape_system_reachability::{Predecessors, Visited};

use crate::{Search, SearchQuery};

#[derive(Debug)]
struct Frontier {
    queue: VecDeque<CellCoord>,
    visited: Visited,
    predecessors: Predecessors,
}

impl Frontier {
    fn rooted_at(grid: &MazeGrid, root: CellCoord) -> Self {
        let mut visited = Visited::new(grid);
        let _ = visited.insert(root);
        Self {
            queue: VecDeque::from([root]),
            visited,
            predecessors: Predecessors::new(grid),
        }
    }

    /// Dequeues one whole layer, returning the first cell the other side has seen.
    fn expand_layer(
        &mut self,
        other: &Frontier,
        query: &SearchQuery<'_>,
        nodes: &mut u64,
    ) -> Option<CellCoord> {
        for _ in 0..self.queue.len() {
            let cell = self.queue.pop_front()?;
            *nodes += 1;
            if other.visited.contains(cell) {
                return Some(cell);
            }
            for next in query.open_neighbors_in(cell, SEARCH_ORDER) {
                if self.visited.insert(next) {
                    self.predecessors.link(next, cell);
                    self.queue.push_back(next);
                }
            }
        }
        None
    }
}

/// Grows frontiers from both endpoints, one full layer per side in turn.
///
/// Alternating whole layers guarantees the first meeting cell lies on a
/// shortest path.
pub(crate) fn search(query: &SearchQuery<'_>) -> Search {
    let start = query.start();
    let goal = query.goal();
    if start == goal {
        return Search::found(vec![start], 1);
    }
    if !query.is_open(goal) {
        return Search::unreachable(0);
    }

    let grid = query.grid();
    let mut forward = Frontier::rooted_at(grid, start);
    let mut backward = Frontier::rooted_at(grid, goal);
    let mut nodes = 0;

    while !forward.queue.is_empty() || !backward.queue.is_empty() {
        if let Some(meeting) = forward.expand_layer(&backward, query, &mut nodes) {
            return Search::found(join(&forward, &backward, meeting), nodes);
        }
        if let Some(meeting) = backward.expand_layer(&forward, query, &mut nodes) {
            return Search::found(join(&forward, &backward, meeting), nodes);
        }
    }

    Search::unreachable(nodes)
}

fn join(forward: &Frontier, backward: &Frontier, meeting: CellCoord) -> Vec<CellCoord> {
    let mut path = forward.predecessors.trace(meeting);
    let mut tail = backward.predecessors.trace(meeting);
    tail.reverse();
    path.extend(tail.into_iter().skip(1));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_escape_core::BlockedCells;

    fn grid(rows: &[&str]) -> MazeGrid {
        MazeGrid::from_rows(rows).expect("fixture parses")
    }

    #[test]
    fn joined_path_runs_from_start_to_goal() {
        let maze = grid(&["#######", "#.....#", "#####.#", "#.....#", "#######"]);
        let blocked = BlockedCells::new();
        let query = SearchQuery::new(&maze, maze.start(), CellCoord::new(1, 3), &blocked);
        let result = search(&query);
        let path = result.path.expect("corridor is connected");
        assert_eq!(path.len(), 11);
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&CellCoord::new(1, 3)));
        assert!(path
            .windows(2)
            .all(|pair| pair[0].manhattan_distance(pair[1]) == 1));
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let maze = grid(&["#####", "#...#", "#...#", "#...#", "#####"]);
        let goal = CellCoord::new(3, 3);
        let blocked: BlockedCells = [goal].into_iter().collect();
        let query = SearchQuery::new(&maze, maze.start(), goal, &blocked);
        let result = search(&query);
        assert!(result.path.is_none());
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn wall_goal_is_unreachable() {
        let maze = grid(&["#####", "#...#", "#.#.#", "#...#", "#####"]);
        let query_blocked = BlockedCells::new();
        let query = SearchQuery::new(&maze, maze.start(), CellCoord::new(2, 2), &query_blocked);
        assert!(search(&query).path.is_none());
    }
}
