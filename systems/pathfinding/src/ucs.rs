//! Uniform-cost search with lazy deletion.

use std::{cmp::Reverse, collections::BinaryHeap};

use maze_escape_core::{CellCoord, SEARCH_ORDER};
use maze_escape_system_reachability::{Predecessors, Visited};

use crate::{Search, SearchQuery};

/// Frontier entry ordered by cost, then by insertion sequence.
type Entry = Reverse<(u32, u64, CellCoord, Option<CellCoord>)>;

/// Pops the cheapest frontier entry until the goal is popped.
///
/// Cells are marked visited when popped; stale duplicates are skipped but
/// still counted as explored.
pub(crate) fn search(query: &SearchQuery<'_>) -> Search {
    let grid = query.grid();
    let goal = query.goal();
    let mut visited = Visited::new(grid);
    let mut predecessors = Predecessors::new(grid);
    let mut frontier: BinaryHeap<Entry> = BinaryHeap::new();
    let mut sequence = 0_u64;
    let mut nodes = 0;

    frontier.push(Reverse((0, sequence, query.start(), None)));

    while let Some(Reverse((cost, _, cell, parent))) = frontier.pop() {
        nodes += 1;
        if !visited.insert(cell) {
            continue;
        }
        if let Some(parent) = parent {
            predecessors.link(cell, parent);
        }
        if cell == goal {
            return Search::found(predecessors.trace(goal), nodes);
        }

        for next in query.open_neighbors_in(cell, SEARCH_ORDER) {
            if visited.contains(next) {
                continue;
            }
            sequence += 1;
            frontier.push(Reverse((cost + 1, sequence, next, Some(cell))));
        }
    }

    Search::unreachable(nodes)
}
