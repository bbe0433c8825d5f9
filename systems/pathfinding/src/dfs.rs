//! Depth-first search with a shuffled expansion order.

use maze_escape_core::{CellCoord, SEARCH_ORDER};
use maze_escape_system_reachability::{Predecessors, Visited};
use rand::{seq::SliceRandom, Rng};

use crate::{Search, SearchQuery};

/// Pops cells from a LIFO stack until the goal is popped.
///
/// Each expansion shuffles the four directions with `rng`; the engine passes a
/// freshly seeded generator per run.
pub(crate) fn search<R>(query: &SearchQuery<'_>, rng: &mut R) -> Search
where
    R: Rng + ?Sized,
{
    let grid = query.grid();
    let goal = query.goal();
    let mut visited = Visited::new(grid);
    let mut predecessors = Predecessors::new(grid);
    let mut stack: Vec<(CellCoord, Option<CellCoord>)> = vec![(query.start(), None)];
    let mut nodes = 0;

    while let Some((cell, parent)) = stack.pop() {
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

        let mut order = SEARCH_ORDER;
        order.shuffle(rng);
        for next in query.open_neighbors_in(cell, order) {
            if !visited.contains(next) {
                stack.push((next, Some(cell)));
            }
        }
    }

    Search::unreachable(nodes)
}
