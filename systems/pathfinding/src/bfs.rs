//! Breadth-first search on top of the shared reachability traversal.

use maze_escape_system_reachability::BreadthFirst;

use crate::{Search, SearchQuery};

/// Dequeues cells in FIFO order until the goal is dequeued.
pub(crate) fn search(query: &SearchQuery<'_>) -> Search {
    let goal = query.goal();
    let mut walk = BreadthFirst::new(query.grid(), query.start(), query.blocked());
    let mut nodes = 0;

    while let Some(cell) = walk.next() {
        nodes += 1;
        if cell == goal {
            return Search::found(walk.predecessors().trace(goal), nodes);
        }
    }

    Search::unreachable(nodes)
}
