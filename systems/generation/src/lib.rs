#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maze generation system that carves a spanning tree and injects loops.
//!
//! Room cells sit on the odd lattice. The backtracker connects every room to
//! `(1, 1)` through a single simple path, after which a bounded number of
//! random fence cells are opened to create cycles.

use log::debug;
use maze_escape_core::{CellCoord, GridCanvas, GridError, MazeGrid, SEARCH_ORDER};
use rand::{seq::SliceRandom, Rng};

/// Tuning knobs for maze generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Chance that an eligible fence cell next to a sampled room is opened.
    pub loop_probability: f64,
}

impl GenerationConfig {
    /// Creates a configuration with the provided loop probability.
    #[must_use]
    pub const fn new(loop_probability: f64) -> Self {
        Self { loop_probability }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(0.3)
    }
}

/// Pure system producing immutable maze grids from an injected random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct MazeGenerator {
    config: GenerationConfig,
}

impl MazeGenerator {
    /// Creates a generator using the supplied configuration.
    #[must_use]
    pub const fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Configuration driving this generator.
    #[must_use]
    pub const fn config(&self) -> GenerationConfig {
        self.config
    }

    /// Generates a maze of the requested dimensions.
    ///
    /// Fails with [`GridError::InvalidDimensions`] unless both sides are odd and at least five.
    pub fn generate<R>(&self, width: u32, height: u32, rng: &mut R) -> Result<MazeGrid, GridError>
    where
        R: Rng + ?Sized,
    {
        let mut canvas = carve_spanning_tree(width, height, rng)?;
        let opened = inject_loops(&mut canvas, self.config.loop_probability, rng);

        let start = CellCoord::new(1, 1);
        let exit = CellCoord::new(width - 2, height - 2);
        canvas.carve(start);
        canvas.carve(exit);

        let grid = canvas.finish();
        debug!(
            "generated {}x{} maze with {} open cells and {} loops",
            width,
            height,
            grid.path_cells().count(),
            opened
        );
        Ok(grid)
    }
}

/// Carves a perfect maze with an iterative recursive backtracker rooted at `(1, 1)`.
pub fn carve_spanning_tree<R>(width: u32, height: u32, rng: &mut R) -> Result<GridCanvas, GridError>
where
    R: Rng + ?Sized,
{
    let mut canvas = GridCanvas::walled(width, height)?;
    let root = CellCoord::new(1, 1);
    canvas.carve(root);

    let mut stack = vec![root];
    let mut candidates: Vec<(CellCoord, CellCoord)> = Vec::with_capacity(SEARCH_ORDER.len());

    while let Some(&current) = stack.last() {
        candidates.clear();
        for direction in SEARCH_ORDER {
            let Some(fence) = current.step(direction) else {
                continue;
            };
            let Some(room) = fence.step(direction) else {
                continue;
            };
            if canvas.is_interior(room) && canvas.is_wall(room) {
                candidates.push((fence, room));
            }
        }

        match candidates.choose(rng) {
            Some(&(fence, room)) => {
                canvas.carve(fence);
                canvas.carve(room);
                stack.push(room);
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    Ok(canvas)
}

/// Opens extra fence cells to create cycles, returning how many were opened.
///
/// Runs `width / 2` trials. Each trial samples a room cell; if it is open, the
/// first interior wall neighbour in canonical order that wins a
/// `loop_probability` draw is carved. Walls are only ever removed, so every
/// cell reachable before injection stays reachable.
pub fn inject_loops<R>(canvas: &mut GridCanvas, loop_probability: f64, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let room_columns = (canvas.width() - 1) / 2;
    let room_rows = (canvas.height() - 1) / 2;
    let mut opened = 0;

    for _ in 0..canvas.width() / 2 {
        let column = 1 + 2 * rng.gen_range(0..room_columns);
        let row = 1 + 2 * rng.gen_range(0..room_rows);
        let room = CellCoord::new(column, row);
        if canvas.is_wall(room) {
            continue;
        }

        for direction in SEARCH_ORDER {
            let Some(next) = room.step(direction) else {
                continue;
            };
            if canvas.is_interior(next)
                && canvas.is_wall(next)
                && rng.gen::<f64>() < loop_probability
            {
                canvas.carve(next);
                opened += 1;
                break;
            }
        }
    }

    opened
}
