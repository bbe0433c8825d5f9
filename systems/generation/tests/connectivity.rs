use std::collections::HashSet;

use maze_escape_core::{BlockedCells, CellCoord};
use maze_escape_system_generation::{carve_spanning_tree, inject_loops, MazeGenerator};
use maze_escape_system_reachability::reachable_cells;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SIZES: [(u32, u32); 6] = [(5, 5), (7, 5), (5, 9), (15, 15), (21, 13), (35, 35)];

#[test]
fn every_room_is_reachable_from_the_start() {
    let generator = MazeGenerator::default();
    let blocked = BlockedCells::new();

    for (width, height) in SIZES {
        for seed in 0..40 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = generator
                .generate(width, height, &mut rng)
                .expect("valid dimensions");

            let reachable: HashSet<CellCoord> = reachable_cells(&grid, grid.start(), &blocked)
                .into_iter()
                .collect();

            for room in grid.room_cells() {
                assert!(
                    reachable.contains(&room),
                    "room {room} unreachable in {width}x{height} maze for seed {seed}"
                );
            }
            assert!(reachable.contains(&grid.exit()));
        }
    }
}

#[test]
fn loop_injection_never_loses_reachable_cells() {
    let blocked = BlockedCells::new();

    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut canvas = carve_spanning_tree(25, 19, &mut rng).expect("valid dimensions");

        let before_grid = canvas.snapshot();
        let before: HashSet<CellCoord> =
            reachable_cells(&before_grid, before_grid.start(), &blocked)
                .into_iter()
                .collect();

        let _ = inject_loops(&mut canvas, 0.3, &mut rng);
        let after_grid = canvas.finish();
        let after: HashSet<CellCoord> = reachable_cells(&after_grid, after_grid.start(), &blocked)
            .into_iter()
            .collect();

        assert!(
            before.is_subset(&after),
            "loop injection disconnected cells for seed {seed}"
        );
    }
}

#[test]
fn every_open_cell_is_connected() {
    let generator = MazeGenerator::default();
    let blocked = BlockedCells::new();

    for seed in 0..25 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = generator.generate(19, 19, &mut rng).expect("valid dimensions");
        let reachable = reachable_cells(&grid, grid.start(), &blocked);
        assert_eq!(reachable.len(), grid.path_cells().count());
    }
}
