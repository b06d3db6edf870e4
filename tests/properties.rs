use amazeing::direction::Direction;
use amazeing::generator::Generator;
use amazeing::maze::Maze;
use amazeing::solver::Solver;

fn generated(width: i32, height: i32, perfect: bool, seed: u64) -> Maze {
    let mut maze = Maze::new(width, height, (0, 0), (width - 1, height - 1), perfect).unwrap();
    Generator::new(&mut maze).generate(seed);
    maze
}

fn open_edge_count(maze: &Maze) -> usize {
    let mut open = 0;
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            if x + 1 < maze.width() && !maze.cell(x, y).closed(Direction::East) {
                open += 1;
            }
            if y + 1 < maze.height() && !maze.cell(x, y).closed(Direction::South) {
                open += 1;
            }
        }
    }
    open
}

fn unlocked_count(maze: &Maze) -> usize {
    let mut unlocked = 0;
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            if !maze.cell(x, y).locked() {
                unlocked += 1;
            }
        }
    }
    unlocked
}

#[test]
fn every_generated_maze_is_solvable() {
    for &(w, h) in &[(20, 15), (9, 7), (30, 20), (5, 5)] {
        for seed in 0..10 {
            let maze = generated(w, h, true, seed);
            let path = Solver::new(&maze).solve();
            assert!(!path.is_empty(), "{}x{} seed {}", w, h, seed);
            assert_eq!(path[0], maze.entry());
            assert_eq!(*path.last().unwrap(), maze.exit());
        }
    }
}

#[test]
fn perfect_mazes_are_spanning_trees() {
    for seed in 0..10 {
        let maze = generated(20, 15, true, seed);
        assert_eq!(open_edge_count(&maze), unlocked_count(&maze) - 1, "seed {}", seed);
    }
}

#[test]
fn walls_stay_symmetric_after_generation() {
    let maze = generated(20, 15, false, 3);
    for y in 0..15 {
        for x in 0..20 {
            for d in Direction::ALL {
                let (dx, dy) = d.delta();
                let (nx, ny) = (x + dx, y + dy);
                if maze.in_bounds(nx, ny) {
                    assert_eq!(
                        maze.cell(x, y).closed(d),
                        maze.cell(nx, ny).closed(d.opposite()),
                        "({}, {}) {:?}",
                        x,
                        y,
                        d
                    );
                }
            }
        }
    }
}

#[test]
fn borders_stay_closed_after_generation() {
    let maze = generated(20, 15, false, 5);
    for x in 0..20 {
        assert!(maze.cell(x, 0).closed(Direction::North));
        assert!(maze.cell(x, 14).closed(Direction::South));
    }
    for y in 0..15 {
        assert!(maze.cell(0, y).closed(Direction::West));
        assert!(maze.cell(19, y).closed(Direction::East));
    }
}

#[test]
fn stamp_survives_regeneration_untouched() {
    let mut maze = Maze::new(20, 15, (0, 0), (19, 14), true).unwrap();
    let mut generator = Generator::new(&mut maze);
    generator.generate(1);
    drop(generator);

    let before: Vec<(i32, i32, u8)> = (0..15)
        .flat_map(|y| (0..20).map(move |x| (x, y)))
        .filter(|&(x, y)| maze.cell(x, y).locked())
        .map(|(x, y)| (x, y, maze.cell(x, y).bits()))
        .collect();
    assert_eq!(before.len(), 18);

    Generator::new(&mut maze).generate(2);
    for (x, y, bits) in before {
        assert!(maze.cell(x, y).locked());
        assert_eq!(maze.cell(x, y).bits(), bits, "({}, {})", x, y);
        assert_eq!(bits, 0xf);
    }
}

#[test]
fn generation_is_deterministic_per_seed() {
    for &perfect in &[true, false] {
        let a = generated(20, 15, perfect, 1234);
        let b = generated(20, 15, perfect, 1234);
        for y in 0..15 {
            for x in 0..20 {
                assert_eq!(a.cell(x, y).bits(), b.cell(x, y).bits());
            }
        }
        assert_eq!(Solver::new(&a).solve(), Solver::new(&b).solve());
    }
}

#[test]
fn no_three_by_three_block_is_fully_open() {
    for &perfect in &[true, false] {
        for seed in 0..8 {
            let maze = generated(10, 10, perfect, seed);
            for ty in 0..8 {
                for tx in 0..8 {
                    let mut all_open = true;
                    for row in 0..3 {
                        for col in 0..2 {
                            if maze.cell(tx + col, ty + row).closed(Direction::East) {
                                all_open = false;
                            }
                        }
                    }
                    for row in 0..2 {
                        for col in 0..3 {
                            if maze.cell(tx + col, ty + row).closed(Direction::South) {
                                all_open = false;
                            }
                        }
                    }
                    assert!(
                        !all_open,
                        "open 3x3 block at ({}, {}), perfect {}, seed {}",
                        tx, ty, perfect, seed
                    );
                }
            }
        }
    }
}

#[test]
fn imperfect_mazes_gain_extra_openings() {
    let mut attempts = 0;
    for seed in 0..10 {
        let maze = generated(20, 15, false, seed);
        let spanning = unlocked_count(&maze) - 1;
        if open_edge_count(&maze) > spanning {
            attempts += 1;
        }
    }
    // loop injection is budgeted, not guaranteed, but it should almost
    // always land at least one opening on a grid this size
    assert!(attempts >= 8, "only {} of 10 seeds gained a loop", attempts);
}
