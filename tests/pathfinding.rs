use chase::map::maze::{Cell, Maze};
use chase::map::path::{distance, next_step, shortest_path, unblocked};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn open_cells(maze: &Maze) -> Vec<Cell> {
    maze.cells()
        .map(|(cell, _)| cell)
        .filter(|&cell| maze.is_traversable(cell))
        .collect()
}

#[test]
fn test_next_step_lies_on_a_shortest_path() {
    let maze = Maze::classic().unwrap();
    let cells = open_cells(&maze);

    for &start in &cells {
        for &target in &cells {
            let total = distance(&maze, start, target, unblocked).expect("classic maze is connected");
            let step = next_step(&maze, start, target, unblocked);

            if start == target {
                assert_eq!(total, 0);
                assert_eq!(step, None);
                continue;
            }

            let step = step.expect("reachable target has a next step");
            assert!(step.is_adjacent(start), "{step} is not next to {start}");
            assert!(maze.is_traversable(step));
            assert_eq!(distance(&maze, step, target, unblocked), Some(total - 1));
        }
    }
}

#[test]
fn test_next_step_is_deterministic() {
    let maze = Maze::classic().unwrap();
    let blocked = [Cell::new(3, 4), Cell::new(5, 6)];
    let is_blocked = |cell: Cell| blocked.contains(&cell);

    for &(start, target) in &[
        (Cell::new(1, 2), Cell::new(7, 12)),
        (Cell::new(7, 1), Cell::new(1, 12)),
        (Cell::new(5, 12), Cell::new(3, 3)),
    ] {
        let first = next_step(&maze, start, target, is_blocked);
        for _ in 0..10 {
            assert_eq!(next_step(&maze, start, target, is_blocked), first);
        }
    }
}

#[test]
fn test_paths_avoid_blocked_cells() {
    let maze = Maze::classic().unwrap();
    let blocked = Cell::new(5, 4);
    let path = shortest_path(&maze, Cell::new(5, 1), Cell::new(5, 8), |cell| cell == blocked).unwrap();

    assert_that(&path).does_not_contain(blocked);
    assert_eq!(path.first(), Some(&Cell::new(5, 1)));
    assert_eq!(path.last(), Some(&Cell::new(5, 8)));
    assert!(path.windows(2).all(|pair| pair[0].is_adjacent(pair[1])));
}

#[test]
fn test_unreachable_and_wall_targets() {
    let maze = Maze::parse(&["#######", "#.#...#", "#######"]).unwrap();
    assert_eq!(next_step(&maze, Cell::new(1, 1), Cell::new(1, 4), unblocked), None);
    assert_eq!(next_step(&maze, Cell::new(1, 3), Cell::new(1, 2), unblocked), None);
    assert_eq!(next_step(&maze, Cell::new(1, 3), Cell::new(1, 5), |cell| cell == Cell::new(1, 5)), None);
    assert_eq!(next_step(&maze, Cell::new(1, 3), Cell::new(1, 5), unblocked), Some(Cell::new(1, 4)));
}
