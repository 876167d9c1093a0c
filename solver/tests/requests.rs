use std::collections::HashSet;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::{json, Value};
use solver::{handle, Algorithm, Cell, Grid, Point, Solution, SolveResponse, Solver};

fn respond(body: Value) -> Value {
    let response = handle(&body.to_string(), &Solver::default());
    serde_json::from_str(&response.to_json().unwrap()).unwrap()
}

#[test]
fn test_maze_key_with_markers() {
    let reply = respond(json!({
        "maze": [
            ["start", "empty", "empty"],
            ["wall", "wall", "empty"],
            ["end", "empty", "empty"],
        ],
        "algorithm": "bfs",
    }));

    assert_eq!(
        reply["path"],
        json!([[0, 0], [0, 1], [0, 2], [1, 2], [2, 2], [2, 1], [2, 0]])
    );
    assert_eq!(reply["visited"].as_array().unwrap().len(), 7);
    assert!(reply["execution_time"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_explicit_coordinates() {
    let reply = respond(json!({
        "grid": [["empty", "empty"], ["empty", "empty"]],
        "start": [1, 1],
        "end": [0, 1],
        "algorithm": "dijkstra",
    }));

    assert_eq!(reply["path"], json!([[1, 1], [0, 1]]));
}

#[test]
fn test_unreachable_end_is_not_an_error() {
    let reply = respond(json!({
        "grid": [["start", "wall", "end"]],
        "algorithm": "astar",
    }));

    assert_eq!(reply["path"], json!([]));
    assert_eq!(reply["visited"], json!([[0, 0]]));
    assert!(reply.get("error").is_none());
}

#[test]
fn test_errors_are_reported_as_objects() {
    let reply = respond(json!({
        "grid": [["start", "end"]],
        "algorithm": "bogosort",
    }));
    assert_eq!(reply, json!({"error": "Invalid algorithm: \"bogosort\""}));

    let reply = respond(json!({
        "grid": [["empty", "end"]],
        "algorithm": "bfs",
    }));
    assert_eq!(reply, json!({"error": "Invalid start point: not set"}));

    let reply = respond(json!({
        "grid": [["start", "wall"]],
        "end": [0, 1],
        "algorithm": "bfs",
    }));
    assert_eq!(
        reply,
        json!({"error": "Invalid end point: (0, 1) is a wall"})
    );

    let reply = respond(json!({
        "grid": [["start", "end"]],
        "end": [4, 0],
        "algorithm": "dfs",
    }));
    assert_eq!(
        reply,
        json!({"error": "Invalid end point: (4, 0) is out of bounds"})
    );
}

#[test]
fn test_negative_coordinates_are_out_of_bounds() {
    let reply = respond(json!({
        "grid": [["start", "empty"], ["empty", "end"]],
        "start": [-1, 0],
        "end": [1, 1],
        "algorithm": "bfs",
    }));
    assert_eq!(
        reply,
        json!({"error": "Invalid start point: (-1, 0) is out of bounds"})
    );

    let reply = respond(json!({
        "grid": [["start", "empty"], ["empty", "end"]],
        "end": [0, -7],
        "algorithm": "dijkstra",
    }));
    assert_eq!(
        reply,
        json!({"error": "Invalid end point: (0, -7) is out of bounds"})
    );
}

#[test]
fn test_malformed_bodies() {
    let response = handle("{not json", &Solver::default());
    assert!(response.is_error());

    let response = handle(r#"{"grid": [], "algorithm": "bfs"}"#, &Solver::default());
    let SolveResponse::Failed { error } = response else {
        panic!("empty grid was accepted");
    };
    assert!(error.starts_with("Invalid maze format"));

    let response = handle(
        r#"{"grid": [["start"], ["end", "empty"]], "algorithm": "bfs"}"#,
        &Solver::default(),
    );
    assert!(response.is_error());
}

fn random_grid(rng: &mut StdRng, rows: usize, columns: usize) -> Grid {
    let mut grid = Grid::new(rows, columns);
    for row in 0..rows {
        for col in 0..columns {
            if rng.gen_bool(0.3) {
                grid.set(Point::new(row, col), Cell::Wall);
            }
        }
    }
    grid
}

fn assert_well_formed(grid: &Grid, start: Point, end: Point, solution: &Solution) {
    let unique: HashSet<_> = solution.visited.iter().collect();
    assert_eq!(unique.len(), solution.visited.len(), "cell expanded twice");
    assert!(solution.visited.iter().all(|&p| grid.is_passable(p)));

    if let (Some(first), Some(last)) = (solution.path.first(), solution.path.last()) {
        assert_eq!(*first, start);
        assert_eq!(*last, end);
        assert!(solution.path.windows(2).all(|w| w[0].is_adjacent(w[1])));
        assert!(solution.path.iter().all(|p| unique.contains(p)));
    }
}

#[test]
fn test_random_mazes() {
    let mut rng = StdRng::seed_from_u64(0x6d617a65);
    let solver = Solver::default();

    for _ in 0..200 {
        let rows = rng.gen_range(2..16);
        let columns = rng.gen_range(2..16);
        let mut grid = random_grid(&mut rng, rows, columns);

        let start = Point::new(0, 0);
        let end = Point::new(rows - 1, columns - 1);
        grid.set(start, Cell::Empty);
        grid.set(end, Cell::Empty);

        let solutions: Vec<_> = Algorithm::ALL
            .iter()
            .map(|&algorithm| (algorithm, solver.solve(&grid, start, end, algorithm).unwrap()))
            .collect();

        for (algorithm, solution) in &solutions {
            assert_well_formed(&grid, start, end, solution);

            let again = solver.solve(&grid, start, end, *algorithm).unwrap();
            assert_eq!(again.visited, solution.visited);
            assert_eq!(again.path, solution.path);
        }

        let shortest = solutions[0].1.path.len();
        for (algorithm, solution) in &solutions {
            if algorithm.is_optimal() {
                assert_eq!(solution.path.len(), shortest, "{} is not shortest", algorithm);
            } else {
                assert_eq!(solution.found(), shortest > 0);
            }
        }
    }
}
