use std::io::Read;

use anyhow::Context;
use solver::util::place_endpoints;
use solver::{handle, parse_img, Algorithm, Point, Solver, SolverConfig};

const USAGE: &str = "usage: solve [REQUEST.json | -]
       solve MAZE.png ROW,COL ROW,COL ALGORITHM";

fn main() -> Result<(), anyhow::Error> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let solver = Solver::new(SolverConfig::load()?);
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => solve_request(&read_stdin()?, &solver),
        [path] if path == "-" => solve_request(&read_stdin()?, &solver),
        [path] => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read request {}", path))?;
            solve_request(&body, &solver)
        }
        [image, start, end, algorithm] => solve_image(image, start, end, algorithm, &solver),
        _ => anyhow::bail!(USAGE),
    }
}

fn read_stdin() -> Result<String, anyhow::Error> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("Failed to read request from stdin")?;
    Ok(body)
}

fn solve_request(body: &str, solver: &Solver) -> Result<(), anyhow::Error> {
    let response = handle(body, solver);
    println!("{}", response.to_json()?);

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

fn solve_image(
    image: &str,
    start: &str,
    end: &str,
    algorithm: &str,
    solver: &Solver,
) -> Result<(), anyhow::Error> {
    let img = image::open(image).with_context(|| format!("Failed to open {}", image))?;
    let mut grid = parse_img(&img)?;

    let start: Point = start.parse()?;
    let end: Point = end.parse()?;
    let algorithm: Algorithm = algorithm.parse()?;

    let solution = solver.solve(&grid, start, end, algorithm)?;
    place_endpoints(&mut grid, start, end);

    println!("{}", grid.render(&solution.visited, &solution.path));
    println!(
        "{}: visited {} cells, path length {}, {:.4} seconds",
        algorithm,
        solution.visited.len(),
        solution.path.len(),
        solution.execution_time()
    );

    Ok(())
}
